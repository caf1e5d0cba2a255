// src/checker/mod.rs
// =============================================================================
// This module contains everything that looks at a single page or link.
//
// Submodules:
// - normalize: Turns raw href values into absolute URLs (or rejects them)
// - html: Fetches a page and extracts its links
// - http: The HTTP client and the link status checker
//
// This file (mod.rs) is the module root - it re-exports the public API so
// the rest of the crate can write `checker::extract_links()` instead of
// `checker::html::extract_links()`.
// =============================================================================

mod html;
mod http;
mod normalize;

pub use html::extract_links;
pub use http::{is_broken, HttpClient, CONNECTION_ERROR};
pub use normalize::{authority, authority_of};

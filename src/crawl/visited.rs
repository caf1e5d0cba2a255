// src/crawl/visited.rs
// =============================================================================
// The set of URLs a crawl has already dealt with.
//
// One registry per crawl run, shared by every worker through an Arc.
// URLs go in at most once and never come out.
//
// The important operation is insert_if_new: checking and marking happen
// under one lock, so two workers can never both decide the same URL is new.
// The separate contains/mark pair is still useful for cheap "should I bother"
// checks where an occasional duplicate is harmless.
// =============================================================================

use std::collections::HashSet;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
pub struct VisitedRegistry {
    urls: Mutex<HashSet<String>>,
}

impl VisitedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn contains(&self, url: &str) -> bool {
        self.urls.lock().await.contains(url)
    }

    /// Idempotent insert
    pub async fn mark(&self, url: &str) {
        self.urls.lock().await.insert(url.to_string());
    }

    /// Marks `url` and returns true if nobody had marked it before
    pub async fn insert_if_new(&self, url: &str) -> bool {
        self.urls.lock().await.insert(url.to_string())
    }

    pub async fn len(&self) -> usize {
        self.urls.lock().await.len()
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why tokio::sync::Mutex and not std::sync::Mutex?
//    - Workers are async tasks; tokio's lock can be awaited without blocking
//      the thread the task runs on
//    - It also can't be "poisoned" by a panicking holder, so lock() has no
//      Result to unwrap
//
// 2. Why &self everywhere, even for mark()?
//    - The registry is shared through an Arc, which only hands out shared
//      references
//    - The Mutex provides the mutability inside ("interior mutability")
// -----------------------------------------------------------------------------

// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Breadth-first crawling starting from a seed URL
// - Stays on the seed's host; links to other hosts are checked, not crawled
// - Sequential or worker-pool scheduling
// - Graceful early termination through a CancellationToken
//
// Submodules:
// - frontier: FIFO queue of pages waiting to be crawled
// - visited: concurrency-safe set of URLs already handled
// - queue: the scheduler that ties everything together
// =============================================================================

mod frontier;
mod queue;
mod visited;

// Re-export the crawler API
pub use queue::{CrawlEvent, Crawler};

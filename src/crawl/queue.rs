// src/crawl/queue.rs
// =============================================================================
// This module drives the crawl: a breadth-first walk over one website.
//
// How it works:
// 1. Start with the seed URL in the frontier
// 2. A worker takes the front URL; if it was already visited, drop it
// 3. Mark it visited, fetch it and extract its links
// 4. Status-check every link that hasn't been visited yet
//    - broken links (status 0 or >= 400) are recorded with the page they
//      were found on
//    - links on the seed's host go to the back of the frontier
//    - links on other hosts are marked visited right away: checked once,
//      never crawled
// 5. Repeat until the frontier is empty and no worker is busy, or until
//    the cancellation token fires
//
// Concurrency:
// - N workers share one session (frontier, visited registry, broken list)
// - Each worker runs up to `check_concurrency` status checks at once
// - With 1 worker and 1 check at a time the crawl is strictly FIFO
//
// The "already visited?" question is asked twice: before a link is checked
// and queued, and again when a page is taken off the frontier. Only the
// second one (insert_if_new) is atomic. Between the two, two workers may
// both status-check the same link; that costs an extra HEAD request and
// nothing else.
// =============================================================================

use super::frontier::Frontier;
use super::visited::VisitedRegistry;
use crate::checker::{authority, authority_of, extract_links, is_broken, HttpClient};
use crate::config::CrawlConfig;
use crate::error::{CrawlError, Result};
use crate::report::BrokenLink;
use futures::stream::{self, StreamExt};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, Notify};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};
use url::Url;

/// Progress notifications, one per page visited and one per link checked
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlEvent {
    PageVisited {
        url: String,
    },
    LinkChecked {
        url: String,
        status_code: u16,
        context_url: String,
    },
}

pub type ProgressCallback = Arc<dyn Fn(CrawlEvent) + Send + Sync>;

/// What a crawl hands back, whether it finished or was interrupted
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    pub broken: Vec<BrokenLink>,
    pub pages_visited: usize,
    pub links_checked: usize,
    pub cancelled: bool,
}

pub struct Crawler {
    client: HttpClient,
    workers: usize,
    check_concurrency: usize,
    progress_callback: Option<ProgressCallback>,
}

impl Crawler {
    pub fn new(config: &CrawlConfig) -> Result<Self> {
        Ok(Self {
            client: HttpClient::new(config)?,
            workers: config.workers.max(1),
            check_concurrency: config.check_concurrency.max(1),
            progress_callback: None,
        })
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    // Crawls the site behind `seed_url`.
    //
    // Every call gets its own frontier, visited registry and broken list, so
    // one Crawler can run several crawls without them seeing each other.
    //
    // Only a bad seed URL is an error. Cancelling `cancel` ends the crawl
    // early and returns whatever was found up to that point.
    pub async fn crawl(&self, seed_url: &str, cancel: CancellationToken) -> Result<CrawlOutcome> {
        let (seed, seed_authority) = parse_seed(seed_url)?;
        info!(
            "Starting crawl of {} with {} workers ({} checks each)",
            seed, self.workers, self.check_concurrency
        );

        let session = Arc::new(CrawlSession {
            work: Mutex::new(WorkQueue {
                frontier: Frontier::with_seed(seed.as_str()),
                in_flight: 0,
            }),
            seed,
            seed_authority,
            client: self.client.clone(),
            check_concurrency: self.check_concurrency,
            progress: self.progress_callback.clone(),
            visited: VisitedRegistry::new(),
            broken: Mutex::new(Vec::new()),
            idle: Notify::new(),
            stop: cancel.child_token(),
            pages_visited: AtomicUsize::new(0),
            links_checked: AtomicUsize::new(0),
        });

        let mut workers = JoinSet::new();
        for worker_id in 0..self.workers {
            let session = session.clone();
            workers.spawn(async move { session.run_worker(worker_id).await });
        }

        while let Some(joined) = workers.join_next().await {
            if let Err(e) = joined {
                // A dead worker may leave a page "in flight" forever, so
                // stop the others instead of letting them wait for it
                error!("Worker task failed: {}", e);
                session.stop.cancel();
            }
        }

        let broken = std::mem::take(&mut *session.broken.lock().await);
        let outcome = CrawlOutcome {
            broken,
            pages_visited: session.pages_visited.load(Ordering::Relaxed),
            links_checked: session.links_checked.load(Ordering::Relaxed),
            cancelled: cancel.is_cancelled(),
        };

        info!(
            "Crawl {}. Visited {} pages, checked {} links ({} URLs seen), {} broken",
            if outcome.cancelled { "cancelled" } else { "complete" },
            outcome.pages_visited,
            outcome.links_checked,
            session.visited.len().await,
            outcome.broken.len()
        );
        Ok(outcome)
    }
}

fn parse_seed(seed_url: &str) -> Result<(Url, String)> {
    let seed =
        Url::parse(seed_url).map_err(|e| CrawlError::invalid_seed(seed_url, e.to_string()))?;

    if seed.scheme() != "http" && seed.scheme() != "https" {
        return Err(CrawlError::invalid_seed(
            seed_url,
            "only http and https are supported",
        ));
    }

    let seed_authority =
        authority(&seed).ok_or_else(|| CrawlError::invalid_seed(seed_url, "URL has no host"))?;
    Ok((seed, seed_authority))
}

// Frontier plus the number of pages currently being processed. Both live
// under one lock: "frontier empty and nobody busy" is the end condition.
struct WorkQueue {
    frontier: Frontier,
    in_flight: usize,
}

enum Next {
    Page(String),
    Wait,
    Done,
}

struct CrawlSession {
    seed: Url,
    seed_authority: String,
    client: HttpClient,
    check_concurrency: usize,
    progress: Option<ProgressCallback>,
    work: Mutex<WorkQueue>,
    visited: VisitedRegistry,
    broken: Mutex<Vec<BrokenLink>>,
    /// Wakes idle workers when work arrives or the last page finishes
    idle: Notify,
    stop: CancellationToken,
    pages_visited: AtomicUsize,
    links_checked: AtomicUsize,
}

impl CrawlSession {
    async fn run_worker(&self, worker_id: usize) {
        debug!("Worker {} started", worker_id);

        loop {
            if self.stop.is_cancelled() {
                break;
            }

            // Register for wakeups before looking at the queue, otherwise a
            // notification between the look and the wait would be lost
            let idle = self.idle.notified();

            match self.next_page().await {
                Next::Page(url) => {
                    self.visit_page(&url).await;
                    self.finish_page().await;
                }
                Next::Wait => {
                    tokio::select! {
                        _ = idle => {}
                        _ = self.stop.cancelled() => break,
                    }
                }
                Next::Done => {
                    self.idle.notify_waiters();
                    break;
                }
            }
        }

        debug!("Worker {} finished", worker_id);
    }

    async fn next_page(&self) -> Next {
        let mut work = self.work.lock().await;
        match work.frontier.pop() {
            Some(url) => {
                work.in_flight += 1;
                Next::Page(url)
            }
            None if work.in_flight == 0 => Next::Done,
            None => Next::Wait,
        }
    }

    async fn finish_page(&self) {
        {
            let mut work = self.work.lock().await;
            work.in_flight -= 1;
        }
        self.idle.notify_waiters();
    }

    async fn visit_page(&self, url: &str) {
        if !self.visited.insert_if_new(url).await {
            debug!("Already visited {}, skipping", url);
            return;
        }

        self.pages_visited.fetch_add(1, Ordering::Relaxed);
        self.emit(CrawlEvent::PageVisited {
            url: url.to_string(),
        });

        let links = extract_links(&self.client, url, &self.seed).await;

        // `buffered` keeps results in document order, so frontier admission
        // stays breadth-first even when checks finish out of order
        let mut checks = stream::iter(links)
            .map(|link| self.check_link(link))
            .buffered(self.check_concurrency);

        while let Some(checked) = checks.next().await {
            if let Some((link, status_code)) = checked {
                self.record(link, status_code, url).await;
            }
        }
    }

    // Returns None when the link was skipped
    async fn check_link(&self, link: String) -> Option<(String, u16)> {
        if self.stop.is_cancelled() {
            return None;
        }
        if self.visited.contains(&link).await {
            debug!("Already visited {}, not checking again", link);
            return None;
        }

        let status_code = self.client.check_status(&link).await;
        self.links_checked.fetch_add(1, Ordering::Relaxed);
        Some((link, status_code))
    }

    async fn record(&self, link: String, status_code: u16, context_url: &str) {
        self.emit(CrawlEvent::LinkChecked {
            url: link.clone(),
            status_code,
            context_url: context_url.to_string(),
        });

        if is_broken(status_code) {
            self.broken
                .lock()
                .await
                .push(BrokenLink::new(link.as_str(), status_code, context_url));
        }

        if self.is_in_scope(&link) {
            self.enqueue(link).await;
        } else {
            debug!("  -> Other host, checked but not followed: {}", link);
            self.visited.mark(&link).await;
        }
    }

    fn is_in_scope(&self, link: &str) -> bool {
        authority_of(link).as_deref() == Some(self.seed_authority.as_str())
    }

    async fn enqueue(&self, link: String) {
        if self.visited.contains(&link).await {
            return;
        }

        let queued = self.work.lock().await.frontier.push(link);
        if queued {
            self.idle.notify_waiters();
        }
    }

    fn emit(&self, event: CrawlEvent) {
        if let Some(ref callback) = self.progress {
            callback(event);
        }
    }
}

// src/config.rs
// =============================================================================
// Settings for one crawl run.
//
// There is no configuration file: the CLI fills in a CrawlConfig and hands
// it to the Crawler. Defaults match a polite-but-quick scan:
// - pages time out after 10 seconds
// - status checks (HEAD) time out after half of that
// - 4 pages are processed at once, with up to 8 status checks each
// =============================================================================

use std::time::Duration;

/// Identification header sent on every request. Some servers refuse
/// requests that don't look like a browser.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

pub const DEFAULT_PAGE_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_WORKERS: usize = 4;
pub const DEFAULT_CHECK_CONCURRENCY: usize = 8;

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// How many pages are fetched and processed at the same time
    pub workers: usize,
    /// How many status checks run at the same time for one page
    pub check_concurrency: usize,
    /// Timeout for page fetches and GET fallbacks
    pub page_timeout: Duration,
    pub user_agent: String,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            check_concurrency: DEFAULT_CHECK_CONCURRENCY,
            page_timeout: DEFAULT_PAGE_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl CrawlConfig {
    /// One worker, one check at a time: the frontier is processed strictly
    /// in FIFO order and links are checked in document order.
    pub fn sequential() -> Self {
        Self {
            workers: 1,
            check_concurrency: 1,
            ..Self::default()
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_check_concurrency(mut self, check_concurrency: usize) -> Self {
        self.check_concurrency = check_concurrency.max(1);
        self
    }

    pub fn with_page_timeout(mut self, timeout: Duration) -> Self {
        self.page_timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// HEAD requests get half the page timeout
    pub fn check_timeout(&self) -> Duration {
        self.page_timeout / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeouts() {
        let config = CrawlConfig::default();
        assert_eq!(config.page_timeout, Duration::from_secs(10));
        assert_eq!(config.check_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_sequential_is_single_worker() {
        let config = CrawlConfig::sequential();
        assert_eq!(config.workers, 1);
        assert_eq!(config.check_concurrency, 1);
    }

    #[test]
    fn test_zero_workers_clamped() {
        let config = CrawlConfig::default()
            .with_workers(0)
            .with_check_concurrency(0);
        assert_eq!(config.workers, 1);
        assert_eq!(config.check_concurrency, 1);
    }
}

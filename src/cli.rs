// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API: the struct below *is* the CLI, and clap generates
// the parsing, --help and --version output from it.
// =============================================================================

use crate::config::{CrawlConfig, DEFAULT_CHECK_CONCURRENCY, DEFAULT_WORKERS};
use clap::Parser;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "link-crawler",
    version,
    about = "Crawl a website and report every broken link on it",
    long_about = "link-crawler starts at a URL, follows every link on the same host, \
                  and checks every link it finds (including links to other sites). \
                  Links that answer with 4xx/5xx or can't be reached are reported, \
                  grouped by status code. Press Ctrl-C to stop early and see the \
                  results so far."
)]
pub struct Cli {
    /// Website URL to crawl (e.g., https://example.com)
    pub url: String,

    /// Number of pages processed at the same time
    #[arg(long, default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,

    /// Number of status checks running at the same time, per page
    #[arg(long, default_value_t = DEFAULT_CHECK_CONCURRENCY)]
    pub concurrency: usize,

    /// One page and one check at a time, in strict breadth-first order
    ///
    /// Overrides --workers and --concurrency
    #[arg(long)]
    pub sequential: bool,

    /// Page fetch timeout in seconds (status checks get half of it)
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Override the browser-like User-Agent header
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Output the report as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// More log output on stderr (-v debug, -vv trace). RUST_LOG wins if set.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn crawl_config(&self) -> CrawlConfig {
        let config = if self.sequential {
            CrawlConfig::sequential()
        } else {
            CrawlConfig::default()
                .with_workers(self.workers)
                .with_check_concurrency(self.concurrency)
        };

        let config = config.with_page_timeout(Duration::from_secs(self.timeout));
        match &self.user_agent {
            Some(user_agent) => config.with_user_agent(user_agent.as_str()),
            None => config,
        }
    }

    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}

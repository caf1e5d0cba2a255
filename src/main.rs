// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (tracing) on stderr
// 3. Crawl the site, printing a line per page and per checked link
// 4. Print the broken links report (text or JSON) and the elapsed time
// 5. Exit with proper code (0 = no broken links, 1 = broken links, 2 = error)
//
// Ctrl-C doesn't kill the program: it stops the crawl and the report is
// printed for whatever was found so far.
// =============================================================================

mod checker; // src/checker/ - link extraction and status checks
mod cli; // src/cli.rs - command-line parsing
mod config; // src/config.rs - crawl settings
mod crawl; // src/crawl/ - the breadth-first crawler
mod error; // src/error.rs - fatal errors
mod report; // src/report.rs - grouping and rendering results

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use crawl::{CrawlEvent, Crawler};
use report::Report;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = no broken links
//   Ok(1) = broken links found
//   Err = the crawl could not start (bad URL, HTTP client failure)
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_tracing(cli.log_level());

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\n[!] Interrupted by user. Displaying results so far...");
            interrupt.cancel();
        }
    });

    let mut crawler = Crawler::new(&cli.crawl_config())?;

    // Keep stdout clean for --json
    if !cli.json {
        println!("🔍 Starting link check for: {}", cli.url);
        crawler = crawler.with_progress_callback(Arc::new(print_progress));
    }

    let start = Instant::now();
    let outcome = crawler.crawl(&cli.url, cancel).await?;
    let elapsed = start.elapsed();

    let report = Report::new(
        &outcome.broken,
        outcome.pages_visited,
        outcome.links_checked,
        outcome.cancelled,
    )
    .with_elapsed(elapsed);

    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        println!("\nCompleted in {:.2} seconds", elapsed.as_secs_f64());
        print!("{}", report.render());
    }

    if report.is_clean() {
        Ok(0)
    } else {
        Ok(1)
    }
}

fn init_tracing(level: &str) {
    // RUST_LOG takes precedence over -v
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,link_crawler={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_progress(event: CrawlEvent) {
    match event {
        CrawlEvent::PageVisited { url } => println!("Checking: {}", url),
        CrawlEvent::LinkChecked {
            url, status_code, ..
        } => {
            let status = if status_code == checker::CONNECTION_ERROR {
                "ERR".to_string()
            } else {
                status_code.to_string()
            };
            let marker = if checker::is_broken(status_code) { "❌" } else { "✅" };
            println!("   {} [{}] {}", marker, status, url);
        }
    }
}

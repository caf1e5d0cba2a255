// src/checker/html.rs
// =============================================================================
// This module finds links on HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// Every href goes through normalize_link, so the result only ever holds
// absolute http(s) URLs.
// =============================================================================

use super::http::HttpClient;
use super::normalize::normalize_link;
use scraper::{Html, Selector};
use std::collections::HashSet;
use tracing::{debug, warn};
use url::Url;

// Returns the raw href values of all <a href> elements, in document order
//
// Example:
//   html = "<a href='/docs'>Docs</a><a href='#top'>Top</a>"
//   result = ["/docs", "#top"]
pub fn parse_anchors(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    // "a[href]" is a constant, known-valid selector
    let selector = Selector::parse("a[href]").expect("a[href] is a valid selector");

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(|href| href.to_string())
        .collect()
}

// Normalizes a list of raw hrefs against `base`, dropping rejected ones and
// repeats (first occurrence wins, order is kept)
pub fn normalize_links(hrefs: &[String], base: &Url) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for href in hrefs {
        match normalize_link(href, base) {
            Some(link) => {
                if seen.insert(link.clone()) {
                    links.push(link);
                }
            }
            None => debug!("Skipping href {:?}", href),
        }
    }

    links
}

// Fetches `url` and returns the normalized outbound links found on it.
//
// Parameters:
//   client: the crawl's shared HTTP client
//   url: the page to fetch
//   base: the URL relative links are resolved against (the crawl seed)
//
// Returns an empty Vec when the fetch fails or the server answers with
// anything other than 2xx. A page is never partially parsed.
pub async fn extract_links(client: &HttpClient, url: &str, base: &Url) -> Vec<String> {
    let (status, body) = match client.get(url, client.page_timeout()).await {
        Ok(response) => response,
        Err(e) => {
            warn!("Error making request to {}: {}", url, e);
            return Vec::new();
        }
    };

    if !(200..300).contains(&status) {
        warn!("Received status code {} for URL: {}", status, url);
        return Vec::new();
    }

    let hrefs = parse_anchors(&body);
    let links = normalize_links(&hrefs, base);
    debug!("{} of {} hrefs on {} are links", links.len(), hrefs.len(), url);
    links
}

// src/report.rs
// =============================================================================
// Turns the list of broken links into something a human (or a script) can
// read.
//
// Links are grouped by status code, groups sorted ascending, so 0
// (connection errors) always comes first. Within a group links keep the
// order they were found in. Everything here is a pure transformation.
// =============================================================================

use crate::checker::CONNECTION_ERROR;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write;
use std::time::Duration;

/// One failing link and the page it was found on.
///
/// A link that is broken on three different pages shows up three times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokenLink {
    pub url: String,
    /// HTTP status, or 0 when the server could not be reached
    pub status_code: u16,
    pub context_url: String,
}

impl BrokenLink {
    pub fn new(
        url: impl Into<String>,
        status_code: u16,
        context_url: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            status_code,
            context_url: context_url.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusGroup {
    pub status_code: u16,
    pub links: Vec<BrokenLink>,
}

impl StatusGroup {
    pub fn label(&self) -> String {
        if self.status_code == CONNECTION_ERROR {
            "Connection Error".to_string()
        } else {
            self.status_code.to_string()
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub total: usize,
    pub pages_visited: usize,
    pub links_checked: usize,
    pub cancelled: bool,
    pub elapsed_secs: f64,
    pub groups: Vec<StatusGroup>,
}

impl Report {
    pub fn new(
        broken: &[BrokenLink],
        pages_visited: usize,
        links_checked: usize,
        cancelled: bool,
    ) -> Self {
        Self {
            total: broken.len(),
            pages_visited,
            links_checked,
            cancelled,
            elapsed_secs: 0.0,
            groups: group_by_status(broken),
        }
    }

    pub fn with_elapsed(mut self, elapsed: Duration) -> Self {
        self.elapsed_secs = elapsed.as_secs_f64();
        self
    }

    pub fn is_clean(&self) -> bool {
        self.total == 0
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    // Renders the text report
    //
    //   ===== BROKEN LINKS REPORT =====
    //   Found 1 broken links:
    //
    //   == Status Code: 404 (1 links) ==
    //     • https://a.test/missing
    //       Found on: https://a.test/
    pub fn render(&self) -> String {
        let mut out = String::new();

        if self.is_clean() {
            out.push_str("\n✅ No broken links found!\n");
        } else {
            out.push_str("\n===== BROKEN LINKS REPORT =====\n");
            let _ = writeln!(out, "Found {} broken links:", self.total);

            for group in &self.groups {
                let _ = writeln!(
                    out,
                    "\n== Status Code: {} ({} links) ==",
                    group.label(),
                    group.links.len()
                );
                for link in &group.links {
                    let _ = writeln!(out, "  • {}", link.url);
                    let _ = writeln!(out, "    Found on: {}", link.context_url);
                    out.push('\n');
                }
            }
        }

        out.push_str("\n📊 Summary:\n");
        let _ = writeln!(out, "   📄 Pages visited: {}", self.pages_visited);
        let _ = writeln!(out, "   🔗 Links checked: {}", self.links_checked);
        let _ = writeln!(out, "   ❌ Broken: {}", self.total);
        if self.cancelled {
            out.push_str("   ⚠️  Crawl was interrupted, results are partial\n");
        }

        out
    }
}

/// Groups broken links by status code, lowest code first
pub fn group_by_status(broken: &[BrokenLink]) -> Vec<StatusGroup> {
    let mut by_status: BTreeMap<u16, Vec<BrokenLink>> = BTreeMap::new();
    for link in broken {
        by_status
            .entry(link.status_code)
            .or_default()
            .push(link.clone());
    }

    by_status
        .into_iter()
        .map(|(status_code, links)| StatusGroup { status_code, links })
        .collect()
}

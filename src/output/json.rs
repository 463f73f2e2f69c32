//! JSON broken-link report
//!
//! The report is the crawl's primary artifact:
//!
//! ```json
//! {
//!   "broken_links": [{ "url": "https://example.com/missing", "reason": "HTTP 404" }],
//!   "total_visited": 4,
//!   "seed": "https://example.com/",
//!   "started_at": "2024-01-01T00:00:00Z",
//!   "finished_at": "2024-01-01T00:00:12.500Z"
//! }
//! ```

use crate::output::traits::{write_file, OutputHandler, OutputResult};
use crate::state::{BrokenLink, CrawlResult};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize)]
struct BrokenLinkReport<'a> {
    broken_links: &'a [BrokenLink],
    total_visited: usize,
    seed: &'a str,
    started_at: DateTime<Utc>,
    finished_at: DateTime<Utc>,
}

impl<'a> From<&'a CrawlResult> for BrokenLinkReport<'a> {
    fn from(result: &'a CrawlResult) -> Self {
        Self {
            broken_links: result.broken_links(),
            total_visited: result.total_visited(),
            seed: result.seed().as_str(),
            started_at: result.started_at(),
            finished_at: result.finished_at(),
        }
    }
}

/// Formats a crawl result as the pretty-printed JSON report
pub fn format_json_report(result: &CrawlResult) -> OutputResult<String> {
    let mut json = serde_json::to_string_pretty(&BrokenLinkReport::from(result))?;
    json.push('\n');
    Ok(json)
}

/// Writes the JSON broken-link report to a file
#[derive(Debug, Clone)]
pub struct JsonReport {
    path: PathBuf,
}

impl JsonReport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputHandler for JsonReport {
    fn name(&self) -> &'static str {
        "json"
    }

    fn write(&self, result: &CrawlResult) -> OutputResult<()> {
        let json = format_json_report(result)?;
        write_file(&self.path, &json)
    }
}

//! Markdown summary generation
//!
//! This module generates a human-readable markdown summary of a crawl,
//! including run information, statistics and the broken link table.

use crate::output::traits::{write_file, OutputHandler, OutputResult};
use crate::state::CrawlResult;
use std::path::PathBuf;

/// Writes a markdown summary to a file
#[derive(Debug, Clone)]
pub struct MarkdownReport {
    path: PathBuf,
    config_hash: Option<String>,
}

impl MarkdownReport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config_hash: None,
        }
    }

    /// Records the hash of the configuration file used for the run
    pub fn with_config_hash(mut self, hash: impl Into<String>) -> Self {
        self.config_hash = Some(hash.into());
        self
    }
}

impl OutputHandler for MarkdownReport {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn write(&self, result: &CrawlResult) -> OutputResult<()> {
        let markdown = format_markdown_summary(result, self.config_hash.as_deref());
        write_file(&self.path, &markdown)
    }
}

/// Formats a crawl result as markdown
///
/// # Arguments
///
/// * `result` - The finished crawl
/// * `config_hash` - Hash of the config file, if one was loaded
///
/// # Returns
///
/// A formatted markdown string
pub fn format_markdown_summary(result: &CrawlResult, config_hash: Option<&str>) -> String {
    let mut md = String::new();

    md.push_str("# Sumi-Linkcheck Crawl Summary\n\n");

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Seed**: {}\n", result.seed()));
    md.push_str(&format!("- **Started**: {}\n", result.started_at().to_rfc3339()));
    md.push_str(&format!("- **Finished**: {}\n", result.finished_at().to_rfc3339()));
    md.push_str(&format!(
        "- **Duration**: {:.1} seconds\n",
        result.duration_seconds()
    ));
    if let Some(hash) = config_hash {
        md.push_str(&format!("- **Config Hash**: {}\n", hash));
    }
    md.push('\n');

    // Overall statistics
    md.push_str("## Overall Statistics\n\n");
    md.push_str(&format!("- **Pages Visited**: {}\n", result.total_visited()));
    md.push_str(&format!("- **Broken Links**: {}\n", result.broken_count()));
    md.push_str(&format!(
        "- **Success Rate**: {:.2}%\n\n",
        result.success_rate()
    ));

    if result.broken_links().is_empty() {
        md.push_str("No broken links found.\n");
        return md;
    }

    // Failure breakdown
    md.push_str("## Failure Breakdown\n\n");
    md.push_str("| Failure | Count |\n");
    md.push_str("|---------|-------|\n");
    for (kind, count) in result.broken_by_kind() {
        md.push_str(&format!("| {} | {} |\n", kind, count));
    }
    md.push('\n');

    md.push_str("## Broken Links\n\n");
    md.push_str("| URL | Reason |\n");
    md.push_str("|-----|--------|\n");
    for link in result.broken_links() {
        md.push_str(&format!(
            "| {} | {} |\n",
            escape_cell(link.url.as_str()),
            escape_cell(&link.reason.to_string())
        ));
    }

    md
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

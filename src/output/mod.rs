//! Output module for crawl reports
//!
//! This module handles:
//! - Writing the JSON broken-link report
//! - Generating an optional markdown summary
//! - Printing the console summary

mod json;
mod markdown;
pub mod stats;
mod traits;

pub use json::{format_json_report, JsonReport};
pub use markdown::{format_markdown_summary, MarkdownReport};
pub use stats::{format_summary, print_summary};
pub use traits::{OutputError, OutputHandler, OutputResult};

use crate::config::Config;
use crate::state::CrawlResult;
use crate::SumiError;

/// Builds the file sinks requested by the configuration
///
/// The JSON report is always produced; the markdown summary only when
/// `summary-path` is set.
pub fn handlers_from_config(
    config: &Config,
    config_hash: Option<&str>,
) -> Vec<Box<dyn OutputHandler>> {
    let mut handlers: Vec<Box<dyn OutputHandler>> =
        vec![Box::new(JsonReport::new(&config.output.broken_links_path))];

    if let Some(path) = &config.output.summary_path {
        let mut report = MarkdownReport::new(path);
        if let Some(hash) = config_hash {
            report = report.with_config_hash(hash);
        }
        handlers.push(Box::new(report));
    }

    handlers
}

/// Runs every handler, stopping at the first failure
///
/// # Returns
///
/// * `Ok(())` - Every sink was written
/// * `Err(SumiError::Output)` - A sink failed; later sinks are not run
pub fn write_all(
    handlers: &[Box<dyn OutputHandler>],
    result: &CrawlResult,
) -> Result<(), SumiError> {
    for handler in handlers {
        handler.write(result)?;
        tracing::debug!("Wrote {} output", handler.name());
    }
    Ok(())
}

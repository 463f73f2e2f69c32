//! Output handler traits and types
//!
//! This module defines the trait interface for result sinks.

use crate::state::CrawlResult;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output to {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to format output: {0}")]
    Format(String),
}

impl From<serde_json::Error> for OutputError {
    fn from(e: serde_json::Error) -> Self {
        Self::Format(e.to_string())
    }
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for output handlers
///
/// An output handler persists a finished [`CrawlResult`]. Handlers only read
/// the result; they are invoked once, after the crawl has completed.
pub trait OutputHandler {
    /// Short name used in log lines
    fn name(&self) -> &'static str;

    /// Writes the result to the handler's destination
    fn write(&self, result: &CrawlResult) -> OutputResult<()>;
}

/// Writes `content` to `path`, creating parent directories as needed
pub(crate) fn write_file(path: &std::path::Path, content: &str) -> OutputResult<()> {
    let with_path = |source| OutputError::Write {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(with_path)?;
    }
    std::fs::write(path, content).map_err(with_path)
}

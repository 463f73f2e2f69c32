//! Sumi-Linkcheck: a single-domain broken link crawler
//!
//! This crate crawls every page reachable from a seed URL on the seed's own host,
//! deduplicating visits by normalized URL and classifying each discovered link as
//! working or broken.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Sumi-Linkcheck operations
///
/// Only failures that stop the whole run end up here. Per-URL failures are
/// recorded as [`state::BrokenLink`]s and never abort a crawl.
#[derive(Debug, Error)]
pub enum SumiError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("Failed to initialize fetch capability: {0}")]
    Setup(String),

    #[error("Seed URL {url} is unreachable: {reason}")]
    SeedUnreachable {
        url: String,
        reason: state::FailureReason,
    },

    #[error("Crawl worker failed: {0}")]
    Worker(String),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Result type alias for Sumi-Linkcheck operations
pub type Result<T> = std::result::Result<T, SumiError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, Coordinator};
pub use state::{BrokenLink, CrawlResult, FailureReason};
pub use url::{normalize, normalize_url, parse_seed, NormalizedUrl};

//! Configuration module for Sumi-Linkcheck
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! A configuration file is optional; [`Config::default`] is a valid configuration.
//!
//! # Example
//!
//! ```no_run
//! use sumi_linkcheck::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("linkcheck.toml")).unwrap();
//! println!("Fetch timeout: {:?}", config.crawler.fetch_timeout());
//! ```

mod overrides;
mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, OutputConfig, UserAgentConfig, DEFAULT_FETCH_TIMEOUT_SECS,
    DEFAULT_MAX_REDIRECTS, MAX_WORKERS,
};

pub use overrides::{apply_overrides, Overrides};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;

//! Command-line overrides layered on top of a loaded configuration

use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;

/// Settings given on the command line; `None` keeps the file's value
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub workers: Option<u32>,
    pub fetch_timeout_secs: Option<u64>,
    pub broken_links_path: Option<String>,
}

/// Applies overrides and validates the merged configuration
///
/// The file was validated on load, but an override can still push a value
/// out of range, so the merged result is checked again.
///
/// # Returns
///
/// * `Ok(Config)` - The merged, valid configuration
/// * `Err(ConfigError::Validation)` - An override is out of range
pub fn apply_overrides(mut config: Config, overrides: &Overrides) -> Result<Config, ConfigError> {
    if let Some(workers) = overrides.workers {
        config.crawler.workers = Some(workers);
    }
    if let Some(timeout) = overrides.fetch_timeout_secs {
        config.crawler.fetch_timeout_secs = timeout;
    }
    if let Some(path) = &overrides.broken_links_path {
        config.output.broken_links_path = path.clone();
    }

    validate(&config)?;
    Ok(config)
}

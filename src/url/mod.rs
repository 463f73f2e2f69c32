//! URL handling module for Sumi-Linkcheck
//!
//! This module provides URL normalization (the crawl's dedup key), seed
//! parsing, and the same-domain check that keeps a crawl on the seed's host.

mod domain;
mod normalize;

// Re-export main functions
pub use domain::{extract_domain, same_authority};
pub use normalize::{normalize, normalize_url, parse_seed, NormalizedUrl};

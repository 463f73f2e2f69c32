//! State module for the outcome of a crawl
//!
//! # Components
//!
//! - `FailureReason`: Why a single URL was classified as broken
//! - `BrokenLink`: An append-only record of one broken URL
//! - `CrawlResult`: The immutable aggregate produced when a crawl completes

mod broken_link;
mod crawl_result;

// Re-export main types
pub use broken_link::{BrokenLink, FailureReason};
pub use crawl_result::CrawlResult;

#[cfg(test)]
pub(crate) use crawl_result::tests::sample_result;

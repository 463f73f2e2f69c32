//! Crawler module for single-domain link checking
//!
//! This module contains the core crawling logic, including:
//! - The fetch capability and its HTTP implementation
//! - HTML link extraction restricted to the seed's host
//! - The frontier queue and the visited set shared by workers
//! - Overall crawl coordination

mod coordinator;
mod extractor;
mod fetcher;
mod frontier;
mod visited;

pub use coordinator::Coordinator;
pub use extractor::{ExtractError, HtmlLinkExtractor, LinkExtractor};
pub use fetcher::{build_http_client, HttpFetcher, Page, PageFetcher};
pub use frontier::{Frontier, InFlight};
pub use visited::VisitedSet;

use crate::config::Config;
use crate::state::CrawlResult;
use crate::SumiError;
use url::Url;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Acquire the HTTP fetch capability
/// 2. Seed the frontier with `seed`
/// 3. Run the worker pool until the frontier drains
/// 4. Return the aggregated result
///
/// # Returns
///
/// * `Ok(CrawlResult)` - Crawl completed (broken links are part of the result)
/// * `Err(SumiError)` - Setup failed or the seed was unreachable
///
/// # Example
///
/// ```no_run
/// use sumi_linkcheck::config::Config;
/// use sumi_linkcheck::crawler::crawl;
/// use sumi_linkcheck::url::parse_seed;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let seed = parse_seed("https://example.com/")?;
/// let result = crawl(&Config::default(), &seed).await?;
/// println!("{} broken links", result.broken_count());
/// # Ok(())
/// # }
/// ```
pub async fn crawl(config: &Config, seed: &Url) -> Result<CrawlResult, SumiError> {
    let coordinator = Coordinator::from_config(config)?;
    coordinator.crawl(seed).await
}

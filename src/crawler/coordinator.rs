//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the worker pool that drives the crawl:
//! - Seeding the frontier
//! - Dequeuing, normalizing and claiming URLs
//! - Coordinating fetching and link extraction
//! - Recording broken links
//! - Detecting when the frontier has permanently drained

use crate::config::Config;
use crate::crawler::extractor::{HtmlLinkExtractor, LinkExtractor};
use crate::crawler::fetcher::{HttpFetcher, PageFetcher};
use crate::crawler::frontier::Frontier;
use crate::crawler::visited::VisitedSet;
use crate::state::{BrokenLink, CrawlResult, FailureReason};
use crate::url::{normalize_url, same_authority, NormalizedUrl};
use crate::SumiError;
use chrono::Utc;
use std::sync::{Arc, Mutex};
use url::Url;

/// Main crawler coordinator structure
///
/// Holds the injected fetch and extract capabilities. Each call to
/// [`Coordinator::crawl`] creates a fresh frontier, visited set and broken-link
/// list that only that crawl's workers can touch.
pub struct Coordinator {
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<dyn LinkExtractor>,
    workers: usize,
}

/// State owned by one crawl invocation
struct CrawlRun {
    seed: Url,
    seed_key: NormalizedUrl,
    frontier: Frontier,
    visited: VisitedSet,
    broken: Mutex<Vec<BrokenLink>>,
    seed_failure: Mutex<Option<FailureReason>>,
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<dyn LinkExtractor>,
}

impl Coordinator {
    /// Creates a coordinator from explicit capabilities
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Loads pages; shared by every worker
    /// * `extractor` - Pulls same-domain links out of fetched pages
    /// * `workers` - Worker pool size, clamped to `1..=MAX_WORKERS`
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        extractor: Arc<dyn LinkExtractor>,
        workers: usize,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            workers: workers.clamp(1, crate::config::MAX_WORKERS),
        }
    }

    /// Creates a coordinator with the default HTTP fetcher and HTML extractor
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Fetch capability acquired
    /// * `Err(SumiError::Setup)` - The HTTP client could not be built
    pub fn from_config(config: &Config) -> Result<Self, SumiError> {
        let fetcher = HttpFetcher::new(config)?;
        Ok(Self::new(
            Arc::new(fetcher),
            Arc::new(HtmlLinkExtractor::new()),
            config.crawler.effective_workers(),
        ))
    }

    /// Number of workers used per crawl
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Crawls every page reachable from `seed` on the seed's host
    ///
    /// Per-URL failures never abort the crawl; they end up in
    /// [`CrawlResult::broken_links`]. The crawl ends when the frontier is empty
    /// and no worker is still processing a page.
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlResult)` - The crawl ran to completion
    /// * `Err(SumiError::UrlError)` - The seed is not a crawlable URL
    /// * `Err(SumiError::SeedUnreachable)` - The seed itself timed out or had a
    ///   network error, so nothing could be crawled
    pub async fn crawl(&self, seed: &Url) -> Result<CrawlResult, SumiError> {
        let seed_key = normalize_url(seed)?;
        let started_at = Utc::now();

        tracing::info!(
            "Starting crawl of {} with {} workers",
            seed_key,
            self.workers
        );

        let run = Arc::new(CrawlRun {
            seed: seed.clone(),
            seed_key,
            frontier: Frontier::new(),
            visited: VisitedSet::new(),
            broken: Mutex::new(Vec::new()),
            seed_failure: Mutex::new(None),
            fetcher: Arc::clone(&self.fetcher),
            extractor: Arc::clone(&self.extractor),
        });

        run.frontier.push(seed.clone());

        let handles: Vec<_> = (0..self.workers)
            .map(|id| {
                let run = Arc::clone(&run);
                tokio::spawn(async move { run.worker(id).await })
            })
            .collect();

        let mut worker_error = None;
        for handle in handles {
            if let Err(e) = handle.await {
                tracing::error!("Crawl worker failed: {}", e);
                worker_error.get_or_insert_with(|| e.to_string());
            }
        }

        if let Some(message) = worker_error {
            return Err(SumiError::Worker(message));
        }

        if let Some(reason) = lock(&run.seed_failure).take() {
            return Err(SumiError::SeedUnreachable {
                url: run.seed_key.to_string(),
                reason,
            });
        }

        let visited = run.visited.snapshot();
        let broken = std::mem::take(&mut *lock(&run.broken));
        let result = CrawlResult::new(seed.clone(), visited, broken, started_at, Utc::now());

        tracing::info!(
            "Crawl completed: {} pages visited, {} broken links in {:.2}s",
            result.total_visited(),
            result.broken_count(),
            result.duration_seconds()
        );

        Ok(result)
    }
}

impl CrawlRun {
    /// Worker loop: runs until the frontier has permanently drained
    async fn worker(&self, id: usize) {
        tracing::trace!("Worker {} started", id);

        while let Some(entry) = self.frontier.next().await {
            self.process_url(entry.url()).await;
        }

        tracing::trace!("Worker {} finished", id);
    }

    /// Processes a single dequeued URL
    ///
    /// This method:
    /// 1. Normalizes the URL (malformed URLs are dropped)
    /// 2. Claims it in the visited set (already claimed URLs are dropped)
    /// 3. Fetches the page
    /// 4. Extracts links and enqueues the unseen ones
    async fn process_url(&self, url: &Url) {
        let key = match normalize_url(url) {
            Ok(key) => key,
            Err(e) => {
                tracing::debug!("Dropping unnormalizable URL {}: {}", url, e);
                return;
            }
        };

        let Some(visited_count) = self.visited.claim(key.clone()) else {
            tracing::trace!("Already visited: {}", key);
            return;
        };

        if visited_count % 25 == 0 {
            tracing::info!(
                "Progress: {} pages visited, {} in frontier, {} in flight",
                visited_count,
                self.frontier.len(),
                self.frontier.in_flight()
            );
        }

        let page = match self.fetcher.fetch(key.as_url()).await {
            Ok(page) => page,
            Err(reason) => {
                tracing::warn!("Broken link: {} (Error: {})", key, reason);
                if key == self.seed_key && reason.is_unreachable() {
                    *lock(&self.seed_failure) = Some(reason.clone());
                }
                self.record_broken(key, reason);
                return;
            }
        };

        tracing::info!("Working link: {} (Status: {})", key, page.status);

        let links = match self.extractor.extract(&page, &self.seed) {
            Ok(links) => links,
            Err(e) => {
                tracing::warn!("Failed to extract links from {}: {}", key, e);
                self.record_broken(key, FailureReason::ExtractorFailure(e.to_string()));
                return;
            }
        };

        let discovered = links.len();
        let unseen: Vec<Url> = links
            .into_iter()
            .filter(|link| same_authority(&self.seed, link))
            .filter(|link| match normalize_url(link) {
                Ok(candidate) => !self.visited.contains(&candidate),
                Err(_) => false,
            })
            .collect();

        tracing::debug!(
            "{}: {} links discovered, {} queued",
            key,
            discovered,
            unseen.len()
        );

        self.frontier.extend(unseen);
    }

    fn record_broken(&self, url: NormalizedUrl, reason: FailureReason) {
        lock(&self.broken).push(BrokenLink::new(url, reason));
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

use crate::state::BrokenLink;
use crate::url::NormalizedUrl;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashSet};
use url::Url;

/// Final aggregate of one crawl run
///
/// Built once when the frontier has drained and no worker is in flight.
/// There are no mutating methods.
#[derive(Debug, Clone)]
pub struct CrawlResult {
    seed: Url,
    visited: Vec<NormalizedUrl>,
    broken_links: Vec<BrokenLink>,
    started_at: DateTime<Utc>,
    finished_at: DateTime<Utc>,
}

impl CrawlResult {
    pub(crate) fn new(
        seed: Url,
        visited: HashSet<NormalizedUrl>,
        mut broken_links: Vec<BrokenLink>,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        let mut visited: Vec<_> = visited.into_iter().collect();
        visited.sort();
        broken_links.sort_by(|a, b| a.url.cmp(&b.url));

        Self {
            seed,
            visited,
            broken_links,
            started_at,
            finished_at,
        }
    }

    /// The seed URL the crawl started from
    pub fn seed(&self) -> &Url {
        &self.seed
    }

    /// Every distinct normalized URL that was dispatched, sorted
    pub fn visited(&self) -> &[NormalizedUrl] {
        &self.visited
    }

    /// Number of distinct normalized URLs visited
    pub fn total_visited(&self) -> usize {
        self.visited.len()
    }

    /// Returns true if the given key was visited during the crawl
    pub fn was_visited(&self, url: &NormalizedUrl) -> bool {
        self.visited.binary_search(url).is_ok()
    }

    /// Broken links, sorted by URL
    pub fn broken_links(&self) -> &[BrokenLink] {
        &self.broken_links
    }

    pub fn broken_count(&self) -> usize {
        self.broken_links.len()
    }

    /// Counts broken links per failure kind
    pub fn broken_by_kind(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for link in &self.broken_links {
            *counts.entry(link.reason.kind()).or_insert(0) += 1;
        }
        counts
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn finished_at(&self) -> DateTime<Utc> {
        self.finished_at
    }

    /// Wall-clock duration of the crawl in seconds
    pub fn duration_seconds(&self) -> f64 {
        (self.finished_at - self.started_at).num_milliseconds() as f64 / 1000.0
    }

    /// Percentage of visited URLs that were not broken
    pub fn success_rate(&self) -> f64 {
        if self.visited.is_empty() {
            return 0.0;
        }
        let working = self.visited.len().saturating_sub(self.broken_links.len());
        (working as f64 / self.visited.len() as f64) * 100.0
    }
}

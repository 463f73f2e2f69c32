//! Visited set shared by all crawl workers

use crate::url::NormalizedUrl;
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

/// Set of normalized URLs that have already been dispatched
///
/// The set only grows. [`VisitedSet::claim`] is the crawl's single
/// serialization point: membership test and insert happen under one lock, so
/// at most one worker ever fetches a given key.
#[derive(Debug, Default)]
pub struct VisitedSet {
    inner: Mutex<HashSet<NormalizedUrl>>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims a key for fetching
    ///
    /// # Returns
    ///
    /// * `Some(n)` - The key was absent and now belongs to the caller; `n` is
    ///   the set's size right after the insert, so every winner sees a
    ///   distinct count
    /// * `None` - Another worker already claimed it
    pub fn claim(&self, url: NormalizedUrl) -> Option<usize> {
        let mut set = self.lock();
        set.insert(url).then(|| set.len())
    }

    /// Returns true if the key has been claimed
    ///
    /// The answer can be stale by the time the caller acts on it; only use it
    /// to skip obviously redundant work, never in place of [`claim`](Self::claim).
    pub fn contains(&self, url: &NormalizedUrl) -> bool {
        self.lock().contains(url)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copies the current contents
    pub fn snapshot(&self) -> HashSet<NormalizedUrl> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<NormalizedUrl>> {
        // A panicking worker cannot leave a HashSet half-inserted
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

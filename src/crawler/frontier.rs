//! Frontier queue for the crawl workers
//!
//! This module handles:
//! - The work-list of URLs awaiting a visit (duplicates allowed)
//! - Tracking how many dequeued URLs are still being processed
//! - Parking idle workers until work arrives or the crawl is finished

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};
use tokio::sync::Notify;
use url::Url;

#[derive(Debug, Default)]
struct FrontierState {
    /// URLs waiting to be dequeued (FIFO)
    queue: VecDeque<Url>,

    /// URLs handed to a worker whose processing has not finished
    in_flight: usize,

    /// Total number of pushes over the frontier's lifetime
    enqueued_total: u64,
}

/// Shared work-list with a drain-aware blocking dequeue
///
/// The frontier is finished when the queue is empty *and* no URL is in
/// flight, because only in-flight work can produce new entries. Until then an
/// empty queue parks the caller of [`Frontier::next`] instead of ending it.
#[derive(Debug, Default)]
pub struct Frontier {
    state: Mutex<FrontierState>,
    notify: Notify,
}

/// A dequeued URL that counts as in flight until dropped
///
/// Dropping the entry (including during a panic unwind) marks the work done.
#[derive(Debug)]
pub struct InFlight<'a> {
    url: Url,
    frontier: &'a Frontier,
}

impl InFlight<'_> {
    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.frontier.complete();
    }
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a URL to the back of the queue
    pub fn push(&self, url: Url) {
        self.extend(std::iter::once(url));
    }

    /// Adds several URLs and wakes idle workers once
    pub fn extend<I: IntoIterator<Item = Url>>(&self, urls: I) {
        let added = {
            let mut state = self.lock();
            let before = state.queue.len();
            state.queue.extend(urls);
            let added = state.queue.len() - before;
            state.enqueued_total += added as u64;
            added
        };

        if added > 0 {
            self.notify.notify_waiters();
        }
    }

    /// Waits for the next URL
    ///
    /// # Returns
    ///
    /// * `Some(InFlight)` - A URL to process; it stays in flight until dropped
    /// * `None` - The queue is empty and no other worker is in flight, so no
    ///   more work can ever appear
    pub async fn next(&self) -> Option<InFlight<'_>> {
        loop {
            // Register interest before inspecting the state so a push or
            // completion that lands between the check and the await is not lost
            let notified = self.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            {
                let mut state = self.lock();
                if let Some(url) = state.queue.pop_front() {
                    state.in_flight += 1;
                    return Some(InFlight {
                        url,
                        frontier: self,
                    });
                }

                if state.in_flight == 0 {
                    drop(state);
                    // Release every other parked worker as well
                    self.notify.notify_waiters();
                    return None;
                }
            }

            notified.await;
        }
    }

    /// Marks one in-flight URL as done
    fn complete(&self) {
        let drained = {
            let mut state = self.lock();
            state.in_flight = state.in_flight.saturating_sub(1);
            state.in_flight == 0 && state.queue.is_empty()
        };

        if drained {
            self.notify.notify_waiters();
        }
    }

    /// Number of URLs waiting in the queue
    pub fn len(&self) -> usize {
        self.lock().queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().queue.is_empty()
    }

    /// Number of URLs currently being processed
    pub fn in_flight(&self) -> usize {
        self.lock().in_flight
    }

    /// Total number of URLs ever pushed, duplicates included
    pub fn enqueued_total(&self) -> u64 {
        self.lock().enqueued_total
    }

    fn lock(&self) -> MutexGuard<'_, FrontierState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

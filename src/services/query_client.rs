//! Query client - cached listing requests
//!
//! Entries are keyed by `QueryKey`. `ensure` issues a request only when the
//! key has no entry or its entry is stale and idle, so repeated calls for the
//! same key never duplicate requests. Mutations publish
//! `CacheEvent::Invalidate` on the event channel; the client drains it on
//! `poll` and marks the matching entries stale so they refetch on the next
//! `ensure` while still showing their previous data.

use super::api::{fetch_page, ExerciseApi};
use super::runner::RequestRunner;
use crate::model::exercise::ExercisePage;
use crate::model::query::QueryKey;
use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use tracing::{debug, warn};

/// Cache events published by other components
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheEvent {
    /// Mark every entry whose key has this scope as stale
    Invalidate { scope: &'static str },
}

/// Observable request state of a cache entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    Pending,
    Success,
    Error,
}

#[derive(Debug, Clone, Default)]
pub struct CacheEntry {
    /// Last successful result
    pub data: Option<ExercisePage>,
    /// Message of the last failed request
    pub error: Option<String>,
    /// A request for this key is in flight
    pub fetching: bool,
    /// Data predates the last invalidation
    pub stale: bool,
    /// Bumped on every invalidation; responses from older generations stay stale
    generation: u64,
}

impl CacheEntry {
    pub fn status(&self) -> QueryStatus {
        if self.error.is_some() && !self.fetching {
            QueryStatus::Error
        } else if self.data.is_some() {
            QueryStatus::Success
        } else {
            QueryStatus::Pending
        }
    }

    /// First load for this key, nothing to show yet
    pub fn is_loading(&self) -> bool {
        self.data.is_none() && self.fetching
    }

    pub fn is_error(&self) -> bool {
        self.status() == QueryStatus::Error
    }
}

pub struct QueryClient {
    api: Arc<dyn ExerciseApi>,
    cache: HashMap<QueryKey, CacheEntry>,
    runner: RequestRunner<(QueryKey, u64), ExercisePage>,
    events_tx: Sender<CacheEvent>,
    events_rx: Receiver<CacheEvent>,
}

impl QueryClient {
    pub fn new(api: Arc<dyn ExerciseApi>) -> Self {
        Self::with_runner(api, RequestRunner::new())
    }

    #[cfg(test)]
    pub fn inline(api: Arc<dyn ExerciseApi>) -> Self {
        Self::with_runner(api, RequestRunner::inline())
    }

    fn with_runner(
        api: Arc<dyn ExerciseApi>,
        runner: RequestRunner<(QueryKey, u64), ExercisePage>,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::channel();
        Self {
            api,
            cache: HashMap::new(),
            runner,
            events_tx,
            events_rx,
        }
    }

    /// Publishing end of the cache event channel
    pub fn events(&self) -> Sender<CacheEvent> {
        self.events_tx.clone()
    }

    pub fn entry(&self, key: &QueryKey) -> Option<&CacheEntry> {
        self.cache.get(key)
    }

    /// Listing requests spawned but not yet drained
    pub fn in_flight(&self) -> usize {
        self.runner.in_flight()
    }

    /// Make sure `key` has been (or is being) fetched.
    /// Returns true if a request was issued.
    pub fn ensure(&mut self, key: &QueryKey) -> bool {
        let entry = self.cache.entry(key.clone()).or_insert_with(|| CacheEntry {
            stale: true,
            ..Default::default()
        });

        let needs_fetch = entry.stale && !entry.fetching && entry.error.is_none();
        if !needs_fetch {
            return false;
        }

        entry.fetching = true;
        let generation = entry.generation;
        debug!(key = %key, filter_mode = key.query.is_filter(), "fetching listing");

        let api = Arc::clone(&self.api);
        let request_key = key.clone();
        self.runner.spawn((key.clone(), generation), move || {
            fetch_page(api.as_ref(), &request_key)
        });
        true
    }

    /// Force a new request for `key`, also after an error
    pub fn refetch(&mut self, key: &QueryKey) -> bool {
        if let Some(entry) = self.cache.get_mut(key) {
            if entry.fetching {
                return false;
            }
            entry.error = None;
            entry.stale = true;
        }
        self.ensure(key)
    }

    /// Apply pending cache events and finished requests.
    /// Returns the keys whose entries changed.
    pub fn poll(&mut self) -> Vec<QueryKey> {
        while let Ok(event) = self.events_rx.try_recv() {
            match event {
                CacheEvent::Invalidate { scope } => self.invalidate(scope),
            }
        }

        let mut updated = Vec::new();
        for completed in self.runner.poll() {
            let (key, generation) = completed.tag;
            let elapsed_ms = completed.started.elapsed().as_millis() as u64;
            // Entries dropped by `clear` while in flight stay dropped
            let Some(entry) = self.cache.get_mut(&key) else {
                continue;
            };
            entry.fetching = false;

            match completed.result {
                Ok(page) => {
                    debug!(key = %key, total = page.total, elapsed_ms, "listing fetched");
                    entry.data = Some(page);
                    entry.error = None;
                    entry.stale = generation != entry.generation;
                }
                Err(e) => {
                    warn!(key = %key, error = %e, elapsed_ms, "listing fetch failed");
                    entry.error = Some(e.to_string());
                }
            }
            updated.push(key);
        }
        updated
    }

    /// Mark every entry in `scope` stale
    pub fn invalidate(&mut self, scope: &str) {
        let mut count = 0;
        for (key, entry) in self.cache.iter_mut() {
            if key.scope == scope {
                entry.stale = true;
                entry.error = None;
                entry.generation += 1;
                count += 1;
            }
        }
        debug!(scope, count, "cache invalidated");
    }

    /// Forget everything, e.g. on logout
    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

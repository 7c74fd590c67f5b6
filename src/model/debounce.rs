//! Cancel-and-replace debounce timer
//!
//! Time is passed in explicitly so the timer can be driven by the tick loop
//! and by tests alike.

use std::time::{Duration, Instant};

/// Debounce interval for search input
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// A single pending timer. Arming it again replaces the previous deadline.
#[derive(Debug)]
pub struct Debouncer<T> {
    interval: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            pending: None,
        }
    }

    /// Cancel any pending timer and start a fresh one carrying `value`
    pub fn arm(&mut self, value: T, now: Instant) {
        self.pending = Some((now + self.interval, value));
    }

    /// Drop the pending timer without firing it
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Fire the timer if its deadline has passed. Fires at most once per arm.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.pending {
            Some((deadline, _)) if now >= deadline => self.pending.take().map(|(_, v)| v),
            _ => None,
        }
    }
}

//! Background request runner
//!
//! Runs blocking API calls on worker threads and hands the results back to
//! the UI thread, which drains them on every tick.

use super::error::ApiError;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;
use std::time::Instant;
use tracing::warn;

/// Result of one background request, tagged by the caller
#[derive(Debug)]
pub struct Completed<K, T> {
    pub tag: K,
    pub result: Result<T, ApiError>,
    pub started: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunMode {
    /// One worker thread per request
    Background,
    /// Run on the calling thread; deterministic for tests
    #[cfg(test)]
    Inline,
}

/// Runner for tagged background requests
pub struct RequestRunner<K, T> {
    sender: Sender<Completed<K, T>>,
    receiver: Receiver<Completed<K, T>>,
    in_flight: usize,
    mode: RunMode,
}

impl<K, T> Default for RequestRunner<K, T>
where
    K: Send + 'static,
    T: Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, T> RequestRunner<K, T>
where
    K: Send + 'static,
    T: Send + 'static,
{
    pub fn new() -> Self {
        Self::with_mode(RunMode::Background)
    }

    #[cfg(test)]
    pub fn inline() -> Self {
        Self::with_mode(RunMode::Inline)
    }

    fn with_mode(mode: RunMode) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver,
            in_flight: 0,
            mode,
        }
    }

    /// Number of requests spawned but not yet drained
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Start `job`; its result comes back through `poll` tagged with `tag`
    pub fn spawn<F>(&mut self, tag: K, job: F)
    where
        F: FnOnce() -> Result<T, ApiError> + Send + 'static,
    {
        let tx = self.sender.clone();
        let started = Instant::now();
        self.in_flight += 1;

        let run = move || {
            let result = job();
            // The receiver only disappears when the runner is dropped
            let _ = tx.send(Completed {
                tag,
                result,
                started,
            });
        };

        match self.mode {
            RunMode::Background => {
                thread::spawn(run);
            }
            #[cfg(test)]
            RunMode::Inline => run(),
        }
    }

    /// Drain every finished request without blocking
    pub fn poll(&mut self) -> Vec<Completed<K, T>> {
        let mut done = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(completed) => {
                    self.in_flight = self.in_flight.saturating_sub(1);
                    done.push(completed);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    warn!("request channel disconnected");
                    break;
                }
            }
        }
        done
    }
}

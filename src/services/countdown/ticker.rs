//! Cancelable periodic countdown recomputation.
//!
//! The ticker owns the timer; the countdown math stays pure and receives the
//! sampled instant explicitly at each tick.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;

use super::{countdown_parts, CountdownParts};

/// Handle to a running periodic recomputation task.
///
/// Dropping the handle or calling [`CountdownTicker::cancel`] stops the
/// task. Ticks are idempotent: a later sample only ever yields a smaller or
/// equal remaining interval, never an error.
pub struct CountdownTicker {
    handle: JoinHandle<()>,
}

impl CountdownTicker {
    /// Spawn a task that recomputes the countdown to `target` every
    /// `period` and hands each result to `on_tick`.
    pub fn spawn<F>(target: DateTime<Utc>, period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut(CountdownParts) + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                on_tick(countdown_parts(target, Utc::now()));
            }
        });

        Self { handle }
    }

    /// Stop the periodic task. Safe to call more than once.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// Whether the underlying task has stopped running.
    pub fn is_stopped(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for CountdownTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

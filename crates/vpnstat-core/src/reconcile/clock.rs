//! Time sources and the summary rate limiter.

use chrono::{DateTime, Duration, Utc};
use std::sync::{Arc, Mutex};

/// Source of the current time
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock
///
/// Clones share the same instant, so a test can keep one handle and advance
/// time while the engine owns another.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    /// Move the clock forward by `by`
    pub fn advance(&self, by: Duration) {
        if let Ok(mut now) = self.now.lock() {
            *now += by;
        }
    }

    /// Jump to an absolute instant
    pub fn set(&self, at: DateTime<Utc>) {
        if let Ok(mut now) = self.now.lock() {
            *now = at;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
            .lock()
            .map(|now| *now)
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }
}

/// Last time a full summary was printed, plus the first-run flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryClock {
    last_summary: DateTime<Utc>,
    first_run: bool,
}

impl SummaryClock {
    /// Fresh clock: first run pending, last summary at the Unix epoch
    pub fn new() -> Self {
        Self {
            last_summary: DateTime::<Utc>::UNIX_EPOCH,
            first_run: true,
        }
    }

    pub fn last_summary(&self) -> DateTime<Utc> {
        self.last_summary
    }

    pub fn is_first_run(&self) -> bool {
        self.first_run
    }

    /// True when at least `interval` has passed since the last summary
    pub fn is_due(&self, now: DateTime<Utc>, interval: Duration) -> bool {
        now - self.last_summary >= interval
    }

    /// Clear the first-run flag
    pub fn finish_first_run(&mut self) {
        self.first_run = false;
    }

    /// Record that a summary was printed at `now`
    pub fn reset(&mut self, now: DateTime<Utc>) {
        self.last_summary = now;
    }
}

impl Default for SummaryClock {
    fn default() -> Self {
        Self::new()
    }
}

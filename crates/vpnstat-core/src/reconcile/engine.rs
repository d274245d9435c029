//! Reconciliation engine.
//!
//! The core entry point is [`ReconciliationEngine::reconcile`], called once
//! per poll tick with the freshly observed snapshot.

use chrono::{DateTime, Duration, Utc};

use crate::config::StatusConfig;
use crate::model::Snapshot;
use crate::reconcile::clock::{Clock, SummaryClock, SystemClock};
use crate::reconcile::diff::diff_snapshots;
use crate::reconcile::model::{ReconcileReport, SummaryReason};
use crate::render::{render_change_line, render_status_table};
use crate::sink::LineSink;

/// State carried from one reconciliation to the next
///
/// Created once at start (empty previous snapshot, first run pending, clock
/// at the epoch) and replaced piecewise on every call. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciliationState {
    previous: Snapshot,
    summary_clock: SummaryClock,
}

impl ReconciliationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot seen by the last reconciliation
    pub fn previous(&self) -> &Snapshot {
        &self.previous
    }

    pub fn summary_clock(&self) -> &SummaryClock {
        &self.summary_clock
    }
}

/// Decides what to report for each observed snapshot
pub struct ReconciliationEngine<C: Clock = SystemClock> {
    app_name: String,
    summary_interval: Duration,
    state: ReconciliationState,
    clock: C,
}

impl ReconciliationEngine<SystemClock> {
    /// Create an engine driven by wall-clock time
    pub fn new(config: StatusConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> ReconciliationEngine<C> {
    /// Create an engine driven by `clock`
    pub fn with_clock(config: StatusConfig, clock: C) -> Self {
        Self {
            summary_interval: config.summary_interval(),
            app_name: config.app_name,
            state: ReconciliationState::new(),
            clock,
        }
    }

    pub fn state(&self) -> &ReconciliationState {
        &self.state
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Reconcile `current` against the previous snapshot at the clock's now
    pub fn reconcile(&mut self, current: &Snapshot, sink: &mut dyn LineSink) -> ReconcileReport {
        let now = self.clock.now();
        self.reconcile_at(current, now, sink)
    }

    /// Reconcile `current` against the previous snapshot at instant `now`
    ///
    /// 1. On the first run, or once the summary interval has elapsed, the
    ///    full table is written and no change lines are computed.
    /// 2. Otherwise every transition gets one line, followed by a single
    ///    table if there was at least one.
    /// 3. The last-summary time moves to `now` whenever something was written.
    /// 4. `current` always becomes the new previous snapshot.
    pub fn reconcile_at(
        &mut self,
        current: &Snapshot,
        now: DateTime<Utc>,
        sink: &mut dyn LineSink,
    ) -> ReconcileReport {
        let clock = &mut self.state.summary_clock;
        let first_run = clock.is_first_run();
        let force_summary = clock.is_due(now, self.summary_interval);

        let mut changes = Vec::new();
        let summary = if first_run || force_summary {
            clock.finish_first_run();
            Some(if first_run {
                SummaryReason::FirstRun
            } else {
                SummaryReason::IntervalElapsed
            })
        } else {
            changes = diff_snapshots(&self.state.previous, current);
            for change in &changes {
                sink.write_line(&render_change_line(change, &self.app_name));
            }
            (!changes.is_empty()).then_some(SummaryReason::Changes)
        };

        if summary.is_some() {
            for line in render_status_table(current, &self.app_name).lines() {
                sink.write_line(line);
            }
            clock.reset(now);
        }

        tracing::debug!(
            entity_count = current.len(),
            change_count = changes.len(),
            summary = ?summary,
            "Reconciled snapshot"
        );

        self.state.previous = current.clone();

        ReconcileReport {
            changes,
            clock_reset: summary.is_some(),
            summary,
        }
    }
}

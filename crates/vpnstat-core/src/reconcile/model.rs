//! Reconciliation output types.

use serde::{Deserialize, Serialize};

use crate::model::EntityState;

/// How one entity differs between two snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChangeKind {
    /// Present in both snapshots with a different state
    Toggled { from: EntityState, to: EntityState },
    /// Present only in the new snapshot
    Added { state: EntityState },
    /// Present only in the previous snapshot
    Removed { state: EntityState },
}

/// A detected transition for one entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    pub name: String,
    #[serde(flatten)]
    pub kind: ChangeKind,
}

/// Why a full status table was emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryReason {
    /// First reconciliation since start
    FirstRun,
    /// The summary interval elapsed
    IntervalElapsed,
    /// At least one transition was reported
    Changes,
}

/// What one reconciliation call reported
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileReport {
    /// Transitions reported as change lines, in output order
    pub changes: Vec<Change>,
    /// Set when the full table was emitted
    pub summary: Option<SummaryReason>,
    /// True when the last-summary timestamp was moved to now
    pub clock_reset: bool,
}

impl ReconcileReport {
    /// Check if the call wrote nothing
    pub fn is_quiet(&self) -> bool {
        self.changes.is_empty() && self.summary.is_none()
    }
}

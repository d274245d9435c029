//! Snapshot reconciliation engine.
//!
//! Compares each freshly observed snapshot with the previous one and decides
//! what to report: nothing, one line per transition followed by the status
//! table, or the status table alone when a periodic summary is due.
//!
//! ## Entry point
//!
//! ```
//! use vpnstat_core::config::StatusConfig;
//! use vpnstat_core::model::Snapshot;
//! use vpnstat_core::reconcile::ReconciliationEngine;
//! use vpnstat_core::sink::MemorySink;
//!
//! let mut engine = ReconciliationEngine::new(StatusConfig::default());
//! let mut sink = MemorySink::new();
//! let snapshot = Snapshot::from_pairs([("office", true)]).unwrap();
//! let report = engine.reconcile(&snapshot, &mut sink);
//! assert!(report.summary.is_some());
//! ```
//!
//! ## Guarantees
//!
//! - **Keyed diffing**: snapshots are joined by entity name, so reordering or
//!   resizing the entity set never misattributes a transition.
//! - **One table per call**: transitions are batched ahead of a single table.
//! - **No failure path**: every snapshot is valid input.

pub mod clock;
pub mod diff;
pub mod engine;
pub mod model;

pub use clock::{Clock, ManualClock, SummaryClock, SystemClock};
pub use diff::diff_snapshots;
pub use engine::{ReconciliationEngine, ReconciliationState};
pub use model::{Change, ChangeKind, ReconcileReport, SummaryReason};

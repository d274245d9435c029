//! vpnstat Core - status reconciliation kernel
//!
//! This crate provides the data structures and pure operations behind the
//! `vpnstat` poller, including:
//! - Entity and Snapshot models with name validation and duplicate rejection
//! - A bounded two-slot snapshot store (current / previous)
//! - The reconciliation engine deciding between silence, change lines and
//!   a full status table, with a rate-limited periodic summary
//! - Status table and change line rendering
//! - The error and logging facilities shared by every vpnstat crate

pub mod config;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod reconcile;
pub mod render;
pub mod sink;
pub mod store;

// Re-export commonly used types
pub use config::StatusConfig;
pub use errors::{ExError, ExErrorKind, Result, StatusError};
pub use model::{Entity, EntityState, Snapshot};
pub use reconcile::{ReconcileReport, ReconciliationEngine};
pub use render::render_status_table;
pub use sink::{LineSink, MemorySink, StdoutSink};
pub use store::SnapshotStore;

//! vpnstat Engine - Orchestration layer
//!
//! Coordinates entity discovery, service state queries and the
//! reconciliation core into poll ticks, and exposes service control
//! commands. Owns the operation boundaries in the logs.

pub mod commands;
pub mod config;
pub mod discovery;
pub mod errors;
pub mod indicator;
pub mod service;

pub use commands::poll::{Poller, TickOutcome};
pub use config::{OverflowPolicy, TrayConfig};
pub use discovery::{ConfDirDiscovery, EntitySource};
pub use indicator::Indicator;
pub use service::{ServiceManager, SystemctlManager};

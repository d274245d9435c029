//! Command orchestration layer.
//!
//! Provides the poll loop and service control commands that coordinate
//! discovery, the service manager and the reconciliation core.

pub mod control;
pub mod poll;

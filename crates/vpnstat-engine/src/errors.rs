//! Error handling for vpnstat-engine
//!
//! Wraps vpnstat-core ExError with engine-specific helpers

use vpnstat_core::errors::{ExError, ExErrorKind};

pub use vpnstat_core::errors::io_error;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an error for an external command that could not be launched
pub fn spawn_failed(program: &str, op: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::ExternalService)
        .with_op(op)
        .with_message(format!("failed to run {}: {}", program, err))
}

/// Create an error for an external command that exited unsuccessfully
pub fn command_failed(op: &str, unit: &str, status: std::process::ExitStatus, stderr: &str) -> ExError {
    let detail = stderr.trim();
    let message = if detail.is_empty() {
        format!("{} exited with {}", unit, status)
    } else {
        format!("{} exited with {}: {}", unit, status, detail)
    };
    ExError::new(ExErrorKind::ExternalService)
        .with_op(op)
        .with_message(message)
}

//! Configuration consumed by the reconciliation core.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, StatusError};

/// Default application name used in the table title and change-line prefix
pub const DEFAULT_APP_NAME: &str = "openvpn-tray";
/// Default minimum spacing between unconditional full-table dumps
pub const DEFAULT_SUMMARY_INTERVAL_SECONDS: u64 = 600;
/// Default bound on entities per snapshot
pub const DEFAULT_MAX_ENTITIES: usize = 100;
/// Upper bound accepted for `summary_interval_seconds` (about 68 years)
pub const MAX_SUMMARY_INTERVAL_SECONDS: u64 = i32::MAX as u64;

/// Reconciliation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusConfig {
    /// Name shown in the table title and prefixed to every change line
    pub app_name: String,
    /// Minimum spacing between unconditional full-table dumps
    pub summary_interval_seconds: u64,
    /// Largest snapshot the store accepts
    pub max_entities: usize,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            summary_interval_seconds: DEFAULT_SUMMARY_INTERVAL_SECONDS,
            max_entities: DEFAULT_MAX_ENTITIES,
        }
    }
}

impl StatusConfig {
    /// Summary interval as a duration
    pub fn summary_interval(&self) -> Duration {
        let secs = self.summary_interval_seconds.min(MAX_SUMMARY_INTERVAL_SECONDS);
        Duration::seconds(secs as i64)
    }

    /// Check every value is usable
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` naming the first offending key.
    pub fn validate(&self) -> Result<()> {
        if self.app_name.trim().is_empty() {
            return Err(invalid("app_name", "must not be empty"));
        }
        if self.max_entities == 0 {
            return Err(invalid("max_entities", "must be at least 1"));
        }
        if self.summary_interval_seconds > MAX_SUMMARY_INTERVAL_SECONDS {
            return Err(invalid(
                "summary_interval_seconds",
                &format!("must be at most {}", MAX_SUMMARY_INTERVAL_SECONDS),
            ));
        }
        Ok(())
    }
}

fn invalid(key: &str, reason: &str) -> StatusError {
    StatusError::InvalidConfig {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

//! Poller configuration loaded from TOML.
//!
//! Every key is optional; absent keys fall back to the defaults below.
//!
//! ```toml
//! app_name = "openvpn-tray"
//! summary_interval_seconds = 600
//! max_entities = 100
//! conf_dir = "/etc/openvpn"
//! conf_extension = "conf"
//! unit_template = "openvpn@{name}"
//! poll_interval_seconds = 10
//! overflow_policy = "truncate"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use vpnstat_core::config::StatusConfig;
use vpnstat_core::errors::{ExError, StatusError};

use crate::errors::{io_error, Result};

pub const DEFAULT_CONF_DIR: &str = "/etc/openvpn";
pub const DEFAULT_CONF_EXTENSION: &str = "conf";
pub const DEFAULT_UNIT_TEMPLATE: &str = "openvpn@{name}";
pub const DEFAULT_POLL_INTERVAL_SECONDS: u64 = 10;

/// Placeholder substituted with the entity name in `unit_template`
pub const NAME_PLACEHOLDER: &str = "{name}";

/// What a tick does when discovery yields more entities than `max_entities`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Keep the first `max_entities` in discovery order
    #[default]
    Truncate,
    /// Drop the whole tick and keep the previous state
    SkipTick,
}

/// Full configuration of the poller and service commands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrayConfig {
    #[serde(flatten)]
    pub status: StatusConfig,
    pub conf_dir: PathBuf,
    pub conf_extension: String,
    pub unit_template: String,
    pub poll_interval_seconds: u64,
    pub overflow_policy: OverflowPolicy,
}

impl Default for TrayConfig {
    fn default() -> Self {
        Self {
            status: StatusConfig::default(),
            conf_dir: PathBuf::from(DEFAULT_CONF_DIR),
            conf_extension: DEFAULT_CONF_EXTENSION.to_string(),
            unit_template: DEFAULT_UNIT_TEMPLATE.to_string(),
            poll_interval_seconds: DEFAULT_POLL_INTERVAL_SECONDS,
            overflow_policy: OverflowPolicy::default(),
        }
    }
}

impl TrayConfig {
    /// Read and validate a TOML configuration file
    ///
    /// # Errors
    ///
    /// `NotFound`/`Io` when the file cannot be read, `Serialization` when it
    /// is not valid TOML, `InvalidConfig` when a value is out of range.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| io_error("load_config", e))?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// `Serialization` for malformed TOML, `InvalidConfig` for bad values.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)
            .map_err(|e| ExError::from(StatusError::from(e)).with_op("load_config"))?;
        config.validate()?;
        Ok(config)
    }

    /// Check every value is usable
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` naming the first offending key.
    pub fn validate(&self) -> Result<()> {
        self.status.validate()?;
        if self.poll_interval_seconds == 0 {
            return Err(invalid("poll_interval_seconds", "must be at least 1"));
        }
        if !self.unit_template.contains(NAME_PLACEHOLDER) {
            return Err(invalid("unit_template", "must contain {name}"));
        }
        let ext = self.conf_extension.trim_start_matches('.');
        if ext.is_empty() {
            return Err(invalid("conf_extension", "must not be empty"));
        }
        Ok(())
    }

    /// Time slept between two ticks
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_seconds)
    }
}

fn invalid(key: &str, reason: &str) -> ExError {
    StatusError::InvalidConfig {
        key: key.to_string(),
        reason: reason.to_string(),
    }
    .into()
}

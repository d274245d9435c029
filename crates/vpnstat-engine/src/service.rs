//! Service state queries and control.

use std::process::{Command, Stdio};

use vpnstat_core::model::entity::validate_name;

use crate::config::{DEFAULT_UNIT_TEMPLATE, NAME_PLACEHOLDER};
use crate::errors::{command_failed, spawn_failed, Result};

/// Queries and toggles the service behind each entity
pub trait ServiceManager {
    /// Whether the service for `name` is running
    ///
    /// # Errors
    ///
    /// Returns an error only when the state could not be determined at all.
    fn is_active(&self, name: &str) -> Result<bool>;

    /// Start the service for `name`
    ///
    /// # Errors
    ///
    /// Returns an error when the service manager refuses or cannot be run.
    fn start(&self, name: &str) -> Result<()>;

    /// Stop the service for `name`
    ///
    /// # Errors
    ///
    /// Returns an error when the service manager refuses or cannot be run.
    fn stop(&self, name: &str) -> Result<()>;
}

impl<M: ServiceManager + ?Sized> ServiceManager for &M {
    fn is_active(&self, name: &str) -> Result<bool> {
        (**self).is_active(name)
    }

    fn start(&self, name: &str) -> Result<()> {
        (**self).start(name)
    }

    fn stop(&self, name: &str) -> Result<()> {
        (**self).stop(name)
    }
}

/// `systemctl`-backed service manager
///
/// Each entity maps to a unit derived from a template, `openvpn@{name}` by
/// default. `is-active` exiting 0 means ON; any other exit status means OFF.
#[derive(Debug, Clone)]
pub struct SystemctlManager {
    program: String,
    unit_template: String,
}

impl SystemctlManager {
    pub fn new(unit_template: impl Into<String>) -> Self {
        Self {
            program: "systemctl".to_string(),
            unit_template: unit_template.into(),
        }
    }

    /// Run `program` instead of `systemctl`
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Unit controlling entity `name`
    pub fn unit_for(&self, name: &str) -> String {
        self.unit_template.replace(NAME_PLACEHOLDER, name)
    }

    fn checked_unit(&self, op: &str, name: &str) -> Result<String> {
        validate_name(name).map_err(|e| vpnstat_core::ExError::from(e).with_op(op))?;
        Ok(self.unit_for(name))
    }

    fn run(&self, op: &str, verb: &str, name: &str) -> Result<()> {
        let unit = self.checked_unit(op, name)?;
        tracing::debug!(program = %self.program, verb, unit = %unit, "Running service command");

        let output = Command::new(&self.program)
            .args([verb, unit.as_str()])
            .stdin(Stdio::null())
            .output()
            .map_err(|e| spawn_failed(&self.program, op, e).with_entity(name))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(command_failed(op, &unit, output.status, &stderr).with_entity(name));
        }
        Ok(())
    }
}

impl Default for SystemctlManager {
    fn default() -> Self {
        Self::new(DEFAULT_UNIT_TEMPLATE)
    }
}

impl ServiceManager for SystemctlManager {
    fn is_active(&self, name: &str) -> Result<bool> {
        let unit = self.checked_unit("is_active", name)?;
        let status = Command::new(&self.program)
            .args(["is-active", unit.as_str()])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| spawn_failed(&self.program, "is_active", e).with_entity(name))?;
        Ok(status.success())
    }

    fn start(&self, name: &str) -> Result<()> {
        self.run("start", "start", name)
    }

    fn stop(&self, name: &str) -> Result<()> {
        self.run("stop", "stop", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vpnstat_core::errors::ExErrorKind;

    #[test]
    fn test_unit_from_template() {
        let manager = SystemctlManager::default();
        assert_eq!(manager.unit_for("office"), "openvpn@office");
        let manager = SystemctlManager::new("wg-quick@{name}.service");
        assert_eq!(manager.unit_for("lab"), "wg-quick@lab.service");
    }

    #[test]
    fn test_rejects_unsafe_names_before_spawning() {
        let manager = SystemctlManager::default().with_program("/nonexistent/systemctl");
        for name in ["", "../etc", "two words"] {
            let err = manager.start(name).unwrap_err();
            assert_eq!(err.kind(), ExErrorKind::InvalidName, "name {:?}", name);
            assert_eq!(err.op(), Some("start"));
        }
    }

    #[test]
    fn test_spawn_failure_is_external_service_error() {
        let manager = SystemctlManager::default().with_program("/nonexistent/systemctl");
        let err = manager.is_active("office").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::ExternalService);
        assert_eq!(err.entity(), Some("office"));
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_status_maps_to_state() {
        let on = SystemctlManager::default().with_program("true");
        assert!(on.is_active("office").unwrap());
        let off = SystemctlManager::default().with_program("false");
        assert!(!off.is_active("office").unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_start_reports_unit() {
        let manager = SystemctlManager::default().with_program("false");
        let err = manager.start("office").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::ExternalService);
        assert!(err.message().contains("openvpn@office"));
    }
}

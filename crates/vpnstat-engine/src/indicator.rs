//! Tray indicator state derived from a snapshot.

use serde::Serialize;
use vpnstat_core::Snapshot;

/// Whether any entity is up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    Active,
    Inactive,
}

impl Indicator {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        if snapshot.any_on() {
            Indicator::Active
        } else {
            Indicator::Inactive
        }
    }

    pub fn tooltip(self) -> &'static str {
        match self {
            Indicator::Active => "OpenVPN - VPN(s) running",
            Indicator::Inactive => "OpenVPN - All VPNs off",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Indicator::Active => "active",
            Indicator::Inactive => "inactive",
        }
    }
}

impl std::fmt::Display for Indicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_on_is_active() {
        let snapshot = Snapshot::from_pairs([("office", false), ("home", true)]).unwrap();
        assert_eq!(Indicator::from_snapshot(&snapshot), Indicator::Active);
        assert_eq!(
            Indicator::from_snapshot(&snapshot).tooltip(),
            "OpenVPN - VPN(s) running"
        );
    }

    #[test]
    fn test_empty_is_inactive() {
        let indicator = Indicator::from_snapshot(&Snapshot::empty());
        assert_eq!(indicator, Indicator::Inactive);
        assert_eq!(indicator.tooltip(), "OpenVPN - All VPNs off");
    }
}

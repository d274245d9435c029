//! One-line descriptions of entity transitions.

use crate::reconcile::model::{Change, ChangeKind};

/// Render a change as `<app>: <entity> ...`
///
/// - toggled: `openvpn-tray: home changed from OFF to ON`
/// - added: `openvpn-tray: lab added (ON)`
/// - removed: `openvpn-tray: lab removed (was OFF)`
pub fn render_change_line(change: &Change, app_name: &str) -> String {
    match change.kind {
        ChangeKind::Toggled { from, to } => {
            format!("{}: {} changed from {} to {}", app_name, change.name, from, to)
        }
        ChangeKind::Added { state } => format!("{}: {} added ({})", app_name, change.name, state),
        ChangeKind::Removed { state } => {
            format!("{}: {} removed (was {})", app_name, change.name, state)
        }
    }
}

//! Keyed comparison of two snapshots.

use std::collections::HashMap;

use crate::model::{EntityState, Snapshot};
use crate::reconcile::model::{Change, ChangeKind};

/// Compute the transitions from `previous` to `current`, joined by name
///
/// Output order: toggled and added entities in `current` order, then removed
/// entities in `previous` order. Identical snapshots yield no changes.
pub fn diff_snapshots(previous: &Snapshot, current: &Snapshot) -> Vec<Change> {
    let before: HashMap<&str, EntityState> = previous
        .iter()
        .map(|e| (e.name.as_str(), e.state))
        .collect();
    let after: HashMap<&str, EntityState> = current
        .iter()
        .map(|e| (e.name.as_str(), e.state))
        .collect();

    let mut changes = Vec::new();

    for entity in current {
        match before.get(entity.name.as_str()) {
            None => changes.push(Change {
                name: entity.name.clone(),
                kind: ChangeKind::Added {
                    state: entity.state,
                },
            }),
            Some(&from) if from != entity.state => changes.push(Change {
                name: entity.name.clone(),
                kind: ChangeKind::Toggled {
                    from,
                    to: entity.state,
                },
            }),
            Some(_) => {}
        }
    }

    for entity in previous {
        if !after.contains_key(entity.name.as_str()) {
            changes.push(Change {
                name: entity.name.clone(),
                kind: ChangeKind::Removed {
                    state: entity.state,
                },
            });
        }
    }

    changes
}

#![allow(clippy::unwrap_used, clippy::expect_used)]

use proptest::prelude::*;
use vpnstat_core::render::render_status_table;
use vpnstat_core::{Entity, Snapshot};

fn snapshot_strategy() -> impl Strategy<Value = Snapshot> {
    proptest::collection::btree_map("[a-z][a-z0-9_-]{0,30}", any::<bool>(), 0..12).prop_map(
        |entries| {
            let entities = entries
                .into_iter()
                .map(|(name, on)| Entity::new(name, on).unwrap())
                .collect();
            Snapshot::new(entities).unwrap()
        },
    )
}

proptest! {
    #[test]
    fn prop_render_is_idempotent(snapshot in snapshot_strategy()) {
        prop_assert_eq!(
            render_status_table(&snapshot, "vpn"),
            render_status_table(&snapshot, "vpn")
        );
    }

    #[test]
    fn prop_rows_share_one_width(snapshot in snapshot_strategy()) {
        prop_assume!(!snapshot.is_empty());
        let table = render_status_table(&snapshot, "vpn");
        let longest = snapshot.names().map(|n| n.chars().count()).max().unwrap_or(0);
        let expected = longest.max(4) + 13;
        for line in table.lines() {
            prop_assert_eq!(line.chars().count(), expected);
        }
        // top border, header, rule, rows, rule
        prop_assert_eq!(table.lines().count(), snapshot.len() + 4);
    }

    #[test]
    fn prop_every_entity_has_a_row(snapshot in snapshot_strategy()) {
        let table = render_status_table(&snapshot, "vpn");
        for entity in &snapshot {
            let prefix = format!("| {} ", entity.name);
            let row = table.lines().find(|l| l.starts_with(&prefix));
            prop_assert!(row.is_some());
            prop_assert!(row.unwrap().contains(entity.state.label()));
        }
    }
}

#[test]
fn test_name_column_width_follows_longest_name() {
    let snapshot = Snapshot::from_pairs([("abc", true), ("twelve-chars", false)]).unwrap();
    let table = render_status_table(&snapshot, "vpn");
    let header = table.lines().nth(1).unwrap();
    assert_eq!(header, "| Name         | Status |");
}

#[test]
fn test_headers_never_shrink() {
    let snapshot = Snapshot::from_pairs([("a", true)]).unwrap();
    let table = render_status_table(&snapshot, "vpn");
    assert!(table.contains("| Name | Status |"));
    assert!(table.contains("| a    | ON     |"));
}

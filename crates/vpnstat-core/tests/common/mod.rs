use chrono::{DateTime, TimeZone, Utc};
use vpnstat_core::config::StatusConfig;
use vpnstat_core::reconcile::{ManualClock, ReconciliationEngine};
use vpnstat_core::Snapshot;

/// Fixed starting instant for manual clocks
#[allow(dead_code)]
pub fn t0() -> DateTime<Utc> {
    Utc.timestamp_opt(1_750_000_000, 0).unwrap()
}

/// Build a snapshot from `(name, on)` pairs
#[allow(dead_code)]
pub fn snap(pairs: &[(&str, bool)]) -> Snapshot {
    Snapshot::from_pairs(pairs.iter().copied()).unwrap()
}

/// Engine with app name `vpn` and a manual clock starting at [`t0`]
#[allow(dead_code)]
pub fn test_engine() -> (ReconciliationEngine<ManualClock>, ManualClock) {
    let config = StatusConfig {
        app_name: "vpn".to_string(),
        ..StatusConfig::default()
    };
    let clock = ManualClock::new(t0());
    (ReconciliationEngine::with_clock(config, clock.clone()), clock)
}

/// Number of full tables written to a sink
#[allow(dead_code)]
pub fn table_count(lines: &[String]) -> usize {
    lines
        .iter()
        .filter(|l| l.starts_with('+') && l.contains(" status "))
        .count()
}

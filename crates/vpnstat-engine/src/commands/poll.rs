//! Poll tick orchestration.
//!
//! ## Tick pipeline (in order):
//! 1. Discover entity names (failure skips the tick)
//! 2. Query each service state (failure counts as OFF)
//! 3. Build the snapshot and hand it to the store, applying the overflow
//!    policy on `CapacityExceeded`
//! 4. Reconcile against the previous snapshot, writing to the sink
//! 5. Commit current into previous
//!
//! ## Logging
//!
//! - `log_op_start!` / `log_op_end!` around every tick, tagged with a
//!   fresh `tick_id`
//! - `log_op_error!` when the tick is skipped
//! - indicator transitions at info level

use std::time::{Duration, Instant};

use vpnstat_core::errors::ExError;
use vpnstat_core::reconcile::{Clock, ReconcileReport, ReconciliationEngine, SystemClock};
use vpnstat_core::sink::LineSink;
use vpnstat_core::{log_op_end, log_op_error, log_op_start};
use vpnstat_core::{Snapshot, SnapshotStore};
use vpnstat_core_types::TickId;

use crate::config::{OverflowPolicy, TrayConfig};
use crate::discovery::{ConfDirDiscovery, EntitySource};
use crate::errors::Result;
use crate::indicator::Indicator;
use crate::service::{ServiceManager, SystemctlManager};

/// Result of one completed tick
#[derive(Debug, Clone)]
pub struct TickOutcome {
    pub tick_id: TickId,
    pub entity_count: usize,
    pub indicator: Indicator,
    pub report: ReconcileReport,
}

/// Drives discovery, state queries and reconciliation once per tick
pub struct Poller<C: Clock = SystemClock> {
    source: Box<dyn EntitySource>,
    services: Box<dyn ServiceManager>,
    store: SnapshotStore,
    engine: ReconciliationEngine<C>,
    overflow_policy: OverflowPolicy,
    poll_interval: Duration,
    indicator: Option<Indicator>,
}

impl Poller<SystemClock> {
    /// Poller over `<conf_dir>/*.<ext>` using `systemctl`
    pub fn from_config(config: &TrayConfig) -> Self {
        let limit = match config.overflow_policy {
            OverflowPolicy::Truncate => Some(config.status.max_entities),
            OverflowPolicy::SkipTick => None,
        };
        let source = ConfDirDiscovery::new(&config.conf_dir, &config.conf_extension).with_limit(limit);
        let services = SystemctlManager::new(config.unit_template.clone());
        Self::new(config, Box::new(source), Box::new(services))
    }

    pub fn new(
        config: &TrayConfig,
        source: Box<dyn EntitySource>,
        services: Box<dyn ServiceManager>,
    ) -> Self {
        Self::with_clock(config, source, services, SystemClock)
    }
}

impl<C: Clock> Poller<C> {
    pub fn with_clock(
        config: &TrayConfig,
        source: Box<dyn EntitySource>,
        services: Box<dyn ServiceManager>,
        clock: C,
    ) -> Self {
        Self {
            source,
            services,
            store: SnapshotStore::new(config.status.max_entities),
            engine: ReconciliationEngine::with_clock(config.status.clone(), clock),
            overflow_policy: config.overflow_policy,
            poll_interval: config.poll_interval(),
            indicator: None,
        }
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    pub fn engine(&self) -> &ReconciliationEngine<C> {
        &self.engine
    }

    /// Indicator after the last completed tick
    pub fn indicator(&self) -> Option<Indicator> {
        self.indicator
    }

    /// Run one tick, logging and swallowing the reason if it is skipped
    pub fn tick(&mut self, sink: &mut dyn LineSink) -> Option<TickOutcome> {
        self.try_tick(sink).ok()
    }

    /// Run one tick
    ///
    /// # Errors
    ///
    /// Returns the reason the tick was skipped: discovery failure, an
    /// unusable entity name, or `CapacityExceeded` under
    /// [`OverflowPolicy::SkipTick`]. The previous state is kept.
    pub fn try_tick(&mut self, sink: &mut dyn LineSink) -> Result<TickOutcome> {
        let tick_id = TickId::new();
        log_op_start!("poll_tick", tick_id = tick_id.as_str());
        let start = Instant::now();

        let result = self.observe().and_then(|snapshot| self.store_snapshot(snapshot));
        if let Err(err) = result {
            let err = err.with_tick_id(tick_id.clone());
            log_op_error!(
                "poll_tick",
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            return Err(err);
        }

        let report = self.engine.reconcile(self.store.current_snapshot(), sink);
        self.store.commit();

        let current = self.store.current_snapshot();
        let indicator = Indicator::from_snapshot(current);
        if self.indicator != Some(indicator) {
            tracing::info!(
                tick_id = tick_id.as_str(),
                indicator = indicator.as_str(),
                tooltip = indicator.tooltip(),
                "Indicator changed"
            );
            self.indicator = Some(indicator);
        }

        let outcome = TickOutcome {
            entity_count: current.len(),
            indicator,
            report,
            tick_id,
        };

        log_op_end!(
            "poll_tick",
            duration_ms = start.elapsed().as_millis() as u64,
            tick_id = outcome.tick_id.as_str(),
            entity_count = outcome.entity_count,
            change_count = outcome.report.changes.len()
        );

        Ok(outcome)
    }

    /// Tick forever, or `max_ticks` times, sleeping the poll interval between
    /// ticks
    pub fn run(&mut self, sink: &mut dyn LineSink, max_ticks: Option<u64>) {
        let mut ticks = 0u64;
        while !max_ticks.is_some_and(|max| ticks >= max) {
            if ticks > 0 {
                std::thread::sleep(self.poll_interval);
            }
            self.tick(sink);
            ticks += 1;
        }
    }

    fn observe(&self) -> Result<Snapshot> {
        let names = self.source.discover()?;
        let pairs = names.into_iter().map(|name| {
            let on = match self.services.is_active(&name) {
                Ok(on) => on,
                Err(err) => {
                    tracing::warn!(entity = %name, error = %err, "State query failed, reporting OFF");
                    false
                }
            };
            (name, on)
        });
        Snapshot::from_pairs(pairs).map_err(|e| ExError::from(e).with_op("poll_tick"))
    }

    fn store_snapshot(&mut self, snapshot: Snapshot) -> Result<()> {
        let max = self.store.max_entities();
        if snapshot.len() > max && self.overflow_policy == OverflowPolicy::Truncate {
            tracing::warn!(
                entity_count = snapshot.len(),
                max_entities = max,
                "Too many entities, keeping the first ones"
            );
            return self
                .store
                .replace_current(snapshot.truncated(max))
                .map_err(ExError::from);
        }
        self.store.replace_current(snapshot).map_err(ExError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use vpnstat_core::errors::ExErrorKind;
    use vpnstat_core::MemorySink;
    use vpnstat_core_types::schema::FIELD_ENTITY_COUNT;

    struct FixedSource(Rc<RefCell<Vec<String>>>);

    impl EntitySource for FixedSource {
        fn discover(&self) -> Result<Vec<String>> {
            Ok(self.0.borrow().clone())
        }
    }

    struct AllOn;

    impl ServiceManager for AllOn {
        fn is_active(&self, _name: &str) -> Result<bool> {
            Ok(true)
        }
        fn start(&self, _name: &str) -> Result<()> {
            Ok(())
        }
        fn stop(&self, _name: &str) -> Result<()> {
            Ok(())
        }
    }

    fn poller(names: &[&str], policy: OverflowPolicy, max: usize) -> Poller {
        let mut config = TrayConfig::default();
        config.status.max_entities = max;
        config.overflow_policy = policy;
        let names = names.iter().map(|n| n.to_string()).collect();
        Poller::new(
            &config,
            Box::new(FixedSource(Rc::new(RefCell::new(names)))),
            Box::new(AllOn),
        )
    }

    #[test]
    fn test_truncate_policy_keeps_first_entities() {
        let mut poller = poller(&["a", "b", "c"], OverflowPolicy::Truncate, 2);
        let mut sink = MemorySink::new();
        let outcome = poller.tick(&mut sink).unwrap();
        assert_eq!(outcome.entity_count, 2);
        assert_eq!(
            poller.store().current_snapshot().names().collect::<Vec<_>>(),
            vec!["a", "b"]
        );
    }

    #[test]
    fn test_skip_policy_drops_tick() {
        let mut poller = poller(&["a", "b", "c"], OverflowPolicy::SkipTick, 2);
        let mut sink = MemorySink::new();
        let err = poller.try_tick(&mut sink).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::CapacityExceeded);
        assert!(err.tick_id().is_some());
        assert!(sink.lines().is_empty());
        assert!(poller.indicator().is_none());
    }

    #[test]
    fn test_run_with_zero_ticks_does_nothing() {
        let mut poller = poller(&["a"], OverflowPolicy::Truncate, 10);
        let mut sink = MemorySink::new();
        poller.run(&mut sink, Some(0));
        assert!(sink.lines().is_empty());
        assert!(poller.indicator().is_none());
        assert!(poller.store().current_snapshot().is_empty());
    }

    #[test]
    fn test_truncate_warns_with_entity_count() {
        let capture = vpnstat_core::logging_facility::init_test_capture();
        let mut poller = poller(&["a", "b", "c", "d", "e", "f", "g"], OverflowPolicy::Truncate, 6);
        let mut sink = MemorySink::new();
        poller.tick(&mut sink).unwrap();
        let warned = capture.count_events(|e| {
            e.fields.get(FIELD_ENTITY_COUNT).map(String::as_str) == Some("7")
                && e.fields.get("max_entities").map(String::as_str) == Some("6")
        });
        assert!(warned >= 1);
    }

    #[test]
    fn test_run_stops_after_max_ticks() {
        let mut poller = poller(&["a"], OverflowPolicy::Truncate, 10);
        let mut sink = MemorySink::new();
        poller.run(&mut sink, Some(1));
        assert_eq!(poller.indicator(), Some(Indicator::Active));
        assert!(sink.text().contains("| a    | ON     |"));
    }
}

//! Service control commands.
//!
//! Single-entity commands own their `log_op_*` boundary. Bulk commands act on
//! every given entity regardless of its current state, keep going past
//! failures and report them together.

use std::time::Instant;

use serde::Serialize;
use vpnstat_core::errors::ExError;
use vpnstat_core::{log_op_end, log_op_error, log_op_start};

use crate::errors::Result;
use crate::service::ServiceManager;

/// Per-entity results of a bulk command
#[derive(Debug, Clone, Default)]
pub struct BulkOutcome {
    pub succeeded: Vec<String>,
    pub failed: Vec<(String, ExError)>,
}

impl BulkOutcome {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn summary(&self) -> BulkSummary {
        BulkSummary {
            succeeded: self.succeeded.len(),
            failed: self.failed.len(),
        }
    }
}

/// Counts of a [`BulkOutcome`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BulkSummary {
    pub succeeded: usize,
    pub failed: usize,
}

/// Start the service behind `name`
///
/// # Errors
///
/// `InvalidName` for an unusable name, `ExternalService` when the service
/// manager fails.
pub fn turn_on(services: &dyn ServiceManager, name: &str) -> Result<()> {
    control("service_start", name, |n| services.start(n))
}

/// Stop the service behind `name`
///
/// # Errors
///
/// `InvalidName` for an unusable name, `ExternalService` when the service
/// manager fails.
pub fn turn_off(services: &dyn ServiceManager, name: &str) -> Result<()> {
    control("service_stop", name, |n| services.stop(n))
}

/// Start every entity in `names`
pub fn turn_on_all<S: AsRef<str>>(services: &dyn ServiceManager, names: &[S]) -> BulkOutcome {
    bulk("service_start_all", names, |n| turn_on(services, n))
}

/// Stop every entity in `names`
pub fn turn_off_all<S: AsRef<str>>(services: &dyn ServiceManager, names: &[S]) -> BulkOutcome {
    bulk("service_stop_all", names, |n| turn_off(services, n))
}

fn control<F>(op: &str, name: &str, action: F) -> Result<()>
where
    F: FnOnce(&str) -> Result<()>,
{
    log_op_start!(op, entity = name);
    let start = Instant::now();

    action(name).map_err(|e| {
        log_op_error!(
            op,
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        op,
        duration_ms = start.elapsed().as_millis() as u64,
        entity = name
    );
    Ok(())
}

fn bulk<S, F>(op: &str, names: &[S], action: F) -> BulkOutcome
where
    S: AsRef<str>,
    F: Fn(&str) -> Result<()>,
{
    log_op_start!(op, entity_count = names.len());
    let start = Instant::now();

    let mut outcome = BulkOutcome::default();
    for name in names {
        let name = name.as_ref();
        match action(name) {
            Ok(()) => outcome.succeeded.push(name.to_string()),
            Err(err) => outcome.failed.push((name.to_string(), err)),
        }
    }

    log_op_end!(
        op,
        duration_ms = start.elapsed().as_millis() as u64,
        succeeded = outcome.succeeded.len(),
        failed = outcome.failed.len()
    );
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use vpnstat_core::errors::ExErrorKind;
    use vpnstat_core::logging_facility::init_test_capture;
    use vpnstat_core_types::schema::{EVENT_END, EVENT_START, FIELD_ENTITY, FIELD_ENTITY_COUNT};

    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<String>>,
    }

    impl ServiceManager for Recorder {
        fn is_active(&self, _name: &str) -> Result<bool> {
            Ok(false)
        }
        fn start(&self, name: &str) -> Result<()> {
            self.calls.borrow_mut().push(format!("start {}", name));
            if name == "broken" {
                return Err(ExError::new(ExErrorKind::ExternalService).with_entity(name));
            }
            Ok(())
        }
        fn stop(&self, name: &str) -> Result<()> {
            self.calls.borrow_mut().push(format!("stop {}", name));
            Ok(())
        }
    }

    #[test]
    fn test_bulk_continues_past_failures() {
        let services = Recorder::default();
        let outcome = turn_on_all(&services, &["office", "broken", "home"]);

        assert_eq!(outcome.succeeded, vec!["office", "home"]);
        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.failed[0].0, "broken");
        assert!(!outcome.is_success());
        assert_eq!(services.calls.borrow().len(), 3);
    }

    #[test]
    fn test_turn_off_all_in_order() {
        let services = Recorder::default();
        let outcome = turn_off_all(&services, &["b", "a"]);
        assert!(outcome.is_success());
        assert_eq!(*services.calls.borrow(), vec!["stop b", "stop a"]);
        assert_eq!(
            outcome.summary(),
            BulkSummary {
                succeeded: 2,
                failed: 0
            }
        );
    }

    #[test]
    fn test_single_failure_propagates() {
        let services = Recorder::default();
        let err = turn_on(&services, "broken").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::ExternalService);
        assert!(turn_on(&services, "office").is_ok());
    }

    #[test]
    fn test_boundaries_carry_entity_fields() {
        let capture = init_test_capture();
        let services = Recorder::default();
        turn_off(&services, "boundary-office").unwrap();
        turn_off_all(&services, &["bulk-a", "bulk-b", "bulk-c"]);

        let single = capture.count_events(|e| {
            e.op.as_deref() == Some("service_stop")
                && e.fields.get(FIELD_ENTITY).map(String::as_str) == Some("boundary-office")
        });
        assert_eq!(single, 2, "start and end both name the entity");

        let bulk_start = capture.count_events(|e| {
            e.op.as_deref() == Some("service_stop_all")
                && e.event.as_deref() == Some(EVENT_START)
                && e.fields.get(FIELD_ENTITY_COUNT).map(String::as_str) == Some("3")
        });
        assert!(bulk_start >= 1);
        capture.assert_event_exists("service_stop_all", EVENT_END);
    }
}

#![allow(clippy::unwrap_used, clippy::expect_used)]

use vpnstat_core::errors::StatusError;
use vpnstat_core::logging_facility::test_capture::init_test_capture;
use vpnstat_core::{log_op_end, log_op_error, log_op_start};
use vpnstat_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_DURATION_MS, FIELD_ERR_CODE, FIELD_ERR_KIND,
};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name, entity = "office");

    let events = capture.events();
    let start = events
        .iter()
        .find(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_START))
        .expect("start event captured");
    assert_eq!(start.fields.get("entity"), Some(&"office".to_string()));
}

#[test]
fn test_log_op_end_records_duration() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let events = capture.events();
    let end_events: Vec<_> = events
        .iter()
        .filter(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END))
        .collect();

    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(
        end_events[0].fields.get(FIELD_DURATION_MS),
        Some(&"42".to_string())
    );
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = StatusError::CapacityExceeded { count: 101, max: 100 };
    log_op_error!(op_name, err, duration_ms = 10);

    let events = capture.events();
    let error_events: Vec<_> = events
        .iter()
        .filter(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END_ERROR))
        .collect();

    assert_eq!(error_events.len(), 1, "Should have exactly one error event");
    assert_eq!(
        error_events[0].fields.get(FIELD_ERR_CODE),
        Some(&"ERR_CAPACITY_EXCEEDED".to_string())
    );
    assert_eq!(
        error_events[0].fields.get(FIELD_ERR_KIND),
        Some(&"CapacityExceeded".to_string())
    );
}

#[test]
fn test_bool_fields_are_recorded() {
    let capture = init_test_capture();

    tracing::info!(op = "test_bool_fields_unique_4", active = true);

    assert_eq!(
        capture.count_events(|e| e.op.as_deref() == Some("test_bool_fields_unique_4")
            && e.fields.get("active").map(String::as_str) == Some("true")),
        1
    );
}

#[test]
fn test_start_and_end_pair() {
    let capture = init_test_capture();
    let op_name = "test_start_end_pair_unique_5";

    log_op_start!(op_name);
    log_op_end!(op_name, duration_ms = 1);

    capture.assert_event_exists(op_name, EVENT_START);
    capture.assert_event_exists(op_name, EVENT_END);
}

#[test]
fn test_log_op_error_with_fields_keeps_message() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_fields_unique_6";

    let err = StatusError::DuplicateEntity {
        name: "office".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 2, tick_id = "tick-6");

    let events = capture.events();
    let event = events
        .iter()
        .find(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END_ERROR))
        .expect("error event captured");
    assert_eq!(event.fields.get("tick_id"), Some(&"tick-6".to_string()));
    assert_eq!(
        event.fields.get(FIELD_ERR_CODE),
        Some(&"ERR_DUPLICATE_ENTITY".to_string())
    );
    let message = event.fields.get("message").expect("message recorded");
    assert!(message.contains("office"), "message: {}", message);
}

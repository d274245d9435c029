//! Canonical logging macros
//!
//! These macros provide a structured, consistent way to log operation
//! boundaries. Only the orchestration layer (poller, service commands) owns
//! boundaries; the core logs internal details with plain `tracing::debug!`.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use vpnstat_core::log_op_start;
/// log_op_start!("poll_tick");
/// log_op_start!("service_start", entity = "office");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = vpnstat_core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = vpnstat_core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use vpnstat_core::log_op_end;
/// log_op_end!("poll_tick", duration_ms = 12);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = vpnstat_core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = vpnstat_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// The error is converted into an [`ExError`](crate::errors::ExError) so that
/// its kind and stable code are always recorded.
///
/// # Example
///
/// ```
/// # use vpnstat_core::log_op_error;
/// # use vpnstat_core::errors::StatusError;
/// let err = StatusError::CapacityExceeded { count: 120, max: 100 };
/// log_op_error!("poll_tick", err.clone(), duration_ms = 3);
/// log_op_error!("poll_tick", err, duration_ms = 3, tick_id = "t-1");
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        use $crate::errors::ExError;
        let ex_err: ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = vpnstat_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            "{}",
            ex_err
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        use $crate::errors::ExError;
        let ex_err: ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = vpnstat_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            $($field)*,
            "{}",
            ex_err
        );
    }};
}

//! Logging utilities for structured tracing

use crate::error::SlackLogError;
use std::time::Instant;

/// Track operation timing and log on drop
pub struct Timer {
    start: Instant,
    operation: &'static str,
}

impl Timer {
    pub fn new(operation: &'static str) -> Self {
        Self {
            start: Instant::now(),
            operation,
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        let duration_ms = self.start.elapsed().as_millis() as u64;
        tracing::debug!(
            operation = %self.operation,
            duration_ms = duration_ms,
            "Operation completed"
        );
    }
}

/// Log a handler error with structured context.
///
/// This is the default error path for records that could not be delivered.
pub fn log_error(operation: &str, error: &SlackLogError) {
    tracing::error!(
        operation = %operation,
        error = %error,
        transport = error.is_transport(),
        "Slack log delivery failed"
    );
}

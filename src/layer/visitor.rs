use crate::record::{ExceptionInfo, LogRecord};
use crate::severity::Severity;
use std::error::Error;
use std::fmt;
use tracing::Event;
use tracing::field::{Field, Visit};

/// Collects the fields of a tracing event into a [`LogRecord`].
///
/// Error values (fields recorded through `record_error`) become the record's
/// exception and are kept out of the message text.
#[derive(Default)]
struct RecordVisitor {
    message: Option<String>,
    fields: Vec<(&'static str, String)>,
    exception: Option<ExceptionInfo>,
    log_target: Option<String>,
}

impl RecordVisitor {
    fn render(&self) -> String {
        let mut text = self.message.clone().unwrap_or_default();
        for (name, value) in &self.fields {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(name);
            text.push('=');
            text.push_str(value);
        }
        text
    }

    fn push(&mut self, field: &Field, value: String) {
        match field.name() {
            "message" => self.message = Some(value),
            "log.target" => self.log_target = Some(value),
            // Remaining `log` crate metadata is noise in a chat message
            name if name.starts_with("log.") => {}
            name => self.fields.push((name, value)),
        }
    }
}

impl Visit for RecordVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.push(field, value.to_string());
    }

    fn record_error(&mut self, _field: &Field, value: &(dyn Error + 'static)) {
        if self.exception.is_none() {
            self.exception = Some(ExceptionInfo::from_dyn(value));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.push(field, format!("{:?}", value));
    }
}

/// Convert a tracing event into a record for the handler
pub fn record_from_event(event: &Event<'_>) -> LogRecord {
    let mut visitor = RecordVisitor::default();
    event.record(&mut visitor);

    let metadata = event.metadata();
    LogRecord {
        level: Severity::from(*metadata.level()),
        message: visitor.render(),
        target: visitor
            .log_target
            .take()
            .unwrap_or_else(|| metadata.target().to_string()),
        exception: visitor.exception,
    }
}

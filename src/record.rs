//! Log record model handed to the handler

use crate::severity::Severity;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error;

/// A single log event: severity, rendered message and optional error information
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub level: Severity,

    /// Rendered message text. Never contains the error trace.
    pub message: String,

    /// Module path / tracing target that produced the record
    pub target: String,

    pub exception: Option<ExceptionInfo>,
}

impl LogRecord {
    pub fn new(level: Severity, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            target: String::new(),
            exception: None,
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    pub fn with_exception(mut self, exception: ExceptionInfo) -> Self {
        self.exception = Some(exception);
        self
    }

    /// The message as it appears in Slack before any mention prefix
    pub fn get_message(&self) -> &str {
        &self.message
    }
}

/// Error details attached to a record, rendered into the Slack attachment
#[derive(Debug, Clone, PartialEq)]
pub struct ExceptionInfo {
    /// Error type name, when statically known
    pub kind: Option<String>,
    pub message: String,
    /// `Error::source()` chain, outermost first
    pub causes: Vec<String>,
    pub backtrace: Option<String>,
}

impl ExceptionInfo {
    /// Capture a concrete error, including its type name
    pub fn from_error<E: Error + 'static>(err: &E) -> Self {
        let mut info = Self::from_dyn(err);
        info.kind = Some(std::any::type_name::<E>().to_string());
        info
    }

    /// Capture a type-erased error. A backtrace of the current thread is
    /// taken when backtraces are enabled (`RUST_BACKTRACE`).
    pub fn from_dyn(err: &(dyn Error + 'static)) -> Self {
        Self {
            kind: None,
            message: err.to_string(),
            causes: source_chain(err.source()),
            backtrace: captured(&Backtrace::capture()),
        }
    }

    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        Self {
            kind: None,
            message: err.to_string(),
            causes: err.chain().skip(1).map(|cause| cause.to_string()).collect(),
            backtrace: captured(err.backtrace()),
        }
    }

    /// Full multi-section trace text: headline, cause chain, backtrace frames
    pub fn format_trace(&self) -> String {
        let mut text = match &self.kind {
            Some(kind) => format!("{}: {}", kind, self.message),
            None => self.message.clone(),
        };

        if !self.causes.is_empty() {
            text.push_str("\n\nCaused by:");
            for (i, cause) in self.causes.iter().enumerate() {
                text.push_str(&format!("\n    {}: {}", i, cause));
            }
        }

        if let Some(backtrace) = &self.backtrace {
            text.push_str("\n\nStack backtrace:\n");
            text.push_str(backtrace.trim_end());
        }

        text
    }
}

fn source_chain(mut source: Option<&(dyn Error + 'static)>) -> Vec<String> {
    let mut causes = Vec::new();
    while let Some(err) = source {
        causes.push(err.to_string());
        source = err.source();
    }
    causes
}

fn captured(backtrace: &Backtrace) -> Option<String> {
    match backtrace.status() {
        BacktraceStatus::Captured => Some(backtrace.to_string()),
        _ => None,
    }
}

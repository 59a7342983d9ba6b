//! Forward log records to Slack.
//!
//! [`SlackLogHandler`] turns a [`LogRecord`] into a Slack message: optional
//! mentions of configured users above a severity threshold, and an
//! attachment colored by severity that carries the error trace.
//! [`SlackLayer`] plugs the handler into `tracing`.

pub mod config;
pub mod error;
pub mod handler;
pub mod layer;
pub mod logging;
pub mod record;
pub mod severity;
pub mod slack;

pub use config::{HandlerConfig, HandlerOptions};
pub use error::{Result, SlackLogError};
pub use handler::SlackLogHandler;
pub use layer::SlackLayer;
pub use record::{ExceptionInfo, LogRecord};
pub use severity::Severity;

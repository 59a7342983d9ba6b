//! Severity levels and their Slack presentation

use crate::error::{Result, SlackLogError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Built-in Slack attachment color for errors
pub const ERROR_COLOR: &str = "danger";

/// Built-in Slack attachment color for warnings
pub const WARNING_COLOR: &str = "warning";

pub const INFO_COLOR: &str = "#439FE0";

/// Emoji used as the message icon when neither an emoji nor an icon URL is configured
pub const DEFAULT_EMOJI: &str = ":heavy_exclamation_mark:";

/// Numeric, ordered log severity.
///
/// The named levels are spaced by ten so that custom levels can sit between
/// them (e.g. `Severity(5)` for tracing's TRACE). Levels that are not one of
/// the named constants are still valid severities; they simply have no
/// dedicated presentation.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Severity(pub u8);

impl Severity {
    pub const NOTSET: Severity = Severity(0);
    pub const DEBUG: Severity = Severity(10);
    pub const INFO: Severity = Severity(20);
    pub const WARNING: Severity = Severity(30);
    pub const ERROR: Severity = Severity(40);
    pub const CRITICAL: Severity = Severity(50);

    /// Level name, or `None` for custom levels
    pub fn name(&self) -> Option<&'static str> {
        match *self {
            Self::NOTSET => Some("NOTSET"),
            Self::DEBUG => Some("DEBUG"),
            Self::INFO => Some("INFO"),
            Self::WARNING => Some("WARNING"),
            Self::ERROR => Some("ERROR"),
            Self::CRITICAL => Some("CRITICAL"),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "Level {}", self.0),
        }
    }
}

impl From<tracing::Level> for Severity {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::ERROR => Self::ERROR,
            tracing::Level::WARN => Self::WARNING,
            tracing::Level::INFO => Self::INFO,
            tracing::Level::DEBUG => Self::DEBUG,
            // No named counterpart, sits below DEBUG
            tracing::Level::TRACE => Severity(5),
        }
    }
}

impl FromStr for Severity {
    type Err = SlackLogError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(n) = s.parse::<u8>() {
            return Ok(Severity(n));
        }

        match s.to_ascii_lowercase().as_str() {
            "notset" => Ok(Self::NOTSET),
            "debug" => Ok(Self::DEBUG),
            "info" => Ok(Self::INFO),
            "warn" | "warning" => Ok(Self::WARNING),
            "error" => Ok(Self::ERROR),
            "critical" | "fatal" => Ok(Self::CRITICAL),
            _ => Err(SlackLogError::Config(format!("Invalid severity level: {}", s))),
        }
    }
}

/// Attachment color for a severity.
///
/// Total over all levels: anything without a dedicated color (including
/// NOTSET and custom levels) gets the info color.
pub fn color_for(severity: Severity) -> &'static str {
    match severity {
        Severity::CRITICAL | Severity::ERROR => ERROR_COLOR,
        Severity::WARNING => WARNING_COLOR,
        Severity::INFO | Severity::DEBUG | Severity::NOTSET => INFO_COLOR,
        _ => INFO_COLOR,
    }
}

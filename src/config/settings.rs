use crate::error::{Result, SlackLogError};
use crate::severity::{DEFAULT_EMOJI, Severity};
use std::fmt;

pub const DEFAULT_USERNAME: &str = "Rust logger";

/// Raw handler arguments, before normalization
#[derive(Clone)]
pub struct HandlerOptions {
    pub api_token: String,
    pub channel: String,
    pub username: String,
    pub icon_url: Option<String>,
    pub icon_emoji: Option<String>,
    pub fail_silent: bool,
    pub ping_users: Vec<String>,
    pub ping_level: Severity,
    pub stack_trace: bool,
}

impl HandlerOptions {
    pub fn new(api_token: impl Into<String>, channel: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            channel: channel.into(),
            username: DEFAULT_USERNAME.to_string(),
            icon_url: None,
            icon_emoji: None,
            fail_silent: false,
            ping_users: Vec::new(),
            ping_level: Severity::NOTSET,
            stack_trace: true,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    pub fn with_icon_url(mut self, icon_url: impl Into<String>) -> Self {
        self.icon_url = Some(icon_url.into());
        self
    }

    pub fn with_icon_emoji(mut self, icon_emoji: impl Into<String>) -> Self {
        self.icon_emoji = Some(icon_emoji.into());
        self
    }

    pub fn with_fail_silent(mut self, fail_silent: bool) -> Self {
        self.fail_silent = fail_silent;
        self
    }

    /// Users to mention on records at or above `ping_level`.
    /// Names may carry a leading `@`.
    pub fn with_ping_users<I, S>(mut self, users: I, ping_level: Severity) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ping_users = users.into_iter().map(Into::into).collect();
        self.ping_level = ping_level;
        self
    }

    pub fn with_stack_trace(mut self, stack_trace: bool) -> Self {
        self.stack_trace = stack_trace;
        self
    }
}

impl fmt::Debug for HandlerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerOptions")
            .field("api_token", &"<redacted>")
            .field("channel", &self.channel)
            .field("username", &self.username)
            .field("icon_url", &self.icon_url)
            .field("icon_emoji", &self.icon_emoji)
            .field("fail_silent", &self.fail_silent)
            .field("ping_users", &self.ping_users)
            .field("ping_level", &self.ping_level)
            .field("stack_trace", &self.stack_trace)
            .finish()
    }
}

/// Normalized handler configuration, immutable once built
#[derive(Clone)]
pub struct HandlerConfig {
    pub api_token: String,
    /// Always starts with `#` or `@`
    pub channel: String,
    pub username: String,
    pub icon_url: Option<String>,
    pub icon_emoji: Option<String>,
    pub fail_silent: bool,
    pub ping_users: Vec<String>,
    pub ping_level: Severity,
    pub stack_trace: bool,
}

impl HandlerConfig {
    pub fn from_options(options: HandlerOptions) -> Self {
        let icon_emoji = select_icon(options.icon_url.as_deref(), options.icon_emoji);

        Self {
            api_token: options.api_token,
            channel: normalize_channel(&options.channel),
            username: options.username,
            icon_url: options.icon_url,
            icon_emoji,
            fail_silent: options.fail_silent,
            ping_users: options.ping_users,
            ping_level: options.ping_level,
            stack_trace: options.stack_trace,
        }
    }
}

impl From<HandlerOptions> for HandlerConfig {
    fn from(options: HandlerOptions) -> Self {
        Self::from_options(options)
    }
}

impl fmt::Debug for HandlerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerConfig")
            .field("api_token", &"<redacted>")
            .field("channel", &self.channel)
            .field("username", &self.username)
            .field("icon_url", &self.icon_url)
            .field("icon_emoji", &self.icon_emoji)
            .field("fail_silent", &self.fail_silent)
            .field("ping_users", &self.ping_users)
            .field("ping_level", &self.ping_level)
            .field("stack_trace", &self.stack_trace)
            .finish()
    }
}

/// Prefix `#` unless the channel already names a channel (`#`) or a user (`@`)
pub fn normalize_channel(channel: &str) -> String {
    if channel.starts_with('#') || channel.starts_with('@') {
        channel.to_string()
    } else {
        format!("#{}", channel)
    }
}

/// Pick the emoji icon. An explicit emoji always wins; an icon URL alone
/// leaves the emoji unset; with neither, fall back to [`DEFAULT_EMOJI`].
pub fn select_icon(icon_url: Option<&str>, icon_emoji: Option<String>) -> Option<String> {
    match (icon_emoji, icon_url) {
        (Some(emoji), _) => Some(emoji),
        (None, Some(_)) => None,
        (None, None) => Some(DEFAULT_EMOJI.to_string()),
    }
}

/// Load handler options from the environment (and `.env` if present)
pub fn load_options() -> Result<HandlerOptions> {
    // Load .env file if present
    dotenvy::dotenv().ok();
    options_from_lookup(|key| std::env::var(key).ok())
}

pub(crate) fn options_from_lookup<F>(lookup: F) -> Result<HandlerOptions>
where
    F: Fn(&str) -> Option<String>,
{
    let api_token = lookup("SLACK_LOG_API_TOKEN")
        .ok_or_else(|| SlackLogError::Config("SLACK_LOG_API_TOKEN not set".to_string()))?;
    let channel = lookup("SLACK_LOG_CHANNEL")
        .ok_or_else(|| SlackLogError::Config("SLACK_LOG_CHANNEL not set".to_string()))?;

    let mut options = HandlerOptions::new(api_token, channel);

    if let Some(username) = lookup("SLACK_LOG_USERNAME") {
        options.username = username;
    }
    options.icon_url = lookup("SLACK_LOG_ICON_URL").filter(|s| !s.is_empty());
    options.icon_emoji = lookup("SLACK_LOG_ICON_EMOJI").filter(|s| !s.is_empty());

    if let Some(value) = lookup("SLACK_LOG_FAIL_SILENT") {
        options.fail_silent = parse_bool("SLACK_LOG_FAIL_SILENT", &value)?;
    }

    if let Some(value) = lookup("SLACK_LOG_PING_USERS") {
        options.ping_users = value
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect();
    }

    if let Some(value) = lookup("SLACK_LOG_PING_LEVEL") {
        options.ping_level = value.parse()?;
    }

    if let Some(value) = lookup("SLACK_LOG_STACK_TRACE") {
        options.stack_trace = parse_bool("SLACK_LOG_STACK_TRACE", &value)?;
    }

    Ok(options)
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(SlackLogError::Config(format!("Invalid {}: {}", key, value))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_channel_prefix_added() {
        assert_eq!(normalize_channel("alerts"), "#alerts");
        assert_eq!(normalize_channel(""), "#");
    }

    #[test]
    fn test_channel_prefix_kept() {
        assert_eq!(normalize_channel("#alerts"), "#alerts");
        assert_eq!(normalize_channel("@john.doe"), "@john.doe");
    }

    #[test]
    fn test_channel_normalization_idempotent() {
        for input in ["alerts", "#alerts", "@ops", "", "C09NU1KFXHT"] {
            let once = normalize_channel(input);
            assert_eq!(normalize_channel(&once), once);
            assert!(once.starts_with('#') || once.starts_with('@'));
        }
    }

    #[test]
    fn test_icon_default_emoji() {
        let config = HandlerConfig::from_options(HandlerOptions::new("xoxb-test", "alerts"));
        assert_eq!(config.icon_emoji.as_deref(), Some(DEFAULT_EMOJI));
        assert_eq!(config.icon_url, None);
    }

    #[test]
    fn test_icon_url_suppresses_default_emoji() {
        let config = HandlerConfig::from_options(
            HandlerOptions::new("xoxb-test", "alerts").with_icon_url("http://x"),
        );
        assert_eq!(config.icon_emoji, None);
        assert_eq!(config.icon_url.as_deref(), Some("http://x"));
    }

    #[test]
    fn test_icon_explicit_emoji() {
        let config = HandlerConfig::from_options(
            HandlerOptions::new("xoxb-test", "alerts").with_icon_emoji(":smile:"),
        );
        assert_eq!(config.icon_emoji.as_deref(), Some(":smile:"));
    }

    #[test]
    fn test_icon_both_pass_through() {
        let config = HandlerConfig::from_options(
            HandlerOptions::new("xoxb-test", "alerts")
                .with_icon_url("http://x")
                .with_icon_emoji(":smile:"),
        );
        assert_eq!(config.icon_emoji.as_deref(), Some(":smile:"));
        assert_eq!(config.icon_url.as_deref(), Some("http://x"));
    }

    #[test]
    fn test_defaults() {
        let options = HandlerOptions::new("xoxb-test", "alerts");
        assert_eq!(options.username, DEFAULT_USERNAME);
        assert!(!options.fail_silent);
        assert!(options.ping_users.is_empty());
        assert_eq!(options.ping_level, Severity::NOTSET);
        assert!(options.stack_trace);
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = HandlerConfig::from_options(HandlerOptions::new("xoxb-secret", "alerts"));
        let output = format!("{:?}", config);
        assert!(!output.contains("xoxb-secret"));
        assert!(output.contains("<redacted>"));
    }

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_options_from_env() {
        let options = options_from_lookup(lookup_from(&[
            ("SLACK_LOG_API_TOKEN", "xoxb-test"),
            ("SLACK_LOG_CHANNEL", "alerts"),
            ("SLACK_LOG_USERNAME", "billing-service"),
            ("SLACK_LOG_FAIL_SILENT", "true"),
            ("SLACK_LOG_PING_USERS", "alice, @bob,,"),
            ("SLACK_LOG_PING_LEVEL", "error"),
            ("SLACK_LOG_STACK_TRACE", "off"),
        ]))
        .unwrap();

        assert_eq!(options.api_token, "xoxb-test");
        assert_eq!(options.channel, "alerts");
        assert_eq!(options.username, "billing-service");
        assert!(options.fail_silent);
        assert_eq!(options.ping_users, vec!["alice", "@bob"]);
        assert_eq!(options.ping_level, Severity::ERROR);
        assert!(!options.stack_trace);
    }

    #[test]
    fn test_options_from_env_missing_token() {
        let err = options_from_lookup(lookup_from(&[("SLACK_LOG_CHANNEL", "alerts")])).unwrap_err();
        assert!(matches!(err, SlackLogError::Config(_)));
    }

    #[test]
    fn test_options_from_env_invalid_bool() {
        let err = options_from_lookup(lookup_from(&[
            ("SLACK_LOG_API_TOKEN", "xoxb-test"),
            ("SLACK_LOG_CHANNEL", "alerts"),
            ("SLACK_LOG_FAIL_SILENT", "maybe"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("SLACK_LOG_FAIL_SILENT"));
    }
}

//! The Slack log handler: configuration resolution and per-record delivery

mod mentions;
mod policy;

pub use mentions::resolve_mentions;
pub use policy::FailurePolicy;

use crate::config::HandlerConfig;
use crate::error::Result;
use crate::logging::Timer;
use crate::record::LogRecord;
use crate::severity::color_for;
use crate::slack::{Attachment, ChatApi, OutboundMessage, SlackClient, UserId};

/// Forwards log records to a Slack channel.
///
/// Configuration is resolved once at construction, including the lookup of
/// mention users, and never changes afterwards. A handler only exists if
/// every configured mention user was found.
pub struct SlackLogHandler<C = SlackClient> {
    client: C,
    config: HandlerConfig,
    ping_users: Vec<UserId>,
    policy: FailurePolicy,
}

impl SlackLogHandler<SlackClient> {
    /// Build a handler talking to the Slack Web API with the configured token
    pub async fn connect(config: impl Into<HandlerConfig>) -> Result<Self> {
        let config = config.into();
        let client = SlackClient::new(&config.api_token)?;
        Self::new(client, config).await
    }
}

impl<C: ChatApi> SlackLogHandler<C> {
    pub async fn new(client: C, config: impl Into<HandlerConfig>) -> Result<Self> {
        let config = config.into();
        let ping_users = resolve_mentions(&client, &config.ping_users).await?;
        let policy = FailurePolicy::from_fail_silent(config.fail_silent);

        tracing::info!(
            channel = %config.channel,
            ping_users = ping_users.len(),
            ping_level = %config.ping_level,
            stack_trace = config.stack_trace,
            fail_silent = config.fail_silent,
            "Slack log handler ready"
        );

        Ok(Self {
            client,
            config,
            ping_users,
            policy,
        })
    }

    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    /// Directory ids of the users mentioned on qualifying records, in configured order
    pub fn ping_users(&self) -> &[UserId] {
        &self.ping_users
    }

    /// Build the message for a record without sending it
    pub fn compose(&self, record: &LogRecord) -> OutboundMessage {
        let message = record.get_message();

        let mut text = String::with_capacity(message.len());
        if !self.ping_users.is_empty() && record.level >= self.config.ping_level {
            for user in &self.ping_users {
                text.push_str(&user.mention());
                text.push(' ');
            }
        }
        text.push_str(message);

        let attachments = if self.config.stack_trace {
            vec![Self::build_trace(record)]
        } else {
            Vec::new()
        };

        OutboundMessage {
            text,
            channel: self.config.channel.clone(),
            username: self.config.username.clone(),
            icon_url: self.config.icon_url.clone(),
            icon_emoji: self.config.icon_emoji.clone(),
            attachments,
        }
    }

    fn build_trace(record: &LogRecord) -> Attachment {
        Attachment {
            fallback: record.get_message().to_string(),
            color: color_for(record.level).to_string(),
            text: record.exception.as_ref().map(|e| e.format_trace()),
        }
    }

    /// Post one record. Exactly one send attempt is made; a failure is
    /// dropped or returned according to the handler's [`FailurePolicy`].
    pub async fn emit(&self, record: &LogRecord) -> Result<()> {
        let message = self.compose(record);
        tracing::debug!(
            channel = %message.channel,
            level = %record.level,
            attachments = message.attachments.len(),
            "Posting log record to Slack"
        );

        let result = {
            let _timer = Timer::new("slack_post_message");
            self.client.post_message(&message).await
        };

        self.policy.apply(result)
    }
}

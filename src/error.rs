use thiserror::Error;

#[derive(Debug, Error)]
pub enum SlackLogError {
    #[error("Slack API error: {0}")]
    SlackApi(String),

    #[error("User not found in Slack users list: {0}")]
    UserNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    #[error("Delivery thread error: {0}")]
    Delivery(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl SlackLogError {
    /// Whether this error came from the remote chat API or its transport.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::SlackApi(_) | Self::Serde(_))
    }
}

pub type Result<T> = std::result::Result<T, SlackLogError>;

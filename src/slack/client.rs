use crate::error::{Result, SlackLogError};
use crate::slack::{ChatApi, DirectoryMember, OutboundMessage, UserId};
use slack_morphism::prelude::*;
use std::sync::Arc;

/// Slack Web API client backed by slack-morphism
pub struct SlackClient {
    client: Arc<SlackHyperClient>,
    token: SlackApiToken,
}

impl SlackClient {
    pub fn new(api_token: &str) -> Result<Self> {
        // rustls 0.23 needs a process-wide crypto provider; ignore if one is already installed
        let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

        let connector = SlackClientHyperConnector::new()
            .map_err(|e| SlackLogError::SlackApi(e.to_string()))?;

        let client = Arc::new(slack_morphism::SlackClient::new(connector));
        let token = SlackApiToken::new(api_token.to_string().into());

        Ok(Self { client, token })
    }

    fn build_request(message: &OutboundMessage) -> SlackApiChatPostMessageRequest {
        let mut content = SlackMessageContent::new().with_text(message.text.clone());

        if !message.attachments.is_empty() {
            let attachments = message
                .attachments
                .iter()
                .map(|a| {
                    let mut attachment = SlackMessageAttachment::new();
                    attachment.fallback = Some(a.fallback.clone());
                    attachment.color = Some(a.color.clone());
                    attachment.text = a.text.clone();
                    attachment
                })
                .collect();
            content = content.with_attachments(attachments);
        }

        let mut request =
            SlackApiChatPostMessageRequest::new(message.channel.clone().into(), content);
        request.username = Some(message.username.clone());
        request.icon_url = message.icon_url.clone();
        request.icon_emoji = message.icon_emoji.clone();

        request
    }
}

impl ChatApi for SlackClient {
    /// Fetch the workspace member list (single `users.list` call)
    async fn list_users(&self) -> Result<Vec<DirectoryMember>> {
        tracing::debug!("Fetching user list from Slack API");
        let session = self.client.open_session(&self.token);

        let response = session
            .users_list(&SlackApiUsersListRequest::new())
            .await
            .map_err(|e| SlackLogError::SlackApi(e.to_string()))?;

        tracing::debug!("Received {} workspace members", response.members.len());

        let members = response
            .members
            .into_iter()
            .filter_map(|user| {
                let name = user.name?;
                Some(DirectoryMember {
                    id: UserId::new(user.id.to_string()),
                    name,
                })
            })
            .collect();

        Ok(members)
    }

    async fn post_message(&self, message: &OutboundMessage) -> Result<()> {
        let session = self.client.open_session(&self.token);
        let request = Self::build_request(message);

        session
            .chat_post_message(&request)
            .await
            .map_err(|e| SlackLogError::SlackApi(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slack::Attachment;

    fn message(attachments: Vec<Attachment>) -> OutboundMessage {
        OutboundMessage {
            text: "<@U1> disk full".to_string(),
            channel: "#alerts".to_string(),
            username: "Rust logger".to_string(),
            icon_url: Some("https://example.com/icon.png".to_string()),
            icon_emoji: None,
            attachments,
        }
    }

    #[test]
    fn test_request_without_attachments() {
        let request = SlackClient::build_request(&message(vec![]));

        assert_eq!(request.channel.to_string(), "#alerts");
        assert_eq!(request.content.text.as_deref(), Some("<@U1> disk full"));
        assert!(request.content.attachments.is_none());
        assert_eq!(request.username.as_deref(), Some("Rust logger"));
        assert_eq!(
            request.icon_url.as_deref(),
            Some("https://example.com/icon.png")
        );
        assert!(request.icon_emoji.is_none());
    }

    #[test]
    fn test_request_with_attachment() {
        let request = SlackClient::build_request(&message(vec![Attachment {
            fallback: "disk full".to_string(),
            color: "danger".to_string(),
            text: Some("IoError: disk full".to_string()),
        }]));

        let attachments = request.content.attachments.unwrap();
        assert_eq!(attachments.len(), 1);
        assert_eq!(attachments[0].fallback.as_deref(), Some("disk full"));
        assert_eq!(attachments[0].color.as_deref(), Some("danger"));
        assert_eq!(attachments[0].text.as_deref(), Some("IoError: disk full"));
    }

    #[test]
    fn test_client_creation() {
        let client = SlackClient::new("xoxb-test");
        assert!(client.is_ok());
    }
}

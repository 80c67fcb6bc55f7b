//! Telegram Bot API integration
//!
//! Contains the wire types for inbound webhook updates, the `/news` command
//! extraction, and the outbound delivery channel. The pipeline only depends
//! on the narrow [`DeliveryChannel`] contract, so tests substitute a
//! recording double without touching the network.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::DeliveryError;
use crate::types::{DeliveryTarget, FormattedMessage};

/// The bot command understood by the webhook entry point
const NEWS_COMMAND: &str = "/news";

/// Inbound webhook update from the Telegram Bot API
///
/// Only the fields the relay consumes are modeled; everything else in the
/// update object is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    /// Monotonic update identifier assigned by Telegram
    #[serde(default)]
    pub update_id: Option<i64>,

    /// Message sent to the bot in a private or group chat
    #[serde(default)]
    pub message: Option<IncomingMessage>,

    /// Post made in a channel the bot administers
    #[serde(default)]
    pub channel_post: Option<IncomingMessage>,
}

/// The message carrier inside an update
#[derive(Debug, Clone, Deserialize)]
pub struct IncomingMessage {
    /// Chat the message arrived in
    pub chat: Chat,

    /// Message text, absent for media-only messages
    #[serde(default)]
    pub text: Option<String>,
}

/// Chat identification within an incoming message
#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    /// Numeric chat identifier
    pub id: i64,
}

/// A parsed `/news [category]` command extracted from an update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsCommand {
    /// Chat to reply to
    pub target: DeliveryTarget,

    /// Trailing argument string, if any (the requested category)
    pub category_arg: Option<String>,
}

impl Update {
    /// Extract a `/news` command from this update, if present
    ///
    /// Accepts the command from either `message` or `channel_post`, and
    /// tolerates the `/news@BotName` addressing form. Returns None for
    /// non-command updates and for other commands.
    pub fn news_command(&self) -> Option<NewsCommand> {
        let carrier = self.message.as_ref().or(self.channel_post.as_ref())?;
        let text = carrier.text.as_deref()?.trim();

        let (command, rest) = match text.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (text, ""),
        };

        // "/news" or "/news@SomeBot", nothing else
        let base = command.split_once('@').map_or(command, |(base, _)| base);
        if base != NEWS_COMMAND {
            return None;
        }

        Some(NewsCommand {
            target: carrier.chat.id.to_string(),
            category_arg: (!rest.is_empty()).then(|| rest.to_string()),
        })
    }
}

/// Narrow "send one message" contract the pipeline depends on
///
/// Production uses [`TelegramChannel`]; tests use a recording double.
#[async_trait]
pub trait DeliveryChannel: Send + Sync {
    /// Deliver a formatted message to an opaque chat/channel target
    async fn send(
        &self,
        target: &str,
        message: &FormattedMessage,
    ) -> std::result::Result<(), DeliveryError>;
}

/// Delivery channel backed by the Telegram Bot API `sendMessage` method
#[derive(Debug, Clone)]
pub struct TelegramChannel {
    http: reqwest::Client,
    api_base: String,
    bot_token: String,
}

/// Subset of the Bot API response consumed on failure
#[derive(Debug, Deserialize)]
struct BotApiResponse {
    #[serde(default)]
    description: Option<String>,
}

impl TelegramChannel {
    /// Create a channel for the given Bot API base and credential
    ///
    /// `api_base` is normally "https://api.telegram.org"; tests point it at
    /// a mock server.
    pub fn new(api_base: impl Into<String>, bot_token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: api_base.into(),
            bot_token: bot_token.into(),
        }
    }

    /// Build the JSON `chat_id` value: numeric ids go as numbers, channel
    /// usernames ("@mychannel") as strings
    fn chat_id_value(target: &str) -> serde_json::Value {
        match target.parse::<i64>() {
            Ok(id) => serde_json::Value::from(id),
            Err(_) => serde_json::Value::from(target),
        }
    }
}

#[async_trait]
impl DeliveryChannel for TelegramChannel {
    async fn send(
        &self,
        target: &str,
        message: &FormattedMessage,
    ) -> std::result::Result<(), DeliveryError> {
        let url = format!("{}/bot{}/sendMessage", self.api_base, self.bot_token);
        let payload = serde_json::json!({
            "chat_id": Self::chat_id_value(target),
            "text": message.body,
            "parse_mode": "HTML",
            "disable_web_page_preview": message.disable_preview,
        });

        let response = self
            .http
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(DeliveryError::Network)?;

        let status = response.status();
        if !status.is_success() {
            let description = response
                .json::<BotApiResponse>()
                .await
                .ok()
                .and_then(|r| r.description)
                .unwrap_or_else(|| "no description".to_string());
            tracing::warn!(status = status.as_u16(), chat = target, "Telegram sendMessage failed");
            return Err(DeliveryError::Api {
                status: status.as_u16(),
                description,
            });
        }

        tracing::debug!(chat = target, "Message delivered");
        Ok(())
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn update_with_text(text: &str) -> Update {
        Update {
            update_id: Some(1),
            message: Some(IncomingMessage {
                chat: Chat { id: 42 },
                text: Some(text.to_string()),
            }),
            channel_post: None,
        }
    }

    #[test]
    fn news_command_without_argument() {
        let command = update_with_text("/news").news_command().unwrap();
        assert_eq!(command.target, "42");
        assert_eq!(command.category_arg, None);
    }

    #[test]
    fn news_command_with_argument() {
        let command = update_with_text("/news technology").news_command().unwrap();
        assert_eq!(command.target, "42");
        assert_eq!(command.category_arg.as_deref(), Some("technology"));
    }

    #[test]
    fn news_command_with_bot_addressing() {
        let command = update_with_text("/news@InshortsRelayBot sports")
            .news_command()
            .unwrap();
        assert_eq!(command.category_arg.as_deref(), Some("sports"));
    }

    #[test]
    fn other_commands_are_ignored() {
        assert!(update_with_text("/start").news_command().is_none());
        assert!(update_with_text("/newsfeed").news_command().is_none());
        assert!(update_with_text("hello").news_command().is_none());
    }

    #[test]
    fn media_only_update_is_ignored() {
        let update = Update {
            update_id: Some(1),
            message: Some(IncomingMessage {
                chat: Chat { id: 42 },
                text: None,
            }),
            channel_post: None,
        };
        assert!(update.news_command().is_none());
    }

    #[test]
    fn channel_post_carries_the_command_too() {
        let update = Update {
            update_id: Some(1),
            message: None,
            channel_post: Some(IncomingMessage {
                chat: Chat { id: -100123 },
                text: Some("/news world".into()),
            }),
        };
        let command = update.news_command().unwrap();
        assert_eq!(command.target, "-100123");
        assert_eq!(command.category_arg.as_deref(), Some("world"));
    }

    #[test]
    fn update_parses_from_bot_api_json() {
        let json = r#"{
            "update_id": 9000,
            "message": {
                "message_id": 7,
                "chat": {"id": 42, "type": "private"},
                "text": "/news business"
            }
        }"#;
        let update: Update = serde_json::from_str(json).unwrap();
        let command = update.news_command().unwrap();
        assert_eq!(command.category_arg.as_deref(), Some("business"));
    }

    #[test]
    fn chat_id_value_distinguishes_numeric_and_username_targets() {
        assert_eq!(
            TelegramChannel::chat_id_value("42"),
            serde_json::Value::from(42)
        );
        assert_eq!(
            TelegramChannel::chat_id_value("@mychannel"),
            serde_json::Value::from("@mychannel")
        );
    }

    #[tokio::test]
    async fn send_posts_html_message_to_bot_api() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/botTEST_TOKEN/sendMessage"))
            .and(body_partial_json(serde_json::json!({
                "chat_id": 42,
                "parse_mode": "HTML",
                "disable_web_page_preview": false,
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ok": true,
                "result": {"message_id": 1}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let channel = TelegramChannel::new(server.uri(), "TEST_TOKEN");
        let message = FormattedMessage::text("<b>hi</b>");

        channel.send("42", &message).await.unwrap();
    }

    #[tokio::test]
    async fn bot_api_rejection_surfaces_status_and_description() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "ok": false,
                "error_code": 403,
                "description": "Forbidden: bot was blocked by the user"
            })))
            .mount(&server)
            .await;

        let channel = TelegramChannel::new(server.uri(), "TEST_TOKEN");
        let err = channel
            .send("42", &FormattedMessage::text("hi"))
            .await
            .unwrap_err();

        match err {
            DeliveryError::Api {
                status,
                description,
            } => {
                assert_eq!(status, 403);
                assert!(description.contains("blocked"));
            }
            other => panic!("expected Api, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_bot_api_is_network_failure() {
        let channel = TelegramChannel::new("http://127.0.0.1:9", "TEST_TOKEN");
        let err = channel
            .send("42", &FormattedMessage::text("hi"))
            .await
            .unwrap_err();

        assert!(matches!(err, DeliveryError::Network(_)));
    }
}

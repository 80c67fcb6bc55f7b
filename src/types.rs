//! Core types shared across the relay

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One article record as returned by the upstream news API
///
/// Every field except `read_more_url` may be absent; formatting degrades to
/// placeholder text rather than failing. No identity key is tracked, so the
/// same article may be delivered repeatedly on successive scheduled pushes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct Article {
    /// Article headline
    #[serde(default)]
    pub title: Option<String>,

    /// Article body text
    #[serde(default)]
    pub content: Option<String>,

    /// Link to the full article, inserted verbatim into the message
    #[serde(rename = "readMoreUrl", default)]
    pub read_more_url: String,

    /// Article author
    #[serde(default)]
    pub author: Option<String>,
}

/// The top-level JSON envelope returned by the upstream news API
///
/// An absent or empty `data` array is a valid, non-error state ("no news"),
/// distinct from a failed fetch. The relay only ever consumes the first
/// element, the presumed most-recent article.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct NewsEnvelope {
    /// Articles, newest first
    #[serde(default)]
    pub data: Vec<Article>,
}

impl NewsEnvelope {
    /// The newest article, if the envelope is non-empty
    pub fn latest(&self) -> Option<&Article> {
        self.data.first()
    }
}

/// A rendered message body ready for delivery
///
/// Created fresh per pipeline run and handed straight to the delivery
/// channel; never retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedMessage {
    /// Telegram-HTML body (bold title, anchor link)
    pub body: String,

    /// Whether link previews should be suppressed (always false for articles)
    pub disable_preview: bool,
}

impl FormattedMessage {
    /// Plain-text message with previews enabled
    pub fn text(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            disable_preview: false,
        }
    }
}

/// Opaque chat/channel identifier for message delivery
///
/// Supplied by the triggering context (webhook update or configuration) and
/// passed through to the Bot API without validation.
pub type DeliveryTarget = String;

/// Outcome record of the most recent scheduled push, exposed via `GET /status`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PushRecord {
    /// When the push pipeline run completed
    pub at: DateTime<Utc>,

    /// Terminal pipeline state, e.g. "delivered" or "fetch_failed"
    pub outcome: String,
}

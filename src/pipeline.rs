//! The validate → fetch → format → deliver pipeline
//!
//! Every entry point (webhook command, scheduled push) runs this one
//! sequence; there is exactly one implementation of the category handling,
//! fetch, and delivery logic. The pipeline is a linear state machine with no
//! branching back: each failure transitions to a terminal outcome and sends
//! a best-effort user-facing message. Underlying errors are logged, never
//! exposed to the chat.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::category::Category;
use crate::formatter;
use crate::news_client::NewsClient;
use crate::telegram::DeliveryChannel;
use crate::types::FormattedMessage;

/// Terminal state of one pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The requested category was not in the allow-list; the caller received
    /// a listing of valid options
    Rejected,

    /// The upstream fetch failed; the caller received a retry-later message
    FetchFailed,

    /// The upstream returned an empty envelope; the caller was told there is
    /// no news for the category
    NoNews,

    /// The article message could not be delivered
    DeliveryFailed,

    /// The article was formatted and delivered
    Delivered,
}

impl Outcome {
    /// Snake-case name used in logs and the status endpoint
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Rejected => "rejected",
            Outcome::FetchFailed => "fetch_failed",
            Outcome::NoNews => "no_news",
            Outcome::DeliveryFailed => "delivery_failed",
            Outcome::Delivered => "delivered",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Orchestrates validate → fetch → format → deliver
///
/// Dependencies are injected at construction; the pipeline reads no ambient
/// globals. Runs are independent and side-effect-isolated to their own
/// target, so concurrent runs need no coordination.
pub struct NotificationPipeline {
    news: NewsClient,
    channel: Arc<dyn DeliveryChannel>,
}

impl NotificationPipeline {
    /// Create a pipeline over the given news client and delivery channel
    pub fn new(news: NewsClient, channel: Arc<dyn DeliveryChannel>) -> Self {
        Self { news, channel }
    }

    /// Execute one pipeline run for a target chat and optional raw category
    ///
    /// Validation happens first, before any message is sent. The scheduled
    /// push variant is the same call with the configured channel as target
    /// and no category argument (which validates to `all`).
    pub async fn run(&self, target: &str, raw_category: Option<&str>) -> Outcome {
        tracing::info!(chat = target, category = raw_category.unwrap_or(""), state = "validating", "Pipeline run started");

        let category = match Category::validate(raw_category) {
            Ok(category) => category,
            Err(invalid) => {
                tracing::info!(chat = target, requested = %invalid.raw, state = "rejected", "Category not in allow-list");
                let text = format!(
                    "Sorry, \"{}\" is not a valid category. Please try one of these: {}.",
                    formatter::escape_html(&invalid.raw),
                    Category::listing(),
                );
                self.send_notice(target, text).await;
                return Outcome::Rejected;
            }
        };

        tracing::info!(chat = target, %category, state = "fetching", "Fetching latest news");

        let envelope = match self.news.fetch_latest(category).await {
            Ok(envelope) => envelope,
            Err(error) => {
                tracing::error!(chat = target, %category, %error, state = "fetch_failed", "News fetch failed");
                self.send_notice(
                    target,
                    "Sorry, something went wrong while fetching the news. Please try again later.",
                )
                .await;
                return Outcome::FetchFailed;
            }
        };

        let Some(article) = envelope.latest() else {
            tracing::info!(chat = target, %category, state = "no_news", "Empty envelope");
            self.send_notice(target, format!("No news found for category {category}."))
                .await;
            return Outcome::NoNews;
        };

        tracing::info!(chat = target, %category, state = "formatting", "Formatting article");
        let message = formatter::format(article);

        tracing::info!(chat = target, %category, state = "delivering", "Delivering article");
        match self.channel.send(target, &message).await {
            Ok(()) => {
                tracing::info!(chat = target, %category, state = "delivered", "Pipeline run complete");
                Outcome::Delivered
            }
            Err(error) => {
                tracing::error!(chat = target, %category, %error, state = "delivery_failed", "Article delivery failed");
                Outcome::DeliveryFailed
            }
        }
    }

    /// Best-effort plain notice to the target; delivery failure is logged
    /// without changing the run's outcome
    async fn send_notice(&self, target: &str, text: impl Into<String>) {
        let message = FormattedMessage::text(text);
        if let Err(error) = self.channel.send(target, &message).await {
            tracing::warn!(chat = target, %error, "Failed to deliver notice message");
        }
    }
}

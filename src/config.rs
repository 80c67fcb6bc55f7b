//! Configuration types for inshorts-relay

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use utoipa::ToSchema;

/// Telegram Bot API settings
///
/// Groups the bot credential and the default delivery target.
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct TelegramConfig {
    /// Bot token issued by BotFather (required)
    #[serde(default)]
    pub bot_token: String,

    /// Default delivery target for scheduled pushes, e.g. "@mychannel" or a
    /// numeric chat id (required)
    #[serde(default)]
    pub channel_id: String,

    /// Bot API endpoint base (default: "https://api.telegram.org")
    ///
    /// Overridable so tests can point the channel at a mock server.
    #[serde(default = "default_telegram_api_base")]
    pub telegram_api_base: String,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            channel_id: String::new(),
            telegram_api_base: default_telegram_api_base(),
        }
    }
}

/// Upstream news API settings
///
/// The base URL is a single required value with no embedded fallback host;
/// absence is a configuration error, never a silent default.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct NewsApiConfig {
    /// Base URL of the news API (required); the `category` query parameter
    /// is appended per fetch
    #[serde(default)]
    pub news_api_base_url: String,
}

/// Webhook server and push scheduler settings
///
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ServerConfig {
    /// Bind address for the webhook server (default: "0.0.0.0:8080")
    #[serde(default = "default_bind_address")]
    pub bind_address: SocketAddr,

    /// Interval in seconds between scheduled channel pushes
    ///
    /// None disables the internal scheduler; an external cron can still
    /// trigger pushes via `POST /send-news`.
    #[serde(default)]
    pub push_interval_secs: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            push_interval_secs: None,
        }
    }
}

/// Main configuration for the relay
///
/// Fields are organized into logical sub-configs:
/// - [`telegram`](TelegramConfig) — bot credential, default channel
/// - [`news`](NewsApiConfig) — upstream news API base URL
/// - [`server`](ServerConfig) — bind address, push scheduling
///
/// All sub-config fields are flattened for flat JSON/TOML serialization.
/// Required values are checked by [`Config::validate`] at construction time
/// rather than by scattered null checks at call sites.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct Config {
    /// Telegram settings (bot token, channel)
    #[serde(flatten)]
    pub telegram: TelegramConfig,

    /// Upstream news API settings
    #[serde(flatten)]
    pub news: NewsApiConfig,

    /// Webhook server and scheduler settings
    #[serde(flatten)]
    pub server: ServerConfig,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Reads:
    /// - `TELEGRAM_BOT_TOKEN` (required)
    /// - `TELEGRAM_CHANNEL_ID` (required)
    /// - `NEWS_API_BASE_URL` (required)
    /// - `TELEGRAM_API_BASE` (optional, for testing)
    /// - `RELAY_BIND_ADDRESS` (optional, default "0.0.0.0:8080")
    /// - `PUSH_INTERVAL_SECS` (optional, scheduler disabled when unset)
    ///
    /// The returned config has already passed [`Config::validate`].
    pub fn from_env() -> Result<Self> {
        let mut config = Config {
            telegram: TelegramConfig {
                bot_token: std::env::var("TELEGRAM_BOT_TOKEN").unwrap_or_default(),
                channel_id: std::env::var("TELEGRAM_CHANNEL_ID").unwrap_or_default(),
                telegram_api_base: std::env::var("TELEGRAM_API_BASE")
                    .unwrap_or_else(|_| default_telegram_api_base()),
            },
            news: NewsApiConfig {
                news_api_base_url: std::env::var("NEWS_API_BASE_URL").unwrap_or_default(),
            },
            server: ServerConfig::default(),
        };

        if let Ok(addr) = std::env::var("RELAY_BIND_ADDRESS") {
            config.server.bind_address = addr.parse().map_err(|_| {
                Error::config(
                    format!("RELAY_BIND_ADDRESS {addr:?} is not a valid socket address"),
                    "bind_address",
                )
            })?;
        }

        if let Ok(interval) = std::env::var("PUSH_INTERVAL_SECS") {
            let secs: u64 = interval.parse().map_err(|_| {
                Error::config(
                    format!("PUSH_INTERVAL_SECS {interval:?} is not a valid integer"),
                    "push_interval_secs",
                )
            })?;
            config.server.push_interval_secs = Some(secs);
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that every required value is present and well-formed
    ///
    /// Missing values produce [`Error::Config`] naming the offending key,
    /// making "not configured" a constructor-time failure.
    pub fn validate(&self) -> Result<()> {
        if self.telegram.bot_token.trim().is_empty() {
            return Err(Error::config(
                "TELEGRAM_BOT_TOKEN is not set",
                "bot_token",
            ));
        }
        if self.telegram.channel_id.trim().is_empty() {
            return Err(Error::config(
                "TELEGRAM_CHANNEL_ID is not set",
                "channel_id",
            ));
        }
        if self.news.news_api_base_url.trim().is_empty() {
            return Err(Error::config(
                "NEWS_API_BASE_URL is not set",
                "news_api_base_url",
            ));
        }
        url::Url::parse(&self.news.news_api_base_url).map_err(|e| {
            Error::config(
                format!("NEWS_API_BASE_URL is not a valid URL: {e}"),
                "news_api_base_url",
            )
        })?;
        url::Url::parse(&self.telegram.telegram_api_base).map_err(|e| {
            Error::config(
                format!("telegram_api_base is not a valid URL: {e}"),
                "telegram_api_base",
            )
        })?;
        Ok(())
    }
}

fn default_telegram_api_base() -> String {
    "https://api.telegram.org".to_string()
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

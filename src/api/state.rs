//! Application state for the webhook server

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::config::Config;
use crate::error::Result;
use crate::news_client::NewsClient;
use crate::pipeline::NotificationPipeline;
use crate::push_scheduler::PushStatus;
use crate::telegram::TelegramChannel;
use crate::types::DeliveryTarget;

/// Shared application state accessible to all route handlers
///
/// This struct is cloned for each request (cheap Arc clones) and carries the
/// fully constructed pipeline. Building it validates the configuration, so a
/// missing bot token or news base URL fails at startup rather than surfacing
/// as null checks inside handlers.
#[derive(Clone)]
pub struct AppState {
    /// The one notification pipeline every entry point runs
    pub pipeline: Arc<NotificationPipeline>,

    /// Configured channel for scheduled pushes
    pub channel_id: DeliveryTarget,

    /// Outcome record of the most recent push, shared with the scheduler
    pub push_status: Arc<PushStatus>,

    /// When this relay instance started
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Build state from a validated configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;

        let news = NewsClient::new(config.news.news_api_base_url.clone())?;
        let channel = Arc::new(TelegramChannel::new(
            config.telegram.telegram_api_base.clone(),
            config.telegram.bot_token.clone(),
        ));
        let pipeline = Arc::new(NotificationPipeline::new(news, channel));

        Ok(Self {
            pipeline,
            channel_id: config.telegram.channel_id.clone(),
            push_status: Arc::new(PushStatus::default()),
            started_at: Utc::now(),
        })
    }
}

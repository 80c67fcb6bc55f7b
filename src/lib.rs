//! # inshorts-relay
//!
//! Thin Telegram notification relay for Inshorts-style news feeds.
//!
//! The relay receives Telegram Bot API webhook updates, validates a requested
//! news category against a fixed allow-list, fetches the latest article from
//! a single upstream news HTTP API, formats it into a Telegram-HTML message,
//! and forwards it to the requesting chat. A companion scheduled path pushes
//! the newest item to a fixed channel.
//!
//! ## Design Philosophy
//!
//! - **One pipeline** - every entry point (webhook command, scheduled push)
//!   runs the same validate → fetch → format → deliver sequence
//! - **Explicit dependencies** - the pipeline receives its news client and
//!   delivery channel at construction; missing configuration fails at startup
//! - **Library-first** - no CLI, purely a Rust crate for embedding
//!
//! ## Quick Start
//!
//! ```no_run
//! use inshorts_relay::{Config, run_with_shutdown};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads TELEGRAM_BOT_TOKEN, TELEGRAM_CHANNEL_ID, NEWS_API_BASE_URL
//!     let config = Config::from_env()?;
//!
//!     // Serve the webhook and (if configured) the push scheduler until
//!     // SIGTERM/SIGINT
//!     run_with_shutdown(config).await?;
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Webhook server module
pub mod api;
/// News category allow-list and validation
pub mod category;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Article-to-message formatting
pub mod formatter;
/// Upstream news API client
pub mod news_client;
/// The validate → fetch → format → deliver pipeline
pub mod pipeline;
/// Scheduled channel pushes
pub mod push_scheduler;
/// Telegram Bot API integration
pub mod telegram;
/// Core types shared across the relay
pub mod types;

// Re-export commonly used types
pub use category::{ALL_CATEGORIES, Category, InvalidCategory};
pub use config::Config;
pub use error::{ApiError, DeliveryError, Error, ErrorDetail, FetchError, Result, ToHttpStatus};
pub use news_client::NewsClient;
pub use pipeline::{NotificationPipeline, Outcome};
pub use push_scheduler::{PushScheduler, PushStatus};
pub use telegram::{DeliveryChannel, NewsCommand, TelegramChannel, Update};
pub use types::{Article, DeliveryTarget, FormattedMessage, NewsEnvelope, PushRecord};

use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Run the relay with graceful signal handling.
///
/// Builds the pipeline from the configuration (failing immediately if a
/// required value is missing), starts the internal push scheduler when
/// `push_interval_secs` is set, and serves the webhook until a termination
/// signal arrives.
///
/// - **Unix:** listens for SIGTERM and SIGINT, with fallbacks if signal
///   registration fails.
/// - **Windows/other:** listens for Ctrl+C via `tokio::signal::ctrl_c()`.
pub async fn run_with_shutdown(config: Config) -> Result<()> {
    let state = api::AppState::from_config(&config)?;
    let cancel = CancellationToken::new();

    if let Some(secs) = config.server.push_interval_secs {
        let scheduler = PushScheduler::new(
            state.pipeline.clone(),
            config.telegram.channel_id.clone(),
            Duration::from_secs(secs),
            state.push_status.clone(),
            cancel.clone(),
        );
        tokio::spawn(scheduler.run());
    }

    let bind_address = config.server.bind_address;
    let result = tokio::select! {
        result = api::start_api_server(bind_address, state) => result,
        _ = wait_for_signal() => Ok(()),
    };

    cancel.cancel();
    result
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    // Set up signal handlers - these may fail in restricted environments (containers, tests)
    let sigterm_result = signal(SignalKind::terminate());
    let sigint_result = signal(SignalKind::interrupt());

    match (sigterm_result, sigint_result) {
        (Ok(mut sigterm), Ok(mut sigint)) => {
            tokio::select! {
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM signal");
                }
                _ = sigint.recv() => {
                    tracing::info!("Received SIGINT signal (Ctrl+C)");
                }
            }
        }
        (Err(e), _) => {
            tracing::warn!(error = %e, "Could not register SIGTERM handler, waiting for SIGINT only");
            if let Ok(mut sigint) = signal(SignalKind::interrupt()) {
                sigint.recv().await;
                tracing::info!("Received SIGINT signal (Ctrl+C)");
            } else {
                tracing::error!("Could not register any signal handlers, using ctrl_c fallback");
                tokio::signal::ctrl_c().await.ok();
            }
        }
        (_, Err(e)) => {
            tracing::warn!(error = %e, "Could not register SIGINT handler, waiting for SIGTERM only");
            if let Ok(mut sigterm) = signal(SignalKind::terminate()) {
                sigterm.recv().await;
                tracing::info!("Received SIGTERM signal");
            } else {
                tracing::error!("Could not register any signal handlers, using ctrl_c fallback");
                tokio::signal::ctrl_c().await.ok();
            }
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Received Ctrl+C signal");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C signal");
        }
    }
}

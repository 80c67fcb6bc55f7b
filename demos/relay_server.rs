//! Relay server demo
//!
//! Runs the webhook server and, when PUSH_INTERVAL_SECS is set, the internal
//! push scheduler, until SIGTERM/SIGINT.
//!
//! Required environment (a .env file is honored):
//! - TELEGRAM_BOT_TOKEN   - bot credential from BotFather
//! - TELEGRAM_CHANNEL_ID  - default push target, e.g. "@mychannel"
//! - NEWS_API_BASE_URL    - upstream news API, e.g. "https://news.example.com/news"
//!
//! Optional:
//! - RELAY_BIND_ADDRESS   - default "0.0.0.0:8080"
//! - PUSH_INTERVAL_SECS   - enable the internal scheduler
//!
//! After starting, point your bot's webhook at POST /webhook and try
//! sending "/news technology" to the bot.

use inshorts_relay::{Config, run_with_shutdown};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing (optional)
    // Uncomment if you add tracing-subscriber to your dependencies:
    // tracing_subscriber::fmt::init();

    // Load a .env file if present, then build config from the environment
    let _ = dotenvy::dotenv();
    let config = Config::from_env()?;

    println!("Relay listening on {}", config.server.bind_address);
    if let Some(secs) = config.server.push_interval_secs {
        println!("Internal push scheduler enabled every {secs}s");
    }

    run_with_shutdown(config).await?;

    Ok(())
}

//! Webhook server module
//!
//! Serves the Telegram webhook intake, the scheduled-push trigger, and the
//! system endpoints. Method restrictions come from the router: any non-POST
//! request to a POST-only route is answered 405 by axum.

use crate::error::Result;
use axum::{
    Router,
    routing::{get, post},
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub mod error_response;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use state::AppState;

/// Create the webhook router with all route definitions
///
/// # Routes
///
/// - `POST /webhook` - Telegram update intake
/// - `POST /send-news` - Scheduled push trigger (external cron)
/// - `GET /health` - Health check
/// - `GET /status` - Relay status (uptime, last push)
/// - `GET /openapi.json` - OpenAPI specification
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/webhook", post(routes::receive_update))
        .route("/send-news", post(routes::send_news))
        .route("/health", get(routes::health_check))
        .route("/status", get(routes::relay_status))
        .route("/openapi.json", get(routes::openapi_spec))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Start the webhook server on the given bind address
///
/// Binds a TCP listener and serves the router until the server stops, either
/// due to an error or process shutdown.
pub async fn start_api_server(bind_address: SocketAddr, state: AppState) -> Result<()> {
    tracing::info!(address = %bind_address, "Starting webhook server");

    let app = create_router(state);

    let listener = TcpListener::bind(bind_address)
        .await
        .map_err(crate::error::Error::Io)?;

    tracing::info!(address = %bind_address, "Webhook server listening");

    axum::serve(listener, app)
        .await
        .map_err(|e| crate::error::Error::ApiServerError(e.to_string()))?;

    tracing::info!("Webhook server stopped");
    Ok(())
}

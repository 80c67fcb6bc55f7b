//! Webhook and system route handlers

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::api::AppState;
use crate::error::ApiError;
use crate::pipeline::Outcome;
use crate::telegram::Update;
use crate::types::PushRecord;

/// Relay status payload returned by `GET /status`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    /// When this relay instance started
    pub started_at: DateTime<Utc>,

    /// Most recent push run, if any has happened
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_push: Option<PushRecord>,
}

/// POST /webhook - Telegram update intake
///
/// The acknowledgment means "update accepted", independent of whether the
/// resulting pipeline run succeeds; Telegram retries updates that do not get
/// a 2xx, and a failed fetch must not cause redelivery. Only an unparsable
/// body is a server error.
#[utoipa::path(
    post,
    path = "/webhook",
    tag = "webhook",
    request_body(content = String, description = "Telegram Bot API update object", content_type = "application/json"),
    responses(
        (status = 200, description = "Update accepted for processing"),
        (status = 405, description = "Method not allowed"),
        (status = 500, description = "Update body could not be parsed", body = ApiError)
    )
)]
pub async fn receive_update(State(state): State<AppState>, body: Bytes) -> Response {
    let update: Update = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(e) => {
            tracing::error!(error = %e, "Failed to parse webhook update");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError::malformed_update(format!(
                    "update body is not a valid Telegram update: {e}"
                ))),
            )
                .into_response();
        }
    };

    let Some(command) = update.news_command() else {
        tracing::debug!(update_id = update.update_id, "Ignoring non-command update");
        return (StatusCode::OK, "Ignored.").into_response();
    };

    tracing::info!(
        update_id = update.update_id,
        chat = %command.target,
        category = command.category_arg.as_deref().unwrap_or(""),
        "Received /news command"
    );

    state
        .pipeline
        .run(&command.target, command.category_arg.as_deref())
        .await;

    (StatusCode::OK, "Update accepted.").into_response()
}

/// POST /send-news - Scheduled push trigger
///
/// Runs the pipeline against the configured channel with the default `all`
/// category. Intended for external cron services; deployments using the
/// internal scheduler can still trigger an ad hoc push here.
#[utoipa::path(
    post,
    path = "/send-news",
    tag = "webhook",
    responses(
        (status = 200, description = "Push pipeline ran; body describes the outcome"),
        (status = 405, description = "Method not allowed")
    )
)]
pub async fn send_news(State(state): State<AppState>) -> impl IntoResponse {
    let outcome = state.pipeline.run(&state.channel_id, None).await;
    state.push_status.record(outcome);

    let body = match outcome {
        Outcome::Delivered => "News posted successfully to Telegram channel.".to_string(),
        Outcome::NoNews => "No news found to post.".to_string(),
        other => format!("Push finished with outcome: {other}."),
    };

    (StatusCode::OK, body)
}

/// GET /health - Health check
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses(
        (status = 200, description = "Service is healthy")
    )
)]
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// GET /status - Relay status
#[utoipa::path(
    get,
    path = "/status",
    tag = "system",
    responses(
        (status = 200, description = "Current relay status", body = StatusResponse)
    )
)]
pub async fn relay_status(State(state): State<AppState>) -> impl IntoResponse {
    Json(StatusResponse {
        started_at: state.started_at,
        last_push: state.push_status.last(),
    })
}

/// GET /openapi.json - OpenAPI specification
#[utoipa::path(
    get,
    path = "/openapi.json",
    tag = "system",
    responses(
        (status = 200, description = "OpenAPI specification in JSON format")
    )
)]
pub async fn openapi_spec() -> impl IntoResponse {
    use crate::api::openapi::ApiDoc;
    use utoipa::OpenApi;

    Json(ApiDoc::openapi())
}

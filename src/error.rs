//! Error types for inshorts-relay
//!
//! This module provides error handling for the relay, including:
//! - Domain-specific error types (Fetch, Delivery, Config)
//! - HTTP status code mapping for the webhook server
//! - Structured error responses with machine-readable error codes

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::category::InvalidCategory;

/// Result type alias for inshorts-relay operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for inshorts-relay
///
/// This is the primary error type used throughout the library. Each variant includes
/// contextual information to help diagnose issues.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is missing or invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "telegram_bot_token")
        key: Option<String>,
    },

    /// Requested news category is not in the allow-list
    #[error(transparent)]
    InvalidCategory(#[from] InvalidCategory),

    /// Upstream news fetch failed
    #[error("news fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Telegram delivery failed
    #[error("delivery error: {0}")]
    Delivery(#[from] DeliveryError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Webhook server error
    #[error("webhook server error: {0}")]
    ApiServerError(String),
}

impl Error {
    /// Convenience constructor for configuration errors naming the offending key
    pub fn config(message: impl Into<String>, key: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.into()),
        }
    }
}

/// Errors from a single upstream news fetch
///
/// The three variants are deliberately distinct: a transport failure, a
/// response with a non-success status, and a response whose body does not
/// parse as the expected envelope. An empty envelope is not an error.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The transport failed before a response was obtained
    #[error("network failure: {0}")]
    Network(#[source] reqwest::Error),

    /// Response received but HTTP status was outside 200-299
    #[error("upstream returned {status}: {body}")]
    Upstream {
        /// HTTP status code of the upstream response
        status: u16,
        /// Response body text, captured for diagnostics
        body: String,
    },

    /// Response body could not be parsed as the expected JSON envelope
    #[error("malformed response body: {0}")]
    MalformedBody(String),
}

/// Errors from a Telegram sendMessage call
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The transport failed before a response was obtained
    #[error("network failure: {0}")]
    Network(#[source] reqwest::Error),

    /// The Bot API rejected the request
    #[error("Telegram API returned {status}: {description}")]
    Api {
        /// HTTP status code of the Bot API response
        status: u16,
        /// Error description from the Bot API response body
        description: String,
    },
}

/// API error response format
///
/// This structure is returned by webhook endpoints when an error occurs.
/// It follows a standard format with machine-readable error codes,
/// human-readable messages, and optional contextual details.
///
/// # Example JSON Response
///
/// ```json
/// {
///   "error": {
///     "code": "config_error",
///     "message": "configuration error: TELEGRAM_BOT_TOKEN is not set",
///     "details": {
///       "key": "telegram_bot_token"
///     }
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// The error details
    pub error: ErrorDetail,
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "config_error", "malformed_update")
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Optional additional context about the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Create a new API error with code and message
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
                details: None,
            },
        }
    }

    /// Create an API error with additional details
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
                details: Some(details),
            },
        }
    }

    /// Create an "internal server error"
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("internal_error", message)
    }

    /// Create a "malformed update" error for unparsable webhook bodies
    pub fn malformed_update(message: impl Into<String>) -> Self {
        Self::new("malformed_update", message)
    }
}

/// Convert errors to HTTP status codes for webhook responses
///
/// This trait maps domain errors to appropriate HTTP status codes.
pub trait ToHttpStatus {
    /// Get the HTTP status code for this error
    fn status_code(&self) -> u16;

    /// Get the machine-readable error code
    fn error_code(&self) -> &str;
}

impl ToHttpStatus for Error {
    fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - Client error (invalid input)
            Error::InvalidCategory(_) => 400,

            // 500 Internal Server Error - Server-side issues
            Error::Config { .. } => 500,
            Error::Io(_) => 500,
            Error::Serialization(_) => 500,
            Error::ApiServerError(_) => 500,

            // 502 Bad Gateway - External service errors
            Error::Fetch(_) => 502,
            Error::Delivery(_) => 502,
        }
    }

    fn error_code(&self) -> &str {
        match self {
            Error::Config { .. } => "config_error",
            Error::InvalidCategory(_) => "invalid_category",
            Error::Fetch(e) => match e {
                FetchError::Network(_) => "fetch_network_error",
                FetchError::Upstream { .. } => "fetch_upstream_error",
                FetchError::MalformedBody(_) => "fetch_malformed_body",
            },
            Error::Delivery(e) => match e {
                DeliveryError::Network(_) => "delivery_network_error",
                DeliveryError::Api { .. } => "delivery_api_error",
            },
            Error::Io(_) => "io_error",
            Error::Serialization(_) => "serialization_error",
            Error::ApiServerError(_) => "api_server_error",
        }
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        let code = error.error_code().to_string();
        let message = error.to_string();

        // Add contextual details for specific error types
        let details = match &error {
            Error::Config { key: Some(key), .. } => Some(serde_json::json!({
                "key": key,
            })),
            Error::InvalidCategory(e) => Some(serde_json::json!({
                "requested": e.raw,
            })),
            Error::Fetch(FetchError::Upstream { status, .. }) => Some(serde_json::json!({
                "upstream_status": status,
            })),
            Error::Delivery(DeliveryError::Api { status, .. }) => Some(serde_json::json!({
                "telegram_status": status,
            })),
            _ => None,
        };

        ApiError {
            error: ErrorDetail {
                code,
                message,
                details,
            },
        }
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_is_500() {
        let err = Error::config("TELEGRAM_BOT_TOKEN is not set", "telegram_bot_token");
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.error_code(), "config_error");
    }

    #[test]
    fn invalid_category_is_400() {
        let err = Error::InvalidCategory(InvalidCategory {
            raw: "bogus".into(),
        });
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "invalid_category");
    }

    #[test]
    fn fetch_errors_are_502_bad_gateway() {
        let upstream = Error::Fetch(FetchError::Upstream {
            status: 503,
            body: "service unavailable".into(),
        });
        assert_eq!(upstream.status_code(), 502);
        assert_eq!(upstream.error_code(), "fetch_upstream_error");

        let malformed = Error::Fetch(FetchError::MalformedBody("not json".into()));
        assert_eq!(malformed.status_code(), 502);
        assert_eq!(malformed.error_code(), "fetch_malformed_body");
    }

    #[test]
    fn delivery_api_error_is_502() {
        let err = Error::Delivery(DeliveryError::Api {
            status: 403,
            description: "bot was blocked by the user".into(),
        });
        assert_eq!(err.status_code(), 502);
        assert_eq!(err.error_code(), "delivery_api_error");
    }

    #[test]
    fn api_error_from_config_has_key_detail() {
        let err = Error::config("NEWS_API_BASE_URL is not set", "news_api_base_url");
        let api: ApiError = err.into();

        assert_eq!(api.error.code, "config_error");
        let details = api.error.details.expect("should have details");
        assert_eq!(details["key"], "news_api_base_url");
    }

    #[test]
    fn api_error_from_upstream_has_status_detail() {
        let err = Error::Fetch(FetchError::Upstream {
            status: 404,
            body: "not found".into(),
        });
        let api: ApiError = err.into();

        assert_eq!(api.error.code, "fetch_upstream_error");
        let details = api.error.details.expect("should have details");
        assert_eq!(details["upstream_status"], 404);
    }

    #[test]
    fn api_error_message_matches_error_display() {
        let err = Error::Fetch(FetchError::MalformedBody("expected object".into()));
        let display_msg = err.to_string();
        let api: ApiError = err.into();

        assert_eq!(api.error.message, display_msg);
    }

    #[test]
    fn api_error_without_details_omits_details_in_json() {
        let api = ApiError::new("test_code", "test message");

        let json_str = serde_json::to_string(&api).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json_str).unwrap();

        assert_eq!(parsed["error"]["code"], "test_code");
        assert_eq!(parsed["error"]["message"], "test message");
        assert!(
            parsed["error"].get("details").is_none(),
            "details field should be omitted from JSON when None"
        );
    }

    #[test]
    fn api_error_round_trips_through_json() {
        let original = ApiError::with_details(
            "config_error",
            "configuration error: bot token missing",
            serde_json::json!({"key": "telegram_bot_token"}),
        );

        let json_str = serde_json::to_string(&original).unwrap();
        let deserialized: ApiError = serde_json::from_str(&json_str).unwrap();

        assert_eq!(deserialized.error.code, original.error.code);
        assert_eq!(deserialized.error.message, original.error.message);
        assert_eq!(deserialized.error.details, original.error.details);
    }
}

//! OpenAPI documentation and schema generation
//!
//! Defines the OpenAPI specification for the relay's webhook surface using
//! utoipa for compile-time spec generation. The spec is served at
//! `/openapi.json`.

use utoipa::OpenApi;

/// OpenAPI documentation for the inshorts-relay webhook API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "inshorts-relay API",
        version = "0.1.0",
        description = "Telegram webhook intake and scheduled news push endpoints",
        license(
            name = "MIT OR Apache-2.0"
        )
    ),
    paths(
        crate::api::routes::receive_update,
        crate::api::routes::send_news,
        crate::api::routes::health_check,
        crate::api::routes::relay_status,
        crate::api::routes::openapi_spec,
    ),
    components(schemas(
        crate::error::ApiError,
        crate::error::ErrorDetail,
        crate::category::Category,
        crate::types::Article,
        crate::types::NewsEnvelope,
        crate::types::PushRecord,
        crate::pipeline::Outcome,
        crate::api::routes::StatusResponse,
    )),
    tags(
        (name = "webhook", description = "Telegram update intake and push triggers"),
        (name = "system", description = "Health and status")
    )
)]
pub struct ApiDoc;

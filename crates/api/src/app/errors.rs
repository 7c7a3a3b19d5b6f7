use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use whs_core::{FailureKind, SchemaError};
use whs_documents::{DocumentStatus, FlatError, Rendered};

use crate::source::SourceError;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Why an inventory request produced no records.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Anything else (e.g. the parse task died).
    #[error("unexpected processing failure: {0}")]
    Unexpected(String),
}

impl InventoryError {
    pub fn kind(&self) -> FailureKind {
        match self {
            InventoryError::Source(e) => e.kind(),
            InventoryError::Schema(_) | InventoryError::Unexpected(_) => FailureKind::Internal,
        }
    }

    /// Error body for the flat listing. Never carries internal details
    /// beyond a short message.
    pub fn to_flat(&self) -> Rendered<FlatError> {
        let body = match self {
            InventoryError::Source(e) if e.kind() == FailureKind::Upstream => {
                FlatError::new("csv_unreachable", "CSV not reachable")
                    .with_upstream(e.upstream_status(), e.url().map(str::to_string))
            }
            InventoryError::Source(e) => FlatError::new("source_misconfigured", e.to_string()),
            InventoryError::Schema(e) => FlatError::new("schema_error", e.to_string()),
            InventoryError::Unexpected(_) => {
                FlatError::new("internal_error", "unexpected processing failure")
            }
        };
        body.render(self.kind())
    }
}

pub fn status_code(status: DocumentStatus) -> StatusCode {
    match status {
        DocumentStatus::Ok => StatusCode::OK,
        DocumentStatus::NotFound => StatusCode::NOT_FOUND,
        DocumentStatus::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        DocumentStatus::BadGateway => StatusCode::BAD_GATEWAY,
    }
}

/// Pretty-printed JSON with `no-store` caching, as the partner integration
/// has always received it.
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    match serde_json::to_string_pretty(body) {
        Ok(text) => (
            status,
            [
                (header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE)),
                (header::CACHE_CONTROL, HeaderValue::from_static("no-store")),
            ],
            text,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("response serialization failed: {e}");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "response serialization failed",
            )
        }
    }
}

pub fn rendered_response<T: Serialize>(rendered: Rendered<T>) -> Response {
    json_response(status_code(rendered.status), &rendered.body)
}

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        [(header::CACHE_CONTROL, HeaderValue::from_static("no-store"))],
        axum::Json(json!({
            "ok": false,
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

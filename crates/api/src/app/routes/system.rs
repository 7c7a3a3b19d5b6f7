use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::Response};
use serde_json::json;

use crate::app::errors;
use crate::app::services::AppServices;

pub async fn health(Extension(services): Extension<Arc<AppServices>>) -> Response {
    errors::json_response(
        StatusCode::OK,
        &json!({
            "status": "ok",
            "service": services.service_name(),
        }),
    )
}

//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: CSV source, partner profile, document numbering
//! - `routes/`: HTTP routes + handlers
//! - `errors.rs`: failure classification and consistent JSON responses

use std::any::Any;
use std::sync::Arc;

use axum::{
    Extension, Router,
    http::{HeaderName, Method, StatusCode, header},
    response::Response,
};
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};

use crate::config::ApiConfig;
use crate::middleware;
use crate::source::CsvSource;

pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router from configuration (entrypoint used by `main.rs`).
pub fn build_app(config: &ApiConfig) -> anyhow::Result<Router> {
    let source = services::build_source(config)?;
    tracing::info!(source = %source.describe(), "csv source configured");
    Ok(build_app_with_source(config, source))
}

/// Build the router around an explicit CSV source (tests, embedding).
pub fn build_app_with_source(config: &ApiConfig, source: Arc<dyn CsvSource>) -> Router {
    let services = Arc::new(services::AppServices::new(config, source));

    let router = routes::router()
        .layer(Extension(services))
        .layer(axum::middleware::from_fn(middleware::request_context));
    with_edge_layers(router)
}

/// CORS outermost, so panic responses carry the CORS headers too.
fn with_edge_layers(router: Router) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(cors())
            .layer(CatchPanicLayer::custom(panic_response)),
    )
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("apikey"),
            HeaderName::from_static("client-id"),
        ])
}

fn panic_response(_err: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!("handler panicked");
    errors::json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal_error",
        "unexpected processing failure",
    )
}

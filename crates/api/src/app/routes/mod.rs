use axum::{Router, routing::get};

pub mod inventory;
pub mod system;

/// Router for all public endpoints, including the legacy function paths the
/// partner integration was first configured against.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .route("/.netlify/functions/health", get(system::health))
        .merge(inventory::router())
}

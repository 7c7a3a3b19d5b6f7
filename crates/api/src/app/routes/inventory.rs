use std::sync::Arc;

use axum::{
    Router,
    extract::{Extension, Query},
    response::Response,
    routing::get,
};
use chrono::Utc;
use tracing::Instrument;

use whs_documents::{partner_failure, render_flat, render_partner};
use whs_inventory::InventoryQuery;

use crate::app::errors::{self, InventoryError};
use crate::app::services::AppServices;
use crate::context::RequestContext;

pub fn router() -> Router {
    Router::new()
        .route("/inventory", get(flat_inventory))
        .route("/whs-inventory", get(partner_inventory))
        .route("/.netlify/functions/whs-inventory", get(partner_inventory))
}

/// Raw `?warehouse=&mspn=` parameters.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct InventoryParams {
    pub warehouse: Option<String>,
    pub mspn: Option<String>,
}

impl InventoryParams {
    /// Collect from decoded query pairs. A repeated key keeps its last value;
    /// unknown keys (such as a cache-busting `ts`) are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        pairs
            .into_iter()
            .fold(Self::default(), |mut params, (key, value)| {
                match key.as_str() {
                    "warehouse" => params.warehouse = Some(value),
                    "mspn" => params.mspn = Some(value),
                    _ => {}
                }
                params
            })
    }

    pub fn into_query(self) -> InventoryQuery {
        InventoryQuery::from_params(self.warehouse.as_deref(), self.mspn.as_deref())
    }
}

/// Plain JSON listing: 200 even when nothing matched.
pub async fn flat_inventory(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let query = InventoryParams::from_pairs(pairs).into_query();
    let span = tracing::info_span!(
        "inventory",
        request_id = %ctx.request_id(),
        format = "flat",
        warehouse = ?query.warehouse,
        mspn = ?query.mspn,
    );

    async move {
        match services.load_inventory(&ctx, &query).await {
            Ok(records) => {
                tracing::info!(count = records.len(), "flat inventory rendered");
                let rendered = render_flat(records, &query, services.source_label(), Utc::now());
                errors::rendered_response(rendered)
            }
            Err(e) => {
                log_failure(&e);
                errors::rendered_response(e.to_flat())
            }
        }
    }
    .instrument(span)
    .await
}

/// Partner availability document: 200 / 404 / 502 / 500.
pub async fn partner_inventory(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let query = InventoryParams::from_pairs(pairs).into_query();
    let span = tracing::info_span!(
        "inventory",
        request_id = %ctx.request_id(),
        format = "partner",
        warehouse = ?query.warehouse,
        mspn = ?query.mspn,
    );

    async move {
        let result = services.load_inventory(&ctx, &query).await;
        let stamp = services.stamp(Utc::now());

        let rendered = match result {
            Ok(records) => {
                tracing::info!(
                    count = records.len(),
                    document_number = %stamp.document_number,
                    "partner document rendered"
                );
                render_partner(&records, &stamp, services.profile())
            }
            Err(e) => {
                log_failure(&e);
                partner_failure(e.kind(), &stamp, services.profile())
            }
        };
        errors::rendered_response(rendered)
    }
    .instrument(span)
    .await
}

fn log_failure(err: &InventoryError) {
    match err {
        InventoryError::Source(e) => tracing::warn!("csv source failed: {e}"),
        InventoryError::Schema(e) => tracing::warn!("csv rejected: {e}"),
        InventoryError::Unexpected(msg) => tracing::error!("inventory processing failed: {msg}"),
    }
}

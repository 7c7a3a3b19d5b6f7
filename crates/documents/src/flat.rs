//! Flat JSON inventory listing.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use whs_core::FailureKind;
use whs_inventory::{InventoryQuery, InventoryRecord};

use crate::{DocumentStatus, Rendered};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatListing {
    pub ok: bool,
    pub query: InventoryQuery,
    pub count: usize,
    pub items: Vec<InventoryRecord>,
    pub source: String,
    /// RFC 3339, millisecond precision, `Z` suffix.
    pub generated_at: String,
}

/// Always 200, even when no record matched.
pub fn render_flat(
    records: Vec<InventoryRecord>,
    query: &InventoryQuery,
    source: &str,
    generated_at: DateTime<Utc>,
) -> Rendered<FlatListing> {
    Rendered::new(
        DocumentStatus::Ok,
        FlatListing {
            ok: true,
            query: query.clone(),
            count: records.len(),
            items: records,
            source: source.to_string(),
            generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        },
    )
}

/// Error body for the flat listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatError {
    pub ok: bool,
    pub error: String,
    pub message: String,
    /// Upstream HTTP status, when the CSV host answered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csv_url: Option<String>,
}

impl FlatError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: code.into(),
            message: message.into(),
            status: None,
            csv_url: None,
        }
    }

    pub fn with_upstream(mut self, status: Option<u16>, csv_url: Option<String>) -> Self {
        self.status = status;
        self.csv_url = csv_url;
        self
    }

    /// 502 for upstream failures, 500 otherwise.
    pub fn render(self, kind: FailureKind) -> Rendered<FlatError> {
        let status = match kind {
            FailureKind::Upstream => DocumentStatus::BadGateway,
            FailureKind::Internal => DocumentStatus::InternalError,
        };
        Rendered::new(status, self)
    }
}

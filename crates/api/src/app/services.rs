//! Service wiring: CSV source, partner profile and document numbering.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use whs_documents::{DocumentNumberSequence, DocumentStamp, PartnerProfile};
use whs_inventory::{InventoryQuery, InventoryRecord, parse_csv_with_summary};

use crate::app::errors::InventoryError;
use crate::config::{ApiConfig, CsvSourceConfig};
use crate::context::RequestContext;
use crate::source::{CsvSource, FileCsvSource, HttpCsvSource};

/// Shared, read-only state behind every inventory route.
pub struct AppServices {
    source: Arc<dyn CsvSource>,
    documents: DocumentNumberSequence,
    profile: PartnerProfile,
    source_label: String,
    service_name: String,
}

impl AppServices {
    pub fn new(config: &ApiConfig, source: Arc<dyn CsvSource>) -> Self {
        Self {
            source,
            documents: DocumentNumberSequence::new(),
            profile: config.partner.clone(),
            source_label: config.source_label.clone(),
            service_name: config.service_name.clone(),
        }
    }

    pub fn profile(&self) -> &PartnerProfile {
        &self.profile
    }

    pub fn source_label(&self) -> &str {
        &self.source_label
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Next document stamp (fresh, strictly increasing document number).
    pub fn stamp(&self, now: DateTime<Utc>) -> DocumentStamp {
        self.documents.stamp(now)
    }

    /// Fetch the CSV, parse it, and apply the query filter.
    pub async fn load_inventory(
        &self,
        ctx: &RequestContext,
        query: &InventoryQuery,
    ) -> Result<Vec<InventoryRecord>, InventoryError> {
        let payload = self.source.fetch(ctx.origin()).await?;
        let location = payload.location;
        let text = payload.text;

        // Parsing is CPU-bound; keep it off the async workers.
        let parsed = tokio::task::spawn_blocking(move || parse_csv_with_summary(&text))
            .await
            .map_err(|e| InventoryError::Unexpected(e.to_string()))??;

        tracing::info!(
            source = %location,
            delimiter = ?parsed.summary.delimiter,
            rows_read = parsed.summary.rows_read,
            rows_accepted = parsed.summary.rows_accepted,
            rows_skipped = parsed.summary.rows_skipped,
            "inventory csv parsed"
        );

        Ok(query.apply(parsed.records))
    }
}

/// Build the CSV source described by the configuration.
pub fn build_source(config: &ApiConfig) -> Result<Arc<dyn CsvSource>, reqwest::Error> {
    let source: Arc<dyn CsvSource> = match &config.csv_source {
        CsvSourceConfig::File(path) => Arc::new(FileCsvSource::new(path.clone())),
        CsvSourceConfig::Http(target) => {
            Arc::new(HttpCsvSource::new(target.clone(), config.fetch_timeout)?)
        }
    };
    Ok(source)
}

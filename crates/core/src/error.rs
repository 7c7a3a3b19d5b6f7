//! Error model shared across the ingest, rendering and API layers.

use thiserror::Error;

/// Result type used by the CSV ingest layer.
pub type IngestResult<T> = Result<T, SchemaError>;

/// Document-level structural problem in an inventory CSV.
///
/// Row-level and value-level anomalies never produce this error; they are
/// recovered inside the parser (skipped row, zero quantity).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The header row lacks one or more mandatory columns.
    #[error(
        "CSV is missing required columns: {} (required: ALMACEN, ARTICULO, DISPONIBLE; SHIPTO optional)",
        .missing.join(", ")
    )]
    MissingColumns { missing: Vec<&'static str> },
}

impl SchemaError {
    pub fn missing_columns(missing: Vec<&'static str>) -> Self {
        Self::MissingColumns { missing }
    }

    /// Names of the mandatory columns that were not found.
    pub fn missing(&self) -> &[&'static str] {
        match self {
            SchemaError::MissingColumns { missing } => missing,
        }
    }
}

/// Coarse classification of a request that could not produce inventory.
///
/// The partner document encodes this as `errorHeader.errorCode`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The CSV source could not be fetched (network failure or non-2xx).
    Upstream,
    /// Anything else: schema errors, unexpected processing failures.
    Internal,
}

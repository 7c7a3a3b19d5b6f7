//! Inventory domain module.
//!
//! This crate turns raw inventory CSV text into typed records and filters
//! them, implemented purely as deterministic logic (no IO, no HTTP).

pub mod ingest;
pub mod query;
pub mod record;

pub use ingest::{Delimiter, ParseSummary, ParsedInventory, parse_csv, parse_csv_with_summary};
pub use query::InventoryQuery;
pub use record::InventoryRecord;

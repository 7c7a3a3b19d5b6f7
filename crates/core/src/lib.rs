//! `whs-core` — shared building blocks for the inventory service.
//!
//! Pure types only (no IO, no HTTP): the error taxonomy shared by the parser,
//! the renderers and the API, plus request identifiers.

pub mod error;
pub mod id;

pub use error::{FailureKind, IngestResult, SchemaError};
pub use id::RequestId;

//! Response documents rendered from parsed inventory records.
//!
//! Two encodings are derived from the same `InventoryRecord` slice:
//! - `flat`: the plain JSON listing (`items`, `count`, echoed query);
//! - `partner`: the nested availability document expected by the tire
//!   manufacturer's inventory-inquiry integration.
//!
//! Renderers are pure: timestamps and document numbers are passed in via
//! [`DocumentStamp`], so identical inputs give identical documents.

pub mod flat;
pub mod partner;
pub mod stamp;

pub use flat::{FlatError, FlatListing, render_flat};
pub use partner::{
    ErrorCode, LineItem, PartnerDocument, PartnerProfile, partner_failure, render_partner,
};
pub use stamp::{DocumentNumberSequence, DocumentStamp};

/// HTTP status a rendered document should be sent with.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DocumentStatus {
    Ok,
    NotFound,
    InternalError,
    BadGateway,
}

impl DocumentStatus {
    pub fn as_u16(self) -> u16 {
        match self {
            DocumentStatus::Ok => 200,
            DocumentStatus::NotFound => 404,
            DocumentStatus::InternalError => 500,
            DocumentStatus::BadGateway => 502,
        }
    }
}

/// A document body paired with its response status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered<T> {
    pub status: DocumentStatus,
    pub body: T,
}

impl<T> Rendered<T> {
    pub fn new(status: DocumentStatus, body: T) -> Self {
        Self { status, body }
    }
}

//! Partner availability document (inventory-inquiry response).

use serde::{Deserialize, Serialize};

use whs_core::FailureKind;
use whs_inventory::InventoryRecord;

use crate::stamp::DocumentStamp;
use crate::{DocumentStatus, Rendered};

/// Fixed header identifiers agreed with the partner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerProfile {
    pub document_id: String,
    pub contract_id: String,
    pub variant: String,
}

impl Default for PartnerProfile {
    fn default() -> Self {
        Self {
            document_id: "C1".to_string(),
            contract_id: "00001".to_string(),
            variant: "0".to_string(),
        }
    }
}

/// `errorHeader.errorCode` values.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Success,
    Internal,
    SourceUnreachable,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Success => "0",
            ErrorCode::Internal => "1",
            ErrorCode::SourceUnreachable => "2",
        }
    }
}

impl From<FailureKind> for ErrorCode {
    fn from(kind: FailureKind) -> Self {
        match kind {
            FailureKind::Upstream => ErrorCode::SourceUnreachable,
            FailureKind::Internal => ErrorCode::Internal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerDocument {
    pub issue_date: String,
    pub issue_time: String,
    #[serde(rename = "documentID")]
    pub document_id: String,
    pub document_number: String,
    pub variant: String,
    pub error_header: ErrorHeader,
    pub total_line_item_number: String,
    pub contract: Contract,
    pub line_level: Vec<LineItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorHeader {
    pub error_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    #[serde(rename = "documentID")]
    pub document_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub line_id: String,
    pub article: Article,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub article_identification: ArticleIdentification,
    pub article_description: ArticleDescription,
    pub schedule_details: ScheduleDetails,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleIdentification {
    #[serde(rename = "manufacturersArticleID")]
    pub manufacturers_article_id: String,
    #[serde(rename = "eanuccArticleID")]
    pub eanucc_article_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDescription {
    pub article_description_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDetails {
    pub available_quantity: AvailableQuantity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableQuantity {
    pub quantity_value: u64,
}

impl From<&InventoryRecord> for LineItem {
    fn from(record: &InventoryRecord) -> Self {
        // No separate EAN source exists: the MSPN fills both identifiers.
        Self {
            line_id: record.item_code.clone(),
            article: Article {
                article_identification: ArticleIdentification {
                    manufacturers_article_id: record.item_code.clone(),
                    eanucc_article_id: record.item_code.clone(),
                },
                article_description: ArticleDescription {
                    article_description_text: record.display_description().to_string(),
                },
                schedule_details: ScheduleDetails {
                    available_quantity: AvailableQuantity {
                        quantity_value: u64::try_from(record.available_quantity).unwrap_or(0),
                    },
                },
            },
        }
    }
}

impl PartnerDocument {
    fn skeleton(
        stamp: &DocumentStamp,
        profile: &PartnerProfile,
        code: ErrorCode,
        line_level: Vec<LineItem>,
    ) -> Self {
        Self {
            issue_date: stamp.issue_date(),
            issue_time: stamp.issue_time(),
            document_id: profile.document_id.clone(),
            document_number: stamp.document_number.clone(),
            variant: profile.variant.clone(),
            error_header: ErrorHeader {
                error_code: code.as_str().to_string(),
            },
            total_line_item_number: line_level.len().to_string(),
            contract: Contract {
                document_id: profile.contract_id.clone(),
            },
            line_level,
        }
    }

    pub fn error_code(&self) -> &str {
        &self.error_header.error_code
    }
}

/// Render (already filtered) records; 404 with error code `"0"` when empty.
pub fn render_partner(
    records: &[InventoryRecord],
    stamp: &DocumentStamp,
    profile: &PartnerProfile,
) -> Rendered<PartnerDocument> {
    let line_level: Vec<LineItem> = records.iter().map(LineItem::from).collect();
    let status = if line_level.is_empty() {
        DocumentStatus::NotFound
    } else {
        DocumentStatus::Ok
    };
    Rendered::new(
        status,
        PartnerDocument::skeleton(stamp, profile, ErrorCode::Success, line_level),
    )
}

/// Fixed-shape failure document with no line items.
pub fn partner_failure(
    kind: FailureKind,
    stamp: &DocumentStamp,
    profile: &PartnerProfile,
) -> Rendered<PartnerDocument> {
    let status = match kind {
        FailureKind::Upstream => DocumentStatus::BadGateway,
        FailureKind::Internal => DocumentStatus::InternalError,
    };
    Rendered::new(
        status,
        PartnerDocument::skeleton(stamp, profile, kind.into(), Vec::new()),
    )
}

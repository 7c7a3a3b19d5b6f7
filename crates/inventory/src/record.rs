use serde::{Deserialize, Serialize};

/// One parsed inventory row.
///
/// Serialized with the field names the downstream consumers already read
/// (`mspn`, `available`), not the Rust field names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub warehouse: String,
    #[serde(rename = "shipTo")]
    pub ship_to: String,
    #[serde(rename = "mspn")]
    pub item_code: String,
    pub description: String,
    #[serde(rename = "available")]
    pub available_quantity: i64,
}

impl InventoryRecord {
    pub fn new(
        warehouse: impl Into<String>,
        item_code: impl Into<String>,
        available_quantity: i64,
    ) -> Self {
        Self {
            warehouse: warehouse.into(),
            ship_to: String::new(),
            item_code: item_code.into(),
            description: String::new(),
            available_quantity,
        }
    }

    pub fn with_ship_to(mut self, ship_to: impl Into<String>) -> Self {
        self.ship_to = ship_to.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Description text, or the item code when the CSV had none.
    pub fn display_description(&self) -> &str {
        if self.description.is_empty() {
            &self.item_code
        } else {
            &self.description
        }
    }
}

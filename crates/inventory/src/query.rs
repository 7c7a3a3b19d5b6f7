use serde::{Deserialize, Serialize};

use crate::record::InventoryRecord;

/// Optional warehouse / item-code filter taken from the request query.
///
/// Matching is exact and case-sensitive; an absent field matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryQuery {
    pub warehouse: Option<String>,
    pub mspn: Option<String>,
}

impl InventoryQuery {
    /// Build from raw query-string values: trimmed, empty treated as absent.
    pub fn from_params(warehouse: Option<&str>, mspn: Option<&str>) -> Self {
        Self {
            warehouse: clean(warehouse),
            mspn: clean(mspn),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.warehouse.is_none() && self.mspn.is_none()
    }

    pub fn matches(&self, record: &InventoryRecord) -> bool {
        let warehouse_ok = self
            .warehouse
            .as_deref()
            .is_none_or(|wh| record.warehouse == wh);
        let mspn_ok = self
            .mspn
            .as_deref()
            .is_none_or(|code| record.item_code == code);
        warehouse_ok && mspn_ok
    }

    /// Keep matching records, preserving order.
    pub fn apply(&self, records: Vec<InventoryRecord>) -> Vec<InventoryRecord> {
        if self.is_empty() {
            return records;
        }
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}

fn clean(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<InventoryRecord> {
        vec![
            InventoryRecord::new("WH1", "SKU1", 1),
            InventoryRecord::new("WH1", "SKU2", 2),
            InventoryRecord::new("WH2", "SKU1", 3),
        ]
    }

    #[test]
    fn params_are_trimmed_and_blank_is_absent() {
        let q = InventoryQuery::from_params(Some("  WH1 "), Some("   "));
        assert_eq!(q.warehouse.as_deref(), Some("WH1"));
        assert_eq!(q.mspn, None);
        assert!(InventoryQuery::from_params(None, Some("")).is_empty());
    }

    #[test]
    fn filters_by_warehouse_and_item() {
        let by_wh = InventoryQuery::from_params(Some("WH1"), None).apply(sample());
        assert_eq!(by_wh.len(), 2);

        let both = InventoryQuery::from_params(Some("WH2"), Some("SKU1")).apply(sample());
        assert_eq!(both, vec![InventoryRecord::new("WH2", "SKU1", 3)]);
    }

    #[test]
    fn matching_is_case_sensitive() {
        let q = InventoryQuery::from_params(Some("wh1"), None);
        assert!(q.apply(sample()).is_empty());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn records() -> impl Strategy<Value = Vec<InventoryRecord>> {
            prop::collection::vec(
                ("WH[0-3]", "SKU[0-3]", -5i64..50)
                    .prop_map(|(wh, sku, qty)| InventoryRecord::new(wh, sku, qty)),
                0..30,
            )
        }

        proptest! {
            /// Property: an empty query is the identity.
            #[test]
            fn empty_query_is_identity(input in records()) {
                let out = InventoryQuery::default().apply(input.clone());
                prop_assert_eq!(out, input);
            }

            /// Property: every kept record matches, and order is preserved.
            #[test]
            fn filtered_output_is_ordered_subsequence(
                input in records(),
                wh in prop::option::of("WH[0-3]"),
                sku in prop::option::of("SKU[0-3]"),
            ) {
                let q = InventoryQuery::from_params(wh.as_deref(), sku.as_deref());
                let out = q.apply(input.clone());

                prop_assert!(out.iter().all(|r| q.matches(r)));
                let expected: Vec<_> = input.into_iter().filter(|r| q.matches(r)).collect();
                prop_assert_eq!(out, expected);
            }
        }
    }
}

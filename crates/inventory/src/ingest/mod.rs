//! CSV ingest: raw inventory text -> ordered `InventoryRecord`s.
//!
//! The parser is tolerant at row level and strict at document level:
//! - a header without `ALMACEN`, `ARTICULO` or `DISPONIBLE` is a `SchemaError`;
//! - rows missing a warehouse or item code are skipped;
//! - short rows decode their missing cells as empty strings;
//! - unparseable quantities become 0.

use csv::{ReaderBuilder, StringRecord};
use serde::Serialize;

use whs_core::IngestResult;

use crate::record::InventoryRecord;

pub mod delimiter;
pub mod header;
pub mod quantity;

pub use delimiter::Delimiter;
pub use header::{ColumnMap, DESCRIPTION_ALIASES, normalize_header};
pub use quantity::parse_quantity;

/// Counters describing one parse run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParseSummary {
    /// `None` when the input had no data rows to split.
    pub delimiter: Option<Delimiter>,
    pub rows_read: usize,
    pub rows_accepted: usize,
    pub rows_skipped: usize,
}

/// Records plus the summary of how they were obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedInventory {
    pub records: Vec<InventoryRecord>,
    pub summary: ParseSummary,
}

/// Parse inventory CSV text into records, in source order.
pub fn parse_csv(text: &str) -> IngestResult<Vec<InventoryRecord>> {
    parse_csv_with_summary(text).map(|parsed| parsed.records)
}

/// Like [`parse_csv`], also reporting row counters for logging.
pub fn parse_csv_with_summary(text: &str) -> IngestResult<ParsedInventory> {
    let text = text.trim_start_matches('\u{FEFF}').replace('\r', "");
    let lines: Vec<&str> = text
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .collect();

    let Some((header_line, rows)) = lines.split_first() else {
        return Ok(ParsedInventory::empty());
    };
    if rows.is_empty() {
        return Ok(ParsedInventory::empty());
    }

    let delimiter = Delimiter::detect(header_line);
    let splitter = LineSplitter::new(delimiter);

    let headers: Vec<String> = splitter
        .split(header_line)
        .iter()
        .map(normalize_header)
        .collect();
    let columns = ColumnMap::resolve(&headers)?;

    let mut records = Vec::with_capacity(rows.len());
    let mut skipped = 0usize;

    for (idx, line) in rows.iter().enumerate() {
        let row_number = idx + 1;
        match decode_row(&columns, &splitter.split(line)) {
            Some(record) => records.push(record),
            None => {
                skipped += 1;
                tracing::debug!(row = row_number, "skipping inventory row without warehouse or item code");
            }
        }
    }

    let summary = ParseSummary {
        delimiter: Some(delimiter),
        rows_read: rows.len(),
        rows_accepted: records.len(),
        rows_skipped: skipped,
    };

    Ok(ParsedInventory { records, summary })
}

impl ParsedInventory {
    fn empty() -> Self {
        Self {
            records: Vec::new(),
            summary: ParseSummary::default(),
        }
    }
}

/// Splits one physical line into cells.
///
/// Lines whose quotes pair up go through the csv reader, so a quoted cell may
/// hold the delimiter. A line with an unclosed quote is split on the bare
/// delimiter instead, keeping the quote characters in the cell text.
struct LineSplitter {
    delimiter: Delimiter,
    builder: ReaderBuilder,
}

impl LineSplitter {
    fn new(delimiter: Delimiter) -> Self {
        let mut builder = ReaderBuilder::new();
        builder
            .has_headers(false)
            .flexible(true)
            .delimiter(delimiter.as_byte())
            .buffer_capacity(LINE_BUFFER_CAPACITY);
        Self { delimiter, builder }
    }

    fn split(&self, line: &str) -> StringRecord {
        if line.matches('"').count() % 2 != 0 {
            tracing::debug!("unbalanced quote; splitting on the bare delimiter");
            return self.plain_split(line);
        }

        let mut reader = self.builder.from_reader(line.as_bytes());
        let mut cells = StringRecord::new();
        match reader.read_record(&mut cells) {
            Ok(true) => cells,
            Ok(false) => StringRecord::new(),
            Err(e) => {
                tracing::debug!("malformed CSV line: {e}");
                self.plain_split(line)
            }
        }
    }

    fn plain_split(&self, line: &str) -> StringRecord {
        line.split(self.delimiter.as_char()).collect()
    }
}

/// Inventory lines are short; the csv default of 8 KiB per reader is wasted.
const LINE_BUFFER_CAPACITY: usize = 256;

fn decode_row(columns: &ColumnMap, cells: &StringRecord) -> Option<InventoryRecord> {
    let cell = |idx: usize| cells.get(idx).map(str::trim).unwrap_or("");
    let optional_cell = |idx: Option<usize>| idx.map(cell).unwrap_or("");

    let warehouse = cell(columns.warehouse);
    let item_code = cell(columns.item_code);
    if warehouse.is_empty() || item_code.is_empty() {
        return None;
    }

    Some(InventoryRecord {
        warehouse: warehouse.to_string(),
        ship_to: optional_cell(columns.ship_to).to_string(),
        item_code: item_code.to_string(),
        description: optional_cell(columns.description).to_string(),
        available_quantity: parse_quantity(cell(columns.available)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use whs_core::SchemaError;

    #[test]
    fn semicolon_document_with_decimal_comma() {
        let records = parse_csv("ALMACEN;ARTICULO;DISPONIBLE\nWH1;SKU1;10,5\n").unwrap();
        assert_eq!(records, vec![InventoryRecord::new("WH1", "SKU1", 11)]);
    }

    #[test]
    fn comma_document_with_all_columns() {
        let text = "ALMACEN,SHIPTO,ARTICULO,DISPONIBLE,DESCRIPCION\r\n\
                    WH1,ST1,SKU1,4,Tire 205/55\r\n\
                    WH2,,SKU2,0,\r\n";
        let records = parse_csv(text).unwrap();

        assert_eq!(
            records,
            vec![
                InventoryRecord::new("WH1", "SKU1", 4)
                    .with_ship_to("ST1")
                    .with_description("Tire 205/55"),
                InventoryRecord::new("WH2", "SKU2", 0),
            ]
        );
    }

    #[test]
    fn header_only_and_empty_input_yield_no_records() {
        assert!(parse_csv("").unwrap().is_empty());
        assert!(parse_csv("\n\n  \n").unwrap().is_empty());
        assert!(parse_csv("ALMACEN;ARTICULO;DISPONIBLE\n").unwrap().is_empty());
        // No data rows means the header is never validated.
        assert!(parse_csv("FOO;BAR\n").unwrap().is_empty());
    }

    #[test]
    fn missing_mandatory_column_is_a_schema_error() {
        let err = parse_csv("ALMACEN;DISPONIBLE\nWH1;3\n").unwrap_err();
        assert_eq!(err, SchemaError::missing_columns(vec!["ARTICULO"]));
    }

    #[test]
    fn rows_without_warehouse_or_item_are_skipped() {
        let text = "ALMACEN;ARTICULO;DISPONIBLE\n;SKU1;1\nWH1;;2\n  ;  ;3\nWH2;SKU2;4\n";
        let parsed = parse_csv_with_summary(text).unwrap();

        assert_eq!(parsed.records, vec![InventoryRecord::new("WH2", "SKU2", 4)]);
        assert_eq!(parsed.summary.rows_read, 4);
        assert_eq!(parsed.summary.rows_accepted, 1);
        assert_eq!(parsed.summary.rows_skipped, 3);
        assert_eq!(parsed.summary.delimiter, Some(Delimiter::Semicolon));
    }

    #[test]
    fn short_rows_decode_missing_cells_as_empty() {
        let text = "ALMACEN;ARTICULO;SHIPTO;DESCRIPCION;DISPONIBLE\nWH1;SKU1\n";
        let records = parse_csv(text).unwrap();
        assert_eq!(records, vec![InventoryRecord::new("WH1", "SKU1", 0)]);
    }

    #[test]
    fn accented_and_lowercase_headers_resolve() {
        let text = "Almacén;Artículo;Disponible;Descripción\nWH1;SKU1;2;Llanta\n";
        let records = parse_csv(text).unwrap();
        assert_eq!(records[0].description, "Llanta");
        assert_eq!(records[0].available_quantity, 2);
    }

    #[test]
    fn bom_and_blank_lines_are_ignored() {
        let text = "\u{FEFF}ALMACEN,ARTICULO,DISPONIBLE\n\nWH1,SKU1,1\n   \nWH1,SKU2,2\n";
        let records = parse_csv(text).unwrap();
        let codes: Vec<_> = records.iter().map(|r| r.item_code.as_str()).collect();
        assert_eq!(codes, vec!["SKU1", "SKU2"]);
    }

    #[test]
    fn quoted_cells_may_contain_the_delimiter() {
        let text = "ALMACEN,ARTICULO,DISPONIBLE,NOMBRE\nWH1,SKU1,\"3,5\",\"Tire, 17 in\"\n";
        let records = parse_csv(text).unwrap();
        assert_eq!(records[0].available_quantity, 4);
        assert_eq!(records[0].description, "Tire, 17 in");
    }

    #[test]
    fn unclosed_quote_falls_back_to_plain_split() {
        let text = "ALMACEN;ARTICULO;DISPONIBLE\nWH1;\"SKU1;3\nWH2;SKU2;4\n";
        let records = parse_csv(text).unwrap();
        assert_eq!(
            records,
            vec![
                InventoryRecord::new("WH1", "\"SKU1", 3),
                InventoryRecord::new("WH2", "SKU2", 4),
            ]
        );
    }

    #[test]
    fn escaped_quotes_inside_quoted_cell_are_kept() {
        let text = "ALMACEN,ARTICULO,DISPONIBLE,NOMBRE\nWH1,SKU1,2,\"Rim 17\"\"\"\n";
        let records = parse_csv(text).unwrap();
        assert_eq!(records[0].description, "Rim 17\"");
        assert_eq!(records[0].available_quantity, 2);
    }

    #[test]
    fn long_lines_exceed_the_line_buffer() {
        let description = "x".repeat(LINE_BUFFER_CAPACITY * 4);
        let text = format!("ALMACEN;ARTICULO;DISPONIBLE;DESCRIPCION\nWH1;SKU1;7;{description}\n");
        let records = parse_csv(&text).unwrap();
        assert_eq!(records[0].description, description);
        assert_eq!(records[0].available_quantity, 7);
    }

    #[test]
    fn cells_are_trimmed() {
        let text = "ALMACEN ; ARTICULO ; DISPONIBLE\n WH1 ; SKU1 ; 5 \n";
        let records = parse_csv(text).unwrap();
        assert_eq!(records, vec![InventoryRecord::new("WH1", "SKU1", 5)]);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn row_strategy() -> impl Strategy<Value = (String, String, u32)> {
            ("[A-Z][A-Z0-9]{0,5}", "[A-Z0-9]{1,10}", 0u32..100_000)
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: N well-formed rows produce N records in source order.
            #[test]
            fn well_formed_rows_round_trip_in_order(
                rows in prop::collection::vec(row_strategy(), 0..40),
                semicolon in any::<bool>(),
            ) {
                let sep = if semicolon { ";" } else { "," };
                let mut text = ["ALMACEN", "ARTICULO", "DISPONIBLE"].join(sep);
                text.push('\n');
                for (wh, sku, qty) in &rows {
                    text.push_str(&[wh.as_str(), sku.as_str(), &qty.to_string()].join(sep));
                    text.push('\n');
                }

                let records = parse_csv(&text).unwrap();
                prop_assert_eq!(records.len(), rows.len());
                for (record, (wh, sku, qty)) in records.iter().zip(&rows) {
                    prop_assert_eq!(&record.warehouse, wh);
                    prop_assert_eq!(&record.item_code, sku);
                    prop_assert_eq!(record.available_quantity, i64::from(*qty));
                }
            }

            /// Property: a header lacking a mandatory column always fails.
            #[test]
            fn missing_mandatory_column_always_fails(drop in 0usize..3, semicolon in any::<bool>()) {
                let sep = if semicolon { ";" } else { "," };
                let mut header = vec!["ALMACEN", "SHIPTO", "ARTICULO", "DISPONIBLE"];
                let mandatory = ["ALMACEN", "ARTICULO", "DISPONIBLE"];
                header.retain(|h| *h != mandatory[drop]);
                let text = format!("{}\nA{sep}B{sep}C\n", header.join(sep));

                prop_assert!(parse_csv(&text).is_err());
            }

            /// Property: decimal-comma quantities round half away from zero.
            #[test]
            fn decimal_comma_rounding(whole in 0u32..10_000, tenths in 0u32..10) {
                let text = format!("ALMACEN;ARTICULO;DISPONIBLE\nWH;SKU;{whole},{tenths}\n");
                let records = parse_csv(&text).unwrap();
                let expected = i64::from(whole) + i64::from(tenths >= 5);
                prop_assert_eq!(records[0].available_quantity, expected);
            }
        }
    }
}

//! Header normalization and column resolution.

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use whs_core::{IngestResult, SchemaError};

pub const WAREHOUSE_COLUMN: &str = "ALMACEN";
pub const SHIP_TO_COLUMN: &str = "SHIPTO";
pub const ITEM_CODE_COLUMN: &str = "ARTICULO";
pub const AVAILABLE_COLUMN: &str = "DISPONIBLE";

/// Normalized header names accepted for the description column, in priority
/// order. The first one present in the header wins.
pub const DESCRIPTION_ALIASES: &[&str] = &[
    "DESCRIPCION",
    "DESCRIPCIONARTICULO",
    "DESCRIPCION_ARTICULO",
    "ARTICULODESCRIPCION",
    "ARTICULO_DESCRIPCION",
    "NOMBRE",
    "PRODUCTO",
    "MODELO",
    "DESCR",
    "DESCRIP",
    "DESC",
];

/// Trim, uppercase and strip diacritics (`" Descripción "` -> `"DESCRIPCION"`).
pub fn normalize_header(value: &str) -> String {
    value
        .trim()
        .to_uppercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Logical field -> column index, resolved once per document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub warehouse: usize,
    pub item_code: usize,
    pub available: usize,
    pub ship_to: Option<usize>,
    pub description: Option<usize>,
}

impl ColumnMap {
    /// Resolve columns against already-normalized header names.
    pub fn resolve<S: AsRef<str>>(headers: &[S]) -> IngestResult<Self> {
        Self::resolve_with_aliases(headers, DESCRIPTION_ALIASES)
    }

    pub fn resolve_with_aliases<S: AsRef<str>>(
        headers: &[S],
        description_aliases: &[&str],
    ) -> IngestResult<Self> {
        let find = |name: &str| headers.iter().position(|h| h.as_ref() == name);

        let warehouse = find(WAREHOUSE_COLUMN);
        let item_code = find(ITEM_CODE_COLUMN);
        let available = find(AVAILABLE_COLUMN);

        match (warehouse, item_code, available) {
            (Some(warehouse), Some(item_code), Some(available)) => Ok(Self {
                warehouse,
                item_code,
                available,
                ship_to: find(SHIP_TO_COLUMN),
                description: description_aliases.iter().find_map(|alias| find(*alias)),
            }),
            _ => {
                let missing = [
                    (WAREHOUSE_COLUMN, warehouse),
                    (ITEM_CODE_COLUMN, item_code),
                    (AVAILABLE_COLUMN, available),
                ]
                .into_iter()
                .filter(|(_, idx)| idx.is_none())
                .map(|(name, _)| name)
                .collect();
                Err(SchemaError::missing_columns(missing))
            }
        }
    }
}

//! Field delimiter detection.

use serde::Serialize;

/// Field separator used by an inventory CSV.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    Comma,
    Semicolon,
}

impl Delimiter {
    /// Pick the delimiter from the header line alone.
    ///
    /// Semicolon wins only when it yields strictly more fields than comma;
    /// ties (including a header with neither) resolve to comma.
    pub fn detect(header_line: &str) -> Self {
        let comma = header_line.split(',').count();
        let semicolon = header_line.split(';').count();
        if semicolon > comma {
            Delimiter::Semicolon
        } else {
            Delimiter::Comma
        }
    }

    pub fn as_byte(self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Semicolon => b';',
        }
    }

    pub fn as_char(self) -> char {
        self.as_byte() as char
    }
}

impl core::fmt::Display for Delimiter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn semicolon_header_is_detected() {
        assert_eq!(
            Delimiter::detect("ALMACEN;ARTICULO;DISPONIBLE"),
            Delimiter::Semicolon
        );
    }

    #[test]
    fn comma_header_is_detected() {
        assert_eq!(
            Delimiter::detect("ALMACEN,ARTICULO,DISPONIBLE"),
            Delimiter::Comma
        );
    }

    #[test]
    fn tie_and_single_column_resolve_to_comma() {
        assert_eq!(Delimiter::detect("A;B,C"), Delimiter::Comma);
        assert_eq!(Delimiter::detect("ALMACEN"), Delimiter::Comma);
    }

    #[test]
    fn mixed_header_uses_field_count_not_content() {
        // Three fields on ';' versus two on ','.
        assert_eq!(
            Delimiter::detect("ALMACEN;ARTICULO;DESCRIPCION, LARGA"),
            Delimiter::Semicolon
        );
        // Two fields on ';' versus three on ','.
        assert_eq!(Delimiter::detect("A,B;C,D"), Delimiter::Comma);
    }
}

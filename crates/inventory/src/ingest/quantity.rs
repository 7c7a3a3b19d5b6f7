//! Locale-tolerant availability parsing.

/// Parse an availability cell into a whole quantity.
///
/// Every `,` is read as a decimal point, the longest leading decimal literal
/// is taken (`"12,5 uds"` -> 12.5), and the value is rounded half away from
/// zero. Empty, unparseable and non-finite input yields 0.
pub fn parse_quantity(raw: &str) -> i64 {
    let normalized = raw.trim().replace(',', ".");
    leading_decimal(&normalized)
        .map(round_half_away_from_zero)
        .unwrap_or(0)
}

/// Round half away from zero, saturating at the `i64` bounds.
pub fn round_half_away_from_zero(value: f64) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    // `f64::round` rounds half away from zero; `as` saturates.
    value.round() as i64
}

fn leading_decimal(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_digits = digits_from(end);
    end += int_digits;

    let mut mantissa_digits = int_digits;
    if bytes.get(end) == Some(&b'.') {
        let frac_digits = digits_from(end + 1);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
            mantissa_digits += frac_digits;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_digits = digits_from(end + 1 + sign);
        if exp_digits > 0 {
            end += 1 + sign + exp_digits;
        }
    }

    s[..end].parse::<f64>().ok()
}

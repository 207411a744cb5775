//! Display formatting for the result line and history entries.
//!
//! Formatting is display-only: the raw unformatted numeric string always
//! stays in [`CalcState`](crate::models::CalcState) so chained calculations
//! never operate on grouped or rounded text.

/// Format a raw entry string for display.
///
/// Empty or unparsable input renders as `"0"`, which is also how the rest of
/// the calculator treats an empty entry.
pub fn format_display(raw: &str) -> String {
    if raw.is_empty() {
        return "0".to_string();
    }

    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => format_value(value),
        _ => "0".to_string(),
    }
}

/// Format a finite numeric value for display.
///
/// Very large magnitudes (above 1e15) and very small non-zero magnitudes
/// (below 1e-6) fall back to exponential notation with six fractional
/// digits. Values of a thousand and up get comma grouping with at most
/// eight fractional digits, trailing zeros trimmed. Everything else is the
/// shortest plain decimal string.
pub fn format_value(value: f64) -> String {
    let magnitude = value.abs();

    if magnitude > 1e15 || (magnitude > 0.0 && magnitude < 1e-6) {
        return format!("{:.6e}", value);
    }

    if magnitude >= 1000.0 {
        return group_thousands(value);
    }

    value.to_string()
}

/// Render `value` with comma thousands separators and at most eight
/// fractional digits, trailing zeros trimmed.
fn group_thousands(value: f64) -> String {
    let mut text = format!("{:.8}", value);

    while text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.pop();
    }

    let (number, fraction) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part.to_string(), Some(frac_part.to_string())),
        None => (text, None),
    };

    let (sign, digits) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number.as_str()),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match fraction {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_unparsable_render_as_zero() {
        assert_eq!(format_display(""), "0");
        assert_eq!(format_display("abc"), "0");
        assert_eq!(format_display("NaN"), "0");
    }

    #[test]
    fn test_plain_numbers_pass_through() {
        assert_eq!(format_display("42"), "42");
        assert_eq!(format_display("0.5"), "0.5");
        assert_eq!(format_display("-999"), "-999");
        // "0." parses as zero
        assert_eq!(format_display("0."), "0");
    }

    #[test]
    fn test_thousands_grouping() {
        assert_eq!(format_value(1500.0), "1,500");
        assert_eq!(format_value(1000.0), "1,000");
        assert_eq!(format_value(1_234_567.0), "1,234,567");
        assert_eq!(format_value(-1500.0), "-1,500");
    }

    #[test]
    fn test_grouping_keeps_up_to_eight_fraction_digits() {
        assert_eq!(format_value(1234.5), "1,234.5");
        assert_eq!(format_value(1234.567891234), "1,234.56789123");
        // Trailing zeros are trimmed
        assert_eq!(format_value(1234.50), "1,234.5");
    }

    #[test]
    fn test_exponential_fallback_for_large_values() {
        assert_eq!(format_value(1e16), "1.000000e16");
        // Exactly 1e15 still groups
        assert_eq!(format_value(1e15), "1,000,000,000,000,000");
    }

    #[test]
    fn test_exponential_fallback_for_tiny_values() {
        assert_eq!(format_value(0.0000001), "1.000000e-7");
        assert_eq!(format_value(-0.0000001), "-1.000000e-7");
        // The boundary itself stays plain
        assert_eq!(format_value(0.000001), "0.000001");
    }

    #[test]
    fn test_zero_is_plain() {
        assert_eq!(format_value(0.0), "0");
    }

    #[test]
    fn test_values_below_one_thousand_are_ungrouped() {
        assert_eq!(format_value(999.999), "999.999");
    }
}

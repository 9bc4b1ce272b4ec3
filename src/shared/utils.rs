//! Utility functions and helpers

use chrono::{DateTime, Utc};

/// Display symbol for a currency code. Unknown codes render as "CODE ".
pub fn currency_symbol(code: &str) -> String {
    match code.to_ascii_uppercase().as_str() {
        "GBP" => "£".to_string(),
        "USD" => "$".to_string(),
        "EUR" => "€".to_string(),
        other => format!("{} ", other),
    }
}

/// Format an amount with its currency symbol
pub fn format_price(amount: f64, currency: &str) -> String {
    format!("{}{:.2}", currency_symbol(currency), amount)
}

/// Short date used in notification history lines
pub fn format_short_date(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%d %H:%M").to_string()
}

/// Truncate to at most `max_chars` characters without splitting a code point
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Generate unique ID
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(95.0, "GBP"), "£95.00");
        assert_eq!(format_price(1299.5, "usd"), "$1299.50");
        assert_eq!(format_price(10.0, "SEK"), "SEK 10.00");
    }

    #[test]
    fn test_format_short_date() {
        let date = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(format_short_date(&date), "2024-01-02 03:04");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        // "→" and "£" are multi-byte
        assert_eq!(truncate_chars("→£1", 2), "→£");
    }
}

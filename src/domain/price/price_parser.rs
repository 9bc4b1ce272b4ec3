//! Raw price text normalization

/// Result of normalizing a scraped price string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParsedPrice {
    Amount(f64),
    Unparseable,
}

impl ParsedPrice {
    pub fn amount(self) -> Option<f64> {
        match self {
            ParsedPrice::Amount(value) => Some(value),
            ParsedPrice::Unparseable => None,
        }
    }

    pub fn is_unparseable(self) -> bool {
        matches!(self, ParsedPrice::Unparseable)
    }
}

/// Turns scraped price text into a number
pub struct PriceParser;

impl PriceParser {
    /// Keep only ASCII digits and '.', then parse.
    ///
    /// Currency symbols, thousands separators and whitespace all disappear:
    /// `"£1,299.99"` -> `1299.99`. Empty input, more than one '.', or anything
    /// that still fails to parse is `Unparseable`.
    pub fn normalize(raw: &str) -> ParsedPrice {
        let cleaned: String = raw
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .collect();

        if cleaned.is_empty() || cleaned.matches('.').count() > 1 {
            return ParsedPrice::Unparseable;
        }

        match cleaned.parse::<f64>() {
            Ok(value) if value.is_finite() => ParsedPrice::Amount(value),
            _ => ParsedPrice::Unparseable,
        }
    }

    /// Join a whole-units node with a separately rendered fractional node.
    ///
    /// Sites often render `1,299.` and `99` in different elements; the whole
    /// part may or may not carry the trailing separator.
    pub fn normalize_parts(whole: &str, fraction: Option<&str>) -> ParsedPrice {
        let whole = whole.trim().trim_end_matches('.');
        match fraction.map(str::trim).filter(|f| !f.is_empty()) {
            Some(fraction) => Self::normalize(&format!("{}.{}", whole, fraction)),
            None => Self::normalize(whole),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_symbols_and_separators() {
        assert_eq!(PriceParser::normalize("£1,299.99"), ParsedPrice::Amount(1299.99));
        assert_eq!(PriceParser::normalize("  $95.00 "), ParsedPrice::Amount(95.0));
        assert_eq!(PriceParser::normalize("EUR 42"), ParsedPrice::Amount(42.0));
    }

    #[test]
    fn test_normalize_unparseable_inputs() {
        for raw in ["", "N/A", "£--"] {
            assert!(PriceParser::normalize(raw).is_unparseable(), "input {:?}", raw);
        }
    }

    #[test]
    fn test_normalize_rejects_multiple_separators() {
        // European formatting "1.299.99" is ambiguous
        assert_eq!(PriceParser::normalize("1.299.99"), ParsedPrice::Unparseable);
        assert_eq!(PriceParser::normalize("."), ParsedPrice::Unparseable);
    }

    #[test]
    fn test_normalize_parts() {
        assert_eq!(PriceParser::normalize_parts("1,299.", Some("99")), ParsedPrice::Amount(1299.99));
        assert_eq!(PriceParser::normalize_parts("1,299", Some("99")), ParsedPrice::Amount(1299.99));
        assert_eq!(PriceParser::normalize_parts("95", None), ParsedPrice::Amount(95.0));
        assert_eq!(PriceParser::normalize_parts("95.", Some("  ")), ParsedPrice::Amount(95.0));
        assert!(PriceParser::normalize_parts("", None).is_unparseable());
    }

    #[test]
    fn test_amount_accessor() {
        assert_eq!(ParsedPrice::Amount(3.5).amount(), Some(3.5));
        assert_eq!(ParsedPrice::Unparseable.amount(), None);
    }
}

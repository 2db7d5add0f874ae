//! Labeled amount extraction (subtotal, tax, total).
//!
//! Values stay strings. The only transformation is replacing every `,` of the
//! captured token with `.`, applied verbatim: `1,234.56` becomes `1.234.56`
//! and `1,234,56` becomes `1.234.56`. Nothing re-validates the decimal shape.

use regex::Regex;
use tracing::warn;

use super::FieldExtractor;
use super::patterns::{TOTAL_PATTERNS, label_pattern};

/// Extracts the value following the first matching label from a keyword set.
pub struct AmountExtractor {
    patterns: Vec<Regex>,
}

impl AmountExtractor {
    /// Build one pattern per keyword, preserving keyword order.
    pub fn new<K: AsRef<str>>(keywords: &[K]) -> Self {
        let patterns = keywords
            .iter()
            .filter_map(|keyword| {
                let keyword = keyword.as_ref();
                Regex::new(&label_pattern(keyword))
                    .inspect_err(|e| warn!("Skipping amount keyword {:?}: {}", keyword, e))
                    .ok()
            })
            .collect();
        Self { patterns }
    }
}

impl FieldExtractor for AmountExtractor {
    fn extract(&self, text: &str) -> Option<String> {
        first_labeled_value(&self.patterns, text)
    }
}

/// Extracts the invoice total from the fixed, prioritized label list.
pub struct TotalExtractor;

impl TotalExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TotalExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for TotalExtractor {
    fn extract(&self, text: &str) -> Option<String> {
        first_labeled_value(&TOTAL_PATTERNS, text)
    }
}

fn first_labeled_value(patterns: &[Regex], text: &str) -> Option<String> {
    let text = text.to_lowercase();
    patterns
        .iter()
        .find_map(|pattern| pattern.captures(&text))
        .map(|caps| comma_to_period(&caps[1]))
}

fn comma_to_period(token: &str) -> String {
    token.replace(',', ".")
}

/// Extract the value after the first keyword (in keyword order) that matches.
pub fn extract_amount<K: AsRef<str>>(text: &str, keywords: &[K]) -> Option<String> {
    AmountExtractor::new(keywords).extract(text)
}

/// Extract the total using the labels "total", "grand total", "amount due".
pub fn extract_total(text: &str) -> Option<String> {
    TotalExtractor::new().extract(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SUBTOTAL: [&str; 3] = ["subtotal", "net amount", "amount before tax"];
    const TAX: [&str; 3] = ["tax", "vat", "tva"];

    #[test]
    fn test_total_with_thousands_separator() {
        assert_eq!(extract_total("Total: $1,234.56"), Some("1.234.56".to_string()));
        assert_eq!(extract_total("TOTAL 1,234,56"), Some("1.234.56".to_string()));
    }

    #[test]
    fn test_total_label_priority() {
        assert_eq!(extract_total("Amount due: 80\nGrand total: 99.90"), Some("99.90".to_string()));
        assert_eq!(extract_total("Amount Due - $ 42,10"), Some("42.10".to_string()));
        assert_eq!(extract_total("Grand   Total 12"), Some("12".to_string()));
    }

    #[test]
    fn test_total_needs_whole_word() {
        assert_eq!(extract_total("Subtotal: 50.00"), None);
        assert_eq!(extract_total("Totals: 50.00"), None);
    }

    #[test]
    fn test_amount_keyword_order() {
        let text = "VAT: 20.00\nTax: 5.00";
        assert_eq!(extract_amount(text, &TAX), Some("5.00".to_string()));
        assert_eq!(extract_amount(text, &["vat", "tax"]), Some("20.00".to_string()));
    }

    #[test]
    fn test_amount_multi_word_keyword() {
        assert_eq!(
            extract_amount("Net amount: 1 200,00", &SUBTOTAL),
            Some("1".to_string())
        );
        assert_eq!(
            extract_amount("Amount before tax - 99,5", &SUBTOTAL),
            Some("99.5".to_string())
        );
    }

    #[test]
    fn test_amount_trailing_separator_kept() {
        assert_eq!(extract_amount("Subtotal: 100, paid", &SUBTOTAL), Some("100.".to_string()));
    }

    #[test]
    fn test_amount_keyword_is_lowercased() {
        assert_eq!(extract_amount("tva 19,6", &["TVA"]), Some("19.6".to_string()));
    }

    #[test]
    fn test_amount_absent() {
        assert_eq!(extract_amount("", &TAX), None);
        assert_eq!(extract_amount("Tax included", &TAX), None);
        let none: [&str; 0] = [];
        assert_eq!(extract_amount("Tax: 5", &none), None);
    }
}

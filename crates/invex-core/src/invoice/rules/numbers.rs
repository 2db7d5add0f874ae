//! Invoice number extraction (English and French labels).

use regex::Captures;

use super::FieldExtractor;
use super::patterns::INVOICE_NUMBER_PATTERNS;

/// Invoice number extractor.
pub struct InvoiceNumberExtractor;

impl InvoiceNumberExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for InvoiceNumberExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for InvoiceNumberExtractor {
    fn extract(&self, text: &str) -> Option<String> {
        let text = text.to_lowercase();
        INVOICE_NUMBER_PATTERNS
            .iter()
            .find_map(|pattern| pattern.captures(&text).and_then(|caps| last_group(&caps)))
    }
}

// Optional label groups come first, so the digits are always the last group.
fn last_group(caps: &Captures<'_>) -> Option<String> {
    caps.get(caps.len() - 1).map(|m| m.as_str().to_string())
}

/// Extract the invoice number digits from text.
pub fn extract_invoice_number(text: &str) -> Option<String> {
    InvoiceNumberExtractor::new().extract(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_hash_form() {
        assert_eq!(extract_invoice_number("Invoice # 12345"), Some("12345".to_string()));
        assert_eq!(extract_invoice_number("INVOICE#42"), Some("42".to_string()));
    }

    #[test]
    fn test_labeled_forms() {
        assert_eq!(extract_invoice_number("Invoice No. 778"), Some("778".to_string()));
        assert_eq!(extract_invoice_number("Invoice number: 2024"), Some("2024".to_string()));
        assert_eq!(extract_invoice_number("invoice n - 55"), Some("55".to_string()));
        assert_eq!(extract_invoice_number("Invoice 9001"), Some("9001".to_string()));
    }

    #[test]
    fn test_french_forms() {
        assert_eq!(extract_invoice_number("Facture numéro: 987"), Some("987".to_string()));
        assert_eq!(extract_invoice_number("FACTURE N° 12"), None);
        assert_eq!(extract_invoice_number("Facture n. 314"), Some("314".to_string()));
        assert_eq!(extract_invoice_number("facture num 15"), Some("15".to_string()));
    }

    #[test]
    fn test_pattern_priority() {
        // The hash form wins even though "invoice no" appears first in text.
        let text = "Invoice no 111\nInvoice # 222";
        assert_eq!(extract_invoice_number(text), Some("222".to_string()));
    }

    #[test]
    fn test_requires_digits_and_word_boundary() {
        assert_eq!(extract_invoice_number("Invoice #ABC"), None);
        assert_eq!(extract_invoice_number("Invoice 12ab"), None);
        assert_eq!(extract_invoice_number("Reinvoice 123"), None);
        assert_eq!(extract_invoice_number(""), None);
    }
}

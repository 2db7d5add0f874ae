//! Assembles the six-field invoice record from the individual rules.

use tracing::debug;

use crate::models::config::ExtractionConfig;
use crate::models::record::InvoiceRecord;

use super::InvoiceExtractor;
use super::fuzzy::FuzzyLineMatcher;
use super::rules::{
    AmountExtractor, DateExtractor, FieldExtractor, InvoiceNumberExtractor, TotalExtractor,
};

/// Runs every field rule over the same text.
///
/// Each field is computed independently; a missing field never affects the
/// others.
pub struct RuleBasedExtractor {
    supplier: FuzzyLineMatcher,
    supplier_keywords: Vec<String>,
    invoice_number: InvoiceNumberExtractor,
    invoice_date: DateExtractor,
    subtotal: AmountExtractor,
    tax: AmountExtractor,
    total: TotalExtractor,
}

impl RuleBasedExtractor {
    /// Create an extractor with the default keyword sets.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    /// Create an extractor from configured keyword sets and threshold.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            supplier: FuzzyLineMatcher::new().with_threshold(config.supplier_threshold),
            supplier_keywords: config.supplier_keywords.clone(),
            invoice_number: InvoiceNumberExtractor::new(),
            invoice_date: DateExtractor::new(),
            subtotal: AmountExtractor::new(&config.subtotal_keywords),
            tax: AmountExtractor::new(&config.tax_keywords),
            total: TotalExtractor::new(),
        }
    }
}

impl Default for RuleBasedExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceExtractor for RuleBasedExtractor {
    fn extract_from_text(&self, text: &str) -> InvoiceRecord {
        let record = InvoiceRecord {
            supplier: self.supplier.find(text, &self.supplier_keywords),
            invoice_number: self.invoice_number.extract(text),
            invoice_date: self.invoice_date.extract(text),
            subtotal: self.subtotal.extract(text),
            tax: self.tax.extract(text),
            total: self.total.extract(text),
        };

        debug!(
            "Extracted {}/6 fields from {} chars of text",
            record.found_count(),
            text.len()
        );
        record
    }
}

/// Extract the invoice record from plain text with the default rules.
///
/// Total over all string input: the worst case is a record with every field
/// absent.
pub fn extract_invoice_json(text: &str) -> InvoiceRecord {
    RuleBasedExtractor::new().extract_from_text(text)
}

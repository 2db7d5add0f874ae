//! Invoice field extraction module.

mod assembler;
pub mod fuzzy;
pub mod normalize;
pub mod rules;
pub mod similarity;

pub use assembler::{RuleBasedExtractor, extract_invoice_json};

use crate::models::record::InvoiceRecord;

/// Trait for whole-record invoice extractors.
///
/// Implementations are total over their input: a field that cannot be found
/// is reported as absent, never as an error.
pub trait InvoiceExtractor {
    /// Extract the invoice record from plain text.
    fn extract_from_text(&self, text: &str) -> InvoiceRecord;
}

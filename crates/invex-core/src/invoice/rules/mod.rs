//! Rule-based field extractors.
//!
//! Each rule is a fixed, ordered list of regex patterns run over lower-cased
//! text. The first pattern (or label) that matches wins; there is no scoring.

pub mod amounts;
pub mod dates;
pub mod numbers;
pub mod patterns;

pub use amounts::{AmountExtractor, TotalExtractor, extract_amount, extract_total};
pub use dates::{DateExtractor, extract_invoice_date};
pub use numbers::{InvoiceNumberExtractor, extract_invoice_number};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// Extract the highest-priority value from text, if any.
    fn extract(&self, text: &str) -> Option<String>;
}

//! Core library for heuristic invoice field extraction.
//!
//! This crate provides:
//! - Text normalization and fuzzy (partial-ratio) line matching
//! - Rule-based field extractors (invoice number, date, labeled amounts, totals)
//! - The record assembler producing the flat six-field invoice record
//! - A PDF text source and receipt stores used by the front ends

pub mod error;
pub mod invoice;
pub mod models;
pub mod pdf;
pub mod store;

pub use error::{InvexError, PdfError, Result, StoreError};
pub use invoice::{
    InvoiceExtractor, RuleBasedExtractor, extract_invoice_json,
    fuzzy::{FuzzyLineMatcher, fuzzy_extract},
    normalize::normalize,
    similarity::{PartialRatio, SimilarityScorer, partial_ratio, ratio},
};
pub use models::config::InvexConfig;
pub use models::receipt::Receipt;
pub use models::record::{InvoiceField, InvoiceRecord};
pub use pdf::{PdfExtractor, PdfProcessor, document_text};
pub use store::{JsonLinesStore, MemoryStore, ReceiptStore};

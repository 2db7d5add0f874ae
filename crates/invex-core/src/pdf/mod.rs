//! PDF text source.

mod extractor;

pub use extractor::PdfExtractor;

use crate::error::PdfError;
use crate::models::config::PdfConfig;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Text of every page in page order. Pages without text are empty strings.
    fn page_texts(&self) -> Result<Vec<String>>;

    /// Text of the whole document, pages joined by the configured separator.
    fn extract_text(&self) -> Result<String>;

    /// Extract text from a specific page (1-indexed).
    fn extract_page_text(&self, page: u32) -> Result<String>;
}

/// Decode a PDF and return its text, ready for field extraction.
pub fn document_text(data: &[u8], config: &PdfConfig) -> Result<String> {
    let mut extractor = PdfExtractor::with_config(config);
    extractor.load(data)?;
    extractor.extract_text()
}

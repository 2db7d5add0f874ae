//! PDF text extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::{debug, warn};

use super::{PdfProcessor, Result};
use crate::error::PdfError;
use crate::models::config::PdfConfig;

/// PDF text extractor using lopdf, with pdf-extract as a whole-document
/// fallback.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
    page_separator: String,
    fallback_to_full_text: bool,
}

impl PdfExtractor {
    /// Create a new PDF extractor with default settings.
    pub fn new() -> Self {
        Self::with_config(&PdfConfig::default())
    }

    /// Create a new PDF extractor from configuration.
    pub fn with_config(config: &PdfConfig) -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
            page_separator: config.page_separator.clone(),
            fallback_to_full_text: config.fallback_to_full_text,
        }
    }

    fn document(&self) -> Result<&Document> {
        self.document
            .as_ref()
            .ok_or(PdfError::Parse("No document loaded".to_string()))
    }

    fn full_text_fallback(&self) -> Result<String> {
        pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf-extract needs the decrypted bytes
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn page_texts(&self) -> Result<Vec<String>> {
        self.document()?;
        let texts = (1..=self.page_count())
            .map(|page| {
                self.extract_page_text(page).unwrap_or_else(|e| {
                    warn!("No text extracted from page {}: {}", page, e);
                    String::new()
                })
            })
            .collect();
        Ok(texts)
    }

    fn extract_text(&self) -> Result<String> {
        let pages = self.page_texts()?;
        let text = pages.join(&self.page_separator);

        if self.fallback_to_full_text && pages.iter().all(|page| page.trim().is_empty()) {
            debug!("All {} pages blank, falling back to full-document extraction", pages.len());
            return match self.full_text_fallback() {
                Ok(full) => Ok(full),
                Err(e) => {
                    warn!("Full-document extraction failed: {}", e);
                    Ok(text)
                }
            };
        }

        debug!("Extracted {} chars from {} pages", text.len(), pages.len());
        Ok(text)
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        let doc = self.document()?;
        if !doc.get_pages().contains_key(&page) {
            return Err(PdfError::InvalidPage(page));
        }
        doc.extract_text(&[page])
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }
}

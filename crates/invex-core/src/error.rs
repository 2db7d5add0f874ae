//! Error types for the invex-core library.
//!
//! Field extraction itself never fails; these errors only cover the
//! boundaries around it (document decoding, storage, configuration).

use thiserror::Error;

/// Main error type for the invex library.
#[derive(Error, Debug)]
pub enum InvexError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Receipt storage error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors related to receipt persistence.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Backing file could not be read or written.
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A stored receipt could not be encoded or decoded.
    #[error("malformed receipt at line {line}: {source}")]
    Serialization {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// Another thread panicked while holding the store lock.
    #[error("store lock poisoned")]
    Poisoned,
}

/// Result type for the invex library.
pub type Result<T> = std::result::Result<T, InvexError>;

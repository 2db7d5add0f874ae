//! Common regex patterns for invoice field extraction.
//!
//! Every pattern is matched against lower-cased text, so none of them carries
//! a case-insensitive flag. Order within each list is priority order.

use lazy_static::lazy_static;
use regex::Regex;

/// Numeric token captured after an amount label: a digit run, optionally
/// continued by separator + digit-run groups, with an optional trailing
/// separator (`1`, `12.50`, `1,234.56`, `100,`).
pub const AMOUNT_VALUE: &str = r"(\d+(?:[.,]\d+)*[.,]?)";

/// Separator allowed between a label and its value: optional `:`/`-`, then an
/// optional `$`, with free whitespace around both.
pub const LABEL_SEPARATOR: &str = r"\s*[:\-]?\s*\$?\s*";

/// Labels accepted for the invoice total, in priority order.
pub const TOTAL_LABELS: [&str; 3] = ["total", "grand total", "amount due"];

lazy_static! {
    // Invoice number patterns; the digits are always the last group.
    pub static ref INVOICE_NUMBER_PATTERNS: [Regex; 3] = [
        Regex::new(r"\binvoice\s*#\s*(\d+)\b").unwrap(),
        Regex::new(r"\binvoice\s*(no|number|n)?\.?\s*[:\-]?\s*(\d+)\b").unwrap(),
        Regex::new(r"\bfacture\s*(n|num|numéro)?\.?\s*[:\-]?\s*(\d+)\b").unwrap(),
    ];

    // Date shapes; the whole match is the value.
    pub static ref DATE_PATTERNS: [Regex; 5] = [
        // DD-MM-YYYY
        Regex::new(r"\b\d{2}[-/.]\d{2}[-/.]\d{4}\b").unwrap(),
        // YYYY-MM-DD
        Regex::new(r"\b\d{4}[-/.]\d{2}[-/.]\d{2}\b").unwrap(),
        // DD-MM
        Regex::new(r"\b\d{2}[-/.]\d{2}\b").unwrap(),
        // 5 jan 2024
        Regex::new(
            r"\b\d{1,2}\s?(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)\s?\d{4}\b"
        ).unwrap(),
        // jan 5, 2024
        Regex::new(
            r"\b(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)\s?\d{1,2},?\s?\d{4}\b"
        ).unwrap(),
    ];

    // Total patterns, one per entry of TOTAL_LABELS.
    pub static ref TOTAL_PATTERNS: Vec<Regex> = TOTAL_LABELS
        .iter()
        .map(|label| Regex::new(&multi_word_label_pattern(label)).unwrap())
        .collect();
}

/// `\b<label>\b` + separator + value, with the label escaped verbatim.
pub fn label_pattern(label: &str) -> String {
    format!(
        r"\b{}\b{}{}",
        regex::escape(&label.to_lowercase()),
        LABEL_SEPARATOR,
        AMOUNT_VALUE
    )
}

/// Like [`label_pattern`], but any run of whitespace may separate the words
/// of a multi-word label.
pub fn multi_word_label_pattern(label: &str) -> String {
    let words: Vec<String> = label
        .to_lowercase()
        .split_whitespace()
        .map(regex::escape)
        .collect();
    format!(r"\b{}\b{}{}", words.join(r"\s+"), LABEL_SEPARATOR, AMOUNT_VALUE)
}

//! Invoice date extraction.
//!
//! Dates are returned exactly as written. Nothing checks that the day or month
//! is in range, and no canonical format is produced.

use super::FieldExtractor;
use super::patterns::DATE_PATTERNS;

/// Date field extractor.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    fn extract(&self, text: &str) -> Option<String> {
        let text = text.to_lowercase();
        DATE_PATTERNS
            .iter()
            .find_map(|pattern| pattern.find(&text))
            .map(|m| m.as_str().to_string())
    }
}

/// Extract the first date-shaped substring, by pattern priority.
pub fn extract_invoice_date(text: &str) -> Option<String> {
    DateExtractor::new().extract(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_day_first() {
        assert_eq!(extract_invoice_date("Date: 15/01/2024"), Some("15/01/2024".to_string()));
        assert_eq!(extract_invoice_date("15.01.2024"), Some("15.01.2024".to_string()));
        assert_eq!(extract_invoice_date("15-01/2024"), Some("15-01/2024".to_string()));
    }

    #[test]
    fn test_year_first() {
        assert_eq!(extract_invoice_date("Issued 2024-01-15"), Some("2024-01-15".to_string()));
    }

    #[test]
    fn test_without_year() {
        assert_eq!(extract_invoice_date("Delivered 03/11"), Some("03/11".to_string()));
    }

    #[test]
    fn test_month_names() {
        assert_eq!(extract_invoice_date("Date: 5 Jan 2024"), Some("5 jan 2024".to_string()));
        assert_eq!(extract_invoice_date("5jan2024"), Some("5jan2024".to_string()));
        assert_eq!(extract_invoice_date("Date: Mar 7, 2023"), Some("mar 7, 2023".to_string()));
    }

    #[test]
    fn test_pattern_priority_over_position() {
        // A full numeric date later in the text beats an earlier month-name date.
        let text = "Order placed 5 Jan 2024, shipped 09/01/2024";
        assert_eq!(extract_invoice_date(text), Some("09/01/2024".to_string()));
    }

    #[test]
    fn test_no_range_validation() {
        assert_eq!(extract_invoice_date("99/99/0000"), Some("99/99/0000".to_string()));
    }

    #[test]
    fn test_no_date() {
        assert_eq!(extract_invoice_date("Invoice # 12345\nTotal: 100"), None);
        assert_eq!(extract_invoice_date(""), None);
        assert_eq!(extract_invoice_date("January the fifth"), None);
    }
}

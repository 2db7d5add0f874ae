//! Configuration structures for extraction, PDF text and the HTTP service.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::InvexError;

/// Main configuration for invex.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InvexConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// PDF text source configuration.
    pub pdf: PdfConfig,

    /// HTTP service configuration.
    pub server: ServerConfig,
}

/// Keyword sets and thresholds for the extraction rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Minimum fuzzy score (0-100, inclusive) for the supplier line.
    pub supplier_threshold: f64,

    /// Labels the supplier line is fuzzy-matched against.
    pub supplier_keywords: Vec<String>,

    /// Labels preceding the subtotal, in priority order.
    pub subtotal_keywords: Vec<String>,

    /// Labels preceding the tax amount, in priority order.
    pub tax_keywords: Vec<String>,
}

/// Default supplier keywords.
pub const SUPPLIER_KEYWORDS: [&str; 4] = ["company", "vendor", "supplier", "issued by"];

/// Default subtotal keywords.
pub const SUBTOTAL_KEYWORDS: [&str; 3] = ["subtotal", "net amount", "amount before tax"];

/// Default tax keywords.
pub const TAX_KEYWORDS: [&str; 3] = ["tax", "vat", "tva"];

fn owned(keywords: &[&str]) -> Vec<String> {
    keywords.iter().map(|k| k.to_string()).collect()
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            supplier_threshold: 50.0,
            supplier_keywords: owned(&SUPPLIER_KEYWORDS),
            subtotal_keywords: owned(&SUBTOTAL_KEYWORDS),
            tax_keywords: owned(&TAX_KEYWORDS),
        }
    }
}

/// PDF text source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// String placed between page texts.
    pub page_separator: String,

    /// Use whole-document extraction when every page yields blank text.
    pub fallback_to_full_text: bool,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            page_separator: "\n".to_string(),
            fallback_to_full_text: true,
        }
    }
}

/// HTTP service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,

    /// Bind port.
    pub port: u16,

    /// Maximum accepted request body size in bytes.
    pub max_upload_bytes: usize,

    /// JSON-lines receipts file; receipts are kept in memory when unset.
    pub store_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            max_upload_bytes: 10 * 1024 * 1024,
            store_path: None,
        }
    }
}

impl ExtractionConfig {
    /// Check the threshold range and keyword lists.
    pub fn validate(&self) -> Result<(), InvexError> {
        if !(0.0..=100.0).contains(&self.supplier_threshold) {
            return Err(InvexError::Config(format!(
                "extraction.supplier_threshold must be between 0 and 100, got {}",
                self.supplier_threshold
            )));
        }
        check_keywords("extraction.supplier_keywords", &self.supplier_keywords)?;
        check_keywords("extraction.subtotal_keywords", &self.subtotal_keywords)?;
        check_keywords("extraction.tax_keywords", &self.tax_keywords)
    }
}

fn check_keywords(key: &str, keywords: &[String]) -> Result<(), InvexError> {
    if keywords.is_empty() {
        return Err(InvexError::Config(format!("{} must not be empty", key)));
    }
    if keywords.iter().any(|k| k.trim().is_empty()) {
        return Err(InvexError::Config(format!("{} contains a blank keyword", key)));
    }
    Ok(())
}

impl ServerConfig {
    /// `host:port` string for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl InvexConfig {
    /// Load and validate configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, InvexError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| InvexError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the extraction rules cannot work with.
    pub fn validate(&self) -> Result<(), InvexError> {
        self.extraction.validate()
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), InvexError> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| InvexError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = InvexConfig::default();
        assert_eq!(config.extraction.supplier_threshold, 50.0);
        assert_eq!(config.extraction.supplier_keywords, SUPPLIER_KEYWORDS);
        assert_eq!(config.extraction.tax_keywords, TAX_KEYWORDS);
        assert_eq!(config.pdf.page_separator, "\n");
        assert_eq!(config.server.bind_address(), "0.0.0.0:5000");
        assert!(config.server.store_path.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: InvexConfig =
            serde_json::from_str(r#"{"extraction": {"tax_keywords": ["gst"]}, "server": {"port": 8080}}"#)
                .unwrap();
        assert_eq!(config.extraction.tax_keywords, vec!["gst"]);
        assert_eq!(config.extraction.subtotal_keywords, SUBTOTAL_KEYWORDS);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = InvexConfig::default();
        config.extraction.supplier_threshold = 70.0;
        config.save(&path).unwrap();

        let loaded = InvexConfig::from_file(&path).unwrap();
        assert_eq!(loaded.extraction.supplier_threshold, 70.0);
    }

    #[test]
    fn test_validate_threshold_range() {
        let mut config = InvexConfig::default();
        assert!(config.validate().is_ok());

        config.extraction.supplier_threshold = 100.0;
        assert!(config.validate().is_ok());

        config.extraction.supplier_threshold = 100.5;
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "configuration error: extraction.supplier_threshold must be between 0 and 100, got 100.5"
        );

        config.extraction.supplier_threshold = -1.0;
        assert!(matches!(config.validate(), Err(InvexError::Config(_))));
    }

    #[test]
    fn test_validate_keyword_lists() {
        let mut config = InvexConfig::default();
        config.extraction.tax_keywords.clear();
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "configuration error: extraction.tax_keywords must not be empty"
        );

        let mut config = InvexConfig::default();
        config.extraction.supplier_keywords.push("  ".to_string());
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "configuration error: extraction.supplier_keywords contains a blank keyword"
        );
    }

    #[test]
    fn test_from_file_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"extraction": {"subtotal_keywords": []}}"#).unwrap();

        assert!(matches!(InvexConfig::from_file(&path), Err(InvexError::Config(_))));
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(InvexConfig::from_file(&path), Err(InvexError::Config(_))));
    }
}

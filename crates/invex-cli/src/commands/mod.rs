//! CLI subcommands and the helpers they share.

pub mod batch;
pub mod config;
pub mod process;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use invex_core::models::config::InvexConfig;
use invex_core::pdf::document_text;
use invex_core::{InvoiceField, InvoiceRecord};

/// Output format for extracted records.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON object with the six fields
    Json,
    /// CSV header plus one row
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

/// Default configuration file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("invex")
        .join("config.json")
}

/// Load the configuration from an explicit path, else the default location,
/// else built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<InvexConfig> {
    if let Some(path) = config_path {
        return Ok(InvexConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config file {}", default_path.display());
        return Ok(InvexConfig::from_file(&default_path)?);
    }

    Ok(InvexConfig::default())
}

/// Read the plain text of a supported input file.
pub fn read_document_text(path: &Path, config: &InvexConfig) -> anyhow::Result<String> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "pdf" => {
            let data = fs::read(path)?;
            Ok(document_text(&data, &config.pdf)?)
        }
        "txt" => Ok(fs::read_to_string(path)?),
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    }
}

/// True for extensions `process` and `batch` accept.
pub fn is_supported(path: &Path) -> bool {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    matches!(ext.to_lowercase().as_str(), "pdf" | "txt")
}

pub fn format_record(
    record: &InvoiceRecord,
    format: OutputFormat,
    pretty: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if pretty => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Json => Ok(serde_json::to_string(record)?),
        OutputFormat::Csv => format_csv(record),
        OutputFormat::Text => Ok(format_text(record)),
    }
}

fn format_csv(record: &InvoiceRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(InvoiceField::ALL.iter().map(|field| field.name()))?;
    wtr.write_record(record.fields().map(|(_, value)| value.unwrap_or("")))?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(record: &InvoiceRecord) -> String {
    let mut output = String::new();

    for (name, value) in record.fields() {
        output.push_str(&format!("{:<15} {}\n", format!("{}:", name), value.unwrap_or("-")));
    }

    output
}

//! Batch processing command for multiple invoice files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use invex_core::{
    InvexConfig, InvoiceExtractor, InvoiceField, InvoiceRecord, JsonLinesStore, ReceiptStore,
    RuleBasedExtractor,
};

use super::{OutputFormat, format_record, is_supported, load_config, read_document_text};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching input files
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Append every result to a JSON-lines receipt store
    #[arg(long)]
    store: Option<PathBuf>,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    record: Option<InvoiceRecord>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let mut files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| is_supported(p))
        .collect();
    files.sort();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let store = args.store.as_ref().map(JsonLinesStore::open).transpose()?;

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let extractor = RuleBasedExtractor::from_config(&config.extraction);
    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let result = process_single_file(&path, &extractor, &config);
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match result {
            Ok(record) => {
                if let Some(store) = &store {
                    let filename = path.file_name().and_then(|s| s.to_str()).unwrap_or("invoice");
                    store.insert(filename, record.clone())?;
                }
                results.push(ProcessResult {
                    path,
                    record: Some(record),
                    error: None,
                    processing_time_ms,
                });
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(ProcessResult {
                        path,
                        record: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed for {}: {}", path.display(), error_msg);
                }
            }
        }

        overall_pb.inc(1);
    }

    overall_pb.finish_and_clear();

    let successful: Vec<_> = results.iter().filter(|r| r.record.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    if let Some(output_dir) = &args.output_dir {
        for result in &successful {
            let Some(record) = &result.record else {
                continue;
            };
            let output_name = result
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("invoice");
            let output_path =
                output_dir.join(format!("{}.{}", output_name, args.format.extension()));

            fs::write(&output_path, format_record(record, args.format, true)?)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn process_single_file(
    path: &Path,
    extractor: &RuleBasedExtractor,
    config: &InvexConfig,
) -> anyhow::Result<InvoiceRecord> {
    let text = read_document_text(path, config)?;
    Ok(extractor.extract_from_text(&text))
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    let mut header = vec!["filename", "status"];
    header.extend(InvoiceField::ALL.iter().map(|field| field.name()));
    header.extend(["processing_time_ms", "error"]);
    wtr.write_record(&header)?;

    for result in results {
        let filename = result.path.file_name().and_then(|s| s.to_str()).unwrap_or("");
        let time_ms = result.processing_time_ms.to_string();

        let mut row = vec![filename];
        match &result.record {
            Some(record) => {
                row.push("success");
                row.extend(record.fields().map(|(_, value)| value.unwrap_or("")));
                row.extend([time_ms.as_str(), ""]);
            }
            None => {
                row.push("error");
                row.extend(std::iter::repeat_n("", InvoiceField::ALL.len()));
                row.extend([time_ms.as_str(), result.error.as_deref().unwrap_or("")]);
            }
        }
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

//! Process command - extract fields from a single invoice file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use invex_core::{InvoiceExtractor, JsonLinesStore, ReceiptStore, RuleBasedExtractor};

use super::{OutputFormat, format_record, load_config, read_document_text};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF or plain text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Print the extracted document text to stderr
    #[arg(long)]
    show_text: bool,

    /// Append the result to a JSON-lines receipt store
    #[arg(long)]
    store: Option<PathBuf>,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);

    pb.set_message("Reading document...");
    let text = read_document_text(&args.input, &config)?;

    if args.show_text {
        pb.suspend(|| {
            eprintln!("{}", style("Extracted text:").bold());
            eprintln!("{}", text);
        });
    }

    pb.set_message("Extracting invoice fields...");
    let extractor = RuleBasedExtractor::from_config(&config.extraction);
    let record = extractor.extract_from_text(&text);
    pb.finish_and_clear();

    if let Some(store_path) = &args.store {
        let store = JsonLinesStore::open(store_path)?;
        let filename = args
            .input
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("invoice");
        let receipt = store.insert(filename, record.clone())?;
        eprintln!(
            "{} Stored receipt {} in {}",
            style("✓").green(),
            receipt.id,
            store_path.display()
        );
    }

    let output = format_record(&record, args.format, args.pretty)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output.trim_end());
    }

    debug!(
        "Found {}/6 fields in {:?}",
        record.found_count(),
        start.elapsed()
    );

    Ok(())
}

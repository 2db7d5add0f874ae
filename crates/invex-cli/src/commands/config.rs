//! Config command - inspect and edit the JSON configuration file.
//!
//! Keys are `section` or `section.field`, where the section is one of
//! `extraction`, `pdf` or `server` and the field is any field of that
//! section. Every edit is validated before the file is written.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;

use invex_core::InvexConfig;

use super::default_config_path;

const SECTIONS: [&str; 3] = ["extraction", "pdf", "server"];

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the effective configuration
    Show,

    /// Write a configuration file holding the defaults
    Init {
        /// Where to write the file (defaults to the config path)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print a section or a single field
    Get {
        /// Key such as "server" or "extraction.supplier_threshold"
        key: ConfigKey,
    },

    /// Change a single field
    Set {
        /// Key such as "extraction.tax_keywords"
        key: ConfigKey,
        /// JSON value; anything that is not JSON is taken as a string
        value: String,
    },

    /// Print the configuration file path
    Path,
}

/// A validated `section[.field]` key.
#[derive(Clone, Debug, PartialEq)]
struct ConfigKey {
    section: &'static str,
    field: Option<String>,
}

impl FromStr for ConfigKey {
    type Err = String;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let (section, field) = match key.split_once('.') {
            Some((section, field)) => (section, Some(field)),
            None => (key, None),
        };

        let section = SECTIONS
            .into_iter()
            .find(|s| *s == section)
            .ok_or_else(|| {
                format!(
                    "Unknown configuration section '{}' (expected one of: {})",
                    section,
                    SECTIONS.join(", ")
                )
            })?;

        let Some(field) = field else {
            return Ok(Self { section, field: None });
        };

        // Any field name present in the defaults is settable, including null ones
        let defaults = serde_json::to_value(InvexConfig::default()).map_err(|e| e.to_string())?;
        if defaults[section].get(field).is_none() {
            return Err(format!("Configuration key not found: {}", key));
        }

        Ok(Self {
            section,
            field: Some(field.to_string()),
        })
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{}.{}", self.section, field),
            None => f.write_str(self.section),
        }
    }
}

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let path = config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);

    match args.command {
        ConfigCommand::Show => {
            let config = load_or_default(&path)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigCommand::Init { output, force } => init_config(&output.unwrap_or(path), force)?,
        ConfigCommand::Get { key } => {
            let config = load_or_default(&path)?;
            println!("{}", serde_json::to_string_pretty(&lookup(&config, &key)?)?);
        }
        ConfigCommand::Set { key, value } => {
            let value = parse_value(&value);
            let config = with_value(load_or_default(&path)?, &key, value.clone())?;
            write_config(&path, &config)?;
            println!("{} Set {} = {}", style("✓").green(), key, value);
        }
        ConfigCommand::Path => {
            println!("Configuration file: {}", path.display());
            if path.exists() {
                println!("Status: {}", style("exists").green());
            } else {
                println!("Status: {}", style("not created").yellow());
                println!("Run 'invex config init' to create it.");
            }
        }
    }

    Ok(())
}

fn load_or_default(path: &Path) -> anyhow::Result<InvexConfig> {
    if path.exists() {
        return Ok(InvexConfig::from_file(path)?);
    }
    eprintln!(
        "{} No config file at {}, using defaults.",
        style("ℹ").blue(),
        path.display()
    );
    Ok(InvexConfig::default())
}

fn write_config(path: &Path, config: &InvexConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(config.save(path)?)
}

fn init_config(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    write_config(path, &InvexConfig::default())?;
    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        path.display()
    );
    Ok(())
}

fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn lookup(config: &InvexConfig, key: &ConfigKey) -> anyhow::Result<Value> {
    let mut json = serde_json::to_value(config)?;
    let section = json[key.section].take();
    Ok(match &key.field {
        Some(field) => section[field.as_str()].clone(),
        None => section,
    })
}

/// Return `config` with one field replaced, rejecting wrongly typed or
/// out-of-range values.
fn with_value(config: InvexConfig, key: &ConfigKey, value: Value) -> anyhow::Result<InvexConfig> {
    let Some(field) = &key.field else {
        anyhow::bail!(
            "Cannot set the whole '{}' section; name a field, e.g. {}.<field>",
            key.section,
            key.section
        );
    };

    let mut json = serde_json::to_value(config)?;
    json[key.section][field.as_str()] = value;

    let config: InvexConfig = serde_json::from_value(json)
        .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e))?;
    config.validate()?;
    Ok(config)
}

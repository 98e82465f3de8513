use anyhow::{bail, Context, Result};
use asnval_core::catalog::ProductCatalog;
use asnval_core::config::{Jurisdiction, ValidationConfig, ValidatorSet};
use asnval_core::document::parse::{parse, FormatHint};
use asnval_core::pipeline::validate_document;
use asnval_core::report::{Severity, ValidationReport};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "asnval")]
#[command(about = "Shipment-notice validation pipeline CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a shipment-notice document and print the report.
    Validate {
        #[arg(long)]
        file: PathBuf,
        #[arg(long, default_value = "auto")]
        format: FormatHint,
        #[arg(long, default_value = "maharashtra")]
        state: Jurisdiction,
        #[arg(long, default_value = "WMTIN-REL100")]
        vendor_id: String,
        #[arg(long, default_value = "SHP-LOCAL")]
        shipment_id: String,
        /// JSON catalog file; the built-in sample catalog when omitted.
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Reference date (YYYY-MM-DD); defaults to the local date.
        #[arg(long)]
        today: Option<NaiveDate>,
        /// Checkers to disable (structure, tax_id, product, timing, certificate).
        #[arg(long)]
        skip: Vec<String>,
        #[arg(long)]
        json: bool,
    },
    /// Dump the parsed segment table.
    Parse {
        #[arg(long)]
        file: PathBuf,
        #[arg(long, default_value = "auto")]
        format: FormatHint,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate {
            file,
            format,
            state,
            vendor_id,
            shipment_id,
            catalog,
            today,
            skip,
            json,
        } => {
            let raw = std::fs::read(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let catalog = load_catalog(catalog.as_deref())?;
            let today = today.unwrap_or_else(|| chrono::Local::now().date_naive());
            let config = ValidationConfig::new(vendor_id, shipment_id, state)
                .with_enabled(enabled_set(&skip)?);

            let (_document, report) =
                validate_document(&raw, format, &config, &catalog, today)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
            if !report.is_ready() {
                std::process::exit(1);
            }
        }
        Commands::Parse { file, format } => {
            let raw = std::fs::read(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let document = parse(&raw, format)?;
            for segment in document.segments() {
                println!(
                    "{:>4}  {:<4} {}",
                    segment.position(),
                    segment.tag(),
                    segment.elements().join(" | ")
                );
            }
        }
    }

    Ok(())
}

fn load_catalog(path: Option<&std::path::Path>) -> Result<ProductCatalog> {
    match path {
        None => Ok(ProductCatalog::sample()),
        Some(path) => {
            let raw = std::fs::read(path)
                .with_context(|| format!("failed to read catalog {}", path.display()))?;
            serde_json::from_slice(&raw)
                .with_context(|| format!("invalid catalog file {}", path.display()))
        }
    }
}

fn enabled_set(skip: &[String]) -> Result<ValidatorSet> {
    let mut enabled = ValidatorSet::all();
    for name in skip {
        let flag = match name.as_str() {
            "structure" => ValidatorSet::STRUCTURE,
            "tax_id" => ValidatorSet::TAX_ID,
            "product" => ValidatorSet::PRODUCT,
            "timing" => ValidatorSet::TIMING,
            "certificate" => ValidatorSet::CERTIFICATE,
            other => bail!("unknown checker name: {other}"),
        };
        enabled -= flag;
    }
    Ok(enabled)
}

fn print_report(report: &ValidationReport) {
    println!(
        "status: {}  ({} errors, {} warnings)",
        report.status().as_str(),
        report.error_count(),
        report.warning_count()
    );
    for finding in report.findings() {
        let severity = match finding.severity() {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN ",
        };
        let location = match finding.segment() {
            Some(segment) => match segment.position {
                Some(position) => format!("{}@{position}", segment.tag),
                None => segment.tag.clone(),
            },
            None => "-".to_string(),
        };
        println!(
            "{severity} [{}] {:<8} {} ({})",
            finding.code().as_str(),
            location,
            finding.message(),
            finding.suggestion()
        );
    }
}

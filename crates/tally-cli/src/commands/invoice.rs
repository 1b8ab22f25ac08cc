//! Invoice command - extract fields from a supplier invoice.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use tracing::{debug, info};

use tally_core::invoice::{InvoiceExtractor, InvoiceTextParser};
use tally_core::models::config::TallyConfig;
use tally_core::models::{InvoiceData, InvoiceFile};
use tally_core::ocr::{OcrEngine, PrerecognizedText};
use tally_core::upload::{FileInfo, FileValidator};

use super::{emit, file_name, load_config, OutputFormat};

/// Arguments for the invoice command.
#[derive(Args)]
pub struct InvoiceArgs {
    /// Invoice image (JPEG, PNG or WebP)
    #[arg(required = true)]
    input: PathBuf,

    /// MIME type (default: guessed from the extension)
    #[arg(long)]
    mime: Option<String>,

    /// Use an existing OCR transcript instead of running OCR
    #[arg(long)]
    transcript: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

pub async fn run(args: InvoiceArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let mime_type = args.mime.clone().unwrap_or_else(|| {
        mime_guess::from_path(&args.input)
            .first_or_octet_stream()
            .to_string()
    });
    let info = FileInfo::new(
        file_name(&args.input),
        mime_type,
        fs::metadata(&args.input)?.len(),
    );
    if let Some(rejection) = FileValidator::new(config.uploads.invoice.clone()).validate(&info) {
        anyhow::bail!("{}", rejection);
    }

    let file = InvoiceFile::new(info.name, info.mime_type, fs::read(&args.input)?);

    info!("Processing invoice: {}", args.input.display());

    let engine = ocr_engine(&args, &config)?;
    let parser = InvoiceTextParser::new(config.invoice.clone());
    let invoice = parser.extract(&file, engine.as_ref())?;

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&invoice)?,
        OutputFormat::Csv => format_csv(&invoice)?,
        OutputFormat::Text => format_text(&invoice),
    };
    emit(args.output.as_deref(), &output)?;

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn ocr_engine(args: &InvoiceArgs, config: &TallyConfig) -> anyhow::Result<Box<dyn OcrEngine>> {
    if let Some(path) = &args.transcript {
        debug!("Using transcript from {}", path.display());
        return Ok(Box::new(PrerecognizedText::new(fs::read_to_string(path)?)));
    }
    native_engine(config)
}

#[cfg(feature = "native")]
fn native_engine(config: &TallyConfig) -> anyhow::Result<Box<dyn OcrEngine>> {
    let engine = tally_core::ocr::OnnxOcrEngine::from_config(&config.ocr)
        .map_err(|e| anyhow::anyhow!("Failed to load OCR models: {}", e))?;
    Ok(Box::new(engine))
}

#[cfg(not(feature = "native"))]
fn native_engine(_config: &TallyConfig) -> anyhow::Result<Box<dyn OcrEngine>> {
    anyhow::bail!(
        "No OCR backend available.\n\n\
         Pass --transcript <file>, or rebuild with '--features native'."
    )
}

fn format_csv(invoice: &InvoiceData) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "vendor_name",
        "issue_date",
        "raw_item_name",
        "qty",
        "uom",
        "unit_price",
        "line_total",
    ])?;

    for item in &invoice.line_items {
        wtr.write_record([
            &invoice.vendor_name,
            &invoice.issue_date,
            &item.raw_item_name,
            &item.qty.to_string(),
            &item.uom,
            &item.unit_price.to_string(),
            &item.line_total.to_string(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(invoice: &InvoiceData) -> String {
    let mut output = String::new();

    output.push_str(&format!("Vendor: {}\n", invoice.vendor_name));
    output.push_str(&format!("Date: {}\n", invoice.issue_date));
    output.push('\n');

    output.push_str("Items:\n");
    for item in &invoice.line_items {
        output.push_str(&format!(
            "  {} {} {} x {} = {}\n",
            item.raw_item_name, item.qty, item.uom, item.unit_price, item.line_total
        ));
    }
    output.push('\n');

    output.push_str(&format!("Total: {}\n", invoice.total_amount));

    output
}

//! Sales command - parse a POS daily item sales export.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use rust_decimal::Decimal;
use tracing::{debug, info};

use tally_core::models::SalesRecord;
use tally_core::sales::{CalamineReader, SalesExportParser};
use tally_core::upload::{FileInfo, FileValidator};

use super::{emit, file_name, load_config, OutputFormat};

/// Arguments for the sales command.
#[derive(Args)]
pub struct SalesArgs {
    /// POS export workbook (.xlsx or .xls)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

pub async fn run(args: SalesArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let info = FileInfo::new(
        file_name(&args.input),
        mime_guess::from_path(&args.input).first_or_octet_stream().to_string(),
        fs::metadata(&args.input)?.len(),
    );
    if let Some(rejection) = FileValidator::new(config.uploads.sales.clone()).validate(&info) {
        anyhow::bail!("{}", rejection);
    }

    let data = fs::read(&args.input)?;

    info!("Processing sales export: {}", args.input.display());

    let parser = SalesExportParser::new(config.sales.clone());
    let records = parser.parse_bytes(&CalamineReader::new(), &data)?;

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&records)?,
        OutputFormat::Csv => format_csv(&records)?,
        OutputFormat::Text => format_text(&records),
    };
    emit(args.output.as_deref(), &output)?;

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn format_csv(records: &[SalesRecord]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["sale_date", "item_code", "item_name", "qty", "net_sales"])?;

    for record in records {
        wtr.write_record([
            &record.sale_date.to_string(),
            &record.item_code,
            &record.item_name,
            &record.qty.to_string(),
            &record.net_sales.to_string(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(records: &[SalesRecord]) -> String {
    let mut output = String::new();

    for record in records {
        output.push_str(&format!(
            "{}  {:<10} {:<20} {:>8} {:>12}\n",
            record.sale_date, record.item_code, record.item_name, record.qty, record.net_sales
        ));
    }

    let total: Decimal = records.iter().map(|r| r.net_sales).sum();
    output.push_str(&format!("\n{} records, net sales {}\n", records.len(), total));

    output
}

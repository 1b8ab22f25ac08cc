//! P&L command - revenue against approved invoice cost for a period.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use clap::Args;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;

use tally_core::models::SalesRecord;
use tally_core::pl::{pl_report, Period};
use tally_core::reconcile::ReviewInvoice;

use super::emit;

/// Arguments for the pl command.
#[derive(Args)]
pub struct PlArgs {
    /// Sales records JSON, as written by `tally sales` (repeatable)
    #[arg(short, long, required = true)]
    sales: Vec<PathBuf>,

    /// Reviewed invoice JSON, as written by `tally approve` (repeatable)
    #[arg(short, long)]
    invoices: Vec<PathBuf>,

    /// Report period
    #[arg(short, long, value_enum, default_value = "month")]
    period: PeriodKind,

    /// Date inside the period (default: today)
    #[arg(short, long)]
    date: Option<NaiveDate>,

    /// Labor cost for the period
    #[arg(long, default_value = "0")]
    labor_cost: Decimal,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum PeriodKind {
    /// A single day
    Day,
    /// The calendar month containing the date
    Month,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum InvoiceInput {
    Approval { invoice: ReviewInvoice },
    Many(Vec<ReviewInvoice>),
    One(ReviewInvoice),
}

fn read_sales(path: &Path) -> anyhow::Result<Vec<SalesRecord>> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Invalid sales file {}: {}", path.display(), e))
}

fn read_invoices(path: &Path) -> anyhow::Result<Vec<ReviewInvoice>> {
    let content = fs::read_to_string(path)?;
    let input: InvoiceInput = serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Invalid invoice file {}: {}", path.display(), e))?;

    Ok(match input {
        InvoiceInput::Approval { invoice } | InvoiceInput::One(invoice) => vec![invoice],
        InvoiceInput::Many(invoices) => invoices,
    })
}

pub async fn run(args: PlArgs) -> anyhow::Result<()> {
    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    let period = match args.period {
        PeriodKind::Day => Period::Day(date),
        PeriodKind::Month => Period::Month(date),
    };

    let mut sales = Vec::new();
    for path in &args.sales {
        sales.extend(read_sales(path)?);
    }

    let mut invoices = Vec::new();
    for path in &args.invoices {
        invoices.extend(read_invoices(path)?);
    }

    info!(
        "Building {} report from {} sales records and {} invoices",
        period.name(),
        sales.len(),
        invoices.len()
    );

    let report = pl_report(period, &sales, &invoices, args.labor_cost);
    emit(args.output.as_deref(), &serde_json::to_string_pretty(&report)?)
}

//! Approve command - map invoice lines to standard items and approve.

use std::fs;
use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::Args;
use console::style;
use serde::{Deserialize, Serialize};
use tracing::info;

use tally_core::models::InvoiceData;
use tally_core::reconcile::{LedgerEntry, ReviewInvoice};

use super::emit;

/// Arguments for the approve command.
#[derive(Args)]
pub struct ApproveArgs {
    /// Invoice JSON, as written by `tally invoice` or a previous review
    #[arg(required = true)]
    input: PathBuf,

    /// Line mapping, `INDEX=STD_ITEM_ID` (repeatable)
    #[arg(short, long = "map", value_parser = parse_mapping)]
    mappings: Vec<(usize, String)>,

    /// Approval date (default: today)
    #[arg(short, long)]
    date: Option<NaiveDate>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Either a raw extraction or an invoice already under review.
#[derive(Deserialize)]
#[serde(untagged)]
enum InvoiceInput {
    Review(ReviewInvoice),
    Extracted(InvoiceData),
}

#[derive(Serialize)]
struct Approval {
    invoice: ReviewInvoice,
    ledger: Vec<LedgerEntry>,
}

fn parse_mapping(s: &str) -> Result<(usize, String), String> {
    let (index, id) = s
        .split_once('=')
        .ok_or_else(|| format!("expected INDEX=STD_ITEM_ID, got '{}'", s))?;
    let index = index
        .trim()
        .parse()
        .map_err(|_| format!("invalid line index '{}'", index))?;
    Ok((index, id.trim().to_string()))
}

pub async fn run(args: ApproveArgs) -> anyhow::Result<()> {
    let content = fs::read_to_string(&args.input)?;
    let mut invoice = match serde_json::from_str(&content)? {
        InvoiceInput::Review(invoice) => invoice,
        InvoiceInput::Extracted(data) => ReviewInvoice::from(data),
    };

    for (index, std_item_id) in args.mappings {
        invoice.map_item(index, std_item_id)?;
    }

    let unmapped = invoice.unmapped_lines().count();
    if unmapped > 0 {
        eprintln!(
            "{} {} line(s) have no standard item and will be booked unmapped",
            style("!").yellow(),
            unmapped
        );
    }

    let approved_on = args.date.unwrap_or_else(|| Local::now().date_naive());
    let ledger = invoice.approve(approved_on)?;
    info!("Approved {} with {} ledger entries", args.input.display(), ledger.len());

    let output = serde_json::to_string_pretty(&Approval { invoice, ledger })?;
    emit(args.output.as_deref(), &output)
}

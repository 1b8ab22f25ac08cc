//! Profit-and-loss derivation over sales records and approved invoices.

use chrono::{Datelike, Duration, Months, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::SalesRecord;
use crate::reconcile::{InvoiceStatus, ReviewInvoice};

/// Reporting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "period", content = "date", rename_all = "snake_case")]
pub enum Period {
    /// A single day.
    Day(NaiveDate),
    /// The whole calendar month containing the date.
    Month(NaiveDate),
}

impl Period {
    /// Inclusive first and last day.
    pub fn bounds(&self) -> (NaiveDate, NaiveDate) {
        match *self {
            Period::Day(date) => (date, date),
            Period::Month(date) => {
                let first = date - Duration::days(i64::from(date.day0()));
                let last = first
                    .checked_add_months(Months::new(1))
                    .and_then(|next| next.pred_opt())
                    .unwrap_or(first);
                (first, last)
            }
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        let (from, to) = self.bounds();
        from <= date && date <= to
    }

    pub fn name(&self) -> &'static str {
        match self {
            Period::Day(_) => "day",
            Period::Month(_) => "month",
        }
    }
}

/// P&L summary for one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlReport {
    pub period: String,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub total_revenue: Decimal,
    pub total_cost: Decimal,
    pub labor_cost: Decimal,
    pub gross_profit: Decimal,
    pub operating_profit: Decimal,
    /// Percent of revenue, two decimals.
    pub cost_ratio: Decimal,
    pub labor_ratio: Decimal,
    pub profit_ratio: Decimal,
}

/// Invoice issue dates come from OCR and may use either separator.
fn parse_issue_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y/%m/%d"))
        .ok()
}

/// Percent of revenue, half away from zero at two decimals; 0 unless revenue is positive.
fn ratio(part: Decimal, revenue: Decimal) -> Decimal {
    if revenue <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    part.checked_div(revenue)
        .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
        .map(|r| r.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .unwrap_or(Decimal::ZERO)
}

/// Build the report. Only approved invoices count as cost.
pub fn pl_report(
    period: Period,
    sales: &[SalesRecord],
    invoices: &[ReviewInvoice],
    labor_cost: Decimal,
) -> PlReport {
    let (date_from, date_to) = period.bounds();

    let total_revenue: Decimal = sales
        .iter()
        .filter(|r| period.contains(r.sale_date))
        .map(|r| r.net_sales)
        .sum();

    let total_cost: Decimal = invoices
        .iter()
        .filter(|inv| inv.status == InvoiceStatus::Approved)
        .filter(|inv| match parse_issue_date(&inv.issue_date) {
            Some(date) => period.contains(date),
            None => {
                debug!("Ignoring invoice with unreadable issue date '{}'", inv.issue_date);
                false
            }
        })
        .map(|inv| inv.total_amount)
        .sum();

    let gross_profit = total_revenue - total_cost;
    let operating_profit = gross_profit - labor_cost;

    PlReport {
        period: period.name().to_string(),
        date_from,
        date_to,
        total_revenue,
        total_cost,
        labor_cost,
        gross_profit,
        operating_profit,
        cost_ratio: ratio(total_cost, total_revenue),
        labor_ratio: ratio(labor_cost, total_revenue),
        profit_ratio: ratio(operating_profit, total_revenue),
    }
}

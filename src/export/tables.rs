//! CSV tables for the monthly ledger and the yearly checkpoints

use csv::Writer;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io;

use crate::projection::{AnnualCheckpoint, MonthlyRecord, ProjectionResult};

/// Decimal places written for currency columns
const CURRENCY_DP: u32 = 2;

/// Round half-even and pad to exactly two decimals
pub(crate) fn currency(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp(CURRENCY_DP);
    rounded.rescale(CURRENCY_DP);
    rounded
}

/// Row of the monthly CSV
#[derive(Debug, Serialize)]
struct MonthlyRow {
    month: u32,
    gross_balance: Decimal,
    real_balance: Decimal,
    contribution: Decimal,
    interest: Decimal,
    tax: Decimal,
    total_contributed: Decimal,
    total_interest: Decimal,
    total_tax: Decimal,
}

impl From<&MonthlyRecord> for MonthlyRow {
    fn from(record: &MonthlyRecord) -> Self {
        Self {
            month: record.month,
            gross_balance: currency(record.gross_balance),
            real_balance: currency(record.real_balance),
            contribution: currency(record.contribution),
            interest: currency(record.interest),
            tax: currency(record.tax),
            total_contributed: currency(record.cumulative_contributions),
            total_interest: currency(record.cumulative_interest),
            total_tax: currency(record.cumulative_tax),
        }
    }
}

/// Row of the annual CSV
#[derive(Debug, Serialize)]
struct AnnualRow {
    label: String,
    month: u32,
    gross_balance: Decimal,
    real_balance: Decimal,
}

impl From<&AnnualCheckpoint> for AnnualRow {
    fn from(checkpoint: &AnnualCheckpoint) -> Self {
        Self {
            label: checkpoint.label(),
            month: checkpoint.month,
            gross_balance: currency(checkpoint.gross_balance),
            real_balance: currency(checkpoint.real_balance),
        }
    }
}

/// Write one row per simulated month, with a header
pub fn write_monthly<W: io::Write>(writer: W, result: &ProjectionResult) -> Result<(), csv::Error> {
    let mut csv = Writer::from_writer(writer);
    if result.monthly().is_empty() {
        // serde-driven headers are only emitted with the first row
        csv.write_record(MONTHLY_HEADERS)?;
    }
    for record in result.monthly() {
        csv.serialize(MonthlyRow::from(record))?;
    }
    csv.flush()?;
    Ok(())
}

/// Write one row per yearly checkpoint, with a header
pub fn write_annual<W: io::Write>(writer: W, result: &ProjectionResult) -> Result<(), csv::Error> {
    let mut csv = Writer::from_writer(writer);
    for checkpoint in result.annual() {
        csv.serialize(AnnualRow::from(checkpoint))?;
    }
    csv.flush()?;
    Ok(())
}

pub(crate) const MONTHLY_HEADERS: [&str; 9] = [
    "month",
    "gross_balance",
    "real_balance",
    "contribution",
    "interest",
    "tax",
    "total_contributed",
    "total_interest",
    "total_tax",
];

pub(crate) const ANNUAL_HEADERS: [&str; 4] = ["label", "month", "gross_balance", "real_balance"];

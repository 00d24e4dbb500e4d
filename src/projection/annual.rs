//! Yearly aggregation of the monthly ledger

use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

use super::records::MonthlyRecord;
use super::schedule::MONTHS_PER_YEAR;

/// Time taken to reach the goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Elapsed {
    pub years: u32,
    pub remaining_months: u32,
}

impl Elapsed {
    pub fn from_months(total_months: u32) -> Self {
        Self {
            years: total_months / MONTHS_PER_YEAR,
            remaining_months: total_months % MONTHS_PER_YEAR,
        }
    }

    pub fn total_months(&self) -> u32 {
        self.years * MONTHS_PER_YEAR + self.remaining_months
    }
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} years and {} months", self.years, self.remaining_months)
    }
}

/// Balance sampled at a year boundary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnualCheckpoint {
    /// Zero-based year index; the final partial year rounds up
    pub year: u32,

    /// Month index the balance was sampled at (0 = start)
    pub month: u32,

    pub gross_balance: Decimal,
    pub real_balance: Decimal,

    /// True for the trailing checkpoint of a run that ends mid-year
    pub partial: bool,
}

impl AnnualCheckpoint {
    pub fn label(&self) -> String {
        format!("Year {}", self.year)
    }
}

/// Sample the gross series `[initial_balance, month 1, month 2, ...]` at months
/// 0, 12, 24, ... and close with the final month when it is not a year boundary.
pub fn annual_checkpoints(initial_balance: Decimal, records: &[MonthlyRecord]) -> Vec<AnnualCheckpoint> {
    let total = records.len() as u32;
    let mut checkpoints = Vec::with_capacity((total / MONTHS_PER_YEAR) as usize + 2);

    checkpoints.push(AnnualCheckpoint {
        year: 0,
        month: 0,
        gross_balance: initial_balance,
        real_balance: initial_balance,
        partial: false,
    });

    // record i holds month i + 1
    for record in records.iter().filter(|r| r.month % MONTHS_PER_YEAR == 0) {
        checkpoints.push(from_record(record, false));
    }

    if let Some(last) = records.last() {
        if last.month % MONTHS_PER_YEAR != 0 {
            checkpoints.push(from_record(last, true));
        }
    }

    checkpoints
}

fn from_record(record: &MonthlyRecord, partial: bool) -> AnnualCheckpoint {
    AnnualCheckpoint {
        year: record.month.div_ceil(MONTHS_PER_YEAR),
        month: record.month,
        gross_balance: record.gross_balance,
        real_balance: record.real_balance,
        partial,
    }
}

//! Monthly ledger records and the projection result

use rust_decimal::Decimal;
use serde::Serialize;

use super::annual::{AnnualCheckpoint, Elapsed};
use crate::params::SimulationParameters;

/// Snapshot of one simulated month
///
/// Balances are end-of-month values. Running totals include this month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyRecord {
    /// Month index (1-indexed)
    pub month: u32,

    // Balances
    pub gross_balance: Decimal,
    pub real_balance: Decimal,

    // This month's flows
    pub contribution: Decimal,
    pub interest: Decimal,
    pub tax: Decimal,

    // Running totals
    pub cumulative_contributions: Decimal,
    pub cumulative_interest: Decimal,
    pub cumulative_tax: Decimal,
}

/// Complete projection output
///
/// Built once by the engine and read-only afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectionResult {
    parameters: SimulationParameters,
    monthly: Vec<MonthlyRecord>,
    annual: Vec<AnnualCheckpoint>,
    elapsed: Elapsed,
}

impl ProjectionResult {
    pub(crate) fn new(parameters: SimulationParameters, monthly: Vec<MonthlyRecord>) -> Self {
        let annual = super::annual::annual_checkpoints(parameters.initial_balance, &monthly);
        let elapsed = Elapsed::from_months(monthly.len() as u32);
        Self {
            parameters,
            monthly,
            annual,
            elapsed,
        }
    }

    /// Parameters the projection was run with
    pub fn parameters(&self) -> &SimulationParameters {
        &self.parameters
    }

    /// Monthly records in month order
    pub fn monthly(&self) -> &[MonthlyRecord] {
        &self.monthly
    }

    /// Yearly checkpoints, starting with "Year 0"
    pub fn annual(&self) -> &[AnnualCheckpoint] {
        &self.annual
    }

    pub fn elapsed(&self) -> Elapsed {
        self.elapsed
    }

    pub fn total_months(&self) -> u32 {
        self.monthly.len() as u32
    }

    /// Gross balance after the last simulated month, or the initial balance
    /// when the goal was already met
    pub fn final_balance(&self) -> Decimal {
        self.monthly
            .last()
            .map(|r| r.gross_balance)
            .unwrap_or(self.parameters.initial_balance)
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let last = self.monthly.last();
        let total_contributions = last.map(|r| r.cumulative_contributions).unwrap_or_default();

        ProjectionSummary {
            total_months: self.total_months(),
            final_balance: self.final_balance(),
            final_real_balance: last
                .map(|r| r.real_balance)
                .unwrap_or(self.parameters.initial_balance),
            total_contributions,
            total_interest: last.map(|r| r.cumulative_interest).unwrap_or_default(),
            total_tax: last.map(|r| r.cumulative_tax).unwrap_or_default(),
            total_invested: self.parameters.initial_balance + total_contributions,
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionSummary {
    pub total_months: u32,
    pub final_balance: Decimal,
    pub final_real_balance: Decimal,
    pub total_contributions: Decimal,
    pub total_interest: Decimal,
    pub total_tax: Decimal,
    /// Initial balance plus every contribution
    pub total_invested: Decimal,
}

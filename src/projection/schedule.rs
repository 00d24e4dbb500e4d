//! Contribution escalation schedule

use rust_decimal::Decimal;

pub const MONTHS_PER_YEAR: u32 = 12;

/// Decides when, and by how much, the recurring contribution grows
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContributionSchedule {
    growth_rate: Decimal,
    period_months: u32,
}

impl ContributionSchedule {
    /// Grow by `growth_rate` after every 12th month
    pub fn annual(growth_rate: Decimal) -> Self {
        Self {
            growth_rate,
            period_months: MONTHS_PER_YEAR,
        }
    }

    /// True once `month` months have elapsed and that count closes a period
    pub fn is_escalation_month(&self, month: u32) -> bool {
        month > 0 && month % self.period_months == 0
    }

    /// Contribution to use after `month` months have been simulated
    ///
    /// Returns None on overflow.
    pub fn escalate(&self, month: u32, contribution: Decimal) -> Option<Decimal> {
        if !self.is_escalation_month(month) || self.growth_rate.is_zero() {
            return Some(contribution);
        }
        contribution.checked_mul(Decimal::ONE + self.growth_rate)
    }
}

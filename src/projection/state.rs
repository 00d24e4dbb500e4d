//! Running projection state and the one-month step function

use rust_decimal::{Decimal, MathematicalOps};

use super::records::MonthlyRecord;
use super::schedule::{ContributionSchedule, MONTHS_PER_YEAR};
use crate::error::SimulationError;
use crate::params::SimulationParameters;

/// Rates that stay constant for a whole run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepRates {
    pub monthly_interest_rate: Decimal,
    pub tax_rate_on_interest: Decimal,
    /// Monthly equivalent of the annual inflation rate; None when inflation is zero
    pub monthly_inflation: Option<Decimal>,
    /// `1 / (1 + monthly_inflation)`
    pub monthly_discount: Option<Decimal>,
}

impl StepRates {
    pub fn from_parameters(params: &SimulationParameters) -> Result<Self, SimulationError> {
        let inflation = monthly_inflation(params.annual_inflation_rate)?;
        let discount = match inflation {
            Some(rate) => Some(
                Decimal::ONE
                    .checked_div(Decimal::ONE + rate)
                    .ok_or_else(|| SimulationError::invalid("annual_inflation_rate", "discount factor is not representable"))?,
            ),
            None => None,
        };
        Ok(Self {
            monthly_interest_rate: params.monthly_interest_rate,
            tax_rate_on_interest: params.tax_rate_on_interest,
            monthly_inflation: inflation,
            monthly_discount: discount,
        })
    }
}

/// `(1 + annual)^(1/12) - 1`, or None for zero inflation
pub fn monthly_inflation(annual_rate: Decimal) -> Result<Option<Decimal>, SimulationError> {
    if annual_rate.is_zero() {
        return Ok(None);
    }
    let exponent = Decimal::ONE / Decimal::from(MONTHS_PER_YEAR);
    (Decimal::ONE + annual_rate)
        .checked_powd(exponent)
        .map(|factor| Some(factor - Decimal::ONE))
        .ok_or_else(|| SimulationError::invalid("annual_inflation_rate", "monthly equivalent is not representable"))
}

/// State of the accumulator between months
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionState {
    /// Months simulated so far
    pub month: u32,

    /// Gross balance at the end of the last simulated month
    pub balance: Decimal,

    /// Contribution the next month will receive
    pub contribution: Decimal,

    /// `(1 + monthly_inflation)^-month`
    pub discount: Decimal,

    pub total_contributions: Decimal,
    pub total_interest: Decimal,
    pub total_tax: Decimal,
}

impl ProjectionState {
    /// Initialize state at month 0
    pub fn from_parameters(params: &SimulationParameters) -> Self {
        Self {
            month: 0,
            balance: params.initial_balance,
            contribution: params.monthly_contribution,
            discount: Decimal::ONE,
            total_contributions: Decimal::ZERO,
            total_interest: Decimal::ZERO,
            total_tax: Decimal::ZERO,
        }
    }

    /// Advance one month: credit interest, withhold tax, add the contribution
    ///
    /// The real balance of month m is deflated by `m - 1` months of inflation,
    /// so the first month is never discounted.
    pub fn step(&mut self, rates: &StepRates) -> Result<MonthlyRecord, SimulationError> {
        let month = self.month + 1;
        let overflow = move || SimulationError::Overflow { month };

        let interest = self
            .balance
            .checked_mul(rates.monthly_interest_rate)
            .ok_or_else(overflow)?;

        // Losses are not taxed
        let tax = if interest > Decimal::ZERO {
            interest
                .checked_mul(rates.tax_rate_on_interest)
                .ok_or_else(overflow)?
        } else {
            Decimal::ZERO
        };

        let balance = self
            .balance
            .checked_add(interest)
            .and_then(|b| b.checked_sub(tax))
            .and_then(|b| b.checked_add(self.contribution))
            .ok_or_else(overflow)?;

        let real_balance = match rates.monthly_discount {
            Some(_) => balance.checked_mul(self.discount).ok_or_else(overflow)?,
            None => balance,
        };

        let total_contributions = self
            .total_contributions
            .checked_add(self.contribution)
            .ok_or_else(overflow)?;
        let total_interest = self.total_interest.checked_add(interest).ok_or_else(overflow)?;
        let total_tax = self.total_tax.checked_add(tax).ok_or_else(overflow)?;

        if let Some(discount) = rates.monthly_discount {
            self.discount = self.discount.checked_mul(discount).ok_or_else(overflow)?;
        }

        self.month = month;
        self.balance = balance;
        self.total_contributions = total_contributions;
        self.total_interest = total_interest;
        self.total_tax = total_tax;

        Ok(MonthlyRecord {
            month,
            gross_balance: balance,
            real_balance,
            contribution: self.contribution,
            interest,
            tax,
            cumulative_contributions: total_contributions,
            cumulative_interest: total_interest,
            cumulative_tax: total_tax,
        })
    }

    /// Apply the schedule after a month has been recorded
    pub fn apply_schedule(&mut self, schedule: &ContributionSchedule) -> Result<(), SimulationError> {
        self.contribution = schedule
            .escalate(self.month, self.contribution)
            .ok_or(SimulationError::Overflow { month: self.month })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rust_decimal::prelude::ToPrimitive;
    use rust_decimal_macros::dec;

    fn flat_rates(rate: Decimal, tax: Decimal) -> StepRates {
        StepRates {
            monthly_interest_rate: rate,
            tax_rate_on_interest: tax,
            monthly_inflation: None,
            monthly_discount: None,
        }
    }

    #[test]
    fn test_step_credits_interest_then_contribution() {
        let params = SimulationParameters::new(dec!(100_000), dec!(1_000), dec!(0.01), dec!(1_000_000));
        let mut state = ProjectionState::from_parameters(&params);

        let record = state.step(&flat_rates(dec!(0.01), Decimal::ZERO)).unwrap();

        assert_eq!(record.month, 1);
        assert_eq!(record.interest, dec!(1000));
        assert_eq!(record.gross_balance, dec!(102_000));
        assert_eq!(record.real_balance, record.gross_balance);
        assert_eq!(record.cumulative_contributions, dec!(1000));
        assert_eq!(state.month, 1);
        assert_eq!(state.balance, dec!(102_000));
    }

    #[test]
    fn test_step_withholds_tax_on_interest() {
        let params = SimulationParameters::new(dec!(10_000), Decimal::ZERO, dec!(0.02), dec!(20_000));
        let mut state = ProjectionState::from_parameters(&params);

        let record = state.step(&flat_rates(dec!(0.02), dec!(0.15))).unwrap();

        assert_eq!(record.interest, dec!(200));
        assert_eq!(record.tax, dec!(30));
        assert_eq!(record.gross_balance, dec!(10_170));
        assert_eq!(record.cumulative_tax, dec!(30));
    }

    #[test]
    fn test_negative_interest_is_not_taxed() {
        let params = SimulationParameters::new(dec!(1_000), dec!(10), dec!(-0.01), dec!(2_000));
        let mut state = ProjectionState::from_parameters(&params);

        let record = state.step(&flat_rates(dec!(-0.01), dec!(0.15))).unwrap();

        assert_eq!(record.interest, dec!(-10));
        assert_eq!(record.tax, Decimal::ZERO);
        assert_eq!(record.gross_balance, dec!(1_000));
    }

    #[test]
    fn test_monthly_inflation_compounds_to_annual() {
        let monthly = monthly_inflation(dec!(0.04)).unwrap().unwrap();
        let annual = (Decimal::ONE + monthly).powu(12) - Decimal::ONE;
        assert_relative_eq!(annual.to_f64().unwrap(), 0.04, epsilon = 1e-10);
        assert_eq!(monthly_inflation(Decimal::ZERO).unwrap(), None);
    }

    #[test]
    fn test_real_balance_lags_one_month_of_inflation() {
        let params = SimulationParameters::new(dec!(1_000), Decimal::ZERO, Decimal::ZERO, dec!(5_000))
            .with_inflation(dec!(0.12));
        let rates = StepRates::from_parameters(&params).unwrap();
        let inflation = rates.monthly_inflation.unwrap();
        let mut state = ProjectionState::from_parameters(&params);

        let first = state.step(&rates).unwrap();
        assert_eq!(first.real_balance, first.gross_balance);

        let second = state.step(&rates).unwrap();
        let expected = dec!(1_000) / (Decimal::ONE + inflation);
        assert_relative_eq!(
            second.real_balance.to_f64().unwrap(),
            expected.to_f64().unwrap(),
            epsilon = 1e-9
        );
        assert!(second.real_balance < second.gross_balance);
    }

    #[test]
    fn test_apply_schedule_escalates_after_twelfth_month() {
        let params = SimulationParameters::new(Decimal::ZERO, dec!(100), Decimal::ZERO, dec!(1_000_000))
            .with_contribution_growth(dec!(0.10));
        let schedule = ContributionSchedule::annual(params.annual_contribution_growth_rate);
        let rates = StepRates::from_parameters(&params).unwrap();
        let mut state = ProjectionState::from_parameters(&params);

        for _ in 0..12 {
            let record = state.step(&rates).unwrap();
            assert_eq!(record.contribution, dec!(100));
            state.apply_schedule(&schedule).unwrap();
        }
        let record = state.step(&rates).unwrap();
        assert_eq!(record.contribution, dec!(110));
        assert_eq!(record.cumulative_contributions, dec!(1310));
    }

    #[test]
    fn test_hyperinflation_discount_decays_without_overflow() {
        let params = SimulationParameters::new(Decimal::ZERO, dec!(1), Decimal::ZERO, dec!(900))
            .with_inflation(dec!(1.5));
        let rates = StepRates::from_parameters(&params).unwrap();
        let mut state = ProjectionState::from_parameters(&params);

        let mut last = None;
        for _ in 0..900 {
            last = Some(state.step(&rates).unwrap());
        }
        let last = last.unwrap();

        assert_eq!(last.gross_balance, dec!(900));
        assert!(last.real_balance >= Decimal::ZERO);
        assert!(last.real_balance < dec!(0.000001));
        assert!(state.discount < Decimal::ONE);
    }

    #[test]
    fn test_step_reports_overflow() {
        let params = SimulationParameters::new(Decimal::MAX, Decimal::ZERO, dec!(0.5), Decimal::MAX);
        let mut state = ProjectionState::from_parameters(&params);
        let err = state.step(&flat_rates(dec!(0.5), Decimal::ZERO)).unwrap_err();
        assert!(matches!(err, SimulationError::Overflow { month: 1 }));
        assert_eq!(state.month, 0);
    }
}

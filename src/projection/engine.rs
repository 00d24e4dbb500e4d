//! Core projection engine: monthly balance roll-forward until the goal is met

use log::{debug, warn};

use super::records::{MonthlyRecord, ProjectionResult};
use super::schedule::{ContributionSchedule, MONTHS_PER_YEAR};
use super::state::{ProjectionState, StepRates};
use crate::error::SimulationError;
use crate::params::SimulationParameters;

/// 100 years
pub const DEFAULT_MAX_MONTHS: u32 = 100 * MONTHS_PER_YEAR;

/// Configuration for a projection run
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionConfig {
    /// Safety horizon: a run still short of the target after this many months
    /// is reported as unreachable
    pub max_months: u32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            max_months: DEFAULT_MAX_MONTHS,
        }
    }
}

/// Main projection engine
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    /// Simulate month by month until the balance reaches the target
    pub fn run(&self, params: &SimulationParameters) -> Result<ProjectionResult, SimulationError> {
        params.validate()?;

        let rates = StepRates::from_parameters(params)?;
        let schedule = ContributionSchedule::annual(params.annual_contribution_growth_rate);
        let mut state = ProjectionState::from_parameters(params);

        debug!(
            "projecting {} -> {} at {}/month (contribution {})",
            params.initial_balance,
            params.target_balance,
            params.monthly_interest_rate,
            params.monthly_contribution
        );

        if goal_reached(&state, params) {
            return Ok(ProjectionResult::new(params.clone(), Vec::new()));
        }

        if params.is_stagnant() {
            return Err(SimulationError::GoalUnreachable {
                target: params.target_balance,
                months: 0,
                reason: "balance cannot grow without interest or contributions".to_string(),
            });
        }

        let mut records: Vec<MonthlyRecord> = Vec::new();

        while !goal_reached(&state, params) {
            if state.month >= self.config.max_months {
                warn!(
                    "safety horizon of {} months hit at balance {}",
                    self.config.max_months, state.balance
                );
                return Err(SimulationError::GoalUnreachable {
                    target: params.target_balance,
                    months: state.month,
                    reason: format!("balance is {} after the safety horizon", state.balance.round_dp(2)),
                });
            }

            let record = state.step(&rates)?;
            records.push(record);
            state.apply_schedule(&schedule)?;
        }

        debug!("goal reached after {} months at {}", state.month, state.balance);

        Ok(ProjectionResult::new(params.clone(), records))
    }
}

fn goal_reached(state: &ProjectionState, params: &SimulationParameters) -> bool {
    state.balance >= params.target_balance
}

/// Run a projection with the default configuration
pub fn run(params: &SimulationParameters) -> Result<ProjectionResult, SimulationError> {
    ProjectionEngine::default().run(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn reference_params() -> SimulationParameters {
        SimulationParameters::new(dec!(100_000), dec!(1_000), dec!(0.01), dec!(1_000_000))
    }

    #[test]
    fn test_reference_scenario_reaches_goal() {
        let result = run(&reference_params()).unwrap();

        assert_eq!(result.total_months(), 172);
        assert_eq!(result.elapsed().years, 14);
        assert_eq!(result.elapsed().remaining_months, 4);
        assert_eq!(result.final_balance().round_dp(2), dec!(1_007_404.51));

        let annual = result.annual();
        assert_eq!(annual[0].gross_balance, dec!(100_000));
        assert_eq!(annual[1].gross_balance.round_dp(2), dec!(125_365.01));
        assert_eq!(annual[14].gross_balance.round_dp(2), dec!(964_193.96));
        assert!(annual.last().unwrap().partial);
    }

    #[test]
    fn test_reference_scenario_is_deterministic() {
        let first = run(&reference_params()).unwrap();
        let second = run(&reference_params()).unwrap();
        assert_eq!(first.monthly(), second.monthly());
        assert_eq!(first.final_balance(), second.final_balance());
    }

    #[test]
    fn test_default_scenario_with_growth_tax_and_inflation() {
        let result = run(&SimulationParameters::default_scenario()).unwrap();

        assert_eq!(result.total_months(), 179);
        assert_eq!(result.annual()[1].gross_balance.round_dp(2), dec!(123_267.83));

        let last = result.monthly().last().unwrap();
        assert!(last.real_balance < last.gross_balance);
        assert_eq!(last.cumulative_tax.round_dp(2), dec!(114_001.79));
        // month 13 gets the first 5% raise
        assert_eq!(result.monthly()[11].contribution, dec!(1000));
        assert_eq!(result.monthly()[12].contribution, dec!(1050));
    }

    #[test]
    fn test_goal_already_met_returns_empty_ledger() {
        let params = SimulationParameters::new(dec!(5_000), dec!(100), dec!(0.01), dec!(5_000));
        let result = run(&params).unwrap();

        assert!(result.monthly().is_empty());
        assert_eq!(result.elapsed().years, 0);
        assert_eq!(result.elapsed().remaining_months, 0);
        assert_eq!(result.annual().len(), 1);
        assert_eq!(result.final_balance(), dec!(5_000));
    }

    #[test]
    fn test_no_growth_is_unreachable() {
        let params = SimulationParameters::new(Decimal::ZERO, Decimal::ZERO, Decimal::ZERO, dec!(100));
        let err = run(&params).unwrap_err();
        assert!(matches!(err, SimulationError::GoalUnreachable { months: 0, .. }));
    }

    #[test]
    fn test_safety_horizon_stops_slow_runs() {
        // Negative rate pins the balance near contribution / 0.01 = 100
        let params = SimulationParameters::new(Decimal::ZERO, dec!(1), dec!(-0.01), dec!(1_000));
        let err = run(&params).unwrap_err();
        assert!(matches!(
            err,
            SimulationError::GoalUnreachable { months: DEFAULT_MAX_MONTHS, .. }
        ));
    }

    #[test]
    fn test_custom_horizon_allows_goal_on_last_month() {
        let params = SimulationParameters::new(Decimal::ZERO, dec!(100), Decimal::ZERO, dec!(1_200));
        let engine = ProjectionEngine::new(ProjectionConfig { max_months: 12 });
        let result = engine.run(&params).unwrap();
        assert_eq!(result.total_months(), 12);

        let engine = ProjectionEngine::new(ProjectionConfig { max_months: 11 });
        assert!(matches!(
            engine.run(&params),
            Err(SimulationError::GoalUnreachable { months: 11, .. })
        ));
    }

    #[test]
    fn test_hyperinflation_run_completes() {
        // 150% a year inflates the price level past Decimal::MAX within the horizon
        let params = SimulationParameters::new(Decimal::ZERO, dec!(1), Decimal::ZERO, dec!(900))
            .with_inflation(dec!(1.5));
        let result = run(&params).unwrap();

        assert_eq!(result.total_months(), 900);
        let last = result.monthly().last().unwrap();
        assert_eq!(last.gross_balance, dec!(900));
        assert!(last.real_balance >= Decimal::ZERO);
        assert!(last.real_balance < last.gross_balance);
    }

    #[test]
    fn test_invalid_parameters_fail_before_simulating() {
        let params = SimulationParameters::new(dec!(10), dec!(1), dec!(0.01), dec!(100))
            .with_interest_tax(dec!(1.5));
        assert!(matches!(
            run(&params),
            Err(SimulationError::InvalidParameters { field: "tax_rate_on_interest", .. })
        ));
    }

    #[test]
    fn test_contributions_only_without_interest() {
        let params = SimulationParameters::new(Decimal::ZERO, dec!(100), Decimal::ZERO, dec!(1_000));
        let result = run(&params).unwrap();
        assert_eq!(result.total_months(), 10);
        assert_eq!(result.final_balance(), dec!(1_000));
        assert_eq!(result.annual().len(), 2);
    }

    #[test]
    fn test_summary_totals() {
        let result = run(&reference_params()).unwrap();
        let summary = result.summary();

        assert_eq!(summary.total_months, 172);
        assert_eq!(summary.total_contributions, dec!(172_000));
        assert_eq!(summary.total_invested, dec!(272_000));
        assert_eq!(summary.total_tax, Decimal::ZERO);
        assert_eq!(summary.final_real_balance, summary.final_balance);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(48))]

        #[test]
        fn prop_ledger_invariants_hold(
            initial in 0u32..200_000,
            contribution in 0u32..5_000,
            rate_bp in 0u32..300,
            target in 1u32..2_000_000,
            inflation_bp in 0u32..1_500,
            growth_bp in 0u32..1_000,
            tax_bp in 0u32..3_000
        ) {
            let params = SimulationParameters::new(
                Decimal::from(initial),
                Decimal::from(contribution),
                Decimal::new(rate_bp as i64, 4),
                Decimal::from(target),
            )
            .with_inflation(Decimal::new(inflation_bp as i64, 4))
            .with_contribution_growth(Decimal::new(growth_bp as i64, 4))
            .with_interest_tax(Decimal::new(tax_bp as i64, 4));

            let result = match run(&params) {
                Ok(result) => result,
                Err(SimulationError::GoalUnreachable { .. }) => {
                    prop_assert!(initial < target);
                    return Ok(());
                }
                Err(other) => panic!("unexpected error {other:?}"),
            };

            let records = result.monthly();
            let months = records.len() as u32;

            if initial >= target {
                prop_assert_eq!(months, 0);
            } else {
                let last = records.last().unwrap();
                prop_assert!(last.gross_balance >= params.target_balance);
                for record in &records[..records.len() - 1] {
                    prop_assert!(record.gross_balance < params.target_balance);
                }

                let reconstructed = last.cumulative_contributions + last.cumulative_interest
                    - last.cumulative_tax + params.initial_balance;
                prop_assert!((reconstructed - last.gross_balance).abs() < dec!(0.000001));
            }

            for pair in records.windows(2) {
                prop_assert!(pair[1].cumulative_contributions >= pair[0].cumulative_contributions);
                prop_assert!(pair[1].cumulative_interest >= pair[0].cumulative_interest);
                prop_assert!(pair[1].cumulative_tax >= pair[0].cumulative_tax);
                prop_assert_eq!(pair[1].month, pair[0].month + 1);
            }

            if inflation_bp == 0 {
                prop_assert!(records.iter().all(|r| r.real_balance == r.gross_balance));
            }

            prop_assert_eq!(result.annual().len() as u32, months.div_ceil(12) + 1);
            prop_assert_eq!(result.elapsed().total_months(), months);
        }
    }
}

//! Scenario runner for batch projections
//!
//! Every projection is independent, so batches fan out across the rayon pool
//! and come back in input order.

use rayon::prelude::*;
use rust_decimal::Decimal;

use crate::error::SimulationError;
use crate::params::SimulationParameters;
use crate::projection::{ProjectionConfig, ProjectionEngine, ProjectionResult};

/// Outcome of one scenario in a batch
pub type ScenarioOutcome = Result<ProjectionResult, SimulationError>;

/// Runs many projections with a shared engine configuration
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::default();
/// let base = SimulationParameters::default_scenario();
/// for (rate, outcome) in runner.sweep_interest_rates(&base, &[dec!(0.008), dec!(0.01)]) {
///     println!("{rate}: {:?}", outcome.map(|r| r.elapsed()));
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    engine: ProjectionEngine,
}

impl ScenarioRunner {
    pub fn new(config: ProjectionConfig) -> Self {
        Self {
            engine: ProjectionEngine::new(config),
        }
    }

    /// Run a single projection
    pub fn run(&self, params: &SimulationParameters) -> ScenarioOutcome {
        self.engine.run(params)
    }

    /// Run projections for many parameter sets in parallel
    pub fn run_batch(&self, scenarios: &[SimulationParameters]) -> Vec<ScenarioOutcome> {
        scenarios.par_iter().map(|params| self.engine.run(params)).collect()
    }

    /// Re-run `base` once per monthly interest rate
    pub fn sweep_interest_rates(
        &self,
        base: &SimulationParameters,
        rates: &[Decimal],
    ) -> Vec<(Decimal, ScenarioOutcome)> {
        let scenarios: Vec<SimulationParameters> = rates
            .iter()
            .map(|&rate| SimulationParameters {
                monthly_interest_rate: rate,
                ..base.clone()
            })
            .collect();

        rates.iter().copied().zip(self.run_batch(&scenarios)).collect()
    }
}

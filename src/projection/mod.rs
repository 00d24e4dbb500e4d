//! Projection engine: step function, contribution schedule and yearly aggregation

mod state;
mod schedule;
mod records;
mod annual;
mod engine;

pub use state::{ProjectionState, StepRates, monthly_inflation};
pub use schedule::{ContributionSchedule, MONTHS_PER_YEAR};
pub use records::{MonthlyRecord, ProjectionResult, ProjectionSummary};
pub use annual::{AnnualCheckpoint, Elapsed, annual_checkpoints};
pub use engine::{ProjectionEngine, ProjectionConfig, DEFAULT_MAX_MONTHS, run};

//! Goal Projection - compound-interest projection engine for savings goals
//!
//! This library provides:
//! - Month-by-month projection of a periodic-contribution investment until a target balance
//! - Inflation-adjusted balances, tax withheld on interest and yearly contribution growth
//! - Yearly checkpoints and time-to-goal
//! - Parallel scenario batches
//! - CSV, spreadsheet and SVG export of finished projections
//! - A JSON request/response API

pub mod error;
pub mod params;
pub mod projection;
pub mod scenario;
pub mod api;
pub mod export;

// Re-export commonly used types
pub use error::{ConfigError, ExportError, SimulationError};
pub use params::SimulationParameters;
pub use projection::{
    AnnualCheckpoint, Elapsed, MonthlyRecord, ProjectionConfig, ProjectionEngine, ProjectionResult,
};
pub use scenario::ScenarioRunner;
pub use export::Exporter;

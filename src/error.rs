//! Error types for projections, exports and parameter files

use rust_decimal::Decimal;
use std::path::PathBuf;

/// Failures raised by the projection engine
///
/// A failed simulation never yields a partial result.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error("invalid parameter `{field}`: {message}")]
    InvalidParameters {
        field: &'static str,
        message: String,
    },

    #[error("target balance {target} is unreachable after {months} months: {reason}")]
    GoalUnreachable {
        target: Decimal,
        months: u32,
        reason: String,
    },

    #[error("balance arithmetic overflowed at month {month}")]
    Overflow { month: u32 },
}

impl SimulationError {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        SimulationError::InvalidParameters {
            field,
            message: message.into(),
        }
    }
}

/// Failures writing tables or charts
///
/// The projection result that was being exported stays valid.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write CSV {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to write spreadsheet {}: {source}", path.display())]
    Xlsx {
        path: PathBuf,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },
}

/// Failures loading a parameter file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Invalid(#[from] SimulationError),
}

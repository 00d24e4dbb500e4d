//! Request/response API for the lightweight "time to goal" query
//!
//! Only the four core parameters are accepted; inflation, contribution growth
//! and tax stay at zero. The yearly table samples the gross balance at months
//! 0, 12, 24, ... and never includes a trailing partial year.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::SimulationError;
use crate::params::SimulationParameters;
use crate::projection::{ProjectionEngine, ProjectionResult};

/// Request body
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SimulateRequest {
    #[serde(alias = "valor_inicial")]
    pub initial_balance: Decimal,

    #[serde(alias = "aporte_mensal")]
    pub monthly_contribution: Decimal,

    #[serde(alias = "taxa_juros_mensal")]
    pub monthly_interest_rate: Decimal,

    #[serde(alias = "meta_final")]
    pub target_balance: Decimal,
}

impl SimulateRequest {
    pub fn to_parameters(&self) -> SimulationParameters {
        SimulationParameters::new(
            self.initial_balance,
            self.monthly_contribution,
            self.monthly_interest_rate,
            self.target_balance,
        )
    }
}

/// One row of the yearly table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableEntry {
    /// "Ano {n}", zero-based
    pub label: String,
    /// Gross balance rounded to 2 decimals
    pub value: f64,
}

/// Response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulateResponse {
    pub years: u32,
    pub remaining_months: u32,
    pub table: Vec<TableEntry>,
}

impl SimulateResponse {
    pub fn from_result(result: &ProjectionResult) -> Self {
        let elapsed = result.elapsed();
        let table = result
            .annual()
            .iter()
            .filter(|checkpoint| !checkpoint.partial)
            .map(|checkpoint| TableEntry {
                label: format!("Ano {}", checkpoint.year),
                value: checkpoint.gross_balance.round_dp(2).to_f64().unwrap_or(f64::NAN),
            })
            .collect();

        Self {
            years: elapsed.years,
            remaining_months: elapsed.remaining_months,
            table,
        }
    }
}

/// Errors surfaced to API clients
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid request body: {0}")]
    MalformedRequest(#[from] serde_json::Error),

    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

impl ApiError {
    /// HTTP status for this error
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::MalformedRequest(_) => 400,
            ApiError::Simulation(SimulationError::InvalidParameters { .. }) => 400,
            ApiError::Simulation(_) => 422,
        }
    }
}

/// Run the projection behind the API
pub fn simulate(request: &SimulateRequest) -> Result<SimulateResponse, SimulationError> {
    let result = ProjectionEngine::default().run(&request.to_parameters())?;
    Ok(SimulateResponse::from_result(&result))
}

/// Parse a JSON body and simulate
pub fn simulate_json(body: &str) -> Result<SimulateResponse, ApiError> {
    let request: SimulateRequest = serde_json::from_str(body)?;
    Ok(simulate(&request)?)
}

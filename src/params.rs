//! Simulation parameters, presets and validation

use crate::error::{ConfigError, SimulationError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Scalar inputs to a single projection run
///
/// Rates are fractional (0.01 = 1%). The three optional rates default to zero
/// when omitted from a parameter file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Balance at month 0
    pub initial_balance: Decimal,

    /// Contribution added at the end of every month during the first year
    pub monthly_contribution: Decimal,

    /// Interest credited on the opening balance of each month
    pub monthly_interest_rate: Decimal,

    /// Goal; the projection stops at the first month whose balance reaches it
    pub target_balance: Decimal,

    /// Used only to deflate balances into the real series
    #[serde(default)]
    pub annual_inflation_rate: Decimal,

    /// Applied to the contribution after every 12th month
    #[serde(default)]
    pub annual_contribution_growth_rate: Decimal,

    /// Share of each month's interest withheld as tax, in [0, 1)
    #[serde(default)]
    pub tax_rate_on_interest: Decimal,
}

impl SimulationParameters {
    /// Parameters with no inflation, no contribution growth and no tax
    pub fn new(
        initial_balance: Decimal,
        monthly_contribution: Decimal,
        monthly_interest_rate: Decimal,
        target_balance: Decimal,
    ) -> Self {
        Self {
            initial_balance,
            monthly_contribution,
            monthly_interest_rate,
            target_balance,
            annual_inflation_rate: Decimal::ZERO,
            annual_contribution_growth_rate: Decimal::ZERO,
            tax_rate_on_interest: Decimal::ZERO,
        }
    }

    /// The stock scenario: 100k start, 1k/month at 1%/month towards 1M,
    /// with 4% inflation, 5% yearly contribution growth and 15% tax on interest
    pub fn default_scenario() -> Self {
        Self::new(dec!(100_000), dec!(1_000), dec!(0.01), dec!(1_000_000))
            .with_inflation(dec!(0.04))
            .with_contribution_growth(dec!(0.05))
            .with_interest_tax(dec!(0.15))
    }

    pub fn with_inflation(mut self, annual_rate: Decimal) -> Self {
        self.annual_inflation_rate = annual_rate;
        self
    }

    pub fn with_contribution_growth(mut self, annual_rate: Decimal) -> Self {
        self.annual_contribution_growth_rate = annual_rate;
        self
    }

    pub fn with_interest_tax(mut self, rate: Decimal) -> Self {
        self.tax_rate_on_interest = rate;
        self
    }

    /// Load and validate parameters from a JSON file
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let params: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        params.validate()?;
        Ok(params)
    }

    /// Check every field against its domain
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.initial_balance < Decimal::ZERO {
            return Err(SimulationError::invalid("initial_balance", "must not be negative"));
        }
        if self.monthly_contribution < Decimal::ZERO {
            return Err(SimulationError::invalid("monthly_contribution", "must not be negative"));
        }
        if self.target_balance <= Decimal::ZERO {
            return Err(SimulationError::invalid("target_balance", "must be greater than zero"));
        }
        // At -100% or below the balance would change sign every month
        if self.monthly_interest_rate <= Decimal::NEGATIVE_ONE {
            return Err(SimulationError::invalid(
                "monthly_interest_rate",
                "must be greater than -1",
            ));
        }
        if self.annual_inflation_rate < Decimal::ZERO {
            return Err(SimulationError::invalid("annual_inflation_rate", "must not be negative"));
        }
        if self.annual_contribution_growth_rate < Decimal::ZERO {
            return Err(SimulationError::invalid(
                "annual_contribution_growth_rate",
                "must not be negative",
            ));
        }
        if self.tax_rate_on_interest < Decimal::ZERO || self.tax_rate_on_interest >= Decimal::ONE {
            return Err(SimulationError::invalid(
                "tax_rate_on_interest",
                "must be in the range [0, 1)",
            ));
        }
        Ok(())
    }

    /// Whether the balance can never grow: no contributions, and either no
    /// interest or nothing to earn it on
    pub fn is_stagnant(&self) -> bool {
        self.monthly_contribution <= Decimal::ZERO
            && (self.monthly_interest_rate <= Decimal::ZERO || self.initial_balance <= Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn field_of(err: SimulationError) -> &'static str {
        match err {
            SimulationError::InvalidParameters { field, .. } => field,
            other => panic!("expected InvalidParameters, got {other:?}"),
        }
    }

    #[test]
    fn test_new_defaults_optional_rates_to_zero() {
        let params = SimulationParameters::new(dec!(10), dec!(1), dec!(0.01), dec!(100));
        assert_eq!(params.annual_inflation_rate, Decimal::ZERO);
        assert_eq!(params.annual_contribution_growth_rate, Decimal::ZERO);
        assert_eq!(params.tax_rate_on_interest, Decimal::ZERO);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_default_scenario_is_valid() {
        let params = SimulationParameters::default_scenario();
        assert_eq!(params.target_balance, dec!(1_000_000));
        assert_eq!(params.tax_rate_on_interest, dec!(0.15));
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_rejects_out_of_domain_fields() {
        let base = SimulationParameters::new(dec!(10), dec!(1), dec!(0.01), dec!(100));

        let mut p = base.clone();
        p.initial_balance = dec!(-1);
        assert_eq!(field_of(p.validate().unwrap_err()), "initial_balance");

        let mut p = base.clone();
        p.monthly_contribution = dec!(-0.01);
        assert_eq!(field_of(p.validate().unwrap_err()), "monthly_contribution");

        let mut p = base.clone();
        p.target_balance = Decimal::ZERO;
        assert_eq!(field_of(p.validate().unwrap_err()), "target_balance");

        let mut p = base.clone();
        p.monthly_interest_rate = dec!(-1);
        assert_eq!(field_of(p.validate().unwrap_err()), "monthly_interest_rate");

        let p = base.clone().with_inflation(dec!(-0.02));
        assert_eq!(field_of(p.validate().unwrap_err()), "annual_inflation_rate");

        let p = base.clone().with_contribution_growth(dec!(-0.05));
        assert_eq!(field_of(p.validate().unwrap_err()), "annual_contribution_growth_rate");

        let p = base.clone().with_interest_tax(Decimal::ONE);
        assert_eq!(field_of(p.validate().unwrap_err()), "tax_rate_on_interest");
    }

    #[test]
    fn test_negative_interest_above_minus_one_is_allowed() {
        let params = SimulationParameters::new(dec!(10), dec!(1), dec!(-0.005), dec!(100));
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_stagnant_detection() {
        assert!(SimulationParameters::new(dec!(0), dec!(0), dec!(0), dec!(100)).is_stagnant());
        assert!(SimulationParameters::new(dec!(0), dec!(0), dec!(0.01), dec!(100)).is_stagnant());
        assert!(!SimulationParameters::new(dec!(0), dec!(1), dec!(0), dec!(100)).is_stagnant());
        assert!(!SimulationParameters::new(dec!(5), dec!(0), dec!(0.01), dec!(100)).is_stagnant());
    }

    #[test]
    fn test_from_json_path_defaults_missing_rates() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"initial_balance": 1000, "monthly_contribution": 100,
                "monthly_interest_rate": 0.01, "target_balance": 5000,
                "tax_rate_on_interest": "0.15"}}"#
        )
        .unwrap();

        let params = SimulationParameters::from_json_path(file.path()).unwrap();
        assert_eq!(params.initial_balance, dec!(1000));
        assert_eq!(params.monthly_interest_rate, dec!(0.01));
        assert_eq!(params.tax_rate_on_interest, dec!(0.15));
        assert_eq!(params.annual_inflation_rate, Decimal::ZERO);
    }

    #[test]
    fn test_from_json_path_rejects_invalid_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"initial_balance": 0, "monthly_contribution": 0,
                "monthly_interest_rate": 0.01, "target_balance": -5}}"#
        )
        .unwrap();

        let err = SimulationParameters::from_json_path(file.path()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid(SimulationError::InvalidParameters { field: "target_balance", .. })
        ));
    }

    #[test]
    fn test_bundled_default_scenario_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("params/default_scenario.json");
        let params = SimulationParameters::from_json_path(path).unwrap();
        assert_eq!(params, SimulationParameters::default_scenario());
    }

    #[test]
    fn test_from_json_path_missing_file() {
        let err = SimulationParameters::from_json_path("does/not/exist.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}

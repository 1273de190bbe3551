//! Parameter Validation
//!
//! Gatekeeper in front of every simulation. Two levels:
//!
//! - **Structural**: invariants the engine relies on (distribution sums to
//!   one, at least one iteration and one month, sane vesting schedules).
//! - **Strict**: the external input contract on top of the structural checks
//!   (horizon 6-120 months, at most 1000 iterations, multiplier 0.1-3.0, ...).

use tokenomics_core::{
    DISTRIBUTION_EPSILON, SimulationParameters, ValidationError, ValidationResult,
};

/// Validates a candidate parameter set
#[derive(Debug, Clone, Copy, Default)]
pub struct ParameterValidator {
    strict: bool,
}

impl ParameterValidator {
    /// Only the invariants the engine needs
    pub fn structural() -> Self {
        Self { strict: false }
    }

    /// Structural invariants plus the external input ranges
    pub fn strict() -> Self {
        Self { strict: true }
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Check `params`, naming the first violated invariant
    pub fn validate(&self, params: &SimulationParameters) -> ValidationResult<()> {
        validate_structure(params)?;
        if self.strict {
            validate_input_contract(params)?;
        }
        Ok(())
    }

    /// Consume a candidate and hand it back once it is known to be valid
    pub fn accept(&self, params: SimulationParameters) -> ValidationResult<SimulationParameters> {
        self.validate(&params)?;
        Ok(params)
    }
}

fn validate_structure(params: &SimulationParameters) -> ValidationResult<()> {
    // Distribution
    for (field, value) in params.distribution.fractions() {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(ValidationError::InvalidFraction {
                field: field.to_string(),
                value,
            });
        }
    }
    let sum = params.distribution.sum();
    if (sum - 1.0).abs() > DISTRIBUTION_EPSILON {
        return Err(ValidationError::DistributionSum {
            sum,
            epsilon: DISTRIBUTION_EPSILON,
        });
    }

    positive("max_supply", params.max_supply)?;
    positive("market.initial_price", params.market.initial_price)?;

    if params.iterations < 1 {
        return Err(ValidationError::out_of_range(
            "iterations",
            params.iterations as f64,
            1.0,
            u32::MAX as f64,
        ));
    }
    if params.simulation_months < 1 {
        return Err(ValidationError::out_of_range(
            "simulation_months",
            params.simulation_months as f64,
            1.0,
            u32::MAX as f64,
        ));
    }

    // Vesting
    for schedule in &params.vesting_schedules {
        if !(0.0..=100.0).contains(&schedule.initial_unlock) {
            return Err(ValidationError::invalid_schedule(
                &schedule.name,
                format!(
                    "initial_unlock {} is outside [0, 100]",
                    schedule.initial_unlock
                ),
            ));
        }
        if schedule.vesting_months < 1 {
            return Err(ValidationError::invalid_schedule(
                &schedule.name,
                "vesting_months must be at least 1",
            ));
        }
        if !schedule.total_tokens.is_finite() || schedule.total_tokens < 0.0 {
            return Err(ValidationError::invalid_schedule(
                &schedule.name,
                format!("total_tokens {} must be non-negative", schedule.total_tokens),
            ));
        }
    }

    // Rates
    non_negative("market.multiplier", params.market.multiplier)?;
    non_negative("market.volatility_factor", params.market.volatility_factor)?;
    non_negative(
        "liquidity.initial_liquidity_usd",
        params.liquidity.initial_liquidity_usd,
    )?;
    non_negative(
        "liquidity.daily_volume_ratio",
        params.liquidity.daily_volume_ratio,
    )?;
    non_negative("utility.staking_apy", params.utility.staking_apy)?;
    non_negative("utility.protocol_fee_rate", params.utility.protocol_fee_rate)?;
    non_negative(
        "incentives.staking_bonus_apy",
        params.incentives.staking_bonus_apy,
    )?;
    non_negative("behavior.initial_holders", params.behavior.initial_holders)?;
    non_negative("protocol.initial_users", params.protocol.initial_users)?;
    non_negative(
        "protocol.monthly_revenue_per_user",
        params.protocol.monthly_revenue_per_user,
    )?;

    unit_interval("utility.monthly_burn_rate", params.utility.monthly_burn_rate)?;
    unit_interval(
        "incentives.liquidity_mining_monthly",
        params.incentives.liquidity_mining_monthly,
    )?;
    unit_interval(
        "behavior.staking_participation",
        params.behavior.staking_participation,
    )?;

    growth(
        "liquidity.monthly_liquidity_growth",
        params.liquidity.monthly_liquidity_growth,
    )?;
    growth(
        "behavior.monthly_holder_growth",
        params.behavior.monthly_holder_growth,
    )?;
    growth(
        "protocol.monthly_user_growth",
        params.protocol.monthly_user_growth,
    )?;

    Ok(())
}

fn validate_input_contract(params: &SimulationParameters) -> ValidationResult<()> {
    within("max_supply", params.max_supply, 1_000.0, f64::MAX)?;
    within(
        "historical_data_days",
        params.historical_data_days as f64,
        1.0,
        364.0,
    )?;
    within(
        "simulation_months",
        params.simulation_months as f64,
        6.0,
        120.0,
    )?;
    within("iterations", params.iterations as f64, 1.0, 1_000.0)?;
    within("market.multiplier", params.market.multiplier, 0.1, 3.0)?;
    within(
        "market.volatility_factor",
        params.market.volatility_factor,
        0.01,
        1.0,
    )?;

    for schedule in &params.vesting_schedules {
        if schedule.cliff_months > 60 {
            return Err(ValidationError::invalid_schedule(
                &schedule.name,
                format!("cliff_months {} is outside [0, 60]", schedule.cliff_months),
            ));
        }
        if schedule.vesting_months > 120 {
            return Err(ValidationError::invalid_schedule(
                &schedule.name,
                format!(
                    "vesting_months {} is outside [1, 120]",
                    schedule.vesting_months
                ),
            ));
        }
    }

    Ok(())
}

fn positive(field: &str, value: f64) -> ValidationResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::non_positive(field, value))
    }
}

fn non_negative(field: &str, value: f64) -> ValidationResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::invalid_rate(field, value))
    }
}

fn unit_interval(field: &str, value: f64) -> ValidationResult<()> {
    within(field, value, 0.0, 1.0)
}

/// Growth rates may be negative but must keep the base positive
fn growth(field: &str, value: f64) -> ValidationResult<()> {
    if value.is_finite() && value > -1.0 {
        Ok(())
    } else {
        Err(ValidationError::out_of_range(field, value, -1.0, f64::MAX))
    }
}

fn within(field: &str, value: f64, min: f64, max: f64) -> ValidationResult<()> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(ValidationError::out_of_range(field, value, min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokenomics_core::VestingSchedule;

    #[test]
    fn test_default_parameters_pass_strict() {
        let params = SimulationParameters::default();
        assert!(ParameterValidator::strict().validate(&params).is_ok());
    }

    #[test]
    fn test_distribution_sum_within_epsilon() {
        let mut params = SimulationParameters::default();
        params.distribution.public_sale += 0.0009;
        assert!(ParameterValidator::structural().validate(&params).is_ok());

        params.distribution.public_sale += 0.0011;
        let err = ParameterValidator::structural()
            .validate(&params)
            .unwrap_err();
        assert!(matches!(err, ValidationError::DistributionSum { .. }));
    }

    #[test]
    fn test_fraction_out_of_unit_interval() {
        let mut params = SimulationParameters::default();
        params.distribution.team = -0.05;
        params.distribution.public_sale += 0.20;
        let err = ParameterValidator::structural()
            .validate(&params)
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidFraction {
                field: "team".to_string(),
                value: -0.05
            }
        );
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let params = SimulationParameters {
            iterations: 0,
            ..Default::default()
        };
        let err = ParameterValidator::structural()
            .validate(&params)
            .unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { ref field, .. } if field == "iterations"));
    }

    #[test]
    fn test_zero_months_rejected() {
        let params = SimulationParameters {
            simulation_months: 0,
            ..Default::default()
        };
        assert!(ParameterValidator::structural().validate(&params).is_err());
    }

    #[test]
    fn test_schedule_checks() {
        let mut params = SimulationParameters::default();
        params.vesting_schedules = vec![VestingSchedule::new("Seed", 1_000.0, 0, 12, 120.0)];
        let err = ParameterValidator::structural()
            .validate(&params)
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidSchedule { ref name, .. } if name == "Seed"));

        params.vesting_schedules = vec![VestingSchedule::new("Seed", 1_000.0, 0, 0, 10.0)];
        assert!(ParameterValidator::structural().validate(&params).is_err());
    }

    #[test]
    fn test_structural_allows_short_deterministic_runs() {
        let mut params = SimulationParameters {
            simulation_months: 1,
            iterations: 1,
            ..Default::default()
        };
        params.market.volatility_factor = 0.0;

        assert!(ParameterValidator::structural().validate(&params).is_ok());
        assert!(ParameterValidator::strict().validate(&params).is_err());
    }

    #[test]
    fn test_strict_input_ranges() {
        let mut params = SimulationParameters::default();
        params.market.multiplier = 3.5;
        assert!(ParameterValidator::structural().validate(&params).is_ok());
        assert!(ParameterValidator::strict().validate(&params).is_err());

        let mut params = SimulationParameters::default();
        params.vesting_schedules[0].cliff_months = 61;
        assert!(ParameterValidator::strict().validate(&params).is_err());

        let params = SimulationParameters {
            historical_data_days: 365,
            ..Default::default()
        };
        assert!(ParameterValidator::strict().validate(&params).is_err());
    }

    #[test]
    fn test_accept_returns_params() {
        let params = SimulationParameters::default();
        let accepted = ParameterValidator::strict().accept(params.clone()).unwrap();
        assert_eq!(accepted, params);
    }
}

use thiserror::Error;

/// Violated invariant on the input parameter set.
///
/// Always fatal: raised before any simulation work runs and never retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Distribution fractions sum to {sum:.6}, expected 1.0 (±{epsilon})")]
    DistributionSum { sum: f64, epsilon: f64 },

    #[error("Distribution fraction {field} = {value} is outside [0, 1]")]
    InvalidFraction { field: String, value: f64 },

    #[error("{field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: String, value: f64 },

    #[error("{field} must be finite and non-negative, got {value}")]
    InvalidRate { field: String, value: f64 },

    #[error("Vesting schedule '{name}': {reason}")]
    InvalidSchedule { name: String, reason: String },
}

impl ValidationError {
    pub fn out_of_range(field: impl Into<String>, value: f64, min: f64, max: f64) -> Self {
        Self::OutOfRange {
            field: field.into(),
            value,
            min,
            max,
        }
    }

    pub fn non_positive(field: impl Into<String>, value: f64) -> Self {
        Self::NonPositive {
            field: field.into(),
            value,
        }
    }

    pub fn invalid_rate(field: impl Into<String>, value: f64) -> Self {
        Self::InvalidRate {
            field: field.into(),
            value,
        }
    }

    pub fn invalid_schedule(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSchedule {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

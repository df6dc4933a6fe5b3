//! Input validation for simulation configurations.
//!
//! Checks a [`SimulationConfig`] before a run starts. Detects:
//! - Non-positive or non-finite service rate
//! - Admission probability outside [0, 1]
//! - Zero tick period
//! - Zero admission multiplier
//! - More initial jobs than the admission ceiling allows
//!
//! Durations and counts are unsigned, so negativity cannot be expressed.

use std::fmt;

use crate::models::SimulationConfig;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// λ is zero, negative, NaN or infinite.
    NonPositiveRate,
    /// Admission probability is NaN or outside [0, 1].
    ProbabilityOutOfRange,
    /// Tick period is zero.
    ZeroTickPeriod,
    /// Admission multiplier is zero.
    ZeroAdmissionMultiplier,
    /// `init_jobs` exceeds `total_jobs * admission_multiplier`.
    InitialJobsOverCeiling,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates a simulation configuration.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_config(config: &SimulationConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if !(config.lambda.is_finite() && config.lambda > 0.0) {
        errors.push(ValidationError::new(
            ValidationErrorKind::NonPositiveRate,
            format!("rate λ must be positive and finite, got {}", config.lambda),
        ));
    }

    if !(0.0..=1.0).contains(&config.admission_probability) {
        errors.push(ValidationError::new(
            ValidationErrorKind::ProbabilityOutOfRange,
            format!(
                "admission probability {} outside [0, 1]",
                config.admission_probability
            ),
        ));
    }

    if config.tick_period_ms == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::ZeroTickPeriod,
            "tick period must be at least 1 ms",
        ));
    }

    if config.admission_multiplier == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::ZeroAdmissionMultiplier,
            "admission multiplier must be at least 1",
        ));
    } else if let Some(err) = initial_jobs_error(config.init_jobs, config) {
        errors.push(err);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Checks that `count` jobs present at t=0 fit under the admission ceiling
/// of `config`.
pub fn validate_initial_jobs(count: usize, config: &SimulationConfig) -> ValidationResult {
    match initial_jobs_error(count, config) {
        Some(err) => Err(vec![err]),
        None => Ok(()),
    }
}

fn initial_jobs_error(count: usize, config: &SimulationConfig) -> Option<ValidationError> {
    let ceiling = config.admission_ceiling();
    if config.total_jobs == 0 || count <= ceiling {
        return None;
    }
    Some(ValidationError::new(
        ValidationErrorKind::InitialJobsOverCeiling,
        format!("{count} initial jobs exceed the admission ceiling of {ceiling}"),
    ))
}

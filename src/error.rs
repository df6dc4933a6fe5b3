//! Error types for simulation runs.

use thiserror::Error;

use crate::models::{JobId, JobState, Micros};
use crate::validation::ValidationError;

/// Errors that abort a simulation run.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// The service-demand rate is zero, negative or not finite.
    #[error("degenerate rate λ={rate}: exponential service demands need a positive, finite rate")]
    DegenerateRate { rate: f64 },

    /// The configuration failed validation.
    #[error("invalid configuration: {}", join_messages(.0))]
    InvalidConfig(Vec<ValidationError>),

    /// No job can run and no further job can be admitted.
    #[error(
        "simulation stalled at t={clock_us}us: {finished}/{target} jobs finished, \
         {admitted} admitted, nothing runnable and no admissions left"
    )]
    Stalled {
        clock_us: Micros,
        finished: usize,
        target: usize,
        admitted: usize,
    },

    /// The policy engine broke a lifecycle invariant.
    #[error("invariant violated at t={clock_us}us on job {job} (state {state:?}): {detail}")]
    InvariantViolation {
        clock_us: Micros,
        job: JobId,
        state: Option<JobState>,
        detail: &'static str,
    },
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

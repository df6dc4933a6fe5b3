//! Simulation domain models.
//!
//! Provides the data types shared by the generator, the policy engine and
//! the driver: jobs and their lifecycle, the registry that owns them, and
//! the run configuration.
//!
//! # Ownership
//!
//! Every [`Job`] lives in exactly one [`JobRegistry`]. Policies and trace
//! consumers only ever see shared borrows or copies of job ids.

mod config;
mod job;
mod registry;

pub use config::{
    ParsePolicyError, Policy, SimulationConfig, DEFAULT_ADMISSION_MULTIPLIER,
    DEFAULT_ADMISSION_PROBABILITY, DEFAULT_CONTEXT_SWITCH_US, DEFAULT_INIT_JOBS, DEFAULT_LAMBDA,
    DEFAULT_SCHED_LATENCY_US, DEFAULT_SEED, DEFAULT_TICK_PERIOD_MS, DEFAULT_TOTAL_JOBS,
};
pub use job::{Job, JobId, JobState, Micros, MICROS_PER_SEC};
pub use registry::JobRegistry;

//! Scheduling policies.
//!
//! A policy answers one question at every decision point: which Waiting job
//! gets the CPU next. The driver owns the clock, the overhead timeline and
//! the job lifecycle; policies only read the registry.
//!
//! # Usage
//!
//! ```
//! use cpu_sched_sim::dispatching::{self, DecisionContext, DecisionTrigger};
//! use cpu_sched_sim::models::{Job, JobRegistry, Policy};
//!
//! let mut jobs = JobRegistry::with_ceiling(4);
//! jobs.admit(Job::new(0, 300_000));
//! jobs.admit(Job::new(0, 100_000));
//!
//! let sjf = dispatching::strategy(Policy::Sjf);
//! let ctx = DecisionContext::at_time(0, DecisionTrigger::Tick);
//! assert_eq!(sjf.select_next(&jobs, &ctx), Some(1));
//! ```
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5
//! - Kleinrock (1976), "Queueing Systems, Vol. 2", Ch. 4

mod context;
pub mod policies;

pub use context::{DecisionContext, DecisionTrigger};
pub use policies::{Fcfs, RoundRobin, Sjf};

use crate::models::{JobId, JobRegistry, Policy};
use std::fmt::Debug;

/// A scheduling discipline.
///
/// Implementations must only return ids of jobs that are currently Waiting;
/// anything else is treated by the driver as an invariant violation.
pub trait SchedulingPolicy: Send + Sync + Debug {
    /// Policy name (e.g., "FCFS").
    fn name(&self) -> &'static str;

    /// Selects the next job to dispatch, or `None` if nothing is Waiting.
    fn select_next(&self, jobs: &JobRegistry, context: &DecisionContext) -> Option<JobId>;

    /// Whether the running job is returned to Waiting at every tick.
    fn preempts_on_tick(&self) -> bool {
        false
    }

    /// Policy description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Returns the built-in strategy for `policy`.
pub fn strategy(policy: Policy) -> Box<dyn SchedulingPolicy> {
    match policy {
        Policy::Fcfs => Box::new(Fcfs),
        Policy::Sjf => Box::new(Sjf),
        Policy::RoundRobin => Box::new(RoundRobin),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_names() {
        assert_eq!(strategy(Policy::Fcfs).name(), "FCFS");
        assert_eq!(strategy(Policy::Sjf).name(), "SJF");
        assert_eq!(strategy(Policy::RoundRobin).name(), "RR");
    }

    #[test]
    fn test_only_round_robin_preempts() {
        assert!(!strategy(Policy::Fcfs).preempts_on_tick());
        assert!(!strategy(Policy::Sjf).preempts_on_tick());
        assert!(strategy(Policy::RoundRobin).preempts_on_tick());
    }
}

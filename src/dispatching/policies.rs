//! Built-in scheduling policies.
//!
//! | Policy | Selects | Preemptive |
//! |--------|---------|------------|
//! | FCFS | lowest-index Waiting job | no |
//! | SJF | Waiting job with least remaining time | no |
//! | RR | next Waiting job after the previous one, cyclically | every tick |
//!
//! Ties are always broken by the lower registry index (earlier arrival).

use super::{DecisionContext, SchedulingPolicy};
use crate::models::{JobId, JobRegistry};

/// First-Come-First-Served.
///
/// Dispatches jobs in admission order and runs each to completion.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fcfs;

impl SchedulingPolicy for Fcfs {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn select_next(&self, jobs: &JobRegistry, _context: &DecisionContext) -> Option<JobId> {
        jobs.waiting().next().map(|job| job.id)
    }

    fn description(&self) -> &'static str {
        "First-Come-First-Served"
    }
}

/// Shortest-Job-First.
///
/// Dispatches the Waiting job with the least remaining service. Non-preemptive:
/// a dispatched job runs until it finishes, and the choice is re-evaluated at
/// the next decision point.
///
/// # Reference
/// Smith (1956), optimal for minimizing mean flow time on a single machine.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sjf;

impl SchedulingPolicy for Sjf {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn select_next(&self, jobs: &JobRegistry, _context: &DecisionContext) -> Option<JobId> {
        jobs.waiting()
            .min_by_key(|job| (job.remaining_us(), job.id))
            .map(|job| job.id)
    }

    fn description(&self) -> &'static str {
        "Shortest-Job-First"
    }
}

/// Round-Robin with a one-tick quantum.
///
/// The driver preempts the running job at every tick; the next dispatch goes
/// to the first Waiting job after the previously dispatched index, wrapping
/// around the registry. If the preempted job is the only one waiting it is
/// dispatched again.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoundRobin;

impl SchedulingPolicy for RoundRobin {
    fn name(&self) -> &'static str {
        "RR"
    }

    fn select_next(&self, jobs: &JobRegistry, context: &DecisionContext) -> Option<JobId> {
        if jobs.is_empty() {
            return None;
        }
        let n = jobs.len();
        let start = context.previous.map_or(0, |prev| (prev + 1) % n);

        (0..n)
            .map(|offset| (start + offset) % n)
            .find(|&id| jobs.get(id).is_some_and(|job| job.is_waiting()))
    }

    fn preempts_on_tick(&self) -> bool {
        true
    }

    fn description(&self) -> &'static str {
        "Round-Robin"
    }
}

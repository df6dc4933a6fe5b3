//! Decision context passed to scheduling policies.

use crate::models::{JobId, Micros};

/// What caused a scheduling decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionTrigger {
    /// A periodic tick found the CPU idle or preempted the running job.
    Tick,
    /// The served job just finished.
    Completion,
}

/// Runtime state handed to [`SchedulingPolicy::select_next`](super::SchedulingPolicy::select_next).
///
/// All times are microseconds of simulated time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecisionContext {
    /// Time the decision resolves (after scheduler latency).
    pub now_us: Micros,
    /// Time the decision was triggered.
    pub triggered_at_us: Micros,
    /// What triggered it.
    pub trigger: DecisionTrigger,
    /// The most recently dispatched job, if any.
    pub previous: Option<JobId>,
}

impl DecisionContext {
    /// Creates a context for a decision triggered and resolved at `now_us`.
    pub fn at_time(now_us: Micros, trigger: DecisionTrigger) -> Self {
        Self {
            now_us,
            triggered_at_us: now_us,
            trigger,
            previous: None,
        }
    }

    /// Sets the previously dispatched job.
    pub fn with_previous(mut self, job: JobId) -> Self {
        self.previous = Some(job);
        self
    }
}

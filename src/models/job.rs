//! Job model.
//!
//! A job is a single unit of CPU work with a fixed service demand. Its
//! identity is its index in the [`JobRegistry`](super::JobRegistry), which
//! never changes once the job has been admitted.
//!
//! # Time Representation
//! All times are in microseconds of simulated time since the start of the
//! run (t=0).

use serde::{Deserialize, Serialize};

/// Registry index of a job (arrival order).
pub type JobId = usize;

/// Simulated time or duration in microseconds.
pub type Micros = u64;

/// Microseconds per second, for converting accumulated times to seconds.
pub const MICROS_PER_SEC: f64 = 1_000_000.0;

/// Lifecycle state of a job.
///
/// ```text
/// Created ──admit──▶ Waiting ──dispatch──▶ Running ──finish──▶ Finished
///                       ▲                     │
///                       └──────preempt────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobState {
    /// Generated but not yet admitted into a registry.
    Created,
    /// Ready to run, holding no CPU.
    Waiting,
    /// Holding the CPU (possibly still behind a context switch).
    Running,
    /// Service demand fully met. Terminal.
    Finished,
}

/// A job and its timing counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Registry index. Assigned on admission.
    pub id: JobId,
    /// Time the job entered the system.
    pub arrival_us: Micros,
    /// Total service demand.
    pub demand_us: Micros,
    /// Service received so far.
    pub served_us: Micros,
    /// Current lifecycle state.
    pub state: JobState,
    /// Time spent Waiting while the CPU was serving another job.
    pub wait_us: Micros,
    /// Served time plus wait time.
    pub turnaround_us: Micros,
    /// Arrival to first dispatch. `None` until the job is first dispatched.
    pub response_us: Option<Micros>,
    /// Time the job finished.
    pub completed_at_us: Option<Micros>,
    /// Number of times the job has been dispatched.
    pub dispatches: u32,
}

impl Job {
    /// Creates a job arriving at `arrival_us` that needs `demand_us` of service.
    pub fn new(arrival_us: Micros, demand_us: Micros) -> Self {
        Self {
            id: 0,
            arrival_us,
            demand_us,
            served_us: 0,
            state: JobState::Created,
            wait_us: 0,
            turnaround_us: 0,
            response_us: None,
            completed_at_us: None,
            dispatches: 0,
        }
    }

    /// Service still owed to the job.
    pub fn remaining_us(&self) -> Micros {
        self.demand_us - self.served_us
    }

    pub fn is_waiting(&self) -> bool {
        self.state == JobState::Waiting
    }

    pub fn is_finished(&self) -> bool {
        self.state == JobState::Finished
    }

    /// Moves the job into Running.
    ///
    /// `decided_at_us` is the time the dispatching decision was triggered.
    /// The response time is stamped only on the first dispatch; returns
    /// whether this was it.
    pub(crate) fn dispatch(&mut self, decided_at_us: Micros) -> bool {
        debug_assert_eq!(self.state, JobState::Waiting, "job {} not waiting", self.id);
        self.state = JobState::Running;
        self.dispatches += 1;
        if self.response_us.is_some() {
            return false;
        }
        self.response_us = Some(decided_at_us.saturating_sub(self.arrival_us));
        true
    }

    /// Returns a running job to Waiting.
    pub(crate) fn preempt(&mut self) {
        debug_assert_eq!(self.state, JobState::Running, "job {} not running", self.id);
        self.state = JobState::Waiting;
    }

    /// Credits `delta` of service. Never overshoots the demand.
    pub(crate) fn serve(&mut self, delta: Micros) {
        debug_assert_eq!(self.state, JobState::Running, "job {} not running", self.id);
        let delta = delta.min(self.remaining_us());
        self.served_us += delta;
        self.turnaround_us += delta;
    }

    /// Accrues `delta` of waiting.
    pub(crate) fn wait(&mut self, delta: Micros) {
        self.wait_us += delta;
        self.turnaround_us += delta;
    }

    pub(crate) fn finish(&mut self, at_us: Micros) {
        debug_assert_eq!(self.remaining_us(), 0, "job {} finished early", self.id);
        self.state = JobState::Finished;
        self.completed_at_us = Some(at_us);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn waiting_job(arrival: Micros, demand: Micros) -> Job {
        let mut job = Job::new(arrival, demand);
        job.state = JobState::Waiting;
        job
    }

    #[test]
    fn test_new_job_is_created_and_unserved() {
        let job = Job::new(1_000, 5_000);
        assert_eq!(job.state, JobState::Created);
        assert_eq!(job.remaining_us(), 5_000);
        assert!(job.response_us.is_none());
    }

    #[test]
    fn test_response_stamped_once() {
        let mut job = waiting_job(100, 1_000);

        assert!(job.dispatch(400));
        assert_eq!(job.response_us, Some(300));

        job.serve(200);
        job.preempt();
        assert!(!job.dispatch(10_000));
        assert_eq!(job.response_us, Some(300));
        assert_eq!(job.dispatches, 2);
    }

    #[test]
    fn test_serve_keeps_remaining_consistent() {
        let mut job = waiting_job(0, 1_000);
        job.dispatch(0);
        job.serve(300);
        assert_eq!(job.served_us + job.remaining_us(), job.demand_us);

        job.serve(5_000);
        assert_eq!(job.served_us, 1_000);
        assert_eq!(job.remaining_us(), 0);
    }

    #[test]
    fn test_turnaround_is_wait_plus_service() {
        let mut job = waiting_job(0, 500);
        job.wait(70);
        job.dispatch(70);
        job.serve(500);
        job.finish(570);

        assert!(job.is_finished());
        assert_eq!(job.turnaround_us, job.wait_us + job.demand_us);
        assert_eq!(job.completed_at_us, Some(570));
    }
}

//! Run statistics.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Response | arrival → first dispatch decision |
//! | Wait | time Waiting while another job was served |
//! | Turnaround | wait + service |
//!
//! Each average is the sum over finished jobs divided by the configured
//! `total_jobs`, reported in seconds.

use serde::{Deserialize, Serialize};

use crate::models::{Job, Micros, MICROS_PER_SEC};

/// Final statistics of a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SimulationStats {
    /// Average response time (s).
    pub avg_response_secs: f64,
    /// Average wait time (s).
    pub avg_wait_secs: f64,
    /// Average turnaround time (s).
    pub avg_turnaround_secs: f64,
    /// Jobs that finished.
    pub jobs_completed: usize,
    /// Jobs admitted, including the initial ones.
    pub jobs_admitted: usize,
    /// Ticks fired.
    pub ticks: u64,
    /// Simulated time at the end of the run (µs).
    pub elapsed_us: Micros,
}

/// Folds finished jobs into running averages.
#[derive(Debug, Clone)]
pub struct StatsAccumulator {
    total_jobs: usize,
    response_secs: f64,
    wait_secs: f64,
    turnaround_secs: f64,
    completed: usize,
}

impl StatsAccumulator {
    pub fn new(total_jobs: usize) -> Self {
        Self {
            total_jobs,
            response_secs: 0.0,
            wait_secs: 0.0,
            turnaround_secs: 0.0,
            completed: 0,
        }
    }

    /// Adds a finished job's share to each average.
    pub fn record_completion(&mut self, job: &Job) {
        self.response_secs += self.share(job.response_us.unwrap_or(0));
        self.turnaround_secs += self.share(job.turnaround_us);
        self.wait_secs += self.share(job.wait_us);
        self.completed += 1;
    }

    /// Produces the final record.
    pub fn finish(&self, jobs_admitted: usize, ticks: u64, elapsed_us: Micros) -> SimulationStats {
        SimulationStats {
            avg_response_secs: self.response_secs,
            avg_wait_secs: self.wait_secs,
            avg_turnaround_secs: self.turnaround_secs,
            jobs_completed: self.completed,
            jobs_admitted,
            ticks,
            elapsed_us,
        }
    }

    fn share(&self, micros: Micros) -> f64 {
        micros as f64 / self.total_jobs as f64 / MICROS_PER_SEC
    }
}

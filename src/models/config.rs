//! Simulation configuration.
//!
//! Defaults: five initial jobs, one hundred in total, a mean service demand
//! of one second, 10 µs scheduler latency, 50 µs context switches, a 10 ms
//! tick and a 15% chance of a new arrival per tick.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Micros;

pub const DEFAULT_INIT_JOBS: usize = 5;
pub const DEFAULT_TOTAL_JOBS: usize = 100;
pub const DEFAULT_LAMBDA: f64 = 1.0;
pub const DEFAULT_SCHED_LATENCY_US: Micros = 10;
pub const DEFAULT_CONTEXT_SWITCH_US: Micros = 50;
pub const DEFAULT_TICK_PERIOD_MS: u64 = 10;
pub const DEFAULT_ADMISSION_PROBABILITY: f64 = 0.15;
pub const DEFAULT_ADMISSION_MULTIPLIER: usize = 2;
pub const DEFAULT_SEED: u64 = 0x5EED;

/// Scheduling discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// First-come-first-served.
    Fcfs,
    /// Shortest-job-first (by remaining time).
    Sjf,
    /// Round-robin, one tick per slice.
    #[serde(rename = "rr")]
    RoundRobin,
}

impl Policy {
    /// Short uppercase label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            Policy::Fcfs => "FCFS",
            Policy::Sjf => "SJF",
            Policy::RoundRobin => "RR",
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when parsing an unknown policy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown scheduling algorithm '{0}' (expected fcfs, sjf or rr)")]
pub struct ParsePolicyError(pub String);

impl FromStr for Policy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fcfs" => Ok(Policy::Fcfs),
            "sjf" => Ok(Policy::Sjf),
            "rr" | "round-robin" | "roundrobin" => Ok(Policy::RoundRobin),
            _ => Err(ParsePolicyError(s.to_string())),
        }
    }
}

/// Parameters of one simulation run.
///
/// Construct with [`SimulationConfig::new`] and the `with_*` builders, then
/// check with [`validate_config`](crate::validation::validate_config).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Scheduling discipline.
    pub policy: Policy,
    /// Jobs present at t=0.
    pub init_jobs: usize,
    /// Finished-job count that ends the run.
    pub total_jobs: usize,
    /// Rate λ of the exponential service-demand distribution (per second).
    pub lambda: f64,
    /// Latency of one scheduler decision (µs).
    pub sched_latency_us: Micros,
    /// Latency of one context switch (µs).
    pub context_switch_us: Micros,
    /// Tick period (ms).
    pub tick_period_ms: u64,
    /// Probability of admitting a new job at each tick.
    pub admission_probability: f64,
    /// At most `admission_multiplier * total_jobs` jobs are ever admitted.
    pub admission_multiplier: usize,
    /// Seed the random source from the OS instead of `seed`.
    pub randomize: bool,
    /// Seed used when `randomize` is false.
    pub seed: u64,
}

impl SimulationConfig {
    /// Creates a configuration with default parameters for `policy`.
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            init_jobs: DEFAULT_INIT_JOBS,
            total_jobs: DEFAULT_TOTAL_JOBS,
            lambda: DEFAULT_LAMBDA,
            sched_latency_us: DEFAULT_SCHED_LATENCY_US,
            context_switch_us: DEFAULT_CONTEXT_SWITCH_US,
            tick_period_ms: DEFAULT_TICK_PERIOD_MS,
            admission_probability: DEFAULT_ADMISSION_PROBABILITY,
            admission_multiplier: DEFAULT_ADMISSION_MULTIPLIER,
            randomize: false,
            seed: DEFAULT_SEED,
        }
    }

    pub fn with_init_jobs(mut self, init_jobs: usize) -> Self {
        self.init_jobs = init_jobs;
        self
    }

    pub fn with_total_jobs(mut self, total_jobs: usize) -> Self {
        self.total_jobs = total_jobs;
        self
    }

    pub fn with_lambda(mut self, lambda: f64) -> Self {
        self.lambda = lambda;
        self
    }

    pub fn with_sched_latency(mut self, micros: Micros) -> Self {
        self.sched_latency_us = micros;
        self
    }

    pub fn with_context_switch(mut self, micros: Micros) -> Self {
        self.context_switch_us = micros;
        self
    }

    pub fn with_tick_period(mut self, millis: u64) -> Self {
        self.tick_period_ms = millis;
        self
    }

    pub fn with_admission_probability(mut self, probability: f64) -> Self {
        self.admission_probability = probability;
        self
    }

    pub fn with_admission_multiplier(mut self, multiplier: usize) -> Self {
        self.admission_multiplier = multiplier;
        self
    }

    pub fn with_randomize(mut self, randomize: bool) -> Self {
        self.randomize = randomize;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Tick period on the microsecond clock.
    pub fn tick_period_us(&self) -> Micros {
        self.tick_period_ms.saturating_mul(1_000)
    }

    /// Maximum number of jobs the registry will ever admit.
    pub fn admission_ceiling(&self) -> usize {
        self.total_jobs.saturating_mul(self.admission_multiplier)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new(Policy::Fcfs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::new(Policy::RoundRobin);
        assert_eq!(config.init_jobs, 5);
        assert_eq!(config.total_jobs, 100);
        assert_eq!(config.tick_period_us(), 10_000);
        assert_eq!(config.admission_ceiling(), 200);
        assert!(!config.randomize);
    }

    #[test]
    fn test_builder() {
        let config = SimulationConfig::new(Policy::Sjf)
            .with_init_jobs(3)
            .with_total_jobs(7)
            .with_lambda(2.5)
            .with_sched_latency(0)
            .with_context_switch(20)
            .with_tick_period(4)
            .with_admission_probability(0.5)
            .with_admission_multiplier(3)
            .with_seed(42);

        assert_eq!(config.policy, Policy::Sjf);
        assert_eq!(config.init_jobs, 3);
        assert_eq!(config.total_jobs, 7);
        assert!((config.lambda - 2.5).abs() < 1e-12);
        assert_eq!(config.sched_latency_us, 0);
        assert_eq!(config.context_switch_us, 20);
        assert_eq!(config.tick_period_us(), 4_000);
        assert_eq!(config.admission_ceiling(), 21);
        assert_eq!(config.seed, 42);
    }

    #[test]
    fn test_policy_parse_and_display() {
        assert_eq!("fcfs".parse::<Policy>(), Ok(Policy::Fcfs));
        assert_eq!("SJF".parse::<Policy>(), Ok(Policy::Sjf));
        assert_eq!("rr".parse::<Policy>(), Ok(Policy::RoundRobin));
        assert!("lottery".parse::<Policy>().is_err());

        assert_eq!(Policy::RoundRobin.to_string(), "RR");
    }

    #[test]
    fn test_config_serde() {
        let config = SimulationConfig::new(Policy::RoundRobin).with_total_jobs(12);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"policy\":\"rr\""));

        let back: SimulationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}

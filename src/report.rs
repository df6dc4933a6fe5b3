//! Human-readable and JSON summaries of a finished run.

use serde::Serialize;
use std::fmt;

use crate::models::SimulationConfig;
use crate::simulation::SimulationStats;

/// A run's parameters together with its results.
///
/// `Display` renders the classic plain-text summary; `Serialize` gives the
/// same data as a JSON object.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SimulationReport<'a> {
    pub config: &'a SimulationConfig,
    pub stats: &'a SimulationStats,
}

impl<'a> SimulationReport<'a> {
    pub fn new(config: &'a SimulationConfig, stats: &'a SimulationStats) -> Self {
        Self { config, stats }
    }
}

impl fmt::Display for SimulationReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.config;
        let s = self.stats;

        writeln!(
            f,
            "For a simulation using the {} scheduling algorithm",
            c.policy.label()
        )?;
        writeln!(f, "with the following parameters:")?;
        writeln!(f, "    init jobs           = {}", c.init_jobs)?;
        writeln!(f, "    total jobs          = {}", c.total_jobs)?;
        writeln!(f, "    lambda              = {:.6}", c.lambda)?;
        writeln!(f, "    sched time          = {}", c.sched_latency_us)?;
        writeln!(f, "    context switch time = {}", c.context_switch_us)?;
        writeln!(f, "    tick time           = {}", c.tick_period_ms)?;
        writeln!(f, "    prob of new job     = {:.6}", c.admission_probability)?;
        writeln!(f, "    randomize           = {}", c.randomize)?;
        writeln!(f, "the following results were obtained:")?;
        writeln!(f, "    Average response time:   {:10.6}", s.avg_response_secs)?;
        writeln!(f, "    Average turnaround time: {:10.6}", s.avg_turnaround_secs)?;
        writeln!(f, "    Average waiting time:    {:10.6}", s.avg_wait_secs)
    }
}

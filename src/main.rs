//! CPU scheduling simulator CLI
//!
//! Runs one simulation and prints a summary of its parameters and results.

use clap::Parser;
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use cpu_sched_sim::models::{
    Micros, Policy, SimulationConfig, DEFAULT_ADMISSION_MULTIPLIER, DEFAULT_ADMISSION_PROBABILITY,
    DEFAULT_CONTEXT_SWITCH_US, DEFAULT_INIT_JOBS, DEFAULT_LAMBDA, DEFAULT_SCHED_LATENCY_US,
    DEFAULT_SEED, DEFAULT_TICK_PERIOD_MS, DEFAULT_TOTAL_JOBS,
};
use cpu_sched_sim::simulation::{LogTrace, Simulation, TraceEvent};
use cpu_sched_sim::SimulationReport;

const DEFAULT_PROGRAM: &str = "cpu-sched-sim";

#[derive(Parser)]
#[command(name = "cpu-sched-sim")]
#[command(about = "Discrete-time single-CPU scheduling simulator")]
#[command(version)]
struct Cli {
    /// Scheduling algorithm (fcfs, sjf, rr)
    #[arg(long)]
    alg: Policy,

    /// Jobs present at t=0
    #[arg(long, default_value_t = DEFAULT_INIT_JOBS)]
    init_jobs: usize,

    /// Finished jobs that end the run
    #[arg(long, default_value_t = DEFAULT_TOTAL_JOBS)]
    total_jobs: usize,

    /// Rate of the exponential service-demand distribution (per second)
    #[arg(long, alias = "prob-comp-time", default_value_t = DEFAULT_LAMBDA)]
    lambda: f64,

    /// Scheduler decision latency (microseconds)
    #[arg(long, default_value_t = DEFAULT_SCHED_LATENCY_US)]
    sched_time: Micros,

    /// Context switch latency (microseconds)
    #[arg(long, default_value_t = DEFAULT_CONTEXT_SWITCH_US)]
    cs_time: Micros,

    /// Tick period (milliseconds)
    #[arg(long, default_value_t = DEFAULT_TICK_PERIOD_MS)]
    tick_time: u64,

    /// Probability of a new job arriving at each tick
    #[arg(long, default_value_t = DEFAULT_ADMISSION_PROBABILITY)]
    prob_new_job: f64,

    /// Seed the random source from the OS
    #[arg(long)]
    randomize: bool,

    /// Seed used unless --randomize is given
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// At most this many times --total-jobs jobs are admitted
    #[arg(long, default_value_t = DEFAULT_ADMISSION_MULTIPLIER)]
    admission_multiplier: usize,

    /// Print every job lifecycle event before the summary
    #[arg(long)]
    trace: bool,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn config(&self) -> SimulationConfig {
        SimulationConfig::new(self.alg)
            .with_init_jobs(self.init_jobs)
            .with_total_jobs(self.total_jobs)
            .with_lambda(self.lambda)
            .with_sched_latency(self.sched_time)
            .with_context_switch(self.cs_time)
            .with_tick_period(self.tick_time)
            .with_admission_probability(self.prob_new_job)
            .with_admission_multiplier(self.admission_multiplier)
            .with_randomize(self.randomize)
            .with_seed(self.seed)
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    #[serde(flatten)]
    report: SimulationReport<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace: Option<&'a [TraceEvent]>,
}

fn main() -> ExitCode {
    let program = program_name();
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries only the report.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&program, &*err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = cli.config();
    let mut sim = Simulation::new(config.clone())?;

    let mut events: Vec<TraceEvent> = Vec::new();
    let stats = if cli.trace {
        sim.run_traced(&mut events)?
    } else {
        sim.run_traced(&mut LogTrace)?
    };
    let report = SimulationReport::new(&config, &stats);

    if cli.json {
        let output = JsonOutput {
            report,
            trace: cli.trace.then_some(events.as_slice()),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for event in &events {
            println!("{event}");
        }
        print!("{report}");
    }
    Ok(())
}

fn program_name() -> String {
    std::env::args()
        .next()
        .as_deref()
        .and_then(|arg| Path::new(arg).file_name())
        .and_then(|name| name.to_str())
        .map_or_else(|| DEFAULT_PROGRAM.to_string(), str::to_string)
}

fn report_error(program: &str, err: &dyn std::error::Error) {
    eprintln!("{}", error_line(program, err));
}

fn error_line(program: &str, err: &dyn std::error::Error) -> String {
    format!("{program}: {err}")
}

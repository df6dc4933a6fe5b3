//! Discrete-time simulator for single-CPU job scheduling.
//!
//! Jobs with exponentially distributed service demands arrive over time and
//! compete for one CPU under First-Come-First-Served, Shortest-Job-First or
//! Round-Robin scheduling. Every dispatch decision costs scheduler latency
//! followed by a context switch, and the run reports mean response, wait and
//! turnaround times.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Job`, `JobRegistry`, `SimulationConfig`, `Policy`
//! - **`generator`**: Exponential service-demand sampling
//! - **`dispatching`**: The `SchedulingPolicy` trait and the built-in policies
//! - **`simulation`**: The event-driven driver, statistics and trace events
//! - **`report`**: Plain-text and JSON summaries
//! - **`validation`**: Configuration checks
//!
//! # Example
//!
//! ```
//! use cpu_sched_sim::models::{Policy, SimulationConfig};
//! use cpu_sched_sim::simulation::simulate;
//!
//! let config = SimulationConfig::new(Policy::RoundRobin)
//!     .with_total_jobs(10)
//!     .with_seed(7);
//! let stats = simulate(config).unwrap();
//! assert_eq!(stats.jobs_completed, 10);
//! ```
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5
//! - Harchol-Balter (2013), "Performance Modeling and Design of Computer Systems"

pub mod dispatching;
pub mod error;
pub mod generator;
pub mod models;
pub mod report;
pub mod simulation;
pub mod validation;

pub use error::SimulationError;
pub use report::SimulationReport;
pub use simulation::{simulate, Simulation, SimulationStats};

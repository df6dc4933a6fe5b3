//! Discrete-time simulation of a single CPU.
//!
//! - **`engine`**: the driver loop ([`Simulation`])
//! - **`timeline`**: clock, CPU phase and next-event selection
//! - **`stats`**: response, wait and turnaround averages
//! - **`trace`**: optional per-job lifecycle events

mod engine;
pub mod stats;
pub mod timeline;
pub mod trace;

pub use engine::{simulate, Simulation};
pub use stats::{SimulationStats, StatsAccumulator};
pub use trace::{LogTrace, NullTrace, TraceEvent, TraceSink};

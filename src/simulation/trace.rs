//! Trace events emitted by the driver.
//!
//! A run can hand every lifecycle transition to a [`TraceSink`]: collect
//! them in a `Vec`, forward them to `tracing`, or drop them.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{JobId, Micros};

/// A timestamped job lifecycle event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceEvent {
    /// A job entered the registry.
    Admitted {
        at_us: Micros,
        job: JobId,
        demand_us: Micros,
    },
    /// A job moved into Running. `first` marks its first-ever dispatch.
    Dispatched {
        at_us: Micros,
        job: JobId,
        first: bool,
    },
    /// A running job was returned to Waiting by a tick.
    Preempted { at_us: Micros, job: JobId },
    /// A job received its full demand.
    Finished { at_us: Micros, job: JobId },
}

impl TraceEvent {
    pub fn at_us(&self) -> Micros {
        match *self {
            TraceEvent::Admitted { at_us, .. }
            | TraceEvent::Dispatched { at_us, .. }
            | TraceEvent::Preempted { at_us, .. }
            | TraceEvent::Finished { at_us, .. } => at_us,
        }
    }

    pub fn job(&self) -> JobId {
        match *self {
            TraceEvent::Admitted { job, .. }
            | TraceEvent::Dispatched { job, .. }
            | TraceEvent::Preempted { job, .. }
            | TraceEvent::Finished { job, .. } => job,
        }
    }
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            TraceEvent::Admitted {
                at_us,
                job,
                demand_us,
            } => write!(f, "t={at_us} job {job} admitted, needing {demand_us} usec"),
            TraceEvent::Dispatched { at_us, job, first } => {
                write!(f, "t={at_us} job {job} dispatched")?;
                if first {
                    f.write_str(" (first run)")?;
                }
                Ok(())
            }
            TraceEvent::Preempted { at_us, job } => write!(f, "t={at_us} job {job} preempted"),
            TraceEvent::Finished { at_us, job } => write!(f, "t={at_us} job {job} finished"),
        }
    }
}

/// Consumer of trace events.
pub trait TraceSink {
    fn record(&mut self, event: TraceEvent);
}

impl TraceSink for Vec<TraceEvent> {
    fn record(&mut self, event: TraceEvent) {
        self.push(event);
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTrace;

impl TraceSink for NullTrace {
    fn record(&mut self, _event: TraceEvent) {}
}

/// Forwards events to `tracing` at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTrace;

impl TraceSink for LogTrace {
    fn record(&mut self, event: TraceEvent) {
        tracing::debug!(at_us = event.at_us(), job = event.job(), "{event}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let event = TraceEvent::Dispatched {
            at_us: 70,
            job: 4,
            first: true,
        };
        assert_eq!(event.at_us(), 70);
        assert_eq!(event.job(), 4);
        assert_eq!(event.to_string(), "t=70 job 4 dispatched (first run)");
    }

    #[test]
    fn test_vec_sink_collects_in_order() {
        let mut sink: Vec<TraceEvent> = Vec::new();
        sink.record(TraceEvent::Admitted {
            at_us: 0,
            job: 0,
            demand_us: 10,
        });
        sink.record(TraceEvent::Finished { at_us: 10, job: 0 });
        assert_eq!(sink.len(), 2);
        assert_eq!(sink[1].at_us(), 10);
    }

    #[test]
    fn test_serialized_tag() {
        let json = serde_json::to_string(&TraceEvent::Preempted { at_us: 5, job: 1 }).unwrap();
        assert_eq!(json, r#"{"event":"preempted","at_us":5,"job":1}"#);
    }
}

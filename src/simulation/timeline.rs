//! Simulated clock, CPU phase and the next-event computation.
//!
//! The CPU is always in exactly one [`Phase`]. Each phase other than `Idle`
//! ends at a known timestamp, and ticks fire on a fixed grid, so the driver
//! never needs to poll: it jumps straight to the earliest pending event.

use crate::dispatching::DecisionTrigger;
use crate::models::{JobId, Micros};

/// Monotonic microsecond clock with a fixed tick grid starting at t=0.
#[derive(Debug, Clone)]
pub struct Clock {
    now: Micros,
    tick_period: Micros,
    next_tick: Micros,
    ticks: u64,
}

impl Clock {
    pub fn new(tick_period: Micros) -> Self {
        debug_assert!(tick_period > 0, "tick period must be positive");
        Self {
            now: 0,
            tick_period,
            next_tick: 0,
            ticks: 0,
        }
    }

    pub fn now(&self) -> Micros {
        self.now
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn next_tick(&self) -> Micros {
        self.next_tick
    }

    /// Moves the clock forward to `at`, returning the elapsed interval.
    pub fn advance_to(&mut self, at: Micros) -> Micros {
        debug_assert!(at >= self.now, "clock moved backwards: {} -> {}", self.now, at);
        let delta = at.saturating_sub(self.now);
        self.now = self.now.max(at);
        delta
    }

    /// Consumes the tick due at the current time and schedules the next one.
    pub fn fire_tick(&mut self) -> u64 {
        debug_assert_eq!(self.now, self.next_tick);
        self.ticks += 1;
        self.next_tick = self.next_tick.saturating_add(self.tick_period);
        self.ticks
    }
}

/// What the CPU is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing waiting and nothing running.
    Idle,
    /// A scheduler decision is in progress.
    Deciding {
        since: Micros,
        trigger: DecisionTrigger,
    },
    /// The dispatched job is being switched in.
    Switching { job: JobId, until: Micros },
    /// The job is receiving service.
    Serving { job: JobId, since: Micros },
}

/// The next thing that happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// The served job reaches its demand.
    Completion { job: JobId },
    /// The context switch ends and service begins.
    SwitchDone { job: JobId },
    /// The pending decision resolves.
    DecisionDue {
        triggered_at: Micros,
        trigger: DecisionTrigger,
    },
    /// A tick boundary.
    Tick,
}

impl Event {
    /// Processing order among events sharing a timestamp: the CPU phase
    /// settles before the tick looks at it.
    fn rank(&self) -> u8 {
        match self {
            Event::Completion { .. } => 0,
            Event::SwitchDone { .. } => 1,
            Event::DecisionDue { .. } => 2,
            Event::Tick => 3,
        }
    }
}

/// Computes the earliest pending event.
///
/// `remaining` is the outstanding demand of the served job, if any.
pub fn next_event(
    clock: &Clock,
    phase: Phase,
    sched_latency: Micros,
    remaining: Micros,
) -> (Micros, Event) {
    let phase_event = match phase {
        Phase::Idle => None,
        Phase::Deciding { since, trigger } => Some((
            since.saturating_add(sched_latency),
            Event::DecisionDue {
                triggered_at: since,
                trigger,
            },
        )),
        Phase::Switching { job, until } => Some((until, Event::SwitchDone { job })),
        Phase::Serving { job, .. } => Some((
            clock.now().saturating_add(remaining),
            Event::Completion { job },
        )),
    };

    let tick = (clock.next_tick(), Event::Tick);
    match phase_event {
        Some(candidate) if (candidate.0, candidate.1.rank()) < (tick.0, tick.1.rank()) => candidate,
        _ => tick,
    }
}

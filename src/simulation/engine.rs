//! Event-driven simulation driver.
//!
//! # Algorithm
//!
//! 1. Admit the initial jobs at t=0.
//! 2. Find the earliest pending event: completion of the served job, end of
//!    the context switch, resolution of the scheduler decision, or the next
//!    tick.
//! 3. Jump the clock to it. If a job was being served over the skipped
//!    interval, credit it with service and credit every Waiting job with the
//!    same amount of wait; overhead intervals credit nothing.
//! 4. Handle the event, then repeat until `total_jobs` jobs have finished.
//!
//! # Complexity
//! O(e * n) where e = events (ticks + dispatches + completions) and n = jobs
//! admitted, instead of one loop iteration per simulated microsecond.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use super::stats::{SimulationStats, StatsAccumulator};
use super::timeline::{self, Clock, Event, Phase};
use super::trace::{LogTrace, TraceEvent, TraceSink};
use crate::dispatching::{self, DecisionContext, DecisionTrigger, SchedulingPolicy};
use crate::error::SimulationError;
use crate::generator::JobGenerator;
use crate::models::{Job, JobId, JobRegistry, JobState, Micros, SimulationConfig};
use crate::validation::{validate_config, validate_initial_jobs};

/// A single simulation run.
///
/// Owns its registry, random source and statistics, so independent runs can
/// execute on separate threads.
///
/// # Example
///
/// ```
/// use cpu_sched_sim::models::{Policy, SimulationConfig};
/// use cpu_sched_sim::simulation::Simulation;
///
/// let config = SimulationConfig::new(Policy::Sjf)
///     .with_init_jobs(4)
///     .with_total_jobs(4)
///     .with_admission_probability(0.0);
///
/// let mut sim = Simulation::new(config).unwrap();
/// let stats = sim.run().unwrap();
/// assert_eq!(stats.jobs_completed, 4);
/// ```
#[derive(Debug)]
pub struct Simulation {
    config: SimulationConfig,
    policy: Box<dyn SchedulingPolicy>,
    generator: JobGenerator,
    rng: StdRng,
    jobs: JobRegistry,
    stats: StatsAccumulator,
    clock: Clock,
    phase: Phase,
    previous: Option<JobId>,
    initial_demands: Option<Vec<Micros>>,
    started: bool,
}

impl Simulation {
    /// Creates a run using the built-in strategy for `config.policy`.
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        let policy = dispatching::strategy(config.policy);
        Self::from_parts(config, policy)
    }

    /// Creates a run driven by a custom policy. `config.policy` is only used
    /// for reporting.
    pub fn with_policy<P: SchedulingPolicy + 'static>(
        config: SimulationConfig,
        policy: P,
    ) -> Result<Self, SimulationError> {
        Self::from_parts(config, Box::new(policy))
    }

    fn from_parts(
        config: SimulationConfig,
        policy: Box<dyn SchedulingPolicy>,
    ) -> Result<Self, SimulationError> {
        let generator = JobGenerator::new(config.lambda)?;
        validate_config(&config).map_err(SimulationError::InvalidConfig)?;

        let rng = if config.randomize {
            StdRng::from_os_rng()
        } else {
            StdRng::seed_from_u64(config.seed)
        };
        let jobs = JobRegistry::with_ceiling(config.admission_ceiling());
        let stats = StatsAccumulator::new(config.total_jobs);
        let clock = Clock::new(config.tick_period_us());

        Ok(Self {
            config,
            policy,
            generator,
            rng,
            jobs,
            stats,
            clock,
            phase: Phase::Idle,
            previous: None,
            initial_demands: None,
            started: false,
        })
    }

    /// Uses fixed demands for the jobs present at t=0 instead of drawing
    /// `init_jobs` of them from the generator.
    ///
    /// Fails with [`SimulationError::InvalidConfig`] if the demands do not
    /// fit under the admission ceiling.
    pub fn with_initial_demands(mut self, demands: Vec<Micros>) -> Result<Self, SimulationError> {
        validate_initial_jobs(demands.len(), &self.config).map_err(SimulationError::InvalidConfig)?;
        self.initial_demands = Some(demands);
        Ok(self)
    }

    /// Every job admitted so far.
    pub fn jobs(&self) -> &JobRegistry {
        &self.jobs
    }

    /// Runs to completion, logging trace events at debug level.
    pub fn run(&mut self) -> Result<SimulationStats, SimulationError> {
        self.run_traced(&mut LogTrace)
    }

    /// Runs to completion, delivering every trace event to `trace`.
    pub fn run_traced(
        &mut self,
        trace: &mut dyn TraceSink,
    ) -> Result<SimulationStats, SimulationError> {
        let target = self.config.total_jobs;
        info!(
            policy = self.policy.name(),
            description = self.policy.description(),
            init_jobs = self.config.init_jobs,
            total_jobs = target,
            mean_demand_us = self.generator.mean_demand_us(),
            "simulation starting"
        );

        if !self.started {
            self.started = true;
            self.admit_initial(trace);
        }

        while self.jobs.finished_count() < target {
            let remaining = match self.phase {
                Phase::Serving { job, .. } => self.jobs.get(job).map_or(0, Job::remaining_us),
                _ => 0,
            };
            let (at, event) = timeline::next_event(
                &self.clock,
                self.phase,
                self.config.sched_latency_us,
                remaining,
            );
            self.advance_to(at);

            match event {
                Event::Completion { job } => self.complete(job, trace)?,
                Event::SwitchDone { job } => {
                    self.phase = Phase::Serving {
                        job,
                        since: self.clock.now(),
                    };
                }
                Event::DecisionDue {
                    triggered_at,
                    trigger,
                } => self.decide(triggered_at, trigger, trace)?,
                Event::Tick => self.tick(trace)?,
            }
        }

        let stats = self.stats();
        info!(
            elapsed_us = stats.elapsed_us,
            ticks = stats.ticks,
            avg_response_secs = stats.avg_response_secs,
            avg_turnaround_secs = stats.avg_turnaround_secs,
            "simulation finished"
        );
        Ok(stats)
    }

    /// Statistics gathered so far.
    pub fn stats(&self) -> SimulationStats {
        self.stats
            .finish(self.jobs.len(), self.clock.ticks(), self.clock.now())
    }

    fn admit_initial(&mut self, trace: &mut dyn TraceSink) {
        let demands = match self.initial_demands.take() {
            Some(demands) => demands,
            None => (0..self.config.init_jobs)
                .map(|_| self.generator.sample_demand(&mut self.rng))
                .collect(),
        };
        for demand_us in demands {
            self.admit(Job::new(0, demand_us), trace);
        }
    }

    fn admit(&mut self, job: Job, trace: &mut dyn TraceSink) {
        let (at_us, demand_us) = (job.arrival_us, job.demand_us);
        if let Some(id) = self.jobs.admit(job) {
            trace.record(TraceEvent::Admitted {
                at_us,
                job: id,
                demand_us,
            });
        }
    }

    fn advance_to(&mut self, at: Micros) {
        let delta = self.clock.advance_to(at);
        if delta == 0 {
            return;
        }
        if let Phase::Serving { job, .. } = self.phase {
            if let Some(running) = self.jobs.get_mut(job) {
                running.serve(delta);
            }
            self.jobs.accrue_waiting(delta);
        }
    }

    fn tick(&mut self, trace: &mut dyn TraceSink) -> Result<(), SimulationError> {
        let now = self.clock.now();
        self.clock.fire_tick();
        self.try_admit(now, trace);

        match self.phase {
            Phase::Serving { job, since } if self.policy.preempts_on_tick() && since < now => {
                if let Some(running) = self.jobs.get_mut(job) {
                    running.preempt();
                }
                trace.record(TraceEvent::Preempted { at_us: now, job });
                self.phase = Phase::Deciding {
                    since: now,
                    trigger: DecisionTrigger::Tick,
                };
            }
            Phase::Idle if self.jobs.has_waiting() => {
                self.phase = Phase::Deciding {
                    since: now,
                    trigger: DecisionTrigger::Tick,
                };
            }
            Phase::Idle => self.check_stalled()?,
            // Non-preemptive service and in-flight overhead are left alone.
            _ => {}
        }
        Ok(())
    }

    fn try_admit(&mut self, now: Micros, trace: &mut dyn TraceSink) {
        let probability = self.config.admission_probability;
        if probability <= 0.0 || !self.jobs.can_admit() {
            return;
        }
        if self.rng.random::<f64>() >= probability {
            return;
        }
        let job = self.generator.generate(now, &mut self.rng);
        self.admit(job, trace);
    }

    fn decide(
        &mut self,
        triggered_at: Micros,
        trigger: DecisionTrigger,
        trace: &mut dyn TraceSink,
    ) -> Result<(), SimulationError> {
        let context = DecisionContext {
            now_us: self.clock.now(),
            triggered_at_us: triggered_at,
            trigger,
            previous: self.previous,
        };

        let selected = self.policy.select_next(&self.jobs, &context);
        debug!(
            trigger = ?context.trigger,
            triggered_at_us = context.triggered_at_us,
            now_us = context.now_us,
            previous = ?context.previous,
            selected = ?selected,
            "scheduling decision"
        );

        match selected {
            Some(id) => self.dispatch(id, triggered_at, trace),
            None => {
                if let Some(waiting) = self.jobs.waiting().next() {
                    return Err(SimulationError::InvariantViolation {
                        clock_us: self.clock.now(),
                        job: waiting.id,
                        state: Some(waiting.state),
                        detail: "policy selected nothing while jobs are waiting",
                    });
                }
                self.phase = Phase::Idle;
                self.check_stalled()
            }
        }
    }

    fn dispatch(
        &mut self,
        id: JobId,
        triggered_at: Micros,
        trace: &mut dyn TraceSink,
    ) -> Result<(), SimulationError> {
        let now = self.clock.now();
        let job = self
            .jobs
            .get_mut(id)
            .ok_or(SimulationError::InvariantViolation {
                clock_us: now,
                job: id,
                state: None,
                detail: "policy selected a job outside the registry",
            })?;
        if job.state != JobState::Waiting {
            return Err(SimulationError::InvariantViolation {
                clock_us: now,
                job: id,
                state: Some(job.state),
                detail: "policy selected a job that is not waiting",
            });
        }

        let first = job.dispatch(triggered_at);
        self.previous = Some(id);
        trace.record(TraceEvent::Dispatched {
            at_us: now,
            job: id,
            first,
        });
        self.phase = Phase::Switching {
            job: id,
            until: now.saturating_add(self.config.context_switch_us),
        };
        Ok(())
    }

    fn complete(&mut self, id: JobId, trace: &mut dyn TraceSink) -> Result<(), SimulationError> {
        let now = self.clock.now();
        let state = self.jobs.get(id).map(|job| job.state);
        if state != Some(JobState::Running) {
            return Err(SimulationError::InvariantViolation {
                clock_us: now,
                job: id,
                state,
                detail: "completion fired for a job that is not running",
            });
        }

        if let Some(finished) = self.jobs.finish(id, now) {
            debug!(
                job = id,
                response_us = finished.response_us.unwrap_or(0),
                wait_us = finished.wait_us,
                turnaround_us = finished.turnaround_us,
                "job accounting"
            );
            self.stats.record_completion(finished);
        }
        trace.record(TraceEvent::Finished { at_us: now, job: id });

        self.phase = if self.jobs.finished_count() < self.config.total_jobs {
            Phase::Deciding {
                since: now,
                trigger: DecisionTrigger::Completion,
            }
        } else {
            Phase::Idle
        };
        Ok(())
    }

    /// Fails when nothing is waiting and no job can ever be admitted again.
    fn check_stalled(&self) -> Result<(), SimulationError> {
        let admissions_left =
            self.jobs.can_admit() && self.config.admission_probability > 0.0;
        if admissions_left || self.jobs.has_waiting() {
            return Ok(());
        }

        warn!(
            clock_us = self.clock.now(),
            finished = self.jobs.finished_count(),
            admitted = self.jobs.len(),
            "no runnable job and no admissions left"
        );
        Err(SimulationError::Stalled {
            clock_us: self.clock.now(),
            finished: self.jobs.finished_count(),
            target: self.config.total_jobs,
            admitted: self.jobs.len(),
        })
    }
}

/// Runs `config` once with the built-in policy and discards the trace.
pub fn simulate(config: SimulationConfig) -> Result<SimulationStats, SimulationError> {
    let mut sim = Simulation::new(config)?;
    sim.run_traced(&mut super::trace::NullTrace)
}

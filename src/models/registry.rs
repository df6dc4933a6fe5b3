//! Append-only job registry.
//!
//! Jobs are stored in admission order, so a job's [`JobId`] doubles as its
//! arrival rank. The registry grows on demand; the only bound is the
//! admission ceiling, which is a policy knob rather than a capacity limit.

use super::{Job, JobId, JobState, Micros};

/// Ordered, growable collection of every job admitted during a run.
#[derive(Debug, Clone)]
pub struct JobRegistry {
    jobs: Vec<Job>,
    ceiling: usize,
    finished: usize,
}

impl JobRegistry {
    /// Creates an empty registry that admits at most `ceiling` jobs.
    pub fn with_ceiling(ceiling: usize) -> Self {
        Self {
            jobs: Vec::new(),
            ceiling,
            finished: 0,
        }
    }

    /// Admits a freshly generated job, assigning its id and moving it to
    /// Waiting. Returns `None` if the ceiling has been reached.
    pub fn admit(&mut self, mut job: Job) -> Option<JobId> {
        if !self.can_admit() {
            return None;
        }
        debug_assert_eq!(job.state, JobState::Created);

        let id = self.jobs.len();
        job.id = id;
        job.state = JobState::Waiting;
        self.jobs.push(job);
        Some(id)
    }

    /// Whether another job may still be admitted.
    pub fn can_admit(&self) -> bool {
        self.jobs.len() < self.ceiling
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn get(&self, id: JobId) -> Option<&Job> {
        self.jobs.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: JobId) -> Option<&mut Job> {
        self.jobs.get_mut(id)
    }

    /// All jobs in admission order.
    pub fn iter(&self) -> impl Iterator<Item = &Job> {
        self.jobs.iter()
    }

    /// Jobs currently in the Waiting state, in admission order.
    pub fn waiting(&self) -> impl Iterator<Item = &Job> {
        self.jobs.iter().filter(|job| job.is_waiting())
    }

    pub fn has_waiting(&self) -> bool {
        self.jobs.iter().any(Job::is_waiting)
    }

    pub fn finished_count(&self) -> usize {
        self.finished
    }

    /// Accrues `delta` of wait and turnaround time on every Waiting job.
    pub(crate) fn accrue_waiting(&mut self, delta: Micros) {
        if delta == 0 {
            return;
        }
        for job in self.jobs.iter_mut().filter(|job| job.is_waiting()) {
            job.wait(delta);
        }
    }

    /// Marks a fully served job Finished.
    pub(crate) fn finish(&mut self, id: JobId, at_us: Micros) -> Option<&Job> {
        let job = self.jobs.get_mut(id)?;
        if job.is_finished() {
            return Some(job);
        }
        job.finish(at_us);
        self.finished += 1;
        Some(job)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admit_assigns_sequential_ids() {
        let mut registry = JobRegistry::with_ceiling(4);
        assert_eq!(registry.admit(Job::new(0, 10)), Some(0));
        assert_eq!(registry.admit(Job::new(0, 20)), Some(1));
        assert_eq!(registry.admit(Job::new(5, 30)), Some(2));

        assert_eq!(registry.len(), 3);
        for (index, job) in registry.iter().enumerate() {
            assert_eq!(job.id, index);
            assert_eq!(job.state, JobState::Waiting);
        }
    }

    #[test]
    fn test_admission_ceiling() {
        let mut registry = JobRegistry::with_ceiling(2);
        registry.admit(Job::new(0, 10));
        registry.admit(Job::new(0, 10));

        assert!(!registry.can_admit());
        assert_eq!(registry.admit(Job::new(0, 10)), None);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_accrue_waiting_skips_running_jobs() {
        let mut registry = JobRegistry::with_ceiling(8);
        registry.admit(Job::new(0, 100));
        registry.admit(Job::new(0, 100));
        registry.get_mut(0).unwrap().dispatch(0);

        registry.accrue_waiting(25);

        assert_eq!(registry.get(0).unwrap().wait_us, 0);
        assert_eq!(registry.get(1).unwrap().wait_us, 25);
        assert_eq!(registry.get(1).unwrap().turnaround_us, 25);
    }

    #[test]
    fn test_finish_counts_once() {
        let mut registry = JobRegistry::with_ceiling(8);
        registry.admit(Job::new(0, 10));
        let job = registry.get_mut(0).unwrap();
        job.dispatch(0);
        job.serve(10);

        registry.finish(0, 10);
        registry.finish(0, 20);

        assert_eq!(registry.finished_count(), 1);
        assert_eq!(registry.get(0).unwrap().completed_at_us, Some(10));
        assert!(!registry.has_waiting());
    }
}

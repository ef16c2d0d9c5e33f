//! Owned, immutable views of simulation state for renderers.

use std::fmt;

use schedsim_core::{Pid, ProcessState, ProcessView, TickId};
use schedsim_policy::PolicyKind;

use crate::metrics::PerformanceMetrics;

/// Run status of a simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SimStatus {
    /// Not started, or just reset.
    #[default]
    Idle,
    /// `step` advances the clock.
    Running,
    /// Started, then paused; state preserved.
    Paused,
}

impl SimStatus {
    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Paused => "paused",
        }
    }
}

impl fmt::Display for SimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a renderer needs at one tick.
///
/// Snapshots own their data and are never updated in place: a later
/// tick produces a new value. Two snapshots taken without a mutation in
/// between compare equal.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    /// Ticks elapsed so far.
    pub tick: TickId,
    /// Run status.
    pub status: SimStatus,
    /// Installed policy.
    pub policy: PolicyKind,
    /// The process on the CPU after the last tick, if any.
    pub running: Option<Pid>,
    /// Every registered process, in pid order.
    pub processes: Vec<ProcessView>,
    /// Ready queue, head first.
    pub ready_queue: Vec<Pid>,
    /// Waiting queue, head first.
    pub waiting_queue: Vec<Pid>,
    /// Terminated processes in completion order.
    pub completed_processes: Vec<Pid>,
    /// Aggregate metrics at this tick.
    pub performance_metrics: PerformanceMetrics,
}

impl Snapshot {
    /// Whether every registered process has terminated.
    ///
    /// True for an empty workload.
    pub fn all_terminated(&self) -> bool {
        self.processes
            .iter()
            .all(|p| p.state == ProcessState::Terminated)
    }

    /// Look up one process by pid.
    pub fn process(&self, pid: Pid) -> Option<&ProcessView> {
        self.processes.iter().find(|p| p.pid == pid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty() -> Snapshot {
        Snapshot {
            tick: TickId(0),
            status: SimStatus::Idle,
            policy: PolicyKind::Fcfs,
            running: None,
            processes: Vec::new(),
            ready_queue: Vec::new(),
            waiting_queue: Vec::new(),
            completed_processes: Vec::new(),
            performance_metrics: PerformanceMetrics::default(),
        }
    }

    #[test]
    fn empty_workload_counts_as_drained() {
        assert!(empty().all_terminated());
        assert!(empty().process(Pid(0)).is_none());
    }

    #[test]
    fn status_names() {
        assert_eq!(SimStatus::default(), SimStatus::Idle);
        assert_eq!(SimStatus::Paused.to_string(), "paused");
    }
}

//! The command surface consumed by transport layers.

use crate::id::Pid;
use crate::process::ProcessSpec;

/// A single command against one simulation instance.
///
/// Commands are applied one at a time under a single-writer discipline.
/// A rejected command has no observable side effects.
///
/// # Examples
///
/// ```
/// use schedsim_core::{Command, Pid};
///
/// let add = Command::add_process(5, 0, 1);
/// let start = Command::Start { algorithm: "rr".to_string() };
/// let delete = Command::DeleteProcess { pid: Pid(0) };
///
/// assert!(add.is_mutating());
/// assert_eq!(start.name(), "start");
/// assert!(!Command::Snapshot.is_mutating());
/// # let _ = delete;
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Register a new process in the New state.
    AddProcess(ProcessSpec),
    /// Replace the definition of a process that has not yet run.
    UpdateProcess {
        /// The process to edit.
        pid: Pid,
        /// Its new definition.
        spec: ProcessSpec,
    },
    /// Remove a process from the registry and every queue.
    DeleteProcess {
        /// The process to remove.
        pid: Pid,
    },
    /// Replace the workload with `count` randomly generated processes.
    GenerateRandom {
        /// Number of processes to generate. Must be at least 1.
        count: usize,
    },
    /// Select a policy by name and begin (or resume) ticking.
    Start {
        /// Policy name, e.g. `"fcfs"`, `"sjf"`, `"priority"`, `"rr"`.
        algorithm: String,
    },
    /// Suspend ticking, preserving all state.
    Pause,
    /// Advance the clock by one tick.
    Step,
    /// Return to Idle at tick 0.
    Reset,
    /// Read the current snapshot without mutating anything.
    Snapshot,
}

impl Command {
    /// Shorthand for a CPU-bound [`Command::AddProcess`].
    pub fn add_process(burst_time: u32, arrival_time: u64, priority: u8) -> Self {
        Self::AddProcess(ProcessSpec::new(burst_time, arrival_time, priority))
    }

    /// Shorthand for a CPU-bound [`Command::UpdateProcess`].
    pub fn update_process(pid: Pid, burst_time: u32, arrival_time: u64, priority: u8) -> Self {
        Self::UpdateProcess {
            pid,
            spec: ProcessSpec::new(burst_time, arrival_time, priority),
        }
    }

    /// Stable command name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddProcess(_) => "add_process",
            Self::UpdateProcess { .. } => "update_process",
            Self::DeleteProcess { .. } => "delete_process",
            Self::GenerateRandom { .. } => "generate_random",
            Self::Start { .. } => "start",
            Self::Pause => "pause",
            Self::Step => "step",
            Self::Reset => "reset",
            Self::Snapshot => "snapshot",
        }
    }

    /// Whether applying the command may change simulation state.
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Self::Snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shorthands_build_cpu_bound_specs() {
        let cmd = Command::update_process(Pid(2), 3, 1, 4);
        match cmd {
            Command::UpdateProcess { pid, spec } => {
                assert_eq!(pid, Pid(2));
                assert_eq!(spec, ProcessSpec::new(3, 1, 4));
                assert!(spec.io.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn only_snapshot_is_read_only() {
        let all = [
            Command::add_process(1, 0, 0),
            Command::update_process(Pid(0), 1, 0, 0),
            Command::DeleteProcess { pid: Pid(0) },
            Command::GenerateRandom { count: 1 },
            Command::Start {
                algorithm: "fcfs".into(),
            },
            Command::Pause,
            Command::Step,
            Command::Reset,
        ];
        assert!(all.iter().all(Command::is_mutating));
        assert!(!Command::Snapshot.is_mutating());
    }
}

//! Error types for the schedsim simulator.
//!
//! Organized by subsystem: registry (validation and not-found errors on
//! process records) and simulation (lifecycle state errors). Both are
//! wrapped by [`CommandError`] at the command surface. Every error is
//! local and recoverable: a rejected command leaves state untouched.

use std::error::Error;
use std::fmt;

use crate::id::Pid;
use crate::process::ProcessState;

/// Errors from the process registry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistryError {
    /// Burst, arrival, priority or IO profile out of range.
    InvalidProcessParameters {
        /// Which parameter was rejected and why.
        reason: String,
    },
    /// No process with this pid exists.
    ProcessNotFound {
        /// The pid that was looked up.
        pid: Pid,
    },
    /// The process has already terminated and can no longer be edited.
    ProcessAlreadyTerminated {
        /// The terminated process.
        pid: Pid,
    },
    /// The process has left New/Ready (or has already run) and its
    /// definition can no longer be edited.
    InvalidState {
        /// The process that was targeted.
        pid: Pid,
        /// The state it was in when the edit was rejected.
        state: ProcessState,
    },
    /// Random generation was asked for fewer than one process.
    InvalidCount {
        /// The rejected count.
        count: usize,
    },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidProcessParameters { reason } => {
                write!(f, "invalid process parameters: {reason}")
            }
            Self::ProcessNotFound { pid } => write!(f, "process {pid} not found"),
            Self::ProcessAlreadyTerminated { pid } => {
                write!(f, "process {pid} has already terminated")
            }
            Self::InvalidState { pid, state } => {
                write!(f, "process {pid} cannot be edited in state {state}")
            }
            Self::InvalidCount { count } => {
                write!(f, "process count must be at least 1, got {count}")
            }
        }
    }
}

impl Error for RegistryError {}

/// Errors from the simulation lifecycle (start/pause/step).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SimulationError {
    /// The algorithm name is not one of the recognized policies.
    InvalidAlgorithm {
        /// The name that failed to parse.
        name: String,
    },
    /// `start` was called while the simulation is already running.
    AlreadyRunning,
    /// The command requires a running simulation.
    NotRunning,
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAlgorithm { name } => write!(f, "unknown scheduling algorithm '{name}'"),
            Self::AlreadyRunning => write!(f, "simulation is already running"),
            Self::NotRunning => write!(f, "simulation is not running"),
        }
    }
}

impl Error for SimulationError {}

/// Any failure returned from the command surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandError {
    /// A registry operation was rejected.
    Registry(RegistryError),
    /// A lifecycle operation was rejected.
    Simulation(SimulationError),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Registry(e) => write!(f, "registry: {e}"),
            Self::Simulation(e) => write!(f, "simulation: {e}"),
        }
    }
}

impl Error for CommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Registry(e) => Some(e),
            Self::Simulation(e) => Some(e),
        }
    }
}

impl From<RegistryError> for CommandError {
    fn from(e: RegistryError) -> Self {
        Self::Registry(e)
    }
}

impl From<SimulationError> for CommandError {
    fn from(e: SimulationError) -> Self {
        Self::Simulation(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_pid() {
        let e = RegistryError::ProcessNotFound { pid: Pid(7) };
        assert_eq!(e.to_string(), "process P7 not found");
    }

    #[test]
    fn command_error_chains_source() {
        let e: CommandError = SimulationError::NotRunning.into();
        assert_eq!(e.to_string(), "simulation: simulation is not running");
        let source = e.source().expect("wrapped error is the source");
        assert_eq!(source.to_string(), "simulation is not running");
    }

    #[test]
    fn invalid_state_names_the_state() {
        let e = RegistryError::InvalidState {
            pid: Pid(1),
            state: ProcessState::Running,
        };
        assert_eq!(e.to_string(), "process P1 cannot be edited in state Running");
    }
}

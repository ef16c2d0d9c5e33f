//! Error types for the replay system.

use std::fmt;

/// Errors that prevent a recording from being replayed at all.
///
/// A replay that runs but disagrees with the recording is reported as
/// a [`Divergence`](crate::compare::Divergence), not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayError {
    /// The replay target was built from a different configuration.
    ConfigMismatch {
        /// Hash stored in the recording.
        recorded: u64,
        /// Hash computed from the replay target's configuration.
        current: u64,
    },
    /// The replay target does not start from the recorded initial state.
    InitialStateMismatch {
        /// Initial snapshot hash stored in the recording.
        recorded: u64,
        /// Snapshot hash of the replay target.
        current: u64,
    },
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigMismatch { recorded, current } => {
                write!(
                    f,
                    "config hash mismatch: recorded={recorded:#018x}, current={current:#018x}"
                )
            }
            Self::InitialStateMismatch { recorded, current } => {
                write!(
                    f,
                    "initial state mismatch: recorded={recorded:#018x}, current={current:#018x}"
                )
            }
        }
    }
}

impl std::error::Error for ReplayError {}

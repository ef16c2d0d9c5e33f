//! Data types for replay recording and playback.

use schedsim_core::Command;

/// One applied command and what it left behind.
///
/// Rejected commands are recorded too: replay must reject them the
/// same way, and a rejection must leave the snapshot hash unchanged.
///
/// # Examples
///
/// ```
/// use schedsim_core::Command;
/// use schedsim_replay::Frame;
///
/// let frame = Frame {
///     command: Command::Step,
///     outcome_ok: true,
///     snapshot_hash: 0xDEAD_BEEF,
/// };
/// assert!(frame.outcome_ok);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// The command as submitted.
    pub command: Command,
    /// Whether the simulation accepted the command.
    pub outcome_ok: bool,
    /// [`snapshot_hash`](crate::hash::snapshot_hash) of the state after
    /// the command.
    pub snapshot_hash: u64,
}

/// A complete recorded session.
///
/// Captures everything needed to check that a fresh simulation is
/// comparable before its frames are replayed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recording {
    /// [`config_hash`](crate::hash::config_hash) of the recorded
    /// simulation's configuration.
    pub config_hash: u64,
    /// Snapshot hash when recording began.
    pub initial_hash: u64,
    /// Frames in application order.
    pub frames: Vec<Frame>,
}

impl Recording {
    /// Number of recorded frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether no command was recorded.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Hash of the state after the last frame, or the initial hash.
    pub fn final_hash(&self) -> u64 {
        self.frames
            .last()
            .map_or(self.initial_hash, |f| f.snapshot_hash)
    }
}

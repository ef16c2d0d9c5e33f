//! Replay verification.
//!
//! Re-applies recorded commands to a fresh simulation and compares the
//! outcome and snapshot hash after each one. Stops at the first
//! disagreement, since every later frame depends on it.

use schedsim_core::TickId;
use schedsim_engine::{Reply, Simulation};

use crate::error::ReplayError;
use crate::hash::{config_hash, snapshot_hash};
use crate::types::{Frame, Recording};

/// What disagreed at a divergent frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DivergenceKind {
    /// The command was accepted in one run and rejected in the other.
    Outcome {
        /// Whether the recorded run accepted it.
        recorded_ok: bool,
    },
    /// Both runs agreed on the outcome but ended in different states.
    SnapshotHash,
}

/// The first frame at which a replay disagreed with its recording.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Divergence {
    /// Index of the divergent frame.
    pub frame_index: usize,
    /// Replayed clock after applying the frame.
    pub tick: TickId,
    /// What disagreed.
    pub kind: DivergenceKind,
    /// Recorded snapshot hash.
    pub expected: u64,
    /// Replayed snapshot hash.
    pub actual: u64,
}

/// Re-apply `frames` to `simulation` and report the first divergence.
///
/// Returns `None` if every frame matched. The simulation is left in
/// the state reached after the last frame applied, including the
/// divergent one.
pub fn replay_and_compare(frames: &[Frame], simulation: &mut Simulation) -> Option<Divergence> {
    for (frame_index, frame) in frames.iter().enumerate() {
        let result = simulation.apply(frame.command.clone());
        let actual = match &result {
            Ok(Reply::Snapshot(snapshot)) => snapshot_hash(snapshot),
            _ => snapshot_hash(&simulation.snapshot()),
        };

        let kind = if result.is_ok() != frame.outcome_ok {
            DivergenceKind::Outcome {
                recorded_ok: frame.outcome_ok,
            }
        } else if actual != frame.snapshot_hash {
            DivergenceKind::SnapshotHash
        } else {
            continue;
        };

        let divergence = Divergence {
            frame_index,
            tick: simulation.current_tick(),
            kind,
            expected: frame.snapshot_hash,
            actual,
        };
        log::warn!(
            "replay diverged at frame {frame_index} ({}): {kind:?}",
            frame.command.name()
        );
        return Some(divergence);
    }
    None
}

/// Check that `simulation` matches the recording's configuration and
/// initial state, then replay its frames.
pub fn replay_recording(
    recording: &Recording,
    simulation: &mut Simulation,
) -> Result<Option<Divergence>, ReplayError> {
    let current = config_hash(simulation.config());
    if current != recording.config_hash {
        return Err(ReplayError::ConfigMismatch {
            recorded: recording.config_hash,
            current,
        });
    }
    let current = snapshot_hash(&simulation.snapshot());
    if current != recording.initial_hash {
        return Err(ReplayError::InitialStateMismatch {
            recorded: recording.initial_hash,
            current,
        });
    }
    Ok(replay_and_compare(&recording.frames, simulation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::Recorder;
    use schedsim_core::{Command, Pid};
    use schedsim_engine::SimConfig;

    fn fresh() -> Simulation {
        Simulation::new(SimConfig::default()).unwrap()
    }

    fn recorded_session() -> Recording {
        let mut rec = Recorder::new(fresh());
        rec.apply(Command::add_process(3, 0, 1)).unwrap();
        rec.apply(Command::add_process(2, 1, 0)).unwrap();
        rec.apply(Command::Start {
            algorithm: "priority".into(),
        })
        .unwrap();
        for _ in 0..5 {
            rec.apply(Command::Step).unwrap();
        }
        rec.finish().1
    }

    #[test]
    fn identical_replay_has_no_divergence() {
        let recording = recorded_session();
        let mut sim = fresh();
        assert_eq!(replay_recording(&recording, &mut sim), Ok(None));
        assert_eq!(snapshot_hash(&sim.snapshot()), recording.final_hash());
    }

    #[test]
    fn tampered_hash_is_reported_at_its_frame() {
        let mut recording = recorded_session();
        recording.frames[4].snapshot_hash ^= 1;
        let div = replay_and_compare(&recording.frames, &mut fresh()).unwrap();
        assert_eq!(div.frame_index, 4);
        assert_eq!(div.kind, DivergenceKind::SnapshotHash);
        assert_eq!(div.tick, TickId(2));
        assert_eq!(div.expected ^ 1, div.actual);
    }

    #[test]
    fn different_outcome_is_reported() {
        let mut recording = recorded_session();
        // Recorded as rejected, but pid 0 exists when replayed.
        recording.frames.insert(
            2,
            Frame {
                command: Command::DeleteProcess { pid: Pid(0) },
                outcome_ok: false,
                snapshot_hash: recording.frames[1].snapshot_hash,
            },
        );
        let div = replay_and_compare(&recording.frames, &mut fresh()).unwrap();
        assert_eq!(div.frame_index, 2);
        assert_eq!(div.kind, DivergenceKind::Outcome { recorded_ok: false });
    }

    #[test]
    fn config_mismatch_is_an_error() {
        let recording = recorded_session();
        let mut sim = Simulation::new(SimConfig {
            time_quantum: 5,
            ..SimConfig::default()
        })
        .unwrap();
        assert!(matches!(
            replay_recording(&recording, &mut sim),
            Err(ReplayError::ConfigMismatch { .. })
        ));
    }

    #[test]
    fn initial_state_mismatch_is_an_error() {
        let recording = recorded_session();
        let mut sim = fresh();
        sim.add_process(schedsim_core::ProcessSpec::new(1, 0, 0))
            .unwrap();
        assert!(matches!(
            replay_recording(&recording, &mut sim),
            Err(ReplayError::InitialStateMismatch { .. })
        ));
    }
}

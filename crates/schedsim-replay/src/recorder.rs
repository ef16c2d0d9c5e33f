//! Recording wrapper around a live simulation.

use std::fmt;

use schedsim_core::{Command, CommandError};
use schedsim_engine::{Reply, Simulation};

use crate::hash::{config_hash, snapshot_hash};
use crate::types::{Frame, Recording};

/// Applies commands to a [`Simulation`] and records a [`Frame`] for each.
///
/// # Examples
///
/// ```
/// use schedsim_core::Command;
/// use schedsim_engine::{SimConfig, Simulation};
/// use schedsim_replay::{replay_recording, Recorder};
///
/// let sim = Simulation::new(SimConfig::default()).unwrap();
/// let mut recorder = Recorder::new(sim);
/// recorder.apply(Command::add_process(3, 0, 1)).unwrap();
/// recorder.apply(Command::Start { algorithm: "fcfs".into() }).unwrap();
/// recorder.apply(Command::Step).unwrap();
/// assert_eq!(recorder.frames_recorded(), 3);
///
/// let (_, recording) = recorder.finish();
/// let mut fresh = Simulation::new(SimConfig::default()).unwrap();
/// assert_eq!(replay_recording(&recording, &mut fresh), Ok(None));
/// ```
pub struct Recorder {
    simulation: Simulation,
    recording: Recording,
}

impl Recorder {
    /// Start recording from the simulation's current state.
    pub fn new(simulation: Simulation) -> Self {
        let recording = Recording {
            config_hash: config_hash(simulation.config()),
            initial_hash: snapshot_hash(&simulation.snapshot()),
            frames: Vec::new(),
        };
        Self {
            simulation,
            recording,
        }
    }

    /// Apply one command and record its outcome.
    ///
    /// The command's result is passed through unchanged.
    pub fn apply(&mut self, command: Command) -> Result<Reply, CommandError> {
        let recorded = command.clone();
        let result = self.simulation.apply(command);
        let hash = match &result {
            Ok(Reply::Snapshot(snapshot)) => snapshot_hash(snapshot),
            _ => snapshot_hash(&self.simulation.snapshot()),
        };
        self.recording.frames.push(Frame {
            command: recorded,
            outcome_ok: result.is_ok(),
            snapshot_hash: hash,
        });
        result
    }

    /// The simulation being recorded.
    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    /// Frames recorded so far.
    pub fn frames(&self) -> &[Frame] {
        &self.recording.frames
    }

    /// Number of frames recorded so far.
    pub fn frames_recorded(&self) -> usize {
        self.recording.frames.len()
    }

    /// Stop recording, returning the simulation and the recording.
    pub fn finish(self) -> (Simulation, Recording) {
        log::debug!("recording finished after {} frames", self.recording.len());
        (self.simulation, self.recording)
    }
}

impl fmt::Debug for Recorder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recorder")
            .field("tick", &self.simulation.current_tick())
            .field("frames", &self.recording.frames.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schedsim_core::Pid;
    use schedsim_engine::SimConfig;

    fn recorder() -> Recorder {
        Recorder::new(Simulation::new(SimConfig::default()).unwrap())
    }

    #[test]
    fn records_accepted_and_rejected_commands() {
        let mut rec = recorder();
        rec.apply(Command::add_process(2, 0, 0)).unwrap();
        assert!(rec.apply(Command::DeleteProcess { pid: Pid(9) }).is_err());

        let frames = rec.frames();
        assert_eq!(frames.len(), 2);
        assert!(frames[0].outcome_ok);
        assert!(!frames[1].outcome_ok);
        // A rejected command leaves the state, and so the hash, untouched.
        assert_eq!(frames[0].snapshot_hash, frames[1].snapshot_hash);
    }

    #[test]
    fn frame_hash_matches_live_snapshot() {
        let mut rec = recorder();
        rec.apply(Command::add_process(2, 0, 0)).unwrap();
        rec.apply(Command::Start {
            algorithm: "rr".into(),
        })
        .unwrap();
        rec.apply(Command::Step).unwrap();
        let live = snapshot_hash(&rec.simulation().snapshot());
        assert_eq!(rec.frames().last().unwrap().snapshot_hash, live);
    }

    #[test]
    fn finish_hands_back_simulation() {
        let mut rec = recorder();
        rec.apply(Command::add_process(1, 0, 0)).unwrap();
        let (sim, recording) = rec.finish();
        assert_eq!(sim.processes().len(), 1);
        assert_eq!(recording.final_hash(), snapshot_hash(&sim.snapshot()));
        assert_ne!(recording.initial_hash, recording.final_hash());
    }
}

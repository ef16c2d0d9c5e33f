//! Single-writer command thread for sharing one simulation.
//!
//! [`SimulationService`] moves a [`Simulation`] onto a dedicated thread
//! and feeds it commands through a bounded channel. Any number of
//! threads may submit commands; they are applied one at a time in
//! arrival order.
//!
//! # Architecture
//!
//! ```text
//! Caller thread(s)                Command thread
//!     |                               |
//!     |--submit(cmd)----------------->| cmd_rx.recv()
//!     |   [cmd_tx: bounded(N)]        | sim.apply(cmd)
//!     |                               | publish Arc<Snapshot>
//!     |<--result via reply_tx---------|
//!     |                               |
//!     |--latest_snapshot()            |
//!     |   clones the published Arc    |
//! ```
//!
//! Readers of [`latest_snapshot()`](SimulationService::latest_snapshot)
//! only ever see a snapshot published between two commands, never a
//! half-applied one. The thread never sleeps; stepping cadence belongs
//! to whoever submits `Step`.

use std::error::Error;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender, TrySendError};
use schedsim_core::{Command, CommandError};

use crate::simulation::{Reply, Simulation};
use crate::snapshot::Snapshot;

// ── Error types ──────────────────────────────────────────────────

/// Error submitting a command to the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The command thread has shut down.
    Shutdown,
    /// The command channel is full (back-pressure, `try_submit` only).
    ChannelFull,
    /// The simulation rejected the command.
    Command(CommandError),
    /// The command thread could not be spawned.
    ThreadSpawnFailed {
        /// The OS error.
        reason: String,
    },
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shutdown => write!(f, "command thread has shut down"),
            Self::ChannelFull => write!(f, "command channel full"),
            Self::Command(e) => write!(f, "command: {e}"),
            Self::ThreadSpawnFailed { reason } => write!(f, "thread spawn failed: {reason}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Command(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CommandError> for ServiceError {
    fn from(e: CommandError) -> Self {
        Self::Command(e)
    }
}

// ── Request ──────────────────────────────────────────────────────

/// A command paired with the channel its result goes back on.
struct Request {
    command: Command,
    reply: Sender<Result<Reply, CommandError>>,
}

type Published = Arc<Mutex<Arc<Snapshot>>>;

// ── SimulationService ────────────────────────────────────────────

/// A [`Simulation`] running on its own command thread.
///
/// `SimulationService` is `Send + Sync`; share it behind an [`Arc`] to
/// submit from several threads.
pub struct SimulationService {
    cmd_tx: Option<Sender<Request>>,
    latest: Published,
    thread: Option<JoinHandle<Simulation>>,
}

impl SimulationService {
    /// Move `simulation` onto a new command thread.
    ///
    /// The channel bound comes from the simulation's
    /// [`command_queue_capacity`](crate::config::SimConfig::command_queue_capacity).
    pub fn spawn(simulation: Simulation) -> Result<Self, ServiceError> {
        let capacity = simulation.config().command_queue_capacity;
        let latest: Published = Arc::new(Mutex::new(Arc::new(simulation.snapshot())));
        let (cmd_tx, cmd_rx) = crossbeam_channel::bounded(capacity);

        let thread_latest = Arc::clone(&latest);
        let thread = thread::Builder::new()
            .name("schedsim-command".into())
            .spawn(move || command_loop(simulation, cmd_rx, thread_latest))
            .map_err(|e| ServiceError::ThreadSpawnFailed {
                reason: e.to_string(),
            })?;

        log::info!("simulation service started (queue capacity {capacity})");
        Ok(Self {
            cmd_tx: Some(cmd_tx),
            latest,
            thread: Some(thread),
        })
    }

    /// Submit a command and wait for its result.
    ///
    /// Blocks while the channel is full.
    pub fn submit(&self, command: Command) -> Result<Reply, ServiceError> {
        let cmd_tx = self.cmd_tx.as_ref().ok_or(ServiceError::Shutdown)?;
        let (reply_tx, reply_rx) = crossbeam_channel::bounded(1);
        cmd_tx
            .send(Request {
                command,
                reply: reply_tx,
            })
            .map_err(|_| ServiceError::Shutdown)?;
        Ok(reply_rx.recv().map_err(|_| ServiceError::Shutdown)??)
    }

    /// Submit a command without blocking on a full channel.
    ///
    /// Still waits for the result once the command is queued.
    pub fn try_submit(&self, command: Command) -> Result<Reply, ServiceError> {
        let cmd_tx = self.cmd_tx.as_ref().ok_or(ServiceError::Shutdown)?;
        let (reply_tx, reply_rx) = crossbeam_channel::bounded(1);
        cmd_tx
            .try_send(Request {
                command,
                reply: reply_tx,
            })
            .map_err(|e| match e {
                TrySendError::Full(_) => ServiceError::ChannelFull,
                TrySendError::Disconnected(_) => ServiceError::Shutdown,
            })?;
        Ok(reply_rx.recv().map_err(|_| ServiceError::Shutdown)??)
    }

    /// The snapshot published after the most recent command.
    pub fn latest_snapshot(&self) -> Arc<Snapshot> {
        let guard = self.latest.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Stop the command thread and recover the simulation.
    ///
    /// Commands already queued are applied first. Fails with
    /// [`ServiceError::Shutdown`] if the thread panicked.
    pub fn shutdown(mut self) -> Result<Simulation, ServiceError> {
        self.stop().ok_or(ServiceError::Shutdown)
    }

    fn stop(&mut self) -> Option<Simulation> {
        self.cmd_tx.take();
        let handle = self.thread.take()?;
        let joined = handle.join().ok();
        log::info!("simulation service stopped");
        joined
    }
}

impl Drop for SimulationService {
    fn drop(&mut self) {
        self.stop();
    }
}

impl fmt::Debug for SimulationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulationService")
            .field("running", &self.thread.is_some())
            .field("tick", &self.latest_snapshot().tick)
            .finish()
    }
}

fn command_loop(mut simulation: Simulation, cmd_rx: Receiver<Request>, latest: Published) -> Simulation {
    // Ends once every sender (the service handle) is gone.
    for request in cmd_rx.iter() {
        let mutating = request.command.is_mutating();
        let result = simulation.apply(request.command);
        if mutating && result.is_ok() {
            let snapshot = match &result {
                Ok(Reply::Snapshot(snapshot)) => snapshot.clone(),
                _ => simulation.snapshot(),
            };
            *latest.lock().unwrap_or_else(PoisonError::into_inner) = Arc::new(snapshot);
        }
        // Best-effort reply: the caller may have given up waiting.
        let _ = request.reply.send(result);
    }
    simulation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::snapshot::SimStatus;
    use schedsim_core::{Pid, RegistryError, TickId};

    fn service() -> SimulationService {
        SimulationService::spawn(Simulation::new(SimConfig::default()).unwrap()).unwrap()
    }

    #[test]
    fn lifecycle_start_and_shutdown() {
        let svc = service();
        svc.submit(Command::add_process(2, 0, 0)).unwrap();
        svc.submit(Command::Start {
            algorithm: "fcfs".to_string(),
        })
        .unwrap();
        svc.submit(Command::Step).unwrap();

        let sim = svc.shutdown().unwrap();
        assert_eq!(sim.current_tick(), TickId(1));
        assert_eq!(sim.status(), SimStatus::Running);
    }

    #[test]
    fn latest_snapshot_follows_commands() {
        let svc = service();
        assert_eq!(svc.latest_snapshot().tick, TickId(0));
        svc.submit(Command::add_process(3, 0, 0)).unwrap();
        svc.submit(Command::Start {
            algorithm: "rr".to_string(),
        })
        .unwrap();
        let reply = svc.submit(Command::Step).unwrap();
        let stepped = reply.into_snapshot().unwrap();
        assert_eq!(*svc.latest_snapshot(), stepped);
        assert_eq!(stepped.running, Some(Pid(0)));
    }

    #[test]
    fn rejected_command_surfaces_as_command_error() {
        let svc = service();
        let err = svc
            .submit(Command::DeleteProcess { pid: Pid(4) })
            .unwrap_err();
        assert_eq!(
            err,
            ServiceError::Command(CommandError::Registry(RegistryError::ProcessNotFound {
                pid: Pid(4)
            }))
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn drop_joins_thread() {
        let svc = service();
        svc.submit(Command::Snapshot).unwrap();
        drop(svc);
    }
}

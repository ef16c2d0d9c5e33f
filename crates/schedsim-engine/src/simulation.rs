//! Synchronous simulation front door.
//!
//! [`Simulation`] is the primary user-facing API. It owns a
//! [`TickEngine`], a seeded workload generator and the run status, and
//! exposes the command surface transport layers drive: process edits,
//! random generation, `start`/`pause`/`step`/`reset`, and snapshots.
//!
//! # Ownership model
//!
//! `Simulation` is [`Send`] but not [`Sync`]. All mutating methods take
//! `&mut self`, so at most one command is ever in flight per instance.
//! Snapshots are owned values; holding one never blocks a mutation.
//! Independent `Simulation` values share nothing.

use std::num::NonZeroU32;

use schedsim_core::{
    Command, CommandError, Pid, ProcessSpec, ProcessView, RegistryError, SimulationError, TickId,
};
use schedsim_policy::PolicyKind;
use schedsim_registry::ProcessGenerator;

use crate::config::{ConfigError, ResetMode, SimConfig};
use crate::snapshot::{SimStatus, Snapshot};
use crate::tick::{TickEngine, TickOutcome};

// Compile-time assertion: Simulation is Send (it moves onto the service thread).
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<Simulation>();
    }
};

// ── Reply ───────────────────────────────────────────────────────

/// Successful result of [`Simulation::apply()`].
#[derive(Clone, Debug, PartialEq)]
pub enum Reply {
    /// The process list after a workload edit.
    Processes(Vec<ProcessView>),
    /// The command was accepted; nothing to return.
    Ack,
    /// A full snapshot, returned by `step` and `snapshot`.
    Snapshot(Snapshot),
}

impl Reply {
    /// The contained snapshot, if any.
    pub fn into_snapshot(self) -> Option<Snapshot> {
        match self {
            Self::Snapshot(snapshot) => Some(snapshot),
            _ => None,
        }
    }
}

// ── Simulation ──────────────────────────────────────────────────

/// One simulation instance.
///
/// # Examples
///
/// ```
/// use schedsim_core::ProcessSpec;
/// use schedsim_engine::{SimConfig, Simulation};
///
/// let mut sim = Simulation::new(SimConfig::default()).unwrap();
/// sim.add_process(ProcessSpec::new(5, 0, 1)).unwrap();
/// sim.add_process(ProcessSpec::new(3, 1, 0)).unwrap();
/// sim.start("fcfs").unwrap();
///
/// let mut snapshot = sim.snapshot();
/// while !snapshot.all_terminated() {
///     snapshot = sim.step().unwrap();
/// }
/// assert_eq!(snapshot.tick.0, 8);
/// ```
pub struct Simulation {
    config: SimConfig,
    quantum: NonZeroU32,
    engine: TickEngine,
    generator: ProcessGenerator,
    status: SimStatus,
}

impl Simulation {
    /// Create an Idle simulation with an empty workload.
    ///
    /// The configured default policy is installed until the first
    /// `start` names another one.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let quantum = config.quantum()?;
        let engine = TickEngine::new(config.default_policy.instantiate(quantum));
        let generator = ProcessGenerator::new(config.seed, config.generation.clone());
        log::info!(
            "simulation created: policy={} quantum={quantum} seed={}",
            config.default_policy,
            config.seed
        );
        Ok(Self {
            config,
            quantum,
            engine,
            generator,
            status: SimStatus::Idle,
        })
    }

    // ── Workload commands ────────────────────────────────────────

    /// Register a process in the New state and return its pid.
    pub fn add_process(&mut self, spec: ProcessSpec) -> Result<Pid, RegistryError> {
        self.engine.add_process(spec)
    }

    /// Edit a process that has not yet run.
    pub fn update_process(&mut self, pid: Pid, spec: ProcessSpec) -> Result<(), RegistryError> {
        self.engine.update_process(pid, spec)
    }

    /// Remove a process from the registry and every queue.
    pub fn delete_process(&mut self, pid: Pid) -> Result<(), RegistryError> {
        self.engine.remove_process(pid)
    }

    /// Replace the workload with `count` random processes.
    ///
    /// The simulation returns to Idle at tick 0. Pids continue from the
    /// registry's counter. Fails with [`RegistryError::InvalidCount`]
    /// when `count` is zero, leaving everything untouched.
    pub fn generate_random(&mut self, count: usize) -> Result<Vec<Pid>, RegistryError> {
        let specs = self.generator.generate(count)?;
        self.engine.reset(ResetMode::ClearRegistry);
        self.status = SimStatus::Idle;
        let mut pids = Vec::with_capacity(specs.len());
        for spec in specs {
            pids.push(self.engine.add_process(spec)?);
        }
        log::info!("generated {count} random processes");
        Ok(pids)
    }

    /// Owned views of every process, in pid order.
    pub fn processes(&self) -> Vec<ProcessView> {
        self.engine.registry().views()
    }

    // ── Lifecycle commands ───────────────────────────────────────

    /// Install the named policy and begin (or resume) ticking.
    ///
    /// Allowed from Idle and Paused. Switching to a different policy
    /// restarts the Round-Robin slice; resuming with the same one does
    /// not.
    pub fn start(&mut self, algorithm: &str) -> Result<PolicyKind, SimulationError> {
        let kind: PolicyKind = algorithm.parse()?;
        if self.status == SimStatus::Running {
            return Err(SimulationError::AlreadyRunning);
        }
        if self.engine.policy().kind() != kind {
            self.engine.set_policy(kind.instantiate(self.quantum));
        }
        log::info!(
            "simulation {} with {kind} at tick {}",
            if self.status == SimStatus::Paused { "resumed" } else { "started" },
            self.engine.current_tick()
        );
        self.status = SimStatus::Running;
        Ok(kind)
    }

    /// Suspend ticking. Only valid while Running.
    pub fn pause(&mut self) -> Result<(), SimulationError> {
        if self.status != SimStatus::Running {
            return Err(SimulationError::NotRunning);
        }
        self.status = SimStatus::Paused;
        log::info!("simulation paused at tick {}", self.engine.current_tick());
        Ok(())
    }

    /// Advance one tick and return the resulting snapshot.
    ///
    /// Outside Running this is a no-op that returns the current
    /// snapshot, unless [`SimConfig::strict_step`] is set, in which case
    /// it fails with [`SimulationError::NotRunning`].
    pub fn step(&mut self) -> Result<Snapshot, SimulationError> {
        if self.status != SimStatus::Running {
            if self.config.strict_step {
                return Err(SimulationError::NotRunning);
            }
            return Ok(self.snapshot());
        }
        let outcome = self.engine.execute_tick();
        log_outcome(&outcome);
        Ok(self.snapshot())
    }

    /// Return to Idle at tick 0 with empty queues.
    ///
    /// Definitions are kept or dropped according to
    /// [`SimConfig::reset_mode`]. Always succeeds.
    pub fn reset(&mut self) {
        self.engine.reset(self.config.reset_mode);
        self.status = SimStatus::Idle;
        log::info!("simulation reset ({:?})", self.config.reset_mode);
    }

    /// Build a snapshot of the current state. Pure.
    pub fn snapshot(&self) -> Snapshot {
        let engine = &self.engine;
        Snapshot {
            tick: engine.current_tick(),
            status: self.status,
            policy: engine.policy().kind(),
            running: engine.running(),
            processes: engine.registry().views(),
            ready_queue: engine.ready_queue().iter().copied().collect(),
            waiting_queue: engine.waiting_queue().iter().copied().collect(),
            completed_processes: engine.completed().to_vec(),
            performance_metrics: engine.metrics(),
        }
    }

    // ── Command dispatch ─────────────────────────────────────────

    /// Apply one [`Command`].
    ///
    /// Workload edits reply with the process list, `start`/`pause`/`reset`
    /// with [`Reply::Ack`], `step`/`snapshot` with a full snapshot. A
    /// rejected command changes nothing.
    pub fn apply(&mut self, command: Command) -> Result<Reply, CommandError> {
        let name = command.name();
        let result = self.dispatch(command);
        if let Err(e) = &result {
            log::warn!("{name} rejected: {e}");
        }
        result
    }

    fn dispatch(&mut self, command: Command) -> Result<Reply, CommandError> {
        match command {
            Command::AddProcess(spec) => {
                self.add_process(spec)?;
                Ok(Reply::Processes(self.processes()))
            }
            Command::UpdateProcess { pid, spec } => {
                self.update_process(pid, spec)?;
                Ok(Reply::Processes(self.processes()))
            }
            Command::DeleteProcess { pid } => {
                self.delete_process(pid)?;
                Ok(Reply::Processes(self.processes()))
            }
            Command::GenerateRandom { count } => {
                self.generate_random(count)?;
                Ok(Reply::Processes(self.processes()))
            }
            Command::Start { algorithm } => {
                self.start(&algorithm)?;
                Ok(Reply::Ack)
            }
            Command::Pause => {
                self.pause()?;
                Ok(Reply::Ack)
            }
            Command::Step => Ok(Reply::Snapshot(self.step()?)),
            Command::Reset => {
                self.reset();
                Ok(Reply::Ack)
            }
            Command::Snapshot => Ok(Reply::Snapshot(self.snapshot())),
        }
    }

    // ── Accessors ────────────────────────────────────────────────

    /// Run status.
    pub fn status(&self) -> SimStatus {
        self.status
    }

    /// Ticks elapsed (0 after construction or reset).
    pub fn current_tick(&self) -> TickId {
        self.engine.current_tick()
    }

    /// The installed policy.
    pub fn policy(&self) -> PolicyKind {
        self.engine.policy().kind()
    }

    /// The configuration this simulation was built from.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// The underlying engine, for inspection.
    pub fn engine(&self) -> &TickEngine {
        &self.engine
    }
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("status", &self.status)
            .field("current_tick", &self.engine.current_tick())
            .field("policy", &self.engine.policy().name())
            .field("processes", &self.engine.registry().len())
            .finish()
    }
}

fn log_outcome(outcome: &TickOutcome) {
    if !log::log_enabled!(log::Level::Debug) {
        return;
    }
    let tick = outcome.tick;
    if !outcome.admitted.is_empty() {
        log::debug!("tick {tick}: admitted {:?}", outcome.admitted.as_slice());
    }
    if let Some(pid) = outcome.preempted {
        log::debug!("tick {tick}: preempted {pid}");
    }
    if let Some(pid) = outcome.dispatched {
        log::debug!("tick {tick}: dispatched {pid}");
    }
    match (outcome.completed, outcome.blocked) {
        (Some(pid), _) => log::debug!("tick {tick}: {pid} terminated"),
        (None, Some(pid)) => log::debug!("tick {tick}: {pid} blocked on io"),
        (None, None) if outcome.executed.is_none() => log::debug!("tick {tick}: cpu idle"),
        _ => {}
    }
}

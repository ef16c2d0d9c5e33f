//! Tick engine: the single-threaded scheduling loop.
//!
//! [`TickEngine`] owns the process registry, the ready/waiting/completed
//! queues, the CPU slot and the clock, and advances them one tick at a
//! time under the installed [`SchedulingPolicy`]. It has no notion of
//! run status; [`Simulation`](crate::simulation::Simulation) decides
//! when a tick may run.
//!
//! # Tick order
//!
//! 1. Admit New processes whose arrival has been reached (pid order).
//! 2. Serve one tick of blocking for every Waiting process; expired
//!    waits rejoin the ready tail in waiting-queue order.
//! 3. Ask the policy for a [`Decision`].
//! 4. Apply it: a displaced process goes to the ready tail, the selected
//!    one takes the CPU and its slice counter restarts.
//! 5. Execute one unit of work on the CPU.
//! 6. Terminate at zero remaining time (completion is `tick + 1`), or
//!    block if the process's IO interval is due.
//! 7. Advance the clock.

use std::collections::VecDeque;

use smallvec::SmallVec;

use schedsim_core::{Pid, ProcessSpec, ProcessState, RegistryError, TickId};
use schedsim_policy::{Decision, ReadyEntry, RunningEntry, SchedulingContext, SchedulingPolicy};
use schedsim_registry::ProcessRegistry;

use crate::config::ResetMode;
use crate::metrics::PerformanceMetrics;

// ── TickOutcome ──────────────────────────────────────────────────

/// What happened during one executed tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// The tick that was executed.
    pub tick: TickId,
    /// Processes admitted from New this tick, in pid order.
    pub admitted: SmallVec<[Pid; 8]>,
    /// Processes whose IO wait expired this tick.
    pub unblocked: SmallVec<[Pid; 4]>,
    /// Process displaced from the CPU by the policy.
    pub preempted: Option<Pid>,
    /// Process placed on the CPU this tick.
    pub dispatched: Option<Pid>,
    /// Process that executed this tick; `None` means an idle tick.
    pub executed: Option<Pid>,
    /// Process that terminated at the end of this tick.
    pub completed: Option<Pid>,
    /// Process that blocked on IO at the end of this tick.
    pub blocked: Option<Pid>,
}

// ── TickEngine ───────────────────────────────────────────────────

/// Single-threaded scheduling engine.
///
/// Owns all scheduler state and executes ticks synchronously. Every
/// mutation goes through `&mut self`.
pub struct TickEngine {
    registry: ProcessRegistry,
    policy: Box<dyn SchedulingPolicy>,
    ready: VecDeque<Pid>,
    waiting: VecDeque<Pid>,
    completed: Vec<Pid>,
    running: Option<Pid>,
    slice_ticks: u32,
    busy_ticks: u64,
    current_tick: TickId,
    ready_scratch: Vec<ReadyEntry>,
}

impl TickEngine {
    /// An empty engine at tick 0 with `policy` installed.
    pub fn new(policy: Box<dyn SchedulingPolicy>) -> Self {
        Self {
            registry: ProcessRegistry::new(),
            policy,
            ready: VecDeque::new(),
            waiting: VecDeque::new(),
            completed: Vec::new(),
            running: None,
            slice_ticks: 0,
            busy_ticks: 0,
            current_tick: TickId(0),
            ready_scratch: Vec::new(),
        }
    }

    // ── Workload ─────────────────────────────────────────────────

    /// Register a process. It is admitted on the first tick at or after
    /// its arrival time.
    pub fn add_process(&mut self, spec: ProcessSpec) -> Result<Pid, RegistryError> {
        self.registry.add(spec).map(|p| p.pid())
    }

    /// Replace the definition of a process that has never run.
    ///
    /// A Ready process is pulled off the ready queue and returns to New
    /// so it is re-admitted against its new arrival time.
    pub fn update_process(&mut self, pid: Pid, spec: ProcessSpec) -> Result<(), RegistryError> {
        self.registry.update(pid, spec)?;
        self.ready.retain(|&p| p != pid);
        Ok(())
    }

    /// Remove a process from the registry, every queue and the CPU.
    pub fn remove_process(&mut self, pid: Pid) -> Result<(), RegistryError> {
        self.registry.remove(pid)?;
        self.ready.retain(|&p| p != pid);
        self.waiting.retain(|&p| p != pid);
        self.completed.retain(|&p| p != pid);
        if self.running == Some(pid) {
            self.running = None;
            self.slice_ticks = 0;
        }
        Ok(())
    }

    /// Return to tick 0 with empty queues and zeroed counters.
    pub fn reset(&mut self, mode: ResetMode) {
        match mode {
            ResetMode::KeepDefinitions => self.registry.reset_runtime(),
            ResetMode::ClearRegistry => self.registry.clear(),
        }
        self.ready.clear();
        self.waiting.clear();
        self.completed.clear();
        self.running = None;
        self.slice_ticks = 0;
        self.busy_ticks = 0;
        self.current_tick = TickId(0);
    }

    /// Install a different policy. The slice counter restarts.
    pub fn set_policy(&mut self, policy: Box<dyn SchedulingPolicy>) {
        self.policy = policy;
        self.slice_ticks = 0;
    }

    // ── Tick execution ───────────────────────────────────────────

    /// Execute one tick.
    pub fn execute_tick(&mut self) -> TickOutcome {
        let now = self.current_tick;
        let mut outcome = TickOutcome {
            tick: now,
            ..TickOutcome::default()
        };

        self.admit_arrivals(now.0, &mut outcome);
        self.serve_waits(&mut outcome);

        let decision = self.consult_policy(now);
        self.apply_decision(decision, now.0, &mut outcome);
        self.run_cpu(now.0, &mut outcome);

        self.current_tick = now.next();
        outcome
    }

    fn admit_arrivals(&mut self, now: u64, outcome: &mut TickOutcome) {
        for process in self.registry.iter_mut() {
            if process.state() == ProcessState::New && process.arrival_time() <= now {
                process.admit();
                self.ready.push_back(process.pid());
                outcome.admitted.push(process.pid());
            }
        }
    }

    fn serve_waits(&mut self, outcome: &mut TickOutcome) {
        let registry = &mut self.registry;
        let ready = &mut self.ready;
        self.waiting.retain(|&pid| {
            let Some(process) = registry.get_mut(pid) else {
                return false;
            };
            if !process.wait_tick() {
                return true;
            }
            process.admit();
            ready.push_back(pid);
            outcome.unblocked.push(pid);
            false
        });
    }

    fn consult_policy(&mut self, now: TickId) -> Decision {
        self.ready_scratch.clear();
        for &pid in &self.ready {
            if let Some(p) = self.registry.get(pid) {
                self.ready_scratch.push(ReadyEntry {
                    pid,
                    arrival_time: p.arrival_time(),
                    remaining_time: p.remaining_time(),
                    priority: p.priority(),
                });
            }
        }
        let running = self
            .running
            .and_then(|pid| self.registry.get(pid))
            .map(|p| RunningEntry {
                pid: p.pid(),
                arrival_time: p.arrival_time(),
                remaining_time: p.remaining_time(),
                priority: p.priority(),
                slice_ticks: self.slice_ticks,
            });
        let ctx = SchedulingContext::new(now, &self.ready_scratch, running);
        self.policy.select_next(&ctx)
    }

    fn apply_decision(&mut self, decision: Decision, now: u64, outcome: &mut TickOutcome) {
        let Some(next) = decision.selected(self.running) else {
            return;
        };
        if self.running == Some(next) {
            return;
        }
        let Some(pos) = self.ready.iter().position(|&p| p == next) else {
            log::warn!(
                "policy {} selected {next}, which is not ready; ignoring",
                self.policy.name()
            );
            return;
        };
        self.ready.remove(pos);

        if let Some(prev) = self.running.take() {
            if let Some(process) = self.registry.get_mut(prev) {
                process.preempt();
            }
            self.ready.push_back(prev);
            outcome.preempted = Some(prev);
        }

        if let Some(process) = self.registry.get_mut(next) {
            process.dispatch(now);
        }
        self.running = Some(next);
        self.slice_ticks = 0;
        outcome.dispatched = Some(next);
    }

    fn run_cpu(&mut self, now: u64, outcome: &mut TickOutcome) {
        let Some(pid) = self.running else {
            return;
        };
        let Some(process) = self.registry.get_mut(pid) else {
            self.running = None;
            return;
        };

        let done = process.execute();
        self.busy_ticks += 1;
        self.slice_ticks += 1;
        outcome.executed = Some(pid);

        if done {
            process.complete(now + 1);
            self.completed.push(pid);
            self.running = None;
            self.slice_ticks = 0;
            outcome.completed = Some(pid);
        } else if process.io_due() {
            process.block();
            self.waiting.push_back(pid);
            self.running = None;
            self.slice_ticks = 0;
            outcome.blocked = Some(pid);
        }
    }

    // ── Accessors ────────────────────────────────────────────────

    /// The process records.
    pub fn registry(&self) -> &ProcessRegistry {
        &self.registry
    }

    /// The installed policy.
    pub fn policy(&self) -> &dyn SchedulingPolicy {
        &*self.policy
    }

    /// Ticks elapsed (0 after construction or reset).
    pub fn current_tick(&self) -> TickId {
        self.current_tick
    }

    /// The process on the CPU.
    pub fn running(&self) -> Option<Pid> {
        self.running
    }

    /// Ready queue, head first.
    pub fn ready_queue(&self) -> &VecDeque<Pid> {
        &self.ready
    }

    /// Waiting queue, head first.
    pub fn waiting_queue(&self) -> &VecDeque<Pid> {
        &self.waiting
    }

    /// Terminated processes in completion order.
    pub fn completed(&self) -> &[Pid] {
        &self.completed
    }

    /// Ticks in which some process executed.
    pub fn busy_ticks(&self) -> u64 {
        self.busy_ticks
    }

    /// Consecutive ticks the running process has executed since dispatch.
    pub fn slice_ticks(&self) -> u32 {
        self.slice_ticks
    }

    /// Metrics at the current tick.
    pub fn metrics(&self) -> PerformanceMetrics {
        PerformanceMetrics::compute(self.registry.iter(), self.busy_ticks, self.current_tick.0)
    }
}

impl std::fmt::Debug for TickEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickEngine")
            .field("current_tick", &self.current_tick)
            .field("policy", &self.policy.name())
            .field("processes", &self.registry.len())
            .field("running", &self.running)
            .field("ready", &self.ready)
            .field("waiting", &self.waiting)
            .finish()
    }
}

//! The process record, its definition, and its lifecycle transitions.
//!
//! A [`Process`] is split into an immutable-while-simulating definition
//! ([`ProcessSpec`]) and runtime progress (remaining time, state,
//! timestamps). Runtime fields only change through the transition
//! methods below, which the engine calls in tick order. Each transition
//! checks its source state in debug builds.

use std::fmt;

use crate::error::RegistryError;
use crate::id::Pid;

/// Highest (least urgent) priority value. Priority 0 is the most urgent.
pub const MAX_PRIORITY: u8 = 4;

/// Lifecycle state of a single process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProcessState {
    /// Registered but not yet arrived (or not yet admitted).
    New,
    /// Eligible to run, queued in the ready queue.
    Ready,
    /// Blocked on a simulated resource, queued in the waiting queue.
    Waiting,
    /// Occupying the single CPU.
    Running,
    /// Finished; `remaining_time` is 0. Permanent.
    Terminated,
}

impl ProcessState {
    /// Stable display name, as shown to renderers.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Ready => "Ready",
            Self::Waiting => "Waiting",
            Self::Running => "Running",
            Self::Terminated => "Terminated",
        }
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Periodic blocking behaviour for a process.
///
/// After every `interval` ticks of CPU work the process leaves the CPU
/// and sits in the waiting queue for `duration` ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IoProfile {
    /// CPU ticks between two blocking periods. Must be at least 1.
    pub interval: u32,
    /// Ticks spent in the waiting queue per blocking period. Must be at least 1.
    pub duration: u32,
}

/// The user-supplied definition of a process.
///
/// Survives a reset unless the engine is configured to clear the
/// registry; everything else on [`Process`] is runtime progress.
///
/// # Examples
///
/// ```
/// use schedsim_core::{IoProfile, ProcessSpec};
///
/// let spec = ProcessSpec::new(5, 0, 2).with_io(IoProfile { interval: 2, duration: 3 });
/// assert!(spec.validate().is_ok());
/// assert!(ProcessSpec::new(0, 0, 2).validate().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProcessSpec {
    /// Total CPU ticks required. Must be at least 1.
    pub burst_time: u32,
    /// Tick at which the process becomes eligible to run.
    pub arrival_time: u64,
    /// Scheduling priority, `0..=MAX_PRIORITY`, 0 most urgent.
    pub priority: u8,
    /// Optional periodic blocking. `None` for a purely CPU-bound process.
    pub io: Option<IoProfile>,
}

impl ProcessSpec {
    /// A CPU-bound process definition.
    pub fn new(burst_time: u32, arrival_time: u64, priority: u8) -> Self {
        Self {
            burst_time,
            arrival_time,
            priority,
            io: None,
        }
    }

    /// Attach a blocking profile.
    pub fn with_io(mut self, io: IoProfile) -> Self {
        self.io = Some(io);
        self
    }

    /// Check every parameter range.
    pub fn validate(&self) -> Result<(), RegistryError> {
        if self.burst_time < 1 {
            return Err(RegistryError::InvalidProcessParameters {
                reason: "burst_time must be at least 1".to_string(),
            });
        }
        if self.priority > MAX_PRIORITY {
            return Err(RegistryError::InvalidProcessParameters {
                reason: format!(
                    "priority {} is outside 0..={MAX_PRIORITY}",
                    self.priority
                ),
            });
        }
        if let Some(io) = self.io {
            if io.interval < 1 {
                return Err(RegistryError::InvalidProcessParameters {
                    reason: "io interval must be at least 1".to_string(),
                });
            }
            if io.duration < 1 {
                return Err(RegistryError::InvalidProcessParameters {
                    reason: "io duration must be at least 1".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// A process record: definition plus runtime progress.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Process {
    pid: Pid,
    spec: ProcessSpec,
    remaining_time: u32,
    state: ProcessState,
    start_time: Option<u64>,
    completion_time: Option<u64>,
    turnaround_time: Option<u64>,
    waiting_time: Option<u64>,
    cpu_since_io: u32,
    wait_remaining: u32,
}

impl Process {
    /// Create a process in the New state.
    ///
    /// Does not validate `spec`; the registry does that before
    /// assigning a pid.
    pub fn new(pid: Pid, spec: ProcessSpec) -> Self {
        Self {
            pid,
            spec,
            remaining_time: spec.burst_time,
            state: ProcessState::New,
            start_time: None,
            completion_time: None,
            turnaround_time: None,
            waiting_time: None,
            cpu_since_io: 0,
            wait_remaining: 0,
        }
    }

    /// Process identifier.
    pub fn pid(&self) -> Pid {
        self.pid
    }

    /// The process definition.
    pub fn spec(&self) -> &ProcessSpec {
        &self.spec
    }

    /// Total CPU ticks required.
    pub fn burst_time(&self) -> u32 {
        self.spec.burst_time
    }

    /// Tick at which the process becomes eligible.
    pub fn arrival_time(&self) -> u64 {
        self.spec.arrival_time
    }

    /// Scheduling priority (0 most urgent).
    pub fn priority(&self) -> u8 {
        self.spec.priority
    }

    /// CPU ticks still required.
    pub fn remaining_time(&self) -> u32 {
        self.remaining_time
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ProcessState {
        self.state
    }

    /// Tick of the first dispatch, if the process has ever run.
    pub fn start_time(&self) -> Option<u64> {
        self.start_time
    }

    /// Tick at which the process terminated.
    pub fn completion_time(&self) -> Option<u64> {
        self.completion_time
    }

    /// `completion_time - arrival_time`, set at termination.
    pub fn turnaround_time(&self) -> Option<u64> {
        self.turnaround_time
    }

    /// `turnaround_time - burst_time`, set at termination.
    pub fn waiting_time(&self) -> Option<u64> {
        self.waiting_time
    }

    /// `start_time - arrival_time`, once the process has run.
    pub fn response_time(&self) -> Option<u64> {
        self.start_time
            .map(|start| start.saturating_sub(self.spec.arrival_time))
    }

    /// Blocked ticks not yet served (0 unless Waiting).
    pub fn wait_remaining(&self) -> u32 {
        self.wait_remaining
    }

    /// Whether the process has been dispatched at least once.
    pub fn has_started(&self) -> bool {
        self.start_time.is_some()
    }

    /// Whether the process has terminated.
    pub fn is_terminated(&self) -> bool {
        self.state == ProcessState::Terminated
    }

    // ── Engine-facing transitions ───────────────────────────────

    /// Replace the definition and discard all runtime progress.
    ///
    /// The process returns to New so it is re-admitted against the new
    /// arrival time.
    pub fn redefine(&mut self, spec: ProcessSpec) {
        self.spec = spec;
        self.reset_runtime();
    }

    /// Return to New with runtime progress cleared, keeping the definition.
    pub fn reset_runtime(&mut self) {
        self.remaining_time = self.spec.burst_time;
        self.state = ProcessState::New;
        self.start_time = None;
        self.completion_time = None;
        self.turnaround_time = None;
        self.waiting_time = None;
        self.cpu_since_io = 0;
        self.wait_remaining = 0;
    }

    /// New or Waiting → Ready.
    pub fn admit(&mut self) {
        debug_assert!(
            matches!(self.state, ProcessState::New | ProcessState::Waiting),
            "admit from {}",
            self.state
        );
        self.state = ProcessState::Ready;
        self.wait_remaining = 0;
    }

    /// Ready → Running at `tick`. Returns `true` on the first dispatch,
    /// which is when `start_time` is recorded.
    pub fn dispatch(&mut self, tick: u64) -> bool {
        debug_assert_eq!(self.state, ProcessState::Ready, "dispatch");
        self.state = ProcessState::Running;
        if self.start_time.is_none() {
            self.start_time = Some(tick);
            true
        } else {
            false
        }
    }

    /// Running → Ready.
    pub fn preempt(&mut self) {
        debug_assert_eq!(self.state, ProcessState::Running, "preempt");
        self.state = ProcessState::Ready;
    }

    /// Perform one tick of CPU work. Returns `true` when the burst is
    /// exhausted.
    pub fn execute(&mut self) -> bool {
        debug_assert_eq!(self.state, ProcessState::Running, "execute");
        self.remaining_time = self.remaining_time.saturating_sub(1);
        self.cpu_since_io += 1;
        self.remaining_time == 0
    }

    /// Running → Terminated, deriving turnaround and waiting time.
    ///
    /// `completion_tick` is the tick boundary at which the last unit of
    /// work finished (the executing tick plus one).
    pub fn complete(&mut self, completion_tick: u64) {
        debug_assert_eq!(self.remaining_time, 0, "complete with work left");
        let turnaround = completion_tick.saturating_sub(self.spec.arrival_time);
        self.state = ProcessState::Terminated;
        self.completion_time = Some(completion_tick);
        self.turnaround_time = Some(turnaround);
        self.waiting_time = Some(turnaround.saturating_sub(u64::from(self.spec.burst_time)));
    }

    /// Whether the IO profile requires the process to block now.
    pub fn io_due(&self) -> bool {
        match self.spec.io {
            Some(io) => self.state == ProcessState::Running && self.cpu_since_io >= io.interval,
            None => false,
        }
    }

    /// Running → Waiting for one IO period. No-op without an IO profile.
    pub fn block(&mut self) {
        debug_assert_eq!(self.state, ProcessState::Running, "block");
        if let Some(io) = self.spec.io {
            self.state = ProcessState::Waiting;
            self.wait_remaining = io.duration;
            self.cpu_since_io = 0;
        }
    }

    /// Serve one tick of blocking. Returns `true` instead when every
    /// blocked tick has already been served and the process may be
    /// admitted again.
    pub fn wait_tick(&mut self) -> bool {
        debug_assert_eq!(self.state, ProcessState::Waiting, "wait_tick");
        if self.wait_remaining == 0 {
            return true;
        }
        self.wait_remaining -= 1;
        false
    }
}

/// Read-only, owned view of a process for snapshots and command replies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessView {
    /// Process identifier.
    pub pid: Pid,
    /// Total CPU ticks required.
    pub burst_time: u32,
    /// Arrival tick.
    pub arrival_time: u64,
    /// Scheduling priority (0 most urgent).
    pub priority: u8,
    /// Lifecycle state.
    pub state: ProcessState,
    /// CPU ticks still required.
    pub remaining_time: u32,
    /// First dispatch tick.
    pub start_time: Option<u64>,
    /// Set at termination.
    pub waiting_time: Option<u64>,
    /// Set at termination.
    pub turnaround_time: Option<u64>,
    /// Set at termination.
    pub completion_time: Option<u64>,
    /// Set once the process has run.
    pub response_time: Option<u64>,
}

impl From<&Process> for ProcessView {
    fn from(p: &Process) -> Self {
        Self {
            pid: p.pid,
            burst_time: p.spec.burst_time,
            arrival_time: p.spec.arrival_time,
            priority: p.spec.priority,
            state: p.state,
            remaining_time: p.remaining_time,
            start_time: p.start_time,
            waiting_time: p.waiting_time,
            turnaround_time: p.turnaround_time,
            completion_time: p.completion_time,
            response_time: p.response_time(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running(spec: ProcessSpec, tick: u64) -> Process {
        let mut p = Process::new(Pid(0), spec);
        p.admit();
        p.dispatch(tick);
        p
    }

    #[test]
    fn new_process_starts_with_full_burst() {
        let p = Process::new(Pid(1), ProcessSpec::new(5, 2, 3));
        assert_eq!(p.state(), ProcessState::New);
        assert_eq!(p.remaining_time(), 5);
        assert_eq!(p.start_time(), None);
        assert_eq!(p.waiting_time(), None);
    }

    #[test]
    fn validate_rejects_out_of_range() {
        assert!(ProcessSpec::new(0, 0, 0).validate().is_err());
        assert!(ProcessSpec::new(1, 0, MAX_PRIORITY + 1).validate().is_err());
        assert!(ProcessSpec::new(1, 0, MAX_PRIORITY).validate().is_ok());
        let bad_io = ProcessSpec::new(3, 0, 0).with_io(IoProfile {
            interval: 0,
            duration: 1,
        });
        assert!(bad_io.validate().is_err());
        let bad_io = ProcessSpec::new(3, 0, 0).with_io(IoProfile {
            interval: 1,
            duration: 0,
        });
        assert!(bad_io.validate().is_err());
    }

    #[test]
    fn first_dispatch_records_start_time_once() {
        let mut p = running(ProcessSpec::new(4, 1, 0), 3);
        assert_eq!(p.start_time(), Some(3));
        p.preempt();
        assert!(!p.dispatch(9));
        assert_eq!(p.start_time(), Some(3));
        assert_eq!(p.response_time(), Some(2));
    }

    #[test]
    fn completion_derives_times() {
        // P2(burst=3, arrival=1) running ticks 5..8.
        let mut p = running(ProcessSpec::new(3, 1, 0), 5);
        assert!(!p.execute());
        assert!(!p.execute());
        assert!(p.execute());
        p.complete(8);
        assert_eq!(p.state(), ProcessState::Terminated);
        assert_eq!(p.completion_time(), Some(8));
        assert_eq!(p.turnaround_time(), Some(7));
        assert_eq!(p.waiting_time(), Some(4));
    }

    #[test]
    fn io_profile_blocks_and_wakes() {
        let spec = ProcessSpec::new(5, 0, 0).with_io(IoProfile {
            interval: 2,
            duration: 2,
        });
        let mut p = running(spec, 0);
        p.execute();
        assert!(!p.io_due());
        p.execute();
        assert!(p.io_due());
        p.block();
        assert_eq!(p.state(), ProcessState::Waiting);
        assert_eq!(p.wait_remaining(), 2);
        assert!(!p.wait_tick());
        assert!(!p.wait_tick());
        assert_eq!(p.wait_remaining(), 0);
        assert!(p.wait_tick());
        p.admit();
        assert_eq!(p.state(), ProcessState::Ready);
        assert_eq!(p.remaining_time(), 3);
    }

    #[test]
    fn cpu_bound_process_never_blocks() {
        let mut p = running(ProcessSpec::new(5, 0, 0), 0);
        for _ in 0..4 {
            p.execute();
            assert!(!p.io_due());
        }
    }

    #[test]
    fn reset_runtime_keeps_definition() {
        let mut p = running(ProcessSpec::new(2, 0, 1), 0);
        p.execute();
        p.execute();
        p.complete(2);
        p.reset_runtime();
        assert_eq!(p.state(), ProcessState::New);
        assert_eq!(p.remaining_time(), 2);
        assert_eq!(p.completion_time(), None);
        assert_eq!(p.priority(), 1);
    }

    #[test]
    fn view_mirrors_process() {
        let p = running(ProcessSpec::new(4, 1, 2), 3);
        let v = ProcessView::from(&p);
        assert_eq!(v.pid, Pid(0));
        assert_eq!(v.state, ProcessState::Running);
        assert_eq!(v.start_time, Some(3));
        assert_eq!(v.response_time, Some(2));
        assert_eq!(v.completion_time, None);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn completion_identities_hold(
                burst in 1u32..50,
                arrival in 0u64..50,
                delay in 0u64..50,
            ) {
                let start = arrival + delay;
                let mut p = running(ProcessSpec::new(burst, arrival, 0), start);
                let mut done = false;
                for _ in 0..burst {
                    done = p.execute();
                }
                prop_assert!(done);
                let completion = start + u64::from(burst);
                p.complete(completion);
                let tat = p.turnaround_time().unwrap();
                prop_assert_eq!(tat, completion - arrival);
                prop_assert_eq!(p.waiting_time().unwrap(), tat - u64::from(burst));
            }
        }
    }
}

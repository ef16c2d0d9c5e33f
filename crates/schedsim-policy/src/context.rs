//! Decision context passed to policies once per tick.
//!
//! [`SchedulingContext`] is a read-only, copied view of the scheduler
//! state that matters for dispatch: the ready queue in queue order and
//! the process currently on the CPU. Policies never see the registry.

use schedsim_core::{Pid, TickId};

/// A ready-queue entry as seen by a policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReadyEntry {
    /// The queued process.
    pub pid: Pid,
    /// Its arrival tick.
    pub arrival_time: u64,
    /// CPU ticks it still needs.
    pub remaining_time: u32,
    /// Its priority (0 most urgent).
    pub priority: u8,
}

/// The process on the CPU as seen by a policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunningEntry {
    /// The running process.
    pub pid: Pid,
    /// Its arrival tick.
    pub arrival_time: u64,
    /// CPU ticks it still needs, before this tick's work.
    pub remaining_time: u32,
    /// Its priority (0 most urgent).
    pub priority: u8,
    /// Consecutive ticks executed since it was last dispatched.
    pub slice_ticks: u32,
}

/// Everything a policy may look at when choosing who runs this tick.
///
/// Built by the engine after admission (arrivals and expired waits are
/// already in `ready`) and before any CPU work for the tick.
#[derive(Clone, Copy, Debug)]
pub struct SchedulingContext<'a> {
    tick: TickId,
    ready: &'a [ReadyEntry],
    running: Option<RunningEntry>,
}

impl<'a> SchedulingContext<'a> {
    /// Construct a context. Typically called by the engine.
    pub fn new(tick: TickId, ready: &'a [ReadyEntry], running: Option<RunningEntry>) -> Self {
        Self {
            tick,
            ready,
            running,
        }
    }

    /// The tick being scheduled.
    pub fn tick(&self) -> TickId {
        self.tick
    }

    /// Ready queue, head first.
    pub fn ready(&self) -> &'a [ReadyEntry] {
        self.ready
    }

    /// The process on the CPU, if any.
    pub fn running(&self) -> Option<RunningEntry> {
        self.running
    }

    /// Head of the ready queue.
    pub fn ready_head(&self) -> Option<&'a ReadyEntry> {
        self.ready.first()
    }

    /// The ready entry minimizing `key`, ties broken by lower pid.
    pub fn ready_min_by<K: Ord>(&self, key: impl Fn(&ReadyEntry) -> K) -> Option<&'a ReadyEntry> {
        self.ready.iter().min_by_key(|e| (key(e), e.pid))
    }
}

//! Round-Robin.

use std::num::NonZeroU32;

use crate::context::SchedulingContext;
use crate::kind::PolicyKind;
use crate::policy::{Decision, SchedulingPolicy};

/// FIFO dispatch with a fixed time quantum.
///
/// The running process is preempted once it has run a whole number of
/// quanta in its current slice and another process is ready. The engine
/// admits arrivals before asking the policy, so same-tick arrivals are
/// already queued ahead of the preempted process. With nobody waiting,
/// the running process simply starts its next quantum.
#[derive(Clone, Copy, Debug)]
pub struct RoundRobin {
    quantum: NonZeroU32,
}

impl RoundRobin {
    /// Create a Round-Robin policy with the given quantum.
    pub fn new(quantum: NonZeroU32) -> Self {
        Self { quantum }
    }

    /// The configured quantum in ticks.
    pub fn quantum(&self) -> NonZeroU32 {
        self.quantum
    }
}

impl SchedulingPolicy for RoundRobin {
    fn kind(&self) -> PolicyKind {
        PolicyKind::RoundRobin
    }

    fn is_preemptive(&self) -> bool {
        true
    }

    fn select_next(&self, ctx: &SchedulingContext<'_>) -> Decision {
        let Some(head) = ctx.ready_head() else {
            return Decision::Continue;
        };
        match ctx.running() {
            None => Decision::Dispatch(head.pid),
            Some(running)
                if running.slice_ticks > 0
                    && running.slice_ticks % self.quantum.get() == 0 =>
            {
                Decision::Preempt(head.pid)
            }
            Some(_) => Decision::Continue,
        }
    }
}

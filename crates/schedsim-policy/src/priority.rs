//! Static priority scheduling.

use crate::context::SchedulingContext;
use crate::kind::PolicyKind;
use crate::policy::{dispatch_when_idle, Decision, SchedulingPolicy};

/// Runs the ready process with the lowest priority value (0 is most
/// urgent), ties to lower pid.
///
/// Non-preemptive by default: a running process keeps the CPU until it
/// blocks or completes even if a more urgent process arrives. The
/// preemptive mode is a separate [`PolicyKind`] and interrupts only for
/// a strictly more urgent process.
#[derive(Clone, Copy, Debug)]
pub struct PriorityPolicy {
    preemptive: bool,
}

impl PriorityPolicy {
    /// The default, non-preemptive mode.
    pub fn non_preemptive() -> Self {
        Self { preemptive: false }
    }

    /// Preempt on arrival of a strictly more urgent process.
    pub fn preemptive() -> Self {
        Self { preemptive: true }
    }
}

impl Default for PriorityPolicy {
    fn default() -> Self {
        Self::non_preemptive()
    }
}

impl SchedulingPolicy for PriorityPolicy {
    fn kind(&self) -> PolicyKind {
        if self.preemptive {
            PolicyKind::PriorityPreemptive
        } else {
            PolicyKind::Priority
        }
    }

    fn is_preemptive(&self) -> bool {
        self.preemptive
    }

    fn select_next(&self, ctx: &SchedulingContext<'_>) -> Decision {
        let running = match ctx.running() {
            Some(running) if self.preemptive => running,
            _ => return dispatch_when_idle(ctx, |e| e.priority),
        };
        match ctx.ready_min_by(|e| e.priority) {
            Some(urgent) if urgent.priority < running.priority => Decision::Preempt(urgent.pid),
            _ => Decision::Continue,
        }
    }
}

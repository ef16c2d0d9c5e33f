//! First-come first-served.

use crate::context::SchedulingContext;
use crate::kind::PolicyKind;
use crate::policy::{dispatch_when_idle, Decision, SchedulingPolicy};

/// Runs the ready process with the earliest arrival (ties to lower pid);
/// never preempts.
///
/// Selection is by arrival rather than queue position, so a process that
/// rejoins the queue after IO still goes ahead of later arrivals.
#[derive(Clone, Copy, Debug, Default)]
pub struct Fcfs;

impl SchedulingPolicy for Fcfs {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Fcfs
    }

    fn is_preemptive(&self) -> bool {
        false
    }

    fn select_next(&self, ctx: &SchedulingContext<'_>) -> Decision {
        dispatch_when_idle(ctx, |e| e.arrival_time)
    }
}

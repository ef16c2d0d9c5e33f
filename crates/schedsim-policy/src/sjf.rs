//! Shortest job first, in non-preemptive and preemptive form.

use crate::context::SchedulingContext;
use crate::kind::PolicyKind;
use crate::policy::{dispatch_when_idle, Decision, SchedulingPolicy};

/// Non-preemptive SJF: an idle CPU takes the ready process with the
/// least remaining time (ties to lower pid). A running process is never
/// interrupted mid-burst.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShortestJobFirst;

impl SchedulingPolicy for ShortestJobFirst {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Sjf
    }

    fn is_preemptive(&self) -> bool {
        false
    }

    fn select_next(&self, ctx: &SchedulingContext<'_>) -> Decision {
        dispatch_when_idle(ctx, |e| e.remaining_time)
    }
}

/// Shortest remaining time first (preemptive SJF).
///
/// Same selection rule as [`ShortestJobFirst`], but the running process
/// is preempted as soon as a ready process needs strictly less time than
/// it still does. Equal remaining times never preempt.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShortestRemainingTime;

impl SchedulingPolicy for ShortestRemainingTime {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Srtf
    }

    fn is_preemptive(&self) -> bool {
        true
    }

    fn select_next(&self, ctx: &SchedulingContext<'_>) -> Decision {
        let Some(running) = ctx.running() else {
            return dispatch_when_idle(ctx, |e| e.remaining_time);
        };
        match ctx.ready_min_by(|e| e.remaining_time) {
            Some(shortest) if shortest.remaining_time < running.remaining_time => {
                Decision::Preempt(shortest.pid)
            }
            _ => Decision::Continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{ReadyEntry, RunningEntry};
    use schedsim_core::{Pid, TickId};

    fn ready(pid: u64, remaining: u32) -> ReadyEntry {
        ReadyEntry {
            pid: Pid(pid),
            arrival_time: 0,
            remaining_time: remaining,
            priority: 0,
        }
    }

    fn running(pid: u64, remaining: u32) -> RunningEntry {
        RunningEntry {
            pid: Pid(pid),
            arrival_time: 0,
            remaining_time: remaining,
            priority: 0,
            slice_ticks: 1,
        }
    }

    #[test]
    fn sjf_picks_shortest_on_idle_cpu() {
        let q = [ready(1, 3), ready(2, 8)];
        let ctx = SchedulingContext::new(TickId(5), &q, None);
        assert_eq!(ShortestJobFirst.select_next(&ctx), Decision::Dispatch(Pid(1)));
    }

    #[test]
    fn sjf_tie_goes_to_lower_pid() {
        let q = [ready(4, 2), ready(3, 2)];
        let ctx = SchedulingContext::new(TickId(0), &q, None);
        assert_eq!(ShortestJobFirst.select_next(&ctx), Decision::Dispatch(Pid(3)));
    }

    #[test]
    fn sjf_does_not_interrupt() {
        let q = [ready(1, 1)];
        let ctx = SchedulingContext::new(TickId(1), &q, Some(running(0, 9)));
        assert_eq!(ShortestJobFirst.select_next(&ctx), Decision::Continue);
    }

    #[test]
    fn srtf_preempts_strictly_shorter() {
        let q = [ready(1, 2), ready(2, 1)];
        let ctx = SchedulingContext::new(TickId(1), &q, Some(running(0, 4)));
        assert_eq!(
            ShortestRemainingTime.select_next(&ctx),
            Decision::Preempt(Pid(2))
        );
    }

    #[test]
    fn srtf_keeps_running_on_tie() {
        let q = [ready(1, 4)];
        let ctx = SchedulingContext::new(TickId(1), &q, Some(running(0, 4)));
        assert_eq!(ShortestRemainingTime.select_next(&ctx), Decision::Continue);
    }

    #[test]
    fn srtf_dispatches_on_idle_cpu() {
        let q = [ready(5, 7), ready(6, 3)];
        let ctx = SchedulingContext::new(TickId(1), &q, None);
        assert_eq!(
            ShortestRemainingTime.select_next(&ctx),
            Decision::Dispatch(Pid(6))
        );
    }
}

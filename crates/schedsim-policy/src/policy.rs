//! The [`SchedulingPolicy`] trait and the [`Decision`] it returns.

use schedsim_core::Pid;

use crate::context::SchedulingContext;
use crate::kind::PolicyKind;

/// What should occupy the CPU for the tick being scheduled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Keep the running process, or stay idle if nothing is running.
    Continue,
    /// The CPU is idle: move `pid` from the ready queue onto it.
    Dispatch(Pid),
    /// Send the running process to the ready tail and run `pid` instead.
    Preempt(Pid),
}

impl Decision {
    /// The pid that runs this tick, given the currently running pid.
    pub fn selected(&self, running: Option<Pid>) -> Option<Pid> {
        match self {
            Self::Continue => running,
            Self::Dispatch(pid) | Self::Preempt(pid) => Some(*pid),
        }
    }

    /// Whether the running process is displaced before completing.
    pub fn preempts(&self) -> bool {
        matches!(self, Self::Preempt(_))
    }
}

/// A pure, stateless scheduling decision function.
///
/// # Contract
///
/// - `select_next()` MUST be deterministic: the same context yields the
///   same decision. Ties are broken by lower pid.
/// - `Dispatch` is only returned when nothing is running; `Preempt` only
///   when something is. Both name a pid from the context's ready queue.
/// - `&self`: per-run state such as the Round-Robin slice counter lives
///   in the engine and reaches the policy through the context.
///
/// # Object safety
///
/// This trait is object-safe; the engine stores the active policy as
/// `Box<dyn SchedulingPolicy>`.
///
/// # Examples
///
/// A policy that always runs the most recently queued process:
///
/// ```
/// use schedsim_policy::{Decision, PolicyKind, SchedulingContext, SchedulingPolicy};
///
/// struct LastComeFirstServed;
///
/// impl SchedulingPolicy for LastComeFirstServed {
///     fn kind(&self) -> PolicyKind { PolicyKind::Fcfs }
///     fn name(&self) -> &str { "lcfs" }
///     fn is_preemptive(&self) -> bool { false }
///
///     fn select_next(&self, ctx: &SchedulingContext<'_>) -> Decision {
///         match (ctx.running(), ctx.ready().last()) {
///             (None, Some(tail)) => Decision::Dispatch(tail.pid),
///             _ => Decision::Continue,
///         }
///     }
/// }
///
/// let ctx = SchedulingContext::new(Default::default(), &[], None);
/// assert_eq!(LastComeFirstServed.select_next(&ctx), Decision::Continue);
/// ```
pub trait SchedulingPolicy: Send + 'static {
    /// Which built-in variant this is (or most resembles).
    fn kind(&self) -> PolicyKind;

    /// Human-readable name for logging and snapshots.
    fn name(&self) -> &str {
        self.kind().name()
    }

    /// Whether the policy may ever return [`Decision::Preempt`].
    fn is_preemptive(&self) -> bool;

    /// Choose what runs during the tick described by `ctx`.
    fn select_next(&self, ctx: &SchedulingContext<'_>) -> Decision;
}

/// Shared non-preemptive rule: keep the running process; on an idle CPU
/// dispatch the ready entry minimizing `key` (ties to lower pid).
pub(crate) fn dispatch_when_idle<K: Ord>(
    ctx: &SchedulingContext<'_>,
    key: impl Fn(&crate::context::ReadyEntry) -> K,
) -> Decision {
    if ctx.running().is_some() {
        return Decision::Continue;
    }
    match ctx.ready_min_by(key) {
        Some(entry) => Decision::Dispatch(entry.pid),
        None => Decision::Continue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selected_resolves_continue_to_running() {
        assert_eq!(Decision::Continue.selected(Some(Pid(2))), Some(Pid(2)));
        assert_eq!(Decision::Continue.selected(None), None);
        assert_eq!(Decision::Dispatch(Pid(1)).selected(None), Some(Pid(1)));
        assert_eq!(Decision::Preempt(Pid(4)).selected(Some(Pid(2))), Some(Pid(4)));
    }

    #[test]
    fn only_preempt_preempts() {
        assert!(!Decision::Continue.preempts());
        assert!(!Decision::Dispatch(Pid(0)).preempts());
        assert!(Decision::Preempt(Pid(0)).preempts());
    }
}

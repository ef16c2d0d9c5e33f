//! Scheduling policy trait and the built-in policies.
//!
//! A policy is a pure, stateless decision function: given the ready
//! queue and the running process it returns a [`Decision`]. The engine
//! stores it as `Box<dyn SchedulingPolicy>` and never branches on the
//! concrete algorithm.
//!
//! | Name | Policy | Preemptive |
//! |------|--------|------------|
//! | `fcfs` | [`Fcfs`] | no |
//! | `sjf` | [`ShortestJobFirst`] | no |
//! | `sjf_preemptive` / `srtf` | [`ShortestRemainingTime`] | yes |
//! | `priority` | [`PriorityPolicy`] | no |
//! | `priority_preemptive` | [`PriorityPolicy`] | yes |
//! | `rr` / `round_robin` | [`RoundRobin`] | yes (quantum) |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod context;
pub mod fcfs;
pub mod kind;
pub mod policy;
pub mod priority;
pub mod round_robin;
pub mod sjf;

pub use context::{ReadyEntry, RunningEntry, SchedulingContext};
pub use fcfs::Fcfs;
pub use kind::PolicyKind;
pub use policy::{Decision, SchedulingPolicy};
pub use priority::PriorityPolicy;
pub use round_robin::RoundRobin;
pub use sjf::{ShortestJobFirst, ShortestRemainingTime};

//! Canonical workloads.
//!
//! Small, hand-checked process sets whose schedules are known under
//! each policy:
//!
//! - [`fcfs_trio`]: P0(5,0) P1(3,1) P2(8,2).
//! - [`rr_pair`]: P0(4,0) P1(3,0).
//! - [`priority_mix`]: same arrivals, distinct priorities.
//! - [`io_pair`]: one IO-bound and one CPU-bound process.

use schedsim_core::{IoProfile, ProcessSpec};

/// Three CPU-bound processes arriving one tick apart.
///
/// FCFS completes them at 5, 8, 16 with waiting times 0, 4, 6.
pub fn fcfs_trio() -> [ProcessSpec; 3] {
    [
        ProcessSpec::new(5, 0, 0),
        ProcessSpec::new(3, 1, 0),
        ProcessSpec::new(8, 2, 0),
    ]
}

/// Two processes arriving together. With quantum 2, Round-Robin runs
/// P0 0-2, P1 2-4, P0 4-6, P1 6-7.
pub fn rr_pair() -> [ProcessSpec; 2] {
    [ProcessSpec::new(4, 0, 0), ProcessSpec::new(3, 0, 0)]
}

/// Four processes all arriving at 0 with priorities 3, 1, 4, 0.
///
/// Priority scheduling runs them in pid order 3, 1, 0, 2.
pub fn priority_mix() -> [ProcessSpec; 4] {
    [
        ProcessSpec::new(2, 0, 3),
        ProcessSpec::new(2, 0, 1),
        ProcessSpec::new(2, 0, 4),
        ProcessSpec::new(2, 0, 0),
    ]
}

/// An IO-bound process (blocks 2 ticks after every 2 ticks of work)
/// next to a CPU-bound one that fills the gaps.
pub fn io_pair() -> [ProcessSpec; 2] {
    [
        ProcessSpec::new(6, 0, 0).with_io(IoProfile {
            interval: 2,
            duration: 2,
        }),
        ProcessSpec::new(4, 0, 0),
    ]
}

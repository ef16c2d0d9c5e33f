//! Test utilities for schedsim development.
//!
//! Provides canonical workloads (see [`fixtures`]), helpers to build
//! and drain simulations, and [`assert_invariants`], which checks the
//! structural invariants every snapshot must satisfy.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::collections::HashSet;

use schedsim_core::{Pid, ProcessSpec, ProcessState};
use schedsim_engine::{SimConfig, Simulation, Snapshot};

pub use fixtures::*;

/// Build a simulation with `specs` registered in order and start it
/// with `algorithm`. Pids are `0..specs.len()`.
pub fn started(config: SimConfig, specs: &[ProcessSpec], algorithm: &str) -> Simulation {
    let mut sim = Simulation::new(config).expect("valid test config");
    for spec in specs {
        sim.add_process(*spec).expect("valid test spec");
    }
    sim.start(algorithm).expect("known test algorithm");
    sim
}

/// Step until every process has terminated, checking invariants after
/// each tick. Returns every snapshot produced, in order.
///
/// # Panics
///
/// If the workload has not drained within `max_ticks`.
pub fn run_to_completion(sim: &mut Simulation, max_ticks: u64) -> Vec<Snapshot> {
    let mut snapshots = Vec::new();
    loop {
        let snapshot = sim.snapshot();
        if snapshot.all_terminated() {
            return snapshots;
        }
        assert!(
            snapshot.tick.0 < max_ticks,
            "workload did not drain within {max_ticks} ticks"
        );
        let next = sim.step().expect("step while running");
        assert_invariants(&next);
        snapshots.push(next);
    }
}

/// Pid that executed during each tick, reconstructed from consecutive
/// snapshots' remaining times.
pub fn execution_trace(snapshots: &[Snapshot]) -> Vec<Option<Pid>> {
    let mut trace = Vec::with_capacity(snapshots.len());
    let mut prev: Option<&Snapshot> = None;
    for snap in snapshots {
        let ran = snap.processes.iter().find_map(|p| {
            let before = prev
                .and_then(|s| s.process(p.pid))
                .map(|v| v.remaining_time)
                .unwrap_or(p.burst_time);
            (p.remaining_time < before).then_some(p.pid)
        });
        trace.push(ran);
        prev = Some(snap);
    }
    trace
}

/// Check the structural invariants of one snapshot.
///
/// # Panics
///
/// With a description of the first violated invariant.
pub fn assert_invariants(snapshot: &Snapshot) {
    let running: Vec<Pid> = snapshot
        .processes
        .iter()
        .filter(|p| p.state == ProcessState::Running)
        .map(|p| p.pid)
        .collect();
    assert!(running.len() <= 1, "more than one running: {running:?}");
    assert_eq!(
        running.first().copied(),
        snapshot.running,
        "cpu slot disagrees with process states"
    );

    let ready: HashSet<Pid> = snapshot.ready_queue.iter().copied().collect();
    let waiting: HashSet<Pid> = snapshot.waiting_queue.iter().copied().collect();
    assert_eq!(ready.len(), snapshot.ready_queue.len(), "duplicate in ready queue");
    assert_eq!(waiting.len(), snapshot.waiting_queue.len(), "duplicate in waiting queue");
    assert!(ready.is_disjoint(&waiting), "pid in both queues");

    for p in &snapshot.processes {
        assert!(p.remaining_time <= p.burst_time, "{} over-ran its burst", p.pid);
        assert_eq!(
            p.state == ProcessState::Ready,
            ready.contains(&p.pid),
            "{} is {} but ready-queue membership disagrees",
            p.pid,
            p.state
        );
        assert_eq!(
            p.state == ProcessState::Waiting,
            waiting.contains(&p.pid),
            "{} is {} but waiting-queue membership disagrees",
            p.pid,
            p.state
        );
        if p.state == ProcessState::New {
            assert!(p.start_time.is_none(), "{} is New but has started", p.pid);
        } else {
            assert!(p.arrival_time <= snapshot.tick.0, "{} left New before arriving", p.pid);
        }
        if p.state == ProcessState::Terminated {
            let completion = p.completion_time.expect("terminated without completion");
            let turnaround = p.turnaround_time.expect("terminated without turnaround");
            let waiting_time = p.waiting_time.expect("terminated without waiting time");
            assert_eq!(p.remaining_time, 0, "{} terminated with work left", p.pid);
            assert_eq!(turnaround, completion - p.arrival_time);
            assert_eq!(waiting_time, turnaround - u64::from(p.burst_time));
        } else {
            assert!(p.completion_time.is_none(), "{} completed early", p.pid);
        }
    }

    let terminated: Vec<Pid> = snapshot
        .processes
        .iter()
        .filter(|p| p.state == ProcessState::Terminated)
        .map(|p| p.pid)
        .collect();
    let mut completed = snapshot.completed_processes.clone();
    completed.sort();
    assert_eq!(completed, terminated, "completed list disagrees with states");

    let m = &snapshot.performance_metrics;
    assert!((0.0..=100.0).contains(&m.cpu_utilization), "utilization {}", m.cpu_utilization);
    assert!(m.throughput >= 0.0);
}

//! Hashing utilities for snapshot and configuration comparison.
//!
//! Uses FNV-1a for fast, deterministic hashing of simulation state.
//! These hashes are not cryptographically secure. They only serve as
//! cheap equality checks during replay comparison.

use schedsim_core::{Pid, ProcessState, ProcessView};
use schedsim_engine::{ResetMode, SimConfig, SimStatus, Snapshot};

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

/// Feed a single byte into an FNV-1a hash state.
#[inline]
fn fnv1a_byte(hash: u64, byte: u8) -> u64 {
    (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
}

/// Feed a u32 (as 4 LE bytes) into an FNV-1a hash state.
#[inline]
fn fnv1a_u32(mut hash: u64, v: u32) -> u64 {
    for &b in &v.to_le_bytes() {
        hash = fnv1a_byte(hash, b);
    }
    hash
}

/// Feed a u64 (as 8 LE bytes) into an FNV-1a hash state.
#[inline]
fn fnv1a_u64(mut hash: u64, v: u64) -> u64 {
    for &b in &v.to_le_bytes() {
        hash = fnv1a_byte(hash, b);
    }
    hash
}

/// Presence flag followed by the value, so `None` and `Some(0)` differ.
#[inline]
fn fnv1a_opt_u64(hash: u64, v: Option<u64>) -> u64 {
    match v {
        Some(v) => fnv1a_u64(fnv1a_byte(hash, 1), v),
        None => fnv1a_byte(hash, 0),
    }
}

/// Length-prefixed string bytes.
fn fnv1a_str(mut hash: u64, s: &str) -> u64 {
    hash = fnv1a_u32(hash, s.len() as u32);
    for &b in s.as_bytes() {
        hash = fnv1a_byte(hash, b);
    }
    hash
}

/// Length-prefixed pid sequence. Order matters.
fn fnv1a_pids(mut hash: u64, pids: &[Pid]) -> u64 {
    hash = fnv1a_u32(hash, pids.len() as u32);
    for pid in pids {
        hash = fnv1a_u64(hash, pid.0);
    }
    hash
}

fn status_tag(status: SimStatus) -> u8 {
    match status {
        SimStatus::Idle => 0,
        SimStatus::Running => 1,
        SimStatus::Paused => 2,
    }
}

fn state_tag(state: ProcessState) -> u8 {
    match state {
        ProcessState::New => 0,
        ProcessState::Ready => 1,
        ProcessState::Waiting => 2,
        ProcessState::Running => 3,
        ProcessState::Terminated => 4,
    }
}

fn fnv1a_process(mut hash: u64, p: &ProcessView) -> u64 {
    hash = fnv1a_u64(hash, p.pid.0);
    hash = fnv1a_u32(hash, p.burst_time);
    hash = fnv1a_u64(hash, p.arrival_time);
    hash = fnv1a_byte(hash, p.priority);
    hash = fnv1a_byte(hash, state_tag(p.state));
    hash = fnv1a_u32(hash, p.remaining_time);
    hash = fnv1a_opt_u64(hash, p.start_time);
    hash = fnv1a_opt_u64(hash, p.waiting_time);
    hash = fnv1a_opt_u64(hash, p.turnaround_time);
    hash = fnv1a_opt_u64(hash, p.completion_time);
    fnv1a_opt_u64(hash, p.response_time)
}

/// Compute a hash over everything observable in a snapshot.
///
/// Folds in the clock, run status, installed policy, the CPU, every
/// process record in pid order, all three queues in order, and the
/// metric values as `f64::to_bits()`. Two snapshots hash equal exactly
/// when they compare equal (modulo FNV collisions).
pub fn snapshot_hash(snapshot: &Snapshot) -> u64 {
    let mut hash = FNV_OFFSET;

    hash = fnv1a_u64(hash, snapshot.tick.0);
    hash = fnv1a_byte(hash, status_tag(snapshot.status));
    hash = fnv1a_str(hash, snapshot.policy.name());
    hash = fnv1a_opt_u64(hash, snapshot.running.map(|pid| pid.0));

    hash = fnv1a_u32(hash, snapshot.processes.len() as u32);
    for p in &snapshot.processes {
        hash = fnv1a_process(hash, p);
    }

    hash = fnv1a_pids(hash, &snapshot.ready_queue);
    hash = fnv1a_pids(hash, &snapshot.waiting_queue);
    hash = fnv1a_pids(hash, &snapshot.completed_processes);

    let m = &snapshot.performance_metrics;
    for v in [
        m.avg_waiting_time,
        m.avg_turnaround_time,
        m.avg_response_time,
        m.cpu_utilization,
        m.throughput,
    ] {
        hash = fnv1a_u64(hash, v.to_bits());
    }

    hash
}

/// Compute a hash over the configuration scalars that affect a run.
///
/// Covers the quantum, default policy, seed, generation ranges, reset
/// mode and `strict_step`. The command queue bound only shapes the
/// service's back-pressure and is left out. Used to detect
/// configuration mismatches before replay.
pub fn config_hash(config: &SimConfig) -> u64 {
    let mut hash = FNV_OFFSET;
    hash = fnv1a_u32(hash, config.time_quantum);
    hash = fnv1a_str(hash, config.default_policy.name());
    hash = fnv1a_u64(hash, config.seed);

    let g = &config.generation;
    hash = fnv1a_u32(hash, *g.burst_time.start());
    hash = fnv1a_u32(hash, *g.burst_time.end());
    hash = fnv1a_u64(hash, *g.arrival_time.start());
    hash = fnv1a_u64(hash, *g.arrival_time.end());
    hash = fnv1a_byte(hash, *g.priority.start());
    hash = fnv1a_byte(hash, *g.priority.end());

    hash = fnv1a_byte(
        hash,
        match config.reset_mode {
            ResetMode::KeepDefinitions => 0,
            ResetMode::ClearRegistry => 1,
        },
    );
    fnv1a_byte(hash, config.strict_step as u8)
}

//! Benchmark profiles and utilities for the schedsim scheduling simulator.
//!
//! Provides pre-built [`SimConfig`] profiles and workload builders for
//! benchmarks:
//!
//! - [`reference_profile`]: 100 processes arriving over 200 ticks
//! - [`stress_profile`]: ~10K processes arriving over 20K ticks
//! - [`io_workload`]: deterministic IO-bound process mix via seed
//! - [`loaded_simulation`]: generate a workload and start a policy

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::error::Error;

use schedsim_core::{IoProfile, ProcessSpec, MAX_PRIORITY};
use schedsim_engine::{SimConfig, Simulation};
use schedsim_registry::GenerationBounds;

/// Process count of the reference profile.
pub const REFERENCE_PROCESSES: usize = 100;

/// Process count of the stress profile.
pub const STRESS_PROCESSES: usize = 10_000;

/// Build a reference benchmark profile.
///
/// Bursts 1..=20 arriving over 0..=200 with quantum 4, so the ready
/// queue stays a few dozen entries deep for most of the run.
pub fn reference_profile(seed: u64) -> SimConfig {
    SimConfig {
        time_quantum: 4,
        seed,
        generation: GenerationBounds {
            burst_time: 1..=20,
            arrival_time: 0..=200,
            priority: 0..=MAX_PRIORITY,
        },
        ..SimConfig::default()
    }
}

/// Build a stress benchmark profile.
///
/// Same shape as [`reference_profile`] but arrivals spread over 20K
/// ticks, sized for [`STRESS_PROCESSES`].
pub fn stress_profile(seed: u64) -> SimConfig {
    SimConfig {
        time_quantum: 4,
        seed,
        generation: GenerationBounds {
            burst_time: 1..=20,
            arrival_time: 0..=20_000,
            priority: 0..=MAX_PRIORITY,
        },
        ..SimConfig::default()
    }
}

/// Generate `count` random processes under `config` and start
/// `algorithm`.
pub fn loaded_simulation(
    config: SimConfig,
    count: usize,
    algorithm: &str,
) -> Result<Simulation, Box<dyn Error>> {
    let mut sim = Simulation::new(config)?;
    sim.generate_random(count)?;
    sim.start(algorithm)?;
    Ok(sim)
}

/// Generate a deterministic mix of IO-bound and CPU-bound processes.
///
/// Every third process blocks periodically. Values come from a simple
/// LCG over the seed so the mix is identical across runs and does not
/// depend on the simulation's own generator.
pub fn io_workload(n: usize, seed: u64) -> Vec<ProcessSpec> {
    let mut state = seed;
    let mut next = |modulus: u64| {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 33) % modulus
    };

    (0..n)
        .map(|i| {
            let burst = 1 + next(20) as u32;
            let arrival = next(n as u64 * 2 + 1);
            let priority = next(u64::from(MAX_PRIORITY) + 1) as u8;
            let spec = ProcessSpec::new(burst, arrival, priority);
            if i % 3 == 0 {
                spec.with_io(IoProfile {
                    interval: 1 + next(4) as u32,
                    duration: 1 + next(3) as u32,
                })
            } else {
                spec
            }
        })
        .collect()
}

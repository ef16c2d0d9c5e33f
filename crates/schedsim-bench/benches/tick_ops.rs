//! Criterion benchmarks for the tick engine under each policy.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use schedsim_bench::{
    io_workload, loaded_simulation, reference_profile, stress_profile, REFERENCE_PROCESSES,
    STRESS_PROCESSES,
};
use schedsim_engine::{SimConfig, Simulation};
use schedsim_policy::PolicyKind;

/// Benchmark: a single step with the reference workload mid-run.
fn bench_step_reference(c: &mut Criterion) {
    let mut group = c.benchmark_group("step_reference");
    for kind in PolicyKind::ALL {
        let mut sim =
            loaded_simulation(reference_profile(42), REFERENCE_PROCESSES, kind.name()).unwrap();
        // Warm up into the busy middle of the run.
        for _ in 0..100 {
            sim.step().unwrap();
        }
        group.bench_function(BenchmarkId::from_parameter(kind), |b| {
            b.iter(|| {
                let snapshot = sim.step().unwrap();
                black_box(&snapshot);
            });
        });
    }
    group.finish();
}

/// Benchmark: drain the reference workload from tick 0 to completion.
fn bench_drain_reference(c: &mut Criterion) {
    let mut group = c.benchmark_group("drain_reference");
    for kind in [PolicyKind::Fcfs, PolicyKind::Srtf, PolicyKind::RoundRobin] {
        group.bench_function(BenchmarkId::from_parameter(kind), |b| {
            b.iter(|| {
                let mut sim =
                    loaded_simulation(reference_profile(42), REFERENCE_PROCESSES, kind.name())
                        .unwrap();
                while !sim.snapshot().all_terminated() {
                    black_box(sim.step().unwrap());
                }
            });
        });
    }
    group.finish();
}

/// Benchmark: one step with ~10K registered processes.
fn bench_step_stress(c: &mut Criterion) {
    let mut sim = loaded_simulation(stress_profile(42), STRESS_PROCESSES, "rr").unwrap();
    for _ in 0..1_000 {
        sim.step().unwrap();
    }
    c.bench_function("step_stress_rr", |b| {
        b.iter(|| {
            let snapshot = sim.step().unwrap();
            black_box(&snapshot);
        });
    });
}

/// Benchmark: 1000 ticks of an IO-heavy workload under Round-Robin.
fn bench_1000_ticks_io(c: &mut Criterion) {
    let specs = io_workload(200, 42);
    c.bench_function("1000_ticks_io_rr", |b| {
        b.iter(|| {
            let mut sim = Simulation::new(SimConfig::default()).unwrap();
            for spec in &specs {
                sim.add_process(*spec).unwrap();
            }
            sim.start("rr").unwrap();
            for _ in 0..1_000 {
                black_box(sim.step().unwrap());
            }
        });
    });
}

criterion_group!(
    benches,
    bench_step_reference,
    bench_drain_reference,
    bench_step_stress,
    bench_1000_ticks_io
);
criterion_main!(benches);

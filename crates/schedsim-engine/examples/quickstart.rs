//! schedsim quickstart: one workload under every built-in policy.
//!
//! Demonstrates:
//!   1. Building a SimConfig and Simulation
//!   2. Registering CPU-bound and IO-bound processes
//!   3. Starting a policy by name and stepping to completion
//!   4. Reading snapshots and aggregate metrics
//!   5. Resetting and re-running the same definitions
//!
//! Run with:
//!   cargo run --example quickstart

use schedsim_core::{IoProfile, Pid, ProcessSpec};
use schedsim_engine::{SimConfig, Simulation, Snapshot};
use schedsim_policy::PolicyKind;

// ─── Workload ───────────────────────────────────────────────────

const MAX_TICKS: u64 = 200;

fn workload() -> Vec<ProcessSpec> {
    vec![
        ProcessSpec::new(6, 0, 2),
        ProcessSpec::new(3, 1, 0),
        ProcessSpec::new(8, 2, 3),
        ProcessSpec::new(2, 4, 1),
        ProcessSpec::new(5, 5, 2).with_io(IoProfile {
            interval: 2,
            duration: 2,
        }),
    ]
}

// ─── Rendering ──────────────────────────────────────────────────

/// The process whose remaining time dropped between two snapshots.
fn ran_during(prev: &Snapshot, next: &Snapshot) -> Option<Pid> {
    next.processes.iter().find_map(|p| {
        let before = prev.process(p.pid)?;
        (p.remaining_time < before.remaining_time).then_some(p.pid)
    })
}

/// One character per tick: the running pid, or `.` when idle.
fn gantt(trace: &[Option<Pid>]) -> String {
    trace
        .iter()
        .map(|slot| match slot {
            Some(pid) => char::from_digit((pid.0 % 36) as u32, 36).unwrap_or('?'),
            None => '.',
        })
        .collect()
}

fn print_summary(kind: PolicyKind, trace: &[Option<Pid>], last: &Snapshot) {
    let m = &last.performance_metrics;
    println!("{:<20} |{}|", kind.name(), gantt(trace));
    println!(
        "{:<20}  wait {:.2}  turnaround {:.2}  response {:.2}  cpu {:.0}%  throughput {:.3}",
        "",
        m.avg_waiting_time,
        m.avg_turnaround_time,
        m.avg_response_time,
        m.cpu_utilization,
        m.throughput,
    );
}

// ─── Main ───────────────────────────────────────────────────────

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== schedsim quickstart ===\n");

    let config = SimConfig {
        time_quantum: 2,
        ..SimConfig::default()
    };
    let mut sim = Simulation::new(config)?;
    for spec in workload() {
        let pid = sim.add_process(spec)?;
        println!(
            "{pid}: burst {:>2}  arrival {:>2}  priority {}{}",
            spec.burst_time,
            spec.arrival_time,
            spec.priority,
            if spec.io.is_some() { "  (io)" } else { "" },
        );
    }
    println!();

    for kind in PolicyKind::ALL {
        sim.reset();
        sim.start(kind.name())?;

        let mut trace = Vec::new();
        let mut last = sim.snapshot();
        while !last.all_terminated() && last.tick.0 < MAX_TICKS {
            let next = sim.step()?;
            trace.push(ran_during(&last, &next));
            last = next;
        }
        print_summary(kind, &trace, &last);
    }

    println!("\nCompletion order under the last policy:");
    let snap = sim.snapshot();
    for pid in &snap.completed_processes {
        if let Some(p) = snap.process(*pid) {
            println!(
                "  {pid} completed at {:>2} (waited {})",
                p.completion_time.unwrap_or_default(),
                p.waiting_time.unwrap_or_default(),
            );
        }
    }

    println!("Done.");
    Ok(())
}

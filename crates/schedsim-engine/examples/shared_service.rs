//! One simulation shared between a driver thread and an observer.
//!
//! The driver submits `Step` at a fixed cadence; the observer polls
//! the published snapshot and prints queue contents whenever the clock
//! moves. Neither thread ever sees a half-applied tick.
//!
//! Run with:
//!   cargo run --example shared_service

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use schedsim_core::{Command, Pid};
use schedsim_engine::{SimConfig, Simulation, SimulationService};

fn pids(list: &[Pid]) -> String {
    let names: Vec<String> = list.iter().map(Pid::to_string).collect();
    format!("[{}]", names.join(" "))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = SimConfig {
        seed: 7,
        ..SimConfig::default()
    };
    let service = Arc::new(SimulationService::spawn(Simulation::new(config)?)?);

    service.submit(Command::GenerateRandom { count: 6 })?;
    service.submit(Command::Start {
        algorithm: "rr".to_string(),
    })?;

    let observer = {
        let service = Arc::clone(&service);
        thread::Builder::new()
            .name("observer".into())
            .spawn(move || {
                let mut seen = None;
                loop {
                    let snap = service.latest_snapshot();
                    if seen != Some(snap.tick) {
                        seen = Some(snap.tick);
                        println!(
                            "tick {:>3}  cpu {:<4} ready {:<20} waiting {}",
                            snap.tick.0,
                            snap.running.map(|p| p.to_string()).unwrap_or_default(),
                            pids(&snap.ready_queue),
                            pids(&snap.waiting_queue),
                        );
                    }
                    if snap.all_terminated() {
                        return snap.performance_metrics;
                    }
                    thread::sleep(Duration::from_millis(1));
                }
            })?
    };

    loop {
        let snap = service.submit(Command::Step)?.into_snapshot();
        if snap.is_none_or(|s| s.all_terminated()) {
            break;
        }
        thread::sleep(Duration::from_millis(5));
    }

    let metrics = observer.join().map_err(|_| "observer panicked")?;
    println!(
        "\navg waiting {:.2}, avg turnaround {:.2}, cpu {:.0}%",
        metrics.avg_waiting_time,
        metrics.avg_turnaround_time,
        metrics.cpu_utilization
    );

    let service = Arc::try_unwrap(service).map_err(|_| "observer still holds the service")?;
    let sim = service.shutdown()?;
    println!("final tick {}", sim.current_tick().0);
    Ok(())
}

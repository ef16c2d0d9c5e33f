//! Concurrent access through `SimulationService`.
//!
//! One writer steps the simulation while several readers poll the
//! published snapshot and submit read-only commands. Readers must only
//! ever observe consistent snapshots with a non-decreasing clock.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use schedsim_core::{Command, TickId};
use schedsim_engine::{Reply, ServiceError, SimConfig, Simulation, SimulationService};
use schedsim_test_utils::{assert_invariants, fcfs_trio, rr_pair};

const READERS: usize = 4;

fn spawn_with(specs: &[schedsim_core::ProcessSpec]) -> SimulationService {
    let mut sim = Simulation::new(SimConfig::default()).unwrap();
    for spec in specs {
        sim.add_process(*spec).unwrap();
    }
    SimulationService::spawn(sim).unwrap()
}

#[test]
fn readers_never_see_torn_state() {
    let svc = Arc::new(spawn_with(&fcfs_trio()));
    svc.submit(Command::Start {
        algorithm: "rr".to_string(),
    })
    .unwrap();

    let done = Arc::new(AtomicBool::new(false));
    let readers: Vec<_> = (0..READERS)
        .map(|i| {
            let svc = Arc::clone(&svc);
            let done = Arc::clone(&done);
            thread::spawn(move || {
                let mut last_tick = TickId(0);
                let mut observed = 0usize;
                while !done.load(Ordering::Acquire) {
                    let snap = if i % 2 == 0 {
                        svc.latest_snapshot()
                    } else {
                        match svc.submit(Command::Snapshot).unwrap() {
                            Reply::Snapshot(s) => Arc::new(s),
                            other => panic!("expected snapshot, got {other:?}"),
                        }
                    };
                    assert_invariants(&snap);
                    assert!(snap.tick >= last_tick, "clock went backwards");
                    last_tick = snap.tick;
                    observed += 1;
                }
                observed
            })
        })
        .collect();

    for _ in 0..16 {
        svc.submit(Command::Step).unwrap();
    }
    done.store(true, Ordering::Release);

    for reader in readers {
        assert!(reader.join().unwrap() > 0);
    }

    let final_snapshot = svc.latest_snapshot();
    assert!(final_snapshot.all_terminated());
    assert_eq!(final_snapshot.tick, TickId(16));

    let svc = Arc::try_unwrap(svc).expect("readers joined");
    let sim = svc.shutdown().unwrap();
    assert_eq!(sim.current_tick(), TickId(16));
}

#[test]
fn concurrent_writers_are_serialized() {
    let svc = Arc::new(spawn_with(&[]));
    let writers: Vec<_> = (0..READERS)
        .map(|_| {
            let svc = Arc::clone(&svc);
            thread::spawn(move || {
                for _ in 0..10 {
                    svc.submit(Command::add_process(2, 0, 1)).unwrap();
                }
            })
        })
        .collect();
    for w in writers {
        w.join().unwrap();
    }

    let snap = svc.latest_snapshot();
    assert_eq!(snap.processes.len(), READERS * 10);
    let mut pids: Vec<u64> = snap.processes.iter().map(|p| p.pid.0).collect();
    pids.dedup();
    assert_eq!(pids.len(), READERS * 10, "pid reused");
}

#[test]
fn independent_services_share_nothing() {
    let a = spawn_with(&rr_pair());
    let b = spawn_with(&rr_pair());
    for svc in [&a, &b] {
        svc.submit(Command::Start {
            algorithm: "rr".to_string(),
        })
        .unwrap();
    }
    a.submit(Command::Step).unwrap();
    a.submit(Command::Step).unwrap();
    b.submit(Command::Step).unwrap();

    assert_eq!(a.latest_snapshot().tick, TickId(2));
    assert_eq!(b.latest_snapshot().tick, TickId(1));
}

#[test]
fn shutdown_recovers_simulation_and_rejects_late_commands() {
    let svc = spawn_with(&rr_pair());
    svc.submit(Command::Start {
        algorithm: "fcfs".to_string(),
    })
    .unwrap();
    svc.submit(Command::Step).unwrap();
    let sim = svc.shutdown().unwrap();
    assert_eq!(sim.current_tick(), TickId(1));

    // A fresh service around the recovered simulation picks up where it left off.
    let svc = SimulationService::spawn(sim).unwrap();
    let snap = svc.submit(Command::Step).unwrap().into_snapshot().unwrap();
    assert_eq!(snap.tick, TickId(2));
    assert!(matches!(
        svc.try_submit(Command::Pause),
        Ok(Reply::Ack) | Err(ServiceError::ChannelFull)
    ));
}

//! schedsim: a discrete-time CPU scheduling simulator.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! schedsim sub-crates. For most users, adding `schedsim` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use schedsim::prelude::*;
//!
//! let mut sim = Simulation::new(SimConfig::default()).unwrap();
//! sim.add_process(ProcessSpec::new(4, 0, 0)).unwrap();
//! sim.add_process(ProcessSpec::new(3, 0, 0)).unwrap();
//! sim.start("rr").unwrap();
//!
//! let mut snapshot = sim.snapshot();
//! while !snapshot.all_terminated() {
//!     snapshot = sim.step().unwrap();
//! }
//!
//! // Quantum 2: P0 0-2, P1 2-4, P0 4-6, P1 6-7.
//! assert_eq!(snapshot.tick, TickId(7));
//! assert_eq!(snapshot.completed_processes, vec![Pid(0), Pid(1)]);
//! assert_eq!(snapshot.process(Pid(1)).unwrap().completion_time, Some(7));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `schedsim-core` | IDs, process records, commands, error types |
//! | [`registry`] | `schedsim-registry` | Process registry and random generation |
//! | [`policy`] | `schedsim-policy` | Scheduling policies and the policy trait |
//! | [`engine`] | `schedsim-engine` | Tick engine, simulation, command thread |
//! | [`replay`] | `schedsim-replay` | Command recording and determinism checks |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and IDs (`schedsim-core`).
///
/// Contains the process record and its lifecycle, the [`types::Command`]
/// surface, and the error enums shared by every layer.
pub use schedsim_core as types;

/// Process registry and random workload generation (`schedsim-registry`).
pub use schedsim_registry as registry;

/// Scheduling policies (`schedsim-policy`).
///
/// The [`policy::SchedulingPolicy`] trait is the extension point for new
/// algorithms; [`policy::PolicyKind`] names the built-in ones.
pub use schedsim_policy as policy;

/// Tick engine and simulation lifecycle (`schedsim-engine`).
///
/// [`engine::Simulation`] for direct single-threaded use,
/// [`engine::SimulationService`] to share one simulation across threads.
pub use schedsim_engine as engine;

/// Command recording and determinism verification (`schedsim-replay`).
///
/// Record a session with [`replay::Recorder`] and check a fresh run
/// against it with [`replay::replay_recording`].
pub use schedsim_replay as replay;

/// Common imports for typical schedsim usage.
///
/// ```rust
/// use schedsim::prelude::*;
/// ```
///
/// This imports the most frequently used types: the simulation and its
/// configuration, process definitions, commands, snapshots, and errors.
pub mod prelude {
    // Core types
    pub use schedsim_core::{
        Command, IoProfile, Pid, ProcessSpec, ProcessState, ProcessView, TickId,
    };

    // Errors
    pub use schedsim_core::{CommandError, RegistryError, SimulationError};

    // Policy
    pub use schedsim_policy::{PolicyKind, SchedulingPolicy};

    // Engine
    pub use schedsim_engine::{
        ConfigError, PerformanceMetrics, Reply, ResetMode, ServiceError, SimConfig, SimStatus,
        Simulation, SimulationService, Snapshot,
    };
}

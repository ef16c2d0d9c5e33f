//! Scheduling simulation engine.
//!
//! Provides [`Simulation`], the synchronous front door that owns the
//! process registry, the installed policy and the clock, and
//! [`SimulationService`], which runs a simulation on its own command
//! thread for shared access. [`TickEngine`] holds the per-tick state
//! machine; [`Snapshot`] and [`PerformanceMetrics`] are the owned views
//! handed to renderers.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod metrics;
pub mod service;
pub mod simulation;
pub mod snapshot;
pub mod tick;

pub use config::{ConfigError, ResetMode, SimConfig};
pub use metrics::PerformanceMetrics;
pub use service::{ServiceError, SimulationService};
pub use simulation::{Reply, Simulation};
pub use snapshot::{SimStatus, Snapshot};
pub use tick::{TickEngine, TickOutcome};

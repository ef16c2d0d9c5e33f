//! Core types and errors for the schedsim scheduling simulator.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the schedsim workspace:
//! process and tick identifiers, the process record and its lifecycle
//! transitions, the command surface, and the error taxonomy.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod command;
pub mod error;
pub mod id;
pub mod process;

pub use command::Command;
pub use error::{CommandError, RegistryError, SimulationError};
pub use id::{Pid, TickId};
pub use process::{IoProfile, Process, ProcessSpec, ProcessState, ProcessView, MAX_PRIORITY};

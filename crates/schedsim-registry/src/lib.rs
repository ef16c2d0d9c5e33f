//! Process registry and seeded workload generation for schedsim.
//!
//! [`ProcessRegistry`] owns every process record of one simulation
//! instance, assigns pids, and validates definitions before they touch
//! state. [`ProcessGenerator`] synthesizes random workloads from a
//! seeded ChaCha8 stream, so identical seeds give identical workloads.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod generate;
pub mod registry;

pub use generate::{GenerationBounds, ProcessGenerator};
pub use registry::ProcessRegistry;

//! Command recording and determinism verification for schedsim.
//!
//! A simulation is a pure function of its configuration, its initial
//! workload and the commands applied to it. This crate records that
//! command stream together with a hash of the snapshot after every
//! command, and replays it against a fresh simulation to find the first
//! point where the two runs disagree.
//!
//! # Architecture
//!
//! - [`Recorder`] wraps a [`Simulation`](schedsim_engine::Simulation)
//!   and appends a [`Frame`] per applied command
//! - [`replay_and_compare`] re-applies frames and reports the first
//!   [`Divergence`]
//! - [`replay_recording`] additionally checks the configuration and
//!   initial-state hashes before replaying
//! - [`snapshot_hash`] and [`config_hash`] fold state into FNV-1a hashes

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod compare;
pub mod error;
pub mod hash;
pub mod recorder;
pub mod types;

pub use compare::{replay_and_compare, replay_recording, Divergence, DivergenceKind};
pub use error::ReplayError;
pub use hash::{config_hash, snapshot_hash};
pub use recorder::Recorder;
pub use types::{Frame, Recording};

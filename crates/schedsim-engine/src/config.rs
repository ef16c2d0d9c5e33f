//! Simulation configuration, validation, and error types.
//!
//! [`SimConfig`] is the builder-input for constructing a
//! [`Simulation`](crate::simulation::Simulation).
//! [`validate()`](SimConfig::validate) checks structural invariants at
//! construction; nothing is re-validated per tick.

use std::error::Error;
use std::fmt;
use std::num::NonZeroU32;

use schedsim_policy::PolicyKind;
use schedsim_registry::GenerationBounds;

// ── ResetMode ──────────────────────────────────────────────────────

/// What `reset` does with process definitions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResetMode {
    /// Keep burst/arrival/priority, clear runtime progress. Default.
    #[default]
    KeepDefinitions,
    /// Drop every process. Pids still never repeat.
    ClearRegistry,
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`SimConfig::validate()`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `time_quantum` is zero.
    ZeroQuantum,
    /// A random-generation range is empty or yields invalid processes.
    InvalidGenerationBounds {
        /// Description of which range was rejected.
        reason: String,
    },
    /// `command_queue_capacity` is zero.
    CommandQueueZero,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroQuantum => write!(f, "time_quantum must be at least 1"),
            Self::InvalidGenerationBounds { reason } => {
                write!(f, "invalid generation bounds: {reason}")
            }
            Self::CommandQueueZero => write!(f, "command_queue_capacity must be at least 1"),
        }
    }
}

impl Error for ConfigError {}

// ── SimConfig ──────────────────────────────────────────────────────

/// Complete configuration for one simulation instance.
#[derive(Clone, Debug)]
pub struct SimConfig {
    /// Round-Robin quantum in ticks. Default: 2. Minimum: 1.
    pub time_quantum: u32,
    /// Policy installed before the first `start`. Default: FCFS.
    pub default_policy: PolicyKind,
    /// Seed for random workload generation. Default: 0.
    pub seed: u64,
    /// Ranges for random workload generation.
    pub generation: GenerationBounds,
    /// Behavior of `reset`. Default: [`ResetMode::KeepDefinitions`].
    pub reset_mode: ResetMode,
    /// Reject `step` outside Running with `NotRunning` instead of
    /// returning the unchanged snapshot. Default: false.
    pub strict_step: bool,
    /// Bound of the [`SimulationService`](crate::service::SimulationService)
    /// command channel. Default: 64.
    pub command_queue_capacity: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            time_quantum: 2,
            default_policy: PolicyKind::Fcfs,
            seed: 0,
            generation: GenerationBounds::default(),
            reset_mode: ResetMode::KeepDefinitions,
            strict_step: false,
            command_queue_capacity: 64,
        }
    }
}

impl SimConfig {
    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.quantum()?;
        self.generation
            .validate()
            .map_err(|reason| ConfigError::InvalidGenerationBounds { reason })?;
        if self.command_queue_capacity == 0 {
            return Err(ConfigError::CommandQueueZero);
        }
        Ok(())
    }

    /// The quantum as a [`NonZeroU32`].
    pub fn quantum(&self) -> Result<NonZeroU32, ConfigError> {
        NonZeroU32::new(self.time_quantum).ok_or(ConfigError::ZeroQuantum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = SimConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.quantum().unwrap().get(), 2);
        assert_eq!(cfg.reset_mode, ResetMode::KeepDefinitions);
    }

    #[test]
    fn zero_quantum_fails() {
        let cfg = SimConfig {
            time_quantum: 0,
            ..SimConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroQuantum));
    }

    #[test]
    fn empty_burst_range_fails() {
        let mut cfg = SimConfig::default();
        cfg.generation.burst_time = 0..=5;
        match cfg.validate() {
            Err(ConfigError::InvalidGenerationBounds { reason }) => {
                assert!(reason.contains("burst_time"));
            }
            other => panic!("expected InvalidGenerationBounds, got {other:?}"),
        }
    }

    #[test]
    fn priority_above_max_fails() {
        let mut cfg = SimConfig::default();
        cfg.generation.priority = 0..=9;
        match cfg.validate() {
            Err(ConfigError::InvalidGenerationBounds { .. }) => {}
            other => panic!("expected InvalidGenerationBounds, got {other:?}"),
        }
    }

    #[test]
    fn zero_command_queue_fails() {
        let cfg = SimConfig {
            command_queue_capacity: 0,
            ..SimConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::CommandQueueZero));
        assert!(format!("{}", ConfigError::CommandQueueZero).contains("command_queue_capacity"));
    }
}

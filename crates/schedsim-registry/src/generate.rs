//! Seeded random workload generation.
//!
//! Uses a ChaCha8 stream seeded once at construction. The generator
//! keeps its stream position across calls, so two generators built
//! from the same seed and asked for the same counts produce identical
//! workloads. Randomness is confined here; the tick loop never draws
//! random numbers.

use std::ops::RangeInclusive;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use schedsim_core::{ProcessSpec, RegistryError, MAX_PRIORITY};

/// Inclusive ranges for randomly generated process parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationBounds {
    /// Burst time range. Default: `1..=20`. Must start at 1 or above.
    pub burst_time: RangeInclusive<u32>,
    /// Arrival time range. Default: `0..=10`.
    pub arrival_time: RangeInclusive<u64>,
    /// Priority range. Default: `0..=MAX_PRIORITY`.
    pub priority: RangeInclusive<u8>,
}

impl Default for GenerationBounds {
    fn default() -> Self {
        Self {
            burst_time: 1..=20,
            arrival_time: 0..=10,
            priority: 0..=MAX_PRIORITY,
        }
    }
}

impl GenerationBounds {
    /// Check that every range is non-empty and yields valid specs.
    pub fn validate(&self) -> Result<(), String> {
        if self.burst_time.is_empty() {
            return Err("burst_time range is empty".to_string());
        }
        if *self.burst_time.start() < 1 {
            return Err("burst_time range must start at 1 or above".to_string());
        }
        if self.arrival_time.is_empty() {
            return Err("arrival_time range is empty".to_string());
        }
        if self.priority.is_empty() {
            return Err("priority range is empty".to_string());
        }
        if *self.priority.end() > MAX_PRIORITY {
            return Err(format!("priority range must end at {MAX_PRIORITY} or below"));
        }
        Ok(())
    }
}

/// Produces random [`ProcessSpec`]s from a seeded stream.
#[derive(Clone, Debug)]
pub struct ProcessGenerator {
    rng: ChaCha8Rng,
    bounds: GenerationBounds,
}

impl ProcessGenerator {
    /// Create a generator. `bounds` is assumed validated by the caller's
    /// configuration pass.
    pub fn new(seed: u64, bounds: GenerationBounds) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            bounds,
        }
    }

    /// Restart the stream from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    /// The configured ranges.
    pub fn bounds(&self) -> &GenerationBounds {
        &self.bounds
    }

    /// Draw `count` process definitions.
    ///
    /// Fails with [`RegistryError::InvalidCount`] when `count` is zero,
    /// without advancing the stream.
    pub fn generate(&mut self, count: usize) -> Result<Vec<ProcessSpec>, RegistryError> {
        if count < 1 {
            return Err(RegistryError::InvalidCount { count });
        }
        let specs = (0..count)
            .map(|_| {
                let burst = self.rng.random_range(self.bounds.burst_time.clone());
                let arrival = self.rng.random_range(self.bounds.arrival_time.clone());
                let priority = self.rng.random_range(self.bounds.priority.clone());
                ProcessSpec::new(burst, arrival, priority)
            })
            .collect();
        Ok(specs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_count_is_rejected() {
        let mut generator = ProcessGenerator::new(1, GenerationBounds::default());
        assert_eq!(
            generator.generate(0),
            Err(RegistryError::InvalidCount { count: 0 })
        );
    }

    #[test]
    fn same_seed_same_workload() {
        let mut a = ProcessGenerator::new(42, GenerationBounds::default());
        let mut b = ProcessGenerator::new(42, GenerationBounds::default());
        assert_eq!(a.generate(16).unwrap(), b.generate(16).unwrap());
        assert_eq!(a.generate(3).unwrap(), b.generate(3).unwrap());
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = ProcessGenerator::new(1, GenerationBounds::default());
        let mut b = ProcessGenerator::new(2, GenerationBounds::default());
        assert_ne!(a.generate(32).unwrap(), b.generate(32).unwrap());
    }

    #[test]
    fn reseed_restarts_stream() {
        let mut generator = ProcessGenerator::new(7, GenerationBounds::default());
        let first = generator.generate(5).unwrap();
        generator.reseed(7);
        assert_eq!(generator.generate(5).unwrap(), first);
    }

    #[test]
    fn default_bounds_are_valid() {
        assert!(GenerationBounds::default().validate().is_ok());
    }

    #[test]
    fn bounds_validation_catches_bad_ranges() {
        let mut bounds = GenerationBounds::default();
        bounds.burst_time = 0..=5;
        assert!(bounds.validate().is_err());

        let mut bounds = GenerationBounds::default();
        bounds.priority = 0..=9;
        assert!(bounds.validate().is_err());

        let mut bounds = GenerationBounds::default();
        bounds.arrival_time = RangeInclusive::new(5, 1);
        assert!(bounds.validate().is_err());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn generated_specs_respect_bounds(seed in any::<u64>(), count in 1usize..64) {
                let bounds = GenerationBounds::default();
                let mut generator = ProcessGenerator::new(seed, bounds.clone());
                for spec in generator.generate(count).unwrap() {
                    prop_assert!(spec.validate().is_ok());
                    prop_assert!(bounds.burst_time.contains(&spec.burst_time));
                    prop_assert!(bounds.arrival_time.contains(&spec.arrival_time));
                    prop_assert!(bounds.priority.contains(&spec.priority));
                }
            }
        }
    }
}

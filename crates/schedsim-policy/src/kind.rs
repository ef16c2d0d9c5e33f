//! Policy selection by name.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use schedsim_core::SimulationError;

use crate::fcfs::Fcfs;
use crate::policy::SchedulingPolicy;
use crate::priority::PriorityPolicy;
use crate::round_robin::RoundRobin;
use crate::sjf::{ShortestJobFirst, ShortestRemainingTime};

/// The built-in scheduling algorithms.
///
/// Parsed case-insensitively from the names transport layers send in a
/// `start` command.
///
/// # Examples
///
/// ```
/// use schedsim_policy::PolicyKind;
///
/// assert_eq!("rr".parse::<PolicyKind>().unwrap(), PolicyKind::RoundRobin);
/// assert_eq!("SJF".parse::<PolicyKind>().unwrap(), PolicyKind::Sjf);
/// assert!("lottery".parse::<PolicyKind>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    /// First-come first-served, non-preemptive.
    #[default]
    Fcfs,
    /// Shortest job first, non-preemptive.
    Sjf,
    /// Shortest remaining time first (preemptive SJF).
    Srtf,
    /// Lowest priority value first, non-preemptive.
    Priority,
    /// Lowest priority value first, preempting on a more urgent arrival.
    PriorityPreemptive,
    /// Round-Robin with a fixed time quantum.
    RoundRobin,
}

impl PolicyKind {
    /// Every variant, in display order.
    pub const ALL: [PolicyKind; 6] = [
        Self::Fcfs,
        Self::Sjf,
        Self::Srtf,
        Self::Priority,
        Self::PriorityPreemptive,
        Self::RoundRobin,
    ];

    /// Canonical name, accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Fcfs => "fcfs",
            Self::Sjf => "sjf",
            Self::Srtf => "sjf_preemptive",
            Self::Priority => "priority",
            Self::PriorityPreemptive => "priority_preemptive",
            Self::RoundRobin => "rr",
        }
    }

    /// Whether the variant may interrupt a running process.
    pub fn is_preemptive(self) -> bool {
        matches!(
            self,
            Self::Srtf | Self::PriorityPreemptive | Self::RoundRobin
        )
    }

    /// Build the policy object. `quantum` is only used by Round-Robin.
    pub fn instantiate(self, quantum: NonZeroU32) -> Box<dyn SchedulingPolicy> {
        match self {
            Self::Fcfs => Box::new(Fcfs),
            Self::Sjf => Box::new(ShortestJobFirst),
            Self::Srtf => Box::new(ShortestRemainingTime),
            Self::Priority => Box::new(PriorityPolicy::non_preemptive()),
            Self::PriorityPreemptive => Box::new(PriorityPolicy::preemptive()),
            Self::RoundRobin => Box::new(RoundRobin::new(quantum)),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PolicyKind {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fcfs" => Ok(Self::Fcfs),
            "sjf" => Ok(Self::Sjf),
            "sjf_preemptive" | "srtf" => Ok(Self::Srtf),
            "priority" => Ok(Self::Priority),
            "priority_preemptive" => Ok(Self::PriorityPreemptive),
            "rr" | "round_robin" => Ok(Self::RoundRobin),
            _ => Err(SimulationError::InvalidAlgorithm {
                name: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_names_round_trip() {
        for kind in PolicyKind::ALL {
            assert_eq!(kind.name().parse::<PolicyKind>().unwrap(), kind);
        }
    }

    #[test]
    fn aliases_parse() {
        assert_eq!("srtf".parse::<PolicyKind>().unwrap(), PolicyKind::Srtf);
        assert_eq!(
            " Round_Robin ".parse::<PolicyKind>().unwrap(),
            PolicyKind::RoundRobin
        );
    }

    #[test]
    fn unknown_name_is_invalid_algorithm() {
        assert_eq!(
            "mlfq".parse::<PolicyKind>(),
            Err(SimulationError::InvalidAlgorithm {
                name: "mlfq".to_string()
            })
        );
    }

    #[test]
    fn instantiated_policy_reports_its_kind() {
        let quantum = NonZeroU32::new(3).unwrap();
        for kind in PolicyKind::ALL {
            let policy = kind.instantiate(quantum);
            assert_eq!(policy.kind(), kind);
            assert_eq!(policy.is_preemptive(), kind.is_preemptive());
        }
    }
}

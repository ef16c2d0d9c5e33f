//! Strongly-typed identifiers for processes and simulated time.

use std::fmt;

/// Identifies a process within one simulation instance.
///
/// Assigned by the registry from a monotonic counter. A `Pid` is never
/// reassigned, even after the process is deleted or the registry is
/// cleared by a reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pid(pub u64);

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

impl From<u64> for Pid {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Monotonically increasing simulation clock.
///
/// Starts at 0 and is incremented once per executed `step()`. Returns
/// to 0 only on reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickId(pub u64);

impl TickId {
    /// The tick immediately after this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for TickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TickId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pid_display_is_prefixed() {
        assert_eq!(Pid(3).to_string(), "P3");
    }

    #[test]
    fn tick_next_increments() {
        assert_eq!(TickId(0).next(), TickId(1));
        assert_eq!(TickId::default(), TickId(0));
    }
}

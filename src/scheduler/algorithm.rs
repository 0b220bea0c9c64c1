//! Algorithm selector.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SimError;

/// A CPU scheduling policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// First Come First Served.
    Fcfs,
    /// Shortest Job First, run to completion.
    SjfNonPreemptive,
    /// Shortest Remaining Time First.
    SjfPreemptive,
    /// Static priority, run to completion.
    Priority,
    /// Round robin with a fixed quantum.
    RoundRobin,
}

impl Algorithm {
    /// Every supported algorithm, in display order.
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Fcfs,
        Algorithm::SjfNonPreemptive,
        Algorithm::SjfPreemptive,
        Algorithm::Priority,
        Algorithm::RoundRobin,
    ];

    /// Canonical name, used as the comparison key.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Fcfs => "FCFS",
            Algorithm::SjfNonPreemptive => "SJF (Non-preemptive)",
            Algorithm::SjfPreemptive => "SJF (Preemptive)",
            Algorithm::Priority => "Priority",
            Algorithm::RoundRobin => "Round Robin",
        }
    }

    /// Whether the quantum parameter affects this algorithm.
    pub fn uses_quantum(&self) -> bool {
        matches!(self, Algorithm::RoundRobin)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SimError;

    /// Parses a canonical name or a short alias, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        match key.as_str() {
            "fcfs" | "fifo" => Ok(Algorithm::Fcfs),
            "sjf (non-preemptive)" | "sjf" | "sjf-np" => Ok(Algorithm::SjfNonPreemptive),
            "sjf (preemptive)" | "srtf" | "sjf-p" => Ok(Algorithm::SjfPreemptive),
            "priority" | "prio" => Ok(Algorithm::Priority),
            "round robin" | "round-robin" | "rr" => Ok(Algorithm::RoundRobin),
            _ => Err(SimError::invalid(format!("unknown algorithm '{}'", s.trim()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_names_round_trip() {
        for algo in Algorithm::ALL {
            assert_eq!(algo.name().parse::<Algorithm>(), Ok(algo));
        }
    }

    #[test]
    fn test_aliases() {
        assert_eq!("rr".parse::<Algorithm>(), Ok(Algorithm::RoundRobin));
        assert_eq!(" SRTF ".parse::<Algorithm>(), Ok(Algorithm::SjfPreemptive));
        assert_eq!("Sjf".parse::<Algorithm>(), Ok(Algorithm::SjfNonPreemptive));
        assert_eq!("fifo".parse::<Algorithm>(), Ok(Algorithm::Fcfs));
    }

    #[test]
    fn test_unknown_name() {
        let err = "lottery".parse::<Algorithm>().unwrap_err();
        assert!(matches!(err, SimError::InvalidInput(msg) if msg.contains("lottery")));
    }

    #[test]
    fn test_properties() {
        assert!(Algorithm::RoundRobin.uses_quantum());
        assert!(!Algorithm::Fcfs.uses_quantum());
        assert_eq!(Algorithm::SjfNonPreemptive.to_string(), "SJF (Non-preemptive)");
    }
}

//! Simulator configuration.

use serde::{Deserialize, Serialize};

use crate::scheduler::Scheduler;

/// Settings shared by every run of a [`Simulator`](crate::simulator::Simulator).
///
/// Missing fields take their defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Round-robin quantum used when a run does not specify one.
    pub default_quantum: i64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            default_quantum: i64::from(Scheduler::DEFAULT_QUANTUM.get()),
        }
    }
}

impl SimulatorConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default round-robin quantum.
    pub fn with_default_quantum(mut self, quantum: i64) -> Self {
        self.default_quantum = quantum;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(SimulatorConfig::new().default_quantum, 4);
        assert_eq!(
            SimulatorConfig::new().default_quantum,
            i64::from(Scheduler::DEFAULT_QUANTUM.get())
        );
        assert_eq!(
            SimulatorConfig::new().with_default_quantum(2).default_quantum,
            2
        );
    }

    #[test]
    fn test_deserialize_partial() {
        let cfg: SimulatorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, SimulatorConfig::default());

        let cfg: SimulatorConfig = serde_json::from_str(r#"{"default_quantum": 3}"#).unwrap();
        assert_eq!(cfg.default_quantum, 3);
    }
}

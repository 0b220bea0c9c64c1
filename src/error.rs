//! Error taxonomy for the simulator API.
//!
//! Every error is recoverable and returned to the caller; a failed
//! operation leaves the simulator state unchanged.

use std::fmt;

use crate::models::Pid;

/// Result alias used across the crate.
pub type SimResult<T> = Result<T, SimError>;

/// Errors returned by the simulator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// A field is malformed or out of range.
    InvalidInput(String),
    /// A process with this pid is already registered.
    DuplicateProcess(Pid),
    /// A run was requested with no processes registered.
    EmptyProcessSet,
    /// Another run is active, so the request cannot proceed.
    SimulationInProgress,
    /// Fewer than two algorithm results are stored.
    InsufficientComparisonData {
        /// Number of results currently stored.
        available: usize,
    },
}

impl SimError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        SimError::InvalidInput(message.into())
    }
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            SimError::DuplicateProcess(pid) => {
                write!(f, "process with PID {pid} already exists")
            }
            SimError::EmptyProcessSet => write!(f, "no processes to schedule"),
            SimError::SimulationInProgress => write!(f, "a simulation is already in progress"),
            SimError::InsufficientComparisonData { available } => write!(
                f,
                "at least two algorithm results are needed to compare, {available} stored"
            ),
        }
    }
}

impl std::error::Error for SimError {}

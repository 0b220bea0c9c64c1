//! CPU scheduling simulator.
//!
//! Simulates classical single-CPU scheduling policies over a set of
//! processes and produces an execution timeline (including idle gaps),
//! per-process metrics, and aggregate results that can be compared across
//! algorithms.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `ProcessRecord`, `TimelineSegment`,
//!   `Timeline`, `ProcessMetrics`, `AlgorithmResult`
//! - **`dispatching`**: Ready-queue disciplines (FIFO and min-selection)
//!   and their selection rules
//! - **`scheduler`**: The scheduling engine, timeline builder, and metrics
//! - **`comparison`**: Latest result per algorithm, for side-by-side views
//! - **`simulator`**: The stateful API (intake, runs, comparison, reset)
//! - **`validation`**: Intake checks (negative times, bursts, duplicate PIDs)
//! - **`workload`**: Seeded random process sets
//!
//! # Determinism
//!
//! Runs are single-threaded and depend only on their input: the same
//! process set and algorithm always produce the same timeline. Simulated
//! time never touches the wall clock.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

pub mod comparison;
pub mod config;
pub mod dispatching;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod simulator;
pub mod validation;
pub mod workload;

pub use comparison::{Comparison, ComparisonAggregator, Metric};
pub use config::SimulatorConfig;
pub use error::{SimError, SimResult};
pub use scheduler::Algorithm;
pub use simulator::{SimulationReport, SimulationRun, Simulator};

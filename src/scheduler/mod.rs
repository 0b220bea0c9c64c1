//! Scheduling engine and run metrics.
//!
//! Provides the single-CPU scheduler for every supported [`Algorithm`],
//! the [`TimelineBuilder`] it emits segments into, and [`RunMetrics`] for
//! turning a finished timeline into per-process and aggregate results.
//!
//! # Algorithms
//!
//! | Algorithm | Ready queue | Preemption |
//! |-----------|-------------|------------|
//! | FCFS | min arrival | none |
//! | SJF (Non-preemptive) | min burst | none |
//! | SJF (Preemptive) | min remaining | at each arrival |
//! | Priority | min priority value | none |
//! | Round Robin | FIFO | quantum expiry |
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

mod algorithm;
mod engine;
mod metrics;
mod timeline;

pub use algorithm::Algorithm;
pub use engine::{ScheduleOutcome, Scheduler};
pub use metrics::RunMetrics;
pub use timeline::TimelineBuilder;

//! Ready-queue disciplines for CPU scheduling.
//!
//! A discipline decides which arrived, unfinished process gets the CPU
//! next. Two queue shapes cover every supported algorithm:
//!
//! - [`FifoQueue`]: dispatch in admission order (round robin).
//! - [`MinQueue`]: dispatch the process with the lowest [`SelectionRule`]
//!   score (FCFS via arrival order, SJF, SRTF, priority).
//!
//! # Tie-breaking
//!
//! `MinQueue` orders by rule score, then earliest arrival, then original
//! insertion order. The result is deterministic for any input.
//!
//! # Usage
//!
//! ```
//! use schedsim::dispatching::{rules, MinQueue, ReadyQueue};
//! use schedsim::models::ProcessRecord;
//!
//! let procs = vec![ProcessRecord::new(1, 0, 8), ProcessRecord::new(2, 0, 3)];
//! let mut queue = MinQueue::new(rules::ShortestBurst);
//! for (i, p) in procs.iter().enumerate() {
//!     queue.push(i, p);
//! }
//! assert_eq!(queue.pop(), Some(1));
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4

mod queue;
pub mod rules;

pub use queue::{FifoQueue, MinQueue, ReadyQueue};

use crate::models::ProcessRecord;
use std::fmt::Debug;

/// Score returned by a selection rule.
///
/// Lower scores = dispatched first.
pub type RuleScore = i64;

/// A rule that ranks ready processes.
///
/// # Score Convention
/// **Lower score = higher priority.** Rules return smaller values for
/// processes that should run first.
pub trait SelectionRule: Send + Sync + Debug {
    /// Rule name (e.g., "SJF", "SRTF").
    fn name(&self) -> &'static str;

    /// Evaluates a process at the moment it enters the ready queue.
    fn evaluate(&self, process: &ProcessRecord) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

//! CPU scheduling domain models.
//!
//! Provides the data types shared by every scheduling algorithm: the input
//! process records, the timeline a run produces, and the metrics derived
//! from it.
//!
//! # Glossary
//!
//! | Term | Meaning |
//! |------|---------|
//! | Burst | Total CPU time a process requires |
//! | Completion (CT) | Time the last unit of the burst finishes |
//! | Turnaround (TAT) | CT - arrival |
//! | Waiting (WT) | TAT - burst |
//! | Response (RT) | First dispatch - arrival |
//! | Makespan | CT of the last process to finish |

mod process;
mod result;
mod timeline;

pub use process::{Pid, ProcessRecord};
pub use result::{AlgorithmResult, ProcessMetrics};
pub use timeline::{SegmentLabel, Timeline, TimelineSegment};

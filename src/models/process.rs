//! Process model.
//!
//! A process is a single CPU burst to be scheduled: it becomes ready at its
//! arrival time and needs `burst_time` units of CPU to complete.
//!
//! # Time Representation
//! All times are integer units of simulated time relative to t=0.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5

use serde::{Deserialize, Serialize};

/// Process identifier, unique within a process set.
pub type Pid = u32;

/// A process to be scheduled.
///
/// `pid`, `arrival_time`, `burst_time` and `priority` are fixed once the
/// record is accepted at intake. `remaining_time` is the only mutable field
/// and is only touched on the simulation-local copy owned by a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRecord {
    /// Process identifier.
    pub pid: Pid,
    /// Time at which the process becomes ready.
    pub arrival_time: i64,
    /// Total CPU time required.
    pub burst_time: i64,
    /// Scheduling priority (lower = more important).
    pub priority: i32,
    /// CPU time still owed. Always within `0..=burst_time`.
    pub remaining_time: i64,
}

impl ProcessRecord {
    /// Creates a process with priority 0.
    pub fn new(pid: Pid, arrival_time: i64, burst_time: i64) -> Self {
        Self {
            pid,
            arrival_time,
            burst_time,
            priority: 0,
            remaining_time: burst_time,
        }
    }

    /// Sets the scheduling priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Whether the process has arrived by `now`.
    #[inline]
    pub fn has_arrived(&self, now: i64) -> bool {
        self.arrival_time <= now
    }

    /// Whether all of the burst has been executed.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.remaining_time == 0
    }

    /// Consumes up to `units` of CPU time and returns how much was used.
    pub fn execute(&mut self, units: i64) -> i64 {
        let used = units.clamp(0, self.remaining_time);
        self.remaining_time -= used;
        used
    }

    /// Restores `remaining_time` to the full burst.
    pub fn rewind(&mut self) {
        self.remaining_time = self.burst_time;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_builder() {
        let p = ProcessRecord::new(7, 3, 10).with_priority(2);

        assert_eq!(p.pid, 7);
        assert_eq!(p.arrival_time, 3);
        assert_eq!(p.burst_time, 10);
        assert_eq!(p.priority, 2);
        assert_eq!(p.remaining_time, 10);
        assert!(!p.is_finished());
    }

    #[test]
    fn test_process_arrival() {
        let p = ProcessRecord::new(1, 5, 2);
        assert!(!p.has_arrived(4));
        assert!(p.has_arrived(5));
        assert!(p.has_arrived(6));
    }

    #[test]
    fn test_execute_clamps_to_remaining() {
        let mut p = ProcessRecord::new(1, 0, 5);
        assert_eq!(p.execute(2), 2);
        assert_eq!(p.remaining_time, 3);
        assert_eq!(p.execute(10), 3); // Only 3 units were left
        assert!(p.is_finished());
        assert_eq!(p.execute(1), 0);
    }

    #[test]
    fn test_rewind() {
        let mut p = ProcessRecord::new(1, 0, 4);
        p.execute(4);
        p.rewind();
        assert_eq!(p.remaining_time, 4);
    }
}

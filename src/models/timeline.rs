//! Timeline (solution) model.
//!
//! A timeline is the chronological record of what the CPU did during one
//! simulation run: which process ran, or that it sat idle, over
//! contiguous half-open intervals `[start, start + duration)`.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Pid;

/// What occupied the CPU during a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentLabel {
    /// A process was executing.
    Process(Pid),
    /// No process was ready.
    Idle,
}

impl SegmentLabel {
    /// The executing process, if any.
    pub fn pid(&self) -> Option<Pid> {
        match self {
            SegmentLabel::Process(pid) => Some(*pid),
            SegmentLabel::Idle => None,
        }
    }

    /// Whether this is an idle gap.
    pub fn is_idle(&self) -> bool {
        matches!(self, SegmentLabel::Idle)
    }
}

impl fmt::Display for SegmentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentLabel::Process(pid) => write!(f, "P{pid}"),
            SegmentLabel::Idle => write!(f, "IDLE"),
        }
    }
}

/// One contiguous stretch of CPU activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineSegment {
    /// Process or idle marker.
    pub label: SegmentLabel,
    /// Start time (inclusive).
    pub start_time: i64,
    /// Length of the segment. Always positive.
    pub duration: i64,
}

impl TimelineSegment {
    /// Creates a segment for a running process.
    pub fn process(pid: Pid, start_time: i64, duration: i64) -> Self {
        Self {
            label: SegmentLabel::Process(pid),
            start_time,
            duration,
        }
    }

    /// Creates an idle segment.
    pub fn idle(start_time: i64, duration: i64) -> Self {
        Self {
            label: SegmentLabel::Idle,
            start_time,
            duration,
        }
    }

    /// End time (exclusive).
    #[inline]
    pub fn end_time(&self) -> i64 {
        self.start_time + self.duration
    }
}

impl fmt::Display for TimelineSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}, {})", self.label, self.start_time, self.end_time())
    }
}

/// Finished timeline of a single run.
///
/// Produced by [`TimelineBuilder`](crate::scheduler::TimelineBuilder) and
/// never modified afterwards. Consuming it with `into_iter` yields each
/// segment once, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    segments: Vec<TimelineSegment>,
}

impl Timeline {
    pub(crate) fn from_segments(segments: Vec<TimelineSegment>) -> Self {
        Self { segments }
    }

    /// All segments in chronological order.
    pub fn segments(&self) -> &[TimelineSegment] {
        &self.segments
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the timeline has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// End of the last segment (0 for an empty timeline).
    pub fn makespan(&self) -> i64 {
        self.segments.last().map(|s| s.end_time()).unwrap_or(0)
    }

    /// Time spent running processes.
    pub fn busy_time(&self) -> i64 {
        self.segments
            .iter()
            .filter(|s| !s.label.is_idle())
            .map(|s| s.duration)
            .sum()
    }

    /// Time spent idle.
    pub fn idle_time(&self) -> i64 {
        self.segments
            .iter()
            .filter(|s| s.label.is_idle())
            .map(|s| s.duration)
            .sum()
    }

    /// Fraction of the makespan spent running processes.
    ///
    /// Returns 0.0 for an empty timeline.
    pub fn cpu_utilization(&self) -> f64 {
        let makespan = self.makespan();
        if makespan <= 0 {
            return 0.0;
        }
        self.busy_time() as f64 / makespan as f64
    }

    /// Segments in which `pid` ran.
    pub fn segments_for(&self, pid: Pid) -> impl Iterator<Item = &TimelineSegment> {
        self.segments
            .iter()
            .filter(move |s| s.label == SegmentLabel::Process(pid))
    }

    /// Completion time of `pid`: end of its last segment.
    pub fn completion_time(&self, pid: Pid) -> Option<i64> {
        self.segments_for(pid).last().map(|s| s.end_time())
    }

    /// Time at which `pid` first received the CPU.
    pub fn first_start(&self, pid: Pid) -> Option<i64> {
        self.segments_for(pid).next().map(|s| s.start_time)
    }

    /// One line per segment, e.g. `t=0..5 P1`.
    pub fn execution_log(&self) -> Vec<String> {
        self.segments
            .iter()
            .map(|s| format!("t={}..{} {}", s.start_time, s.end_time(), s.label))
            .collect()
    }

    /// Checks that segments start at 0, are contiguous, and have positive
    /// durations.
    ///
    /// Returns the index of the first offending segment.
    pub fn check_contiguity(&self) -> Result<(), usize> {
        let mut cursor = 0;
        for (i, s) in self.segments.iter().enumerate() {
            if s.start_time != cursor || s.duration <= 0 {
                return Err(i);
            }
            cursor = s.end_time();
        }
        Ok(())
    }
}

impl IntoIterator for Timeline {
    type Item = TimelineSegment;
    type IntoIter = std::vec::IntoIter<TimelineSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.into_iter()
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a TimelineSegment;
    type IntoIter = std::slice::Iter<'a, TimelineSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_timeline() -> Timeline {
        Timeline::from_segments(vec![
            TimelineSegment::idle(0, 2),
            TimelineSegment::process(1, 2, 3),
            TimelineSegment::process(2, 5, 1),
            TimelineSegment::process(1, 6, 4),
        ])
    }

    #[test]
    fn test_timeline_makespan() {
        assert_eq!(sample_timeline().makespan(), 10);
        assert_eq!(Timeline::default().makespan(), 0);
    }

    #[test]
    fn test_busy_and_idle_time() {
        let t = sample_timeline();
        assert_eq!(t.busy_time(), 8);
        assert_eq!(t.idle_time(), 2);
        assert!((t.cpu_utilization() - 0.8).abs() < 1e-10);
        assert!((Timeline::default().cpu_utilization() - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_completion_and_first_start() {
        let t = sample_timeline();
        assert_eq!(t.completion_time(1), Some(10));
        assert_eq!(t.first_start(1), Some(2));
        assert_eq!(t.completion_time(2), Some(6));
        assert_eq!(t.completion_time(99), None);
    }

    #[test]
    fn test_segment_display() {
        assert_eq!(TimelineSegment::process(3, 4, 2).to_string(), "P3 [4, 6)");
        assert_eq!(TimelineSegment::idle(0, 1).to_string(), "IDLE [0, 1)");
    }

    #[test]
    fn test_execution_log() {
        let log = sample_timeline().execution_log();
        assert_eq!(log[0], "t=0..2 IDLE");
        assert_eq!(log[1], "t=2..5 P1");
        assert_eq!(log.len(), 4);
    }

    #[test]
    fn test_check_contiguity() {
        assert!(sample_timeline().check_contiguity().is_ok());

        let gap = Timeline::from_segments(vec![
            TimelineSegment::process(1, 0, 2),
            TimelineSegment::process(2, 3, 2), // Gap at [2, 3)
        ]);
        assert_eq!(gap.check_contiguity(), Err(1));

        let late_start = Timeline::from_segments(vec![TimelineSegment::process(1, 1, 2)]);
        assert_eq!(late_start.check_contiguity(), Err(0));
    }

    #[test]
    fn test_into_iter_consumes_in_order() {
        let starts: Vec<i64> = sample_timeline().into_iter().map(|s| s.start_time).collect();
        assert_eq!(starts, vec![0, 2, 5, 6]);
    }
}

//! Timeline construction.

use crate::models::{Pid, Timeline, TimelineSegment};

/// Accumulates segments in emission order.
///
/// The builder owns the simulation clock: every segment starts where the
/// previous one ended, so a finished timeline is gapless from t=0.
#[derive(Debug, Clone, Default)]
pub struct TimelineBuilder {
    segments: Vec<TimelineSegment>,
    now: i64,
}

impl TimelineBuilder {
    /// Creates an empty builder at t=0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulated time (end of the last segment).
    #[inline]
    pub fn now(&self) -> i64 {
        self.now
    }

    /// Number of segments emitted so far.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether nothing has been emitted yet.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Records `pid` running for `duration` units starting now.
    ///
    /// Zero or negative durations are ignored.
    pub fn run(&mut self, pid: Pid, duration: i64) {
        self.emit(TimelineSegment::process(pid, self.now, duration));
    }

    /// Records the CPU idling until `time`.
    ///
    /// Does nothing if `time` is not in the future.
    pub fn idle_until(&mut self, time: i64) {
        self.emit(TimelineSegment::idle(self.now, time - self.now));
    }

    fn emit(&mut self, segment: TimelineSegment) {
        if segment.duration <= 0 {
            return;
        }
        self.now = segment.end_time();
        self.segments.push(segment);
    }

    /// Finishes the run and hands over the timeline.
    pub fn finish(self) -> Timeline {
        let timeline = Timeline::from_segments(self.segments);
        // Contiguous by construction: `emit` starts every segment at `now`
        debug_assert_eq!(timeline.check_contiguity(), Ok(()));
        timeline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SegmentLabel;

    #[test]
    fn test_builder_is_contiguous() {
        let mut b = TimelineBuilder::new();
        b.idle_until(2);
        b.run(1, 3);
        b.run(2, 1);
        assert_eq!(b.now(), 6);

        let t = b.finish();
        assert_eq!(t.len(), 3);
        assert_eq!(t.check_contiguity(), Ok(()));
        assert_eq!(t.segments()[0].label, SegmentLabel::Idle);
        assert_eq!(t.segments()[2].start_time, 5);
    }

    #[test]
    fn test_zero_length_segments_dropped() {
        let mut b = TimelineBuilder::new();
        b.idle_until(0);
        b.run(1, 0);
        assert!(b.is_empty());

        b.run(1, 2);
        b.idle_until(1); // In the past
        assert_eq!(b.len(), 1);
        assert_eq!(b.now(), 2);
    }

    #[test]
    fn test_same_label_segments_not_merged() {
        let mut b = TimelineBuilder::new();
        b.run(1, 2);
        b.run(1, 2);
        let t = b.finish();
        assert_eq!(t.len(), 2);
        assert_eq!(t.makespan(), 4);
    }
}

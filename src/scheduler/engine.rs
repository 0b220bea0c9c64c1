//! Single-CPU scheduling engine.
//!
//! # Algorithm
//!
//! 1. Copy the process set and order it by arrival (stable).
//! 2. At each decision point, admit every process that has arrived into
//!    the policy's ready queue.
//! 3. If the queue is empty, idle until the next arrival.
//! 4. Otherwise dispatch the queue's choice for as long as the policy
//!    allows: to completion, to the next arrival, or for one quantum.
//! 5. Stop when nothing is queued and nothing is left to arrive.
//!
//! # Complexity
//! O(d log n) where d = number of dispatches and n = processes.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3

use std::collections::{HashMap, VecDeque};
use std::num::NonZeroU32;

use log::debug;

use super::{Algorithm, TimelineBuilder};
use crate::dispatching::{rules, FifoQueue, MinQueue, ReadyQueue};
use crate::error::{SimError, SimResult};
use crate::models::{Pid, ProcessRecord, Timeline};

/// Output of one scheduling run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleOutcome {
    /// Gapless execution timeline starting at t=0.
    pub timeline: Timeline,
    /// Time each process first received the CPU.
    pub first_dispatch: HashMap<Pid, i64>,
}

/// Drives one simulation for a chosen algorithm.
///
/// The caller's records are never modified; each run works on its own copy.
///
/// # Example
///
/// ```
/// use schedsim::models::ProcessRecord;
/// use schedsim::scheduler::{Algorithm, Scheduler};
///
/// let procs = vec![ProcessRecord::new(1, 0, 5), ProcessRecord::new(2, 1, 3)];
/// let outcome = Scheduler::new(Algorithm::Fcfs).run(&procs).unwrap();
/// assert_eq!(outcome.timeline.makespan(), 8);
/// ```
#[derive(Debug, Clone)]
pub struct Scheduler {
    algorithm: Algorithm,
    quantum: NonZeroU32,
}

impl Scheduler {
    /// Round-robin quantum used unless overridden.
    pub const DEFAULT_QUANTUM: NonZeroU32 = match NonZeroU32::new(4) {
        Some(q) => q,
        None => unreachable!(),
    };

    /// Creates a scheduler for `algorithm` with the default quantum.
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            quantum: Self::DEFAULT_QUANTUM,
        }
    }

    /// Sets the round-robin quantum. Ignored by other algorithms.
    pub fn with_quantum(mut self, quantum: NonZeroU32) -> Self {
        self.quantum = quantum;
        self
    }

    /// The configured algorithm.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// The configured quantum.
    pub fn quantum(&self) -> NonZeroU32 {
        self.quantum
    }

    /// Simulates `processes` and returns the timeline.
    ///
    /// Input is assumed to have passed intake validation.
    ///
    /// # Errors
    /// [`SimError::EmptyProcessSet`] if `processes` is empty.
    pub fn run(&self, processes: &[ProcessRecord]) -> SimResult<ScheduleOutcome> {
        if processes.is_empty() {
            return Err(SimError::EmptyProcessSet);
        }

        let mut run = Run::new(processes);
        match self.algorithm {
            Algorithm::Fcfs => run.to_completion(&mut MinQueue::new(rules::ArrivalOrder)),
            Algorithm::SjfNonPreemptive => {
                run.to_completion(&mut MinQueue::new(rules::ShortestBurst))
            }
            Algorithm::Priority => run.to_completion(&mut MinQueue::new(rules::LowestPriority)),
            Algorithm::SjfPreemptive => {
                run.until_next_arrival(&mut MinQueue::new(rules::ShortestRemaining))
            }
            Algorithm::RoundRobin => {
                run.time_sliced(&mut FifoQueue::new(), i64::from(self.quantum.get()))
            }
        }

        debug!(
            "{}: {} segments, makespan {}",
            self.algorithm,
            run.timeline.len(),
            run.timeline.now()
        );
        Ok(ScheduleOutcome {
            timeline: run.timeline.finish(),
            first_dispatch: run.first_dispatch,
        })
    }
}

/// Mutable state of one run.
struct Run {
    /// Private copy of the process set, in insertion order.
    procs: Vec<ProcessRecord>,
    /// Indices not yet arrived, ordered by (arrival, insertion).
    pending: VecDeque<usize>,
    timeline: TimelineBuilder,
    first_dispatch: HashMap<Pid, i64>,
}

impl Run {
    fn new(processes: &[ProcessRecord]) -> Self {
        let procs: Vec<ProcessRecord> = processes
            .iter()
            .cloned()
            .map(|mut p| {
                p.rewind();
                p
            })
            .collect();

        let mut order: Vec<usize> = (0..procs.len()).collect();
        order.sort_by_key(|&i| procs[i].arrival_time); // Stable

        Self {
            procs,
            pending: order.into(),
            timeline: TimelineBuilder::new(),
            first_dispatch: HashMap::new(),
        }
    }

    fn now(&self) -> i64 {
        self.timeline.now()
    }

    /// Moves every process that has arrived by now into `queue`.
    fn admit<Q: ReadyQueue>(&mut self, queue: &mut Q) {
        let now = self.now();
        while let Some(&index) = self.pending.front() {
            if !self.procs[index].has_arrived(now) {
                break;
            }
            self.pending.pop_front();
            queue.push(index, &self.procs[index]);
        }
    }

    fn next_arrival(&self) -> Option<i64> {
        self.pending.front().map(|&i| self.procs[i].arrival_time)
    }

    /// Picks the next process, idling through gaps in arrivals.
    ///
    /// Returns `None` once every process has finished.
    fn select<Q: ReadyQueue>(&mut self, queue: &mut Q) -> Option<usize> {
        loop {
            self.admit(queue);
            if let Some(index) = queue.pop() {
                return Some(index);
            }
            let next = self.next_arrival()?;
            debug!("t={}: cpu idle until {}", self.now(), next);
            self.timeline.idle_until(next);
        }
    }

    /// Runs the process at `index` for up to `units`.
    fn dispatch(&mut self, index: usize, units: i64) {
        let now = self.now();
        let process = &mut self.procs[index];
        self.first_dispatch.entry(process.pid).or_insert(now);

        let used = process.execute(units);
        debug!(
            "t={}: dispatch P{} for {} (remaining {})",
            now, process.pid, used, process.remaining_time
        );
        self.timeline.run(process.pid, used);
    }

    /// Non-preemptive: every dispatch runs to completion.
    fn to_completion<Q: ReadyQueue>(&mut self, queue: &mut Q) {
        while let Some(index) = self.select(queue) {
            let units = self.procs[index].remaining_time;
            self.dispatch(index, units);
        }
    }

    /// Preemptive at arrivals: a dispatch lasts until completion or the
    /// next arrival, whichever comes first.
    fn until_next_arrival<Q: ReadyQueue>(&mut self, queue: &mut Q) {
        while let Some(index) = self.select(queue) {
            let remaining = self.procs[index].remaining_time;
            let units = match self.next_arrival() {
                Some(arrival) => remaining.min(arrival - self.now()),
                None => remaining,
            };
            self.dispatch(index, units);
            if !self.procs[index].is_finished() {
                queue.push(index, &self.procs[index]);
            }
        }
    }

    /// Round robin: a dispatch lasts at most one quantum. Processes that
    /// arrived during the slice are queued ahead of the preempted one.
    fn time_sliced<Q: ReadyQueue>(&mut self, queue: &mut Q, quantum: i64) {
        while let Some(index) = self.select(queue) {
            let units = quantum.min(self.procs[index].remaining_time);
            self.dispatch(index, units);
            self.admit(queue);
            if !self.procs[index].is_finished() {
                queue.push(index, &self.procs[index]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SegmentLabel, TimelineSegment};

    fn p(pid: Pid, arrival: i64, burst: i64) -> ProcessRecord {
        ProcessRecord::new(pid, arrival, burst)
    }

    fn run(algorithm: Algorithm, procs: &[ProcessRecord]) -> ScheduleOutcome {
        Scheduler::new(algorithm).run(procs).unwrap()
    }

    fn run_rr(quantum: u32, procs: &[ProcessRecord]) -> ScheduleOutcome {
        Scheduler::new(Algorithm::RoundRobin)
            .with_quantum(NonZeroU32::new(quantum).unwrap())
            .run(procs)
            .unwrap()
    }

    /// (label, start, end) triples for compact assertions.
    fn spans(outcome: &ScheduleOutcome) -> Vec<(SegmentLabel, i64, i64)> {
        outcome
            .timeline
            .segments()
            .iter()
            .map(|s| (s.label, s.start_time, s.end_time()))
            .collect()
    }

    use SegmentLabel::{Idle, Process as P};

    #[test]
    fn test_empty_process_set() {
        for algo in Algorithm::ALL {
            assert_eq!(Scheduler::new(algo).run(&[]), Err(SimError::EmptyProcessSet));
        }
    }

    #[test]
    fn test_fcfs_scenario() {
        let out = run(Algorithm::Fcfs, &[p(1, 0, 5), p(2, 1, 3), p(3, 2, 8)]);
        assert_eq!(spans(&out), vec![(P(1), 0, 5), (P(2), 5, 8), (P(3), 8, 16)]);
        assert_eq!(out.first_dispatch[&2], 5);
    }

    #[test]
    fn test_fcfs_orders_by_arrival_not_insertion() {
        let out = run(Algorithm::Fcfs, &[p(1, 4, 2), p(2, 0, 3)]);
        assert_eq!(
            spans(&out),
            vec![(P(2), 0, 3), (Idle, 3, 4), (P(1), 4, 6)]
        );
    }

    #[test]
    fn test_fcfs_equal_arrivals_keep_insertion_order() {
        let out = run(Algorithm::Fcfs, &[p(7, 0, 1), p(3, 0, 1), p(5, 0, 1)]);
        let order: Vec<_> = out.timeline.segments().iter().map(|s| s.label).collect();
        assert_eq!(order, vec![P(7), P(3), P(5)]);
    }

    #[test]
    fn test_leading_idle() {
        let out = run(Algorithm::Fcfs, &[p(1, 3, 2)]);
        assert_eq!(out.timeline.segments()[0], TimelineSegment::idle(0, 3));
        assert_eq!(out.timeline.makespan(), 5);
    }

    #[test]
    fn test_sjf_non_preemptive() {
        // P1 holds the CPU until 7; then P3 (1) beats P2 (4) and P4 (4)
        let out = run(
            Algorithm::SjfNonPreemptive,
            &[p(1, 0, 7), p(2, 2, 4), p(3, 4, 1), p(4, 5, 4)],
        );
        assert_eq!(
            spans(&out),
            vec![(P(1), 0, 7), (P(3), 7, 8), (P(2), 8, 12), (P(4), 12, 16)]
        );
    }

    #[test]
    fn test_sjf_tie_broken_by_arrival_then_insertion() {
        // All bursts equal: earliest arrival first, then insertion order
        let out = run(
            Algorithm::SjfNonPreemptive,
            &[p(1, 0, 2), p(2, 1, 3), p(3, 0, 3), p(4, 1, 3)],
        );
        let order: Vec<_> = out.timeline.segments().iter().map(|s| s.label).collect();
        assert_eq!(order, vec![P(1), P(3), P(2), P(4)]);
    }

    #[test]
    fn test_sjf_preemptive() {
        // Classic SRTF example
        let out = run(
            Algorithm::SjfPreemptive,
            &[p(1, 0, 8), p(2, 1, 4), p(3, 2, 9), p(4, 3, 5)],
        );
        assert_eq!(
            spans(&out),
            vec![
                (P(1), 0, 1),
                (P(2), 1, 2),
                (P(2), 2, 3),
                (P(2), 3, 5),
                (P(4), 5, 10),
                (P(1), 10, 17),
                (P(3), 17, 26),
            ]
        );
        assert_eq!(out.first_dispatch[&1], 0);
        assert_eq!(out.first_dispatch[&3], 17);
    }

    #[test]
    fn test_sjf_preemptive_tie_keeps_earlier_arrival() {
        // At t=1 both have 3 left; P1 arrived first and keeps the CPU
        let out = run(Algorithm::SjfPreemptive, &[p(1, 0, 4), p(2, 1, 3)]);
        assert_eq!(spans(&out), vec![(P(1), 0, 1), (P(1), 1, 4), (P(2), 4, 7)]);
    }

    #[test]
    fn test_sjf_preemptive_tie_keeps_insertion_order() {
        let out = run(Algorithm::SjfPreemptive, &[p(5, 0, 3), p(2, 0, 3), p(9, 1, 4)]);
        assert_eq!(
            spans(&out),
            vec![(P(5), 0, 1), (P(5), 1, 3), (P(2), 3, 6), (P(9), 6, 10)]
        );
    }

    #[test]
    fn test_sjf_preemptive_idle_gap() {
        let out = run(Algorithm::SjfPreemptive, &[p(1, 0, 2), p(2, 5, 1)]);
        assert_eq!(spans(&out), vec![(P(1), 0, 2), (Idle, 2, 5), (P(2), 5, 6)]);
    }

    #[test]
    fn test_priority_non_preemptive() {
        let procs = vec![
            p(1, 0, 4).with_priority(3),
            p(2, 1, 2).with_priority(1),
            p(3, 2, 3).with_priority(2),
            p(4, 2, 1).with_priority(1),
        ];
        let out = run(Algorithm::Priority, &procs);
        // P1 runs first (only one ready), then priority 1s by arrival, then P3
        assert_eq!(
            spans(&out),
            vec![(P(1), 0, 4), (P(2), 4, 6), (P(4), 6, 7), (P(3), 7, 10)]
        );
    }

    #[test]
    fn test_round_robin_scenario() {
        let out = run_rr(2, &[p(1, 0, 5), p(2, 1, 3)]);
        assert_eq!(
            spans(&out),
            vec![
                (P(1), 0, 2),
                (P(2), 2, 4),
                (P(1), 4, 6),
                (P(2), 6, 7),
                (P(1), 7, 8),
            ]
        );
        assert_eq!(out.first_dispatch[&2], 2);
    }

    #[test]
    fn test_round_robin_arrivals_ahead_of_preempted() {
        // P2 and P3 arrive during P1's slice and are queued before P1
        let out = run_rr(3, &[p(1, 0, 6), p(2, 1, 2), p(3, 3, 2)]);
        assert_eq!(
            spans(&out),
            vec![(P(1), 0, 3), (P(2), 3, 5), (P(3), 5, 7), (P(1), 7, 10)]
        );
    }

    #[test]
    fn test_round_robin_single_process_redispatched() {
        let out = run_rr(2, &[p(1, 0, 5)]);
        assert_eq!(spans(&out), vec![(P(1), 0, 2), (P(1), 2, 4), (P(1), 4, 5)]);
    }

    #[test]
    fn test_round_robin_idle_between_arrivals() {
        let out = run_rr(4, &[p(1, 0, 1), p(2, 3, 2)]);
        assert_eq!(spans(&out), vec![(P(1), 0, 1), (Idle, 1, 3), (P(2), 3, 5)]);
    }

    #[test]
    fn test_caller_records_untouched() {
        let procs = vec![p(1, 0, 5), p(2, 1, 3)];
        let before = procs.clone();
        for algo in Algorithm::ALL {
            run(algo, &procs);
        }
        assert_eq!(procs, before);
    }

    #[test]
    fn test_partially_run_input_is_rewound() {
        let mut stale = p(1, 0, 5);
        stale.execute(3);
        let out = run(Algorithm::Fcfs, &[stale]);
        assert_eq!(out.timeline.makespan(), 5);
    }

    #[test]
    fn test_default_quantum() {
        let s = Scheduler::new(Algorithm::RoundRobin);
        assert_eq!(s.quantum().get(), 4);
        let out = s.run(&[p(1, 0, 6)]).unwrap();
        assert_eq!(spans(&out), vec![(P(1), 0, 4), (P(1), 4, 6)]);
    }
}

//! Ready queues.
//!
//! Queues hold indices into the run's process table, never the processes
//! themselves. A process is scored once, when it is pushed; a preempted
//! process is re-pushed with its updated state.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};
use std::fmt::Debug;

use super::{RuleScore, SelectionRule};
use crate::models::ProcessRecord;

/// A set of arrived, unfinished processes awaiting the CPU.
pub trait ReadyQueue: Debug {
    /// Admits the process stored at `index` in the process table.
    fn push(&mut self, index: usize, process: &ProcessRecord);

    /// Removes and returns the index of the next process to dispatch.
    fn pop(&mut self) -> Option<usize>;

    /// Number of waiting processes.
    fn len(&self) -> usize;

    /// Whether no process is waiting.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// First-in first-out queue.
#[derive(Debug, Clone, Default)]
pub struct FifoQueue {
    entries: VecDeque<usize>,
}

impl FifoQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReadyQueue for FifoQueue {
    fn push(&mut self, index: usize, _process: &ProcessRecord) {
        self.entries.push_back(index);
    }

    fn pop(&mut self) -> Option<usize> {
        self.entries.pop_front()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Sort key: rule score, then arrival time, then insertion order.
type MinKey = (RuleScore, i64, usize);

/// Min-selection queue ordered by a [`SelectionRule`].
///
/// Ties on the rule score go to the earlier arrival, then to the process
/// registered first (lower table index).
#[derive(Debug, Clone)]
pub struct MinQueue<R: SelectionRule> {
    rule: R,
    heap: BinaryHeap<Reverse<MinKey>>,
}

impl<R: SelectionRule> MinQueue<R> {
    /// Creates an empty queue ranked by `rule`.
    pub fn new(rule: R) -> Self {
        Self {
            rule,
            heap: BinaryHeap::new(),
        }
    }
}

impl<R: SelectionRule> ReadyQueue for MinQueue<R> {
    fn push(&mut self, index: usize, process: &ProcessRecord) {
        let score = self.rule.evaluate(process);
        self.heap.push(Reverse((score, process.arrival_time, index)));
    }

    fn pop(&mut self) -> Option<usize> {
        self.heap.pop().map(|Reverse((_, _, index))| index)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatching::rules;

    fn fill<Q: ReadyQueue>(queue: &mut Q, procs: &[ProcessRecord]) {
        for (i, p) in procs.iter().enumerate() {
            queue.push(i, p);
        }
    }

    fn drain<Q: ReadyQueue>(queue: &mut Q) -> Vec<usize> {
        std::iter::from_fn(|| queue.pop()).collect()
    }

    #[test]
    fn test_fifo_order() {
        let procs = vec![
            ProcessRecord::new(1, 0, 9),
            ProcessRecord::new(2, 0, 1),
            ProcessRecord::new(3, 0, 5),
        ];
        let mut queue = FifoQueue::new();
        fill(&mut queue, &procs);
        assert_eq!(queue.len(), 3);
        assert_eq!(drain(&mut queue), vec![0, 1, 2]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_min_queue_by_burst() {
        let procs = vec![
            ProcessRecord::new(1, 0, 8),
            ProcessRecord::new(2, 0, 3),
            ProcessRecord::new(3, 0, 5),
        ];
        let mut queue = MinQueue::new(rules::ShortestBurst);
        fill(&mut queue, &procs);
        assert_eq!(drain(&mut queue), vec![1, 2, 0]);
    }

    #[test]
    fn test_tie_broken_by_arrival() {
        // Same burst; index 0 arrived later than index 1
        let procs = vec![ProcessRecord::new(1, 2, 4), ProcessRecord::new(2, 1, 4)];
        let mut queue = MinQueue::new(rules::ShortestBurst);
        fill(&mut queue, &procs);
        assert_eq!(drain(&mut queue), vec![1, 0]);
    }

    #[test]
    fn test_tie_broken_by_insertion_order() {
        // Same burst and arrival → lower index first
        let procs = vec![
            ProcessRecord::new(9, 0, 4),
            ProcessRecord::new(3, 0, 4),
            ProcessRecord::new(5, 0, 4),
        ];
        let mut queue = MinQueue::new(rules::ShortestBurst);
        fill(&mut queue, &procs);
        assert_eq!(drain(&mut queue), vec![0, 1, 2]);
    }

    #[test]
    fn test_priority_queue() {
        let procs = vec![
            ProcessRecord::new(1, 0, 5).with_priority(3),
            ProcessRecord::new(2, 0, 5).with_priority(1),
            ProcessRecord::new(3, 0, 5).with_priority(2),
        ];
        let mut queue = MinQueue::new(rules::LowestPriority);
        fill(&mut queue, &procs);
        assert_eq!(drain(&mut queue), vec![1, 2, 0]);
    }

    #[test]
    fn test_empty_queue() {
        let mut queue = MinQueue::new(rules::ShortestRemaining);
        assert!(queue.is_empty());
        assert_eq!(queue.pop(), None);
    }
}

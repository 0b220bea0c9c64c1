//! Run performance metrics.
//!
//! Derives per-process and aggregate metrics from a finished timeline and
//! the registered process records.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Completion (CT) | End of the process's last segment |
//! | Turnaround (TAT) | CT - arrival |
//! | Waiting (WT) | TAT - burst |
//! | Response (RT) | First dispatch - arrival |
//! | Makespan | max(CT) |
//! | Throughput | completed / makespan |
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2: Scheduling Criteria

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{AlgorithmResult, Pid, ProcessMetrics, ProcessRecord, Timeline};

/// Metrics of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetrics {
    /// One entry per completed process, in insertion order.
    pub per_process: Vec<ProcessMetrics>,
    /// Means and throughput over `per_process`.
    pub summary: AlgorithmResult,
}

impl RunMetrics {
    /// Computes metrics from a timeline and its input processes.
    ///
    /// # Arguments
    /// * `timeline` - The finished run.
    /// * `processes` - The registered records (for arrival and burst).
    /// * `first_dispatch` - First CPU grant per pid. Missing entries fall
    ///   back to the start of the process's first segment.
    ///
    /// Processes that never appear in the timeline are left out.
    pub fn calculate(
        timeline: &Timeline,
        processes: &[ProcessRecord],
        first_dispatch: &HashMap<Pid, i64>,
    ) -> Self {
        let per_process: Vec<ProcessMetrics> = processes
            .iter()
            .filter_map(|p| {
                let completion_time = timeline.completion_time(p.pid)?;
                let dispatched = first_dispatch
                    .get(&p.pid)
                    .copied()
                    .or_else(|| timeline.first_start(p.pid))
                    .unwrap_or(p.arrival_time);
                let turnaround_time = completion_time - p.arrival_time;
                Some(ProcessMetrics {
                    pid: p.pid,
                    arrival_time: p.arrival_time,
                    burst_time: p.burst_time,
                    completion_time,
                    turnaround_time,
                    waiting_time: turnaround_time - p.burst_time,
                    response_time: dispatched - p.arrival_time,
                })
            })
            .collect();

        let summary = Self::summarize(&per_process);
        Self {
            per_process,
            summary,
        }
    }

    /// Aggregates per-process metrics.
    ///
    /// Means are 0.0 for an empty slice; throughput is 0.0 when the
    /// makespan is 0.
    pub fn summarize(metrics: &[ProcessMetrics]) -> AlgorithmResult {
        let n = metrics.len();
        if n == 0 {
            return AlgorithmResult::default();
        }

        // Sums of in-range times can still exceed i64
        let mean = |f: fn(&ProcessMetrics) -> i64| -> f64 {
            metrics.iter().map(|m| i128::from(f(m))).sum::<i128>() as f64 / n as f64
        };
        let makespan = metrics.iter().map(|m| m.completion_time).max().unwrap_or(0);
        let throughput = if makespan > 0 {
            n as f64 / makespan as f64
        } else {
            0.0
        };

        AlgorithmResult {
            avg_turnaround: mean(|m| m.turnaround_time),
            avg_waiting: mean(|m| m.waiting_time),
            avg_response: mean(|m| m.response_time),
            throughput,
            makespan,
            process_count: n,
        }
    }

    /// Metrics for one process.
    pub fn for_pid(&self, pid: Pid) -> Option<&ProcessMetrics> {
        self.per_process.iter().find(|m| m.pid == pid)
    }
}

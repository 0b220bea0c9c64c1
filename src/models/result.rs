//! Per-process and aggregate performance results.

use serde::{Deserialize, Serialize};

use super::Pid;

/// Performance of one process in one run.
///
/// - `turnaround_time = completion_time - arrival_time`
/// - `waiting_time = turnaround_time - burst_time`
/// - `response_time = first dispatch - arrival_time`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessMetrics {
    /// Process identifier.
    pub pid: Pid,
    /// Arrival time.
    pub arrival_time: i64,
    /// Burst time.
    pub burst_time: i64,
    /// Time the last unit of the burst finished.
    pub completion_time: i64,
    /// Completion minus arrival.
    pub turnaround_time: i64,
    /// Turnaround minus burst.
    pub waiting_time: i64,
    /// First dispatch minus arrival.
    pub response_time: i64,
}

/// Aggregate performance of one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmResult {
    /// Mean turnaround time.
    pub avg_turnaround: f64,
    /// Mean waiting time.
    pub avg_waiting: f64,
    /// Mean response time.
    pub avg_response: f64,
    /// Completed processes per unit of simulated time.
    pub throughput: f64,
    /// Latest completion time (0 when nothing completed).
    pub makespan: i64,
    /// Number of processes the averages are taken over.
    pub process_count: usize,
}

impl AlgorithmResult {
    /// One-line summary in the style of a results banner.
    pub fn summary(&self) -> String {
        format!(
            "Avg TAT: {:.2} | Avg WT: {:.2} | Avg RT: {:.2} | Throughput: {:.2} processes/unit",
            self.avg_turnaround, self.avg_waiting, self.avg_response, self.throughput
        )
    }
}

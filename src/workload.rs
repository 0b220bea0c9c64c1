//! Random workload generation.
//!
//! Builds valid process sets from any [`rand::Rng`], so experiments and
//! tests can be reproduced from a seed.
//!
//! ```
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use schedsim::workload::{random_processes, WorkloadSpec};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let procs = random_processes(&mut rng, &WorkloadSpec::new(5));
//! assert_eq!(procs.len(), 5);
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::{Pid, ProcessRecord};

/// Shape of a random process set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkloadSpec {
    /// Number of processes (PIDs `1..=count`).
    pub count: u32,
    /// Latest possible arrival time (inclusive).
    pub max_arrival: i64,
    /// Inclusive (min, max) burst time. `min` is raised to 1 if lower.
    pub burst_range: (i64, i64),
    /// Inclusive (min, max) priority.
    pub priority_range: (i32, i32),
}

impl Default for WorkloadSpec {
    fn default() -> Self {
        Self {
            count: 5,
            max_arrival: 10,
            burst_range: (1, 10),
            priority_range: (0, 5),
        }
    }
}

impl WorkloadSpec {
    /// Creates a spec for `count` processes with default ranges.
    pub fn new(count: u32) -> Self {
        Self {
            count,
            ..Default::default()
        }
    }

    /// Sets the latest arrival time.
    pub fn with_max_arrival(mut self, max_arrival: i64) -> Self {
        self.max_arrival = max_arrival;
        self
    }

    /// Sets the burst time range.
    pub fn with_burst_range(mut self, min: i64, max: i64) -> Self {
        self.burst_range = (min, max);
        self
    }

    /// Sets the priority range.
    pub fn with_priority_range(mut self, min: i32, max: i32) -> Self {
        self.priority_range = (min, max);
        self
    }
}

/// Generates a process set that passes intake validation.
///
/// Arrivals are drawn from `0..=max_arrival`; reversed ranges are
/// normalized first.
pub fn random_processes<R: Rng>(rng: &mut R, spec: &WorkloadSpec) -> Vec<ProcessRecord> {
    let max_arrival = spec.max_arrival.max(0);
    let (b_lo, b_hi) = ordered(spec.burst_range);
    let b_lo = b_lo.max(1);
    let b_hi = b_hi.max(b_lo);
    let (p_lo, p_hi) = ordered(spec.priority_range);

    (1..=spec.count)
        .map(|pid: Pid| {
            ProcessRecord::new(
                pid,
                rng.random_range(0..=max_arrival),
                rng.random_range(b_lo..=b_hi),
            )
            .with_priority(rng.random_range(p_lo..=p_hi))
        })
        .collect()
}

fn ordered<T: PartialOrd>((a, b): (T, T)) -> (T, T) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

//! Cross-algorithm comparison.
//!
//! Keeps the latest [`AlgorithmResult`] per algorithm name. Recording a
//! name again replaces its previous result (last run wins) but keeps its
//! original position, so listings stay in first-run order.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{SimError, SimResult};
use crate::models::AlgorithmResult;

/// An aggregate metric that algorithms can be ranked on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    /// Mean turnaround time (lower is better).
    Turnaround,
    /// Mean waiting time (lower is better).
    Waiting,
    /// Mean response time (lower is better).
    Response,
    /// Processes per time unit (higher is better).
    Throughput,
}

impl Metric {
    /// Every metric, in chart order.
    pub const ALL: [Metric; 4] = [
        Metric::Turnaround,
        Metric::Waiting,
        Metric::Response,
        Metric::Throughput,
    ];

    /// Reads this metric from a result.
    pub fn value(&self, result: &AlgorithmResult) -> f64 {
        match self {
            Metric::Turnaround => result.avg_turnaround,
            Metric::Waiting => result.avg_waiting,
            Metric::Response => result.avg_response,
            Metric::Throughput => result.throughput,
        }
    }

    /// Whether larger values are better.
    pub fn higher_is_better(&self) -> bool {
        matches!(self, Metric::Throughput)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Metric::Turnaround => "TAT",
            Metric::Waiting => "WT",
            Metric::Response => "RT",
            Metric::Throughput => "Throughput",
        })
    }
}

/// Latest result per algorithm name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonAggregator {
    entries: Vec<(String, AlgorithmResult)>,
}

impl ComparisonAggregator {
    /// Creates an empty aggregator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `result` under `name`, replacing any earlier entry.
    pub fn record(&mut self, name: impl Into<String>, result: AlgorithmResult) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = result,
            None => self.entries.push((name, result)),
        }
    }

    /// All stored entries, in first-recorded order.
    pub fn list(&self) -> &[(String, AlgorithmResult)] {
        &self.entries
    }

    /// Result stored under `name`.
    pub fn get(&self, name: &str) -> Option<&AlgorithmResult> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, r)| r)
    }

    /// Number of stored algorithms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Snapshot for side-by-side comparison.
    ///
    /// # Errors
    /// [`SimError::InsufficientComparisonData`] unless at least two
    /// algorithms are stored.
    pub fn compare(&self) -> SimResult<Comparison> {
        if self.entries.len() < 2 {
            return Err(SimError::InsufficientComparisonData {
                available: self.entries.len(),
            });
        }
        Ok(Comparison {
            entries: self.entries.clone(),
        })
    }
}

/// A snapshot of two or more algorithm results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// (algorithm name, result) in first-recorded order.
    pub entries: Vec<(String, AlgorithmResult)>,
}

impl Comparison {
    /// `(name, value)` pairs for one metric, e.g. for a bar chart.
    pub fn series(&self, metric: Metric) -> Vec<(&str, f64)> {
        self.entries
            .iter()
            .map(|(name, r)| (name.as_str(), metric.value(r)))
            .collect()
    }

    /// Algorithm with the best value for `metric`.
    ///
    /// On equal values the earlier-recorded algorithm wins.
    pub fn best(&self, metric: Metric) -> Option<&str> {
        let mut best: Option<(&str, f64)> = None;
        for (name, value) in self.series(metric) {
            let better = match best {
                None => true,
                Some((_, current)) if metric.higher_is_better() => value > current,
                Some((_, current)) => value < current,
            };
            if better {
                best = Some((name, value));
            }
        }
        best.map(|(name, _)| name)
    }
}

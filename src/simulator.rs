//! Simulator facade.
//!
//! Owns the registered process set and the comparison results, and guards
//! them so that only one run is active at a time.
//!
//! # Operations
//!
//! | Operation | Fails with |
//! |-----------|-----------|
//! | [`add_process`](Simulator::add_process) | `DuplicateProcess`, `InvalidInput`, `SimulationInProgress` |
//! | [`run_simulation`](Simulator::run_simulation) | `EmptyProcessSet`, `InvalidInput`, `SimulationInProgress` |
//! | [`comparison`](Simulator::comparison) | `InsufficientComparisonData` |
//! | [`reset`](Simulator::reset) | `SimulationInProgress` |
//!
//! A failed operation changes nothing. A run either produces a complete
//! report (and records its result for comparison) or leaves all state as
//! it was.
//!
//! # Streaming
//!
//! [`start`](Simulator::start) returns a [`SimulationRun`] that yields the
//! timeline one segment at a time, for a presentation layer that animates
//! the schedule. The run holds the in-progress guard until it is finished
//! or dropped.

use std::num::NonZeroU32;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::comparison::{Comparison, ComparisonAggregator};
use crate::config::SimulatorConfig;
use crate::error::{SimError, SimResult};
use crate::models::{
    AlgorithmResult, Pid, ProcessMetrics, ProcessRecord, Timeline, TimelineSegment,
};
use crate::scheduler::{Algorithm, RunMetrics, Scheduler};
use crate::validation::{validate_process, validate_processes, validate_quantum};

/// Complete output of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Algorithm that produced this report.
    pub algorithm: Algorithm,
    /// Quantum used, for round robin only.
    pub quantum: Option<u32>,
    /// Execution timeline, including idle gaps.
    pub timeline: Timeline,
    /// Per-process metrics, in insertion order.
    pub metrics: Vec<ProcessMetrics>,
    /// Aggregate metrics.
    pub result: AlgorithmResult,
}

/// CPU scheduling simulator.
///
/// All methods take `&self`; the simulator can be shared between threads.
///
/// # Example
///
/// ```
/// use schedsim::scheduler::Algorithm;
/// use schedsim::simulator::Simulator;
///
/// let sim = Simulator::new();
/// sim.add_process(1, 0, 5, 0).unwrap();
/// sim.add_process(2, 1, 3, 0).unwrap();
///
/// let report = sim.run_simulation(Algorithm::Fcfs, None).unwrap();
/// assert_eq!(report.timeline.makespan(), 8);
/// ```
#[derive(Debug, Default)]
pub struct Simulator {
    config: SimulatorConfig,
    processes: RwLock<Vec<ProcessRecord>>,
    results: Mutex<ComparisonAggregator>,
    running: AtomicBool,
}

/// Marks a run as active for as long as it lives.
#[derive(Debug)]
struct RunGuard<'a>(&'a AtomicBool);

impl<'a> RunGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> SimResult<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| RunGuard(flag))
            .map_err(|_| SimError::SimulationInProgress)
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Simulator {
    /// Creates a simulator with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a simulator with the given configuration.
    pub fn with_config(config: SimulatorConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Whether a run is currently active.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Registers a process.
    ///
    /// # Errors
    /// - [`SimError::InvalidInput`] for a negative arrival or non-positive burst.
    /// - [`SimError::DuplicateProcess`] if `pid` is already registered.
    /// - [`SimError::SimulationInProgress`] while a run is active.
    pub fn add_process(
        &self,
        pid: Pid,
        arrival: i64,
        burst: i64,
        priority: i32,
    ) -> SimResult<()> {
        self.add_record(ProcessRecord::new(pid, arrival, burst).with_priority(priority))
    }

    /// Registers a prepared record.
    ///
    /// Same checks as [`add_process`](Self::add_process).
    pub fn add_record(&self, record: ProcessRecord) -> SimResult<()> {
        let mut processes = self.write_processes_idle()?;
        if let Err(err) = validate_process(&record, &processes) {
            warn!("rejected process {}: {}", record.pid, err.message);
            return Err(err.into());
        }
        debug!(
            "added P{} (arrival {}, burst {}, priority {})",
            record.pid, record.arrival_time, record.burst_time, record.priority
        );
        processes.push(ProcessRecord {
            remaining_time: record.burst_time,
            ..record
        });
        Ok(())
    }

    /// Registers several processes at once.
    ///
    /// Either every record is accepted or none is; the first problem
    /// found is returned.
    pub fn add_processes(
        &self,
        records: impl IntoIterator<Item = ProcessRecord>,
    ) -> SimResult<()> {
        let mut processes = self.write_processes_idle()?;

        let mut candidate = processes.clone();
        candidate.extend(records.into_iter().map(|mut r| {
            r.rewind();
            r
        }));
        if let Err(errors) = validate_processes(&candidate) {
            for err in &errors {
                warn!("rejected batch: {}", err.message);
            }
            // validate_processes never returns an empty error list
            return Err(errors
                .into_iter()
                .next()
                .map(SimError::from)
                .unwrap_or_else(|| SimError::invalid("invalid process batch")));
        }

        debug!("added {} processes", candidate.len() - processes.len());
        *processes = candidate;
        Ok(())
    }

    /// Snapshot of the registered processes, in insertion order.
    pub fn processes(&self) -> Vec<ProcessRecord> {
        self.read_processes().clone()
    }

    /// Number of registered processes.
    pub fn process_count(&self) -> usize {
        self.read_processes().len()
    }

    /// Runs one complete simulation and records its result for comparison.
    ///
    /// `quantum` overrides the configured default; it is only checked and
    /// used for round robin.
    ///
    /// # Errors
    /// - [`SimError::EmptyProcessSet`] if no processes are registered.
    /// - [`SimError::InvalidInput`] for a non-positive round-robin quantum.
    /// - [`SimError::SimulationInProgress`] while another run is active.
    pub fn run_simulation(
        &self,
        algorithm: Algorithm,
        quantum: Option<i64>,
    ) -> SimResult<SimulationReport> {
        Ok(self.start(algorithm, quantum)?.finish())
    }

    /// Like [`run_simulation`](Self::run_simulation), with the algorithm
    /// given by name (see [`Algorithm`]'s `FromStr`).
    pub fn run_named(&self, algorithm: &str, quantum: Option<i64>) -> SimResult<SimulationReport> {
        self.run_simulation(algorithm.parse()?, quantum)
    }

    /// Starts a run and returns it for incremental consumption.
    ///
    /// The whole schedule is computed up front; the returned run replays
    /// it segment by segment and holds the in-progress guard until it is
    /// finished or dropped.
    pub fn start(
        &self,
        algorithm: Algorithm,
        quantum: Option<i64>,
    ) -> SimResult<SimulationRun<'_>> {
        let guard = RunGuard::acquire(&self.running)?;

        let quantum = if algorithm.uses_quantum() {
            let q = validate_quantum(quantum.unwrap_or(self.config.default_quantum))?;
            Some(q)
        } else {
            None
        };

        let processes = self.processes();
        let mut scheduler = Scheduler::new(algorithm);
        if let Some(q) = quantum.and_then(NonZeroU32::new) {
            scheduler = scheduler.with_quantum(q);
        }
        let outcome = scheduler.run(&processes)?;
        let metrics =
            RunMetrics::calculate(&outcome.timeline, &processes, &outcome.first_dispatch);

        info!(
            "{} finished: {} processes, makespan {}",
            algorithm, metrics.summary.process_count, metrics.summary.makespan
        );

        Ok(SimulationRun {
            simulator: self,
            report: SimulationReport {
                algorithm,
                quantum,
                timeline: outcome.timeline,
                metrics: metrics.per_process,
                result: metrics.summary,
            },
            cursor: 0,
            _guard: guard,
        })
    }

    /// Snapshot of stored results for side-by-side comparison.
    ///
    /// # Errors
    /// [`SimError::InsufficientComparisonData`] unless results for at
    /// least two algorithms are stored.
    pub fn comparison(&self) -> SimResult<Comparison> {
        self.lock_results().compare()
    }

    /// All stored results, in first-run order.
    pub fn results(&self) -> Vec<(String, AlgorithmResult)> {
        self.lock_results().list().to_vec()
    }

    /// Removes every process and every stored result.
    ///
    /// # Errors
    /// [`SimError::SimulationInProgress`] while a run is active; nothing
    /// is removed in that case.
    pub fn reset(&self) -> SimResult<()> {
        let mut processes = self.write_processes_idle()?;
        processes.clear();
        self.lock_results().clear();
        info!("simulator reset");
        Ok(())
    }

    fn read_processes(&self) -> RwLockReadGuard<'_, Vec<ProcessRecord>> {
        self.processes.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_processes(&self) -> RwLockWriteGuard<'_, Vec<ProcessRecord>> {
        self.processes.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Write access for intake and reset.
    ///
    /// Runs snapshot the process set under the read lock after raising the
    /// guard, so holding the write lock with no run active excludes them.
    fn write_processes_idle(&self) -> SimResult<RwLockWriteGuard<'_, Vec<ProcessRecord>>> {
        let processes = self.write_processes();
        if self.is_running() {
            return Err(SimError::SimulationInProgress);
        }
        Ok(processes)
    }

    fn lock_results(&self) -> MutexGuard<'_, ComparisonAggregator> {
        self.results.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// An active run being consumed segment by segment.
///
/// Iterating yields each timeline segment once. [`finish`](Self::finish)
/// records the result for comparison; dropping the run instead discards
/// it. Either way the simulator accepts new operations afterwards.
#[derive(Debug)]
pub struct SimulationRun<'a> {
    simulator: &'a Simulator,
    report: SimulationReport,
    cursor: usize,
    _guard: RunGuard<'a>,
}

impl SimulationRun<'_> {
    /// The complete report, available before replay ends.
    pub fn report(&self) -> &SimulationReport {
        &self.report
    }

    /// Number of segments not yet yielded.
    pub fn remaining(&self) -> usize {
        self.report.timeline.len() - self.cursor
    }

    /// Records the result for comparison and returns the report.
    pub fn finish(self) -> SimulationReport {
        let name = self.report.algorithm.name();
        self.simulator
            .lock_results()
            .record(name, self.report.result.clone());
        info!("recorded {}: {}", name, self.report.result.summary());
        self.report
    }
}

impl Iterator for SimulationRun<'_> {
    type Item = TimelineSegment;

    fn next(&mut self) -> Option<Self::Item> {
        let segment = self.report.timeline.segments().get(self.cursor).copied()?;
        self.cursor += 1;
        Some(segment)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

//! Intake validation for process sets.
//!
//! Every malformed record is rejected here, before it reaches a scheduler.
//! Detects:
//! - Negative arrival times
//! - Zero or negative burst times
//! - Duplicate PIDs
//! - Process sets whose schedule would end past `i64::MAX`
//! - Non-positive round-robin quanta
//!
//! The schedulers assume validated input and never re-check it.

use std::collections::HashSet;

use crate::error::SimError;
use crate::models::{Pid, ProcessRecord};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
    /// PID of the offending record, if any.
    pub pid: Option<Pid>,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Arrival time is below zero.
    NegativeArrival,
    /// Burst time is zero or below.
    NonPositiveBurst,
    /// Two processes share the same PID.
    DuplicateId,
    /// Latest arrival plus total burst does not fit in `i64`.
    HorizonOverflow,
    /// Round-robin quantum is zero or below.
    NonPositiveQuantum,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, pid: Option<Pid>, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            pid,
        }
    }
}

impl From<ValidationError> for SimError {
    fn from(err: ValidationError) -> Self {
        match (err.kind, err.pid) {
            (ValidationErrorKind::DuplicateId, Some(pid)) => SimError::DuplicateProcess(pid),
            _ => SimError::InvalidInput(err.message),
        }
    }
}

/// Checks the fields of a single record, ignoring other processes.
fn check_fields(p: &ProcessRecord, errors: &mut Vec<ValidationError>) {
    if p.arrival_time < 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NegativeArrival,
            Some(p.pid),
            format!("Process {} has negative arrival time {}", p.pid, p.arrival_time),
        ));
    }
    if p.burst_time <= 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NonPositiveBurst,
            Some(p.pid),
            format!("Process {} has non-positive burst time {}", p.pid, p.burst_time),
        ));
    }
}

/// Latest possible completion time of a set: every schedule ends by the
/// last arrival plus the sum of all bursts. `None` if that overflows.
fn horizon<'a>(processes: impl IntoIterator<Item = &'a ProcessRecord>) -> Option<i64> {
    let mut last_arrival = 0i64;
    let mut total_burst = 0i64;
    for p in processes {
        last_arrival = last_arrival.max(p.arrival_time);
        total_burst = total_burst.checked_add(p.burst_time)?;
    }
    last_arrival.checked_add(total_burst)
}

fn horizon_error(pid: Option<Pid>) -> ValidationError {
    ValidationError::new(
        ValidationErrorKind::HorizonOverflow,
        pid,
        "Arrival and burst times are too large to simulate",
    )
}

/// Validates one record against the processes already accepted.
///
/// Returns the first problem found.
pub fn validate_process(
    process: &ProcessRecord,
    existing: &[ProcessRecord],
) -> Result<(), ValidationError> {
    let mut errors = Vec::new();
    check_fields(process, &mut errors);
    if existing.iter().any(|p| p.pid == process.pid) {
        errors.push(ValidationError::new(
            ValidationErrorKind::DuplicateId,
            Some(process.pid),
            format!("Duplicate PID: {}", process.pid),
        ));
    }
    if errors.is_empty() && horizon(existing.iter().chain([process])).is_none() {
        errors.push(horizon_error(Some(process.pid)));
    }
    match errors.into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Validates a whole process set.
///
/// Checks:
/// 1. No negative arrival times
/// 2. All burst times positive
/// 3. No duplicate PIDs
/// 4. The whole set can be scheduled without overflowing `i64`
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_processes(processes: &[ProcessRecord]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut pids = HashSet::new();

    for p in processes {
        check_fields(p, &mut errors);
        if !pids.insert(p.pid) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                Some(p.pid),
                format!("Duplicate PID: {}", p.pid),
            ));
        }
    }
    if horizon(processes).is_none() {
        errors.push(horizon_error(None));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a round-robin quantum.
pub fn validate_quantum(quantum: i64) -> Result<u32, ValidationError> {
    u32::try_from(quantum)
        .ok()
        .filter(|&q| q > 0)
        .ok_or_else(|| {
            ValidationError::new(
                ValidationErrorKind::NonPositiveQuantum,
                None,
                format!("Quantum must be a positive integer, got {quantum}"),
            )
        })
}

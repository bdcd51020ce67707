//! Error taxonomy.
//!
//! - [`ValidationError`]: bad, missing, or duplicate input. Raised only by
//!   task intake; the whole request is rejected.
//! - [`InvariantError`]: a computed schedule broke a property that correct
//!   input can never break. Treat it as a defect signal, not as bad input.
//! - [`ScheduleError`]: the single failure type of [`crate::schedule`].

use thiserror::Error;

/// Input rejected by task intake.
///
/// Every variant names the task (or its position when the name itself is
/// missing) and the field or value at fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("task set is empty")]
    EmptyTaskSet,

    #[error("task set has {count} tasks, limit is {limit}")]
    TooManyTasks { count: usize, limit: usize },

    #[error("task #{index} ({task}): missing required field `{field}`")]
    MissingField {
        index: usize,
        task: String,
        field: &'static str,
    },

    #[error("task #{index}: name must not be empty")]
    EmptyName { index: usize },

    #[error("task '{task}': field `{field}` is not an integer: {value:?}")]
    NotNumeric {
        task: String,
        field: &'static str,
        value: String,
    },

    #[error("task '{task}': field `{field}` must be non-negative, got {value}")]
    Negative {
        task: String,
        field: &'static str,
        value: i64,
    },

    #[error("task '{task}': field `burst_time` must be positive, got {value}")]
    NonPositiveBurst { task: String, value: i64 },

    #[error("task '{task}': field `{field}` is out of range: {value}")]
    OutOfRange {
        task: String,
        field: &'static str,
        value: i64,
    },

    #[error("duplicate task name '{name}' at positions #{first} and #{second}")]
    DuplicateName {
        name: String,
        first: usize,
        second: usize,
    },

    #[error("latest arrival plus total burst time, summed over all tasks, overflows the time axis")]
    HorizonOverflow,
}

impl ValidationError {
    /// Name of the offending task, when the error is about a single task.
    pub fn task(&self) -> Option<&str> {
        match self {
            Self::MissingField { task, .. }
            | Self::NotNumeric { task, .. }
            | Self::Negative { task, .. }
            | Self::NonPositiveBurst { task, .. }
            | Self::OutOfRange { task, .. } => Some(task.as_str()),
            Self::DuplicateName { name, .. } => Some(name.as_str()),
            _ => None,
        }
    }

    /// Name of the offending field, when the error is about a single field.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::MissingField { field, .. }
            | Self::NotNumeric { field, .. }
            | Self::Negative { field, .. }
            | Self::OutOfRange { field, .. } => Some(*field),
            Self::NonPositiveBurst { .. } => Some("burst_time"),
            Self::EmptyName { .. } | Self::DuplicateName { .. } => Some("name"),
            _ => None,
        }
    }
}

/// A computed schedule violated a structural property.
///
/// Unreachable for input that passed intake.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantError {
    #[error("{intervals} intervals emitted for {tasks} tasks")]
    IntervalCountMismatch { tasks: usize, intervals: usize },

    #[error(
        "task '{task}' starts at {start_time} before its arrival at {arrival_time} \
         (waiting time {waiting_time})"
    )]
    NegativeWaitingTime {
        task: String,
        arrival_time: i64,
        start_time: i64,
        waiting_time: i64,
    },

    #[error("task '{task}': turnaround {turnaround_time} is below burst {burst_time}")]
    TurnaroundBelowBurst {
        task: String,
        burst_time: i64,
        turnaround_time: i64,
    },

    #[error("interval of '{next}' starts at {next_start} before '{previous}' ends at {previous_end}")]
    IntervalOverlap {
        previous: String,
        previous_end: i64,
        next: String,
        next_start: i64,
    },
}

/// Failure of a scheduling request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("internal invariant violated: {0}")]
    Invariant(#[from] InvariantError),
}

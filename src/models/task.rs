//! Task models.
//!
//! [`TaskDescriptor`] is the raw, unvalidated shape a caller hands in.
//! [`Task`] is the canonical record produced by intake
//! ([`crate::validation::intake`]).
//!
//! # Time Representation
//! All times are integer ticks relative to a scheduling epoch (t=0).
//! The caller defines the unit (ms, minutes, abstract ticks).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated task.
///
/// Invariants (established by intake): `name` non-empty and unique within
/// the run, `priority >= 0`, `burst_time > 0`, `arrival_time >= 0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Task {
    /// Unique task name.
    pub name: String,
    /// Scheduling priority. Direction is set by
    /// [`PriorityOrder`](crate::config::PriorityOrder); by default lower
    /// values run first.
    pub priority: i32,
    /// Total processing time required.
    pub burst_time: i64,
    /// Instant at which the task becomes eligible to run.
    pub arrival_time: i64,
    /// Position in the intake sequence. Tie-break of last resort.
    #[serde(default)]
    pub input_index: usize,
}

impl Task {
    /// Creates a task arriving at t=0.
    pub fn new(name: impl Into<String>, priority: i32, burst_time: i64) -> Self {
        Self {
            name: name.into(),
            priority,
            burst_time,
            arrival_time: 0,
            input_index: 0,
        }
    }

    /// Sets the arrival time.
    pub fn with_arrival_time(mut self, arrival_time: i64) -> Self {
        self.arrival_time = arrival_time;
        self
    }

    /// Sets the intake position.
    pub fn with_input_index(mut self, input_index: usize) -> Self {
        self.input_index = input_index;
        self
    }
}

/// A raw numeric field as it arrives from a caller.
///
/// Form-driven clients send numbers as strings, so text and integral
/// floats are accepted alongside plain integers. Conversion happens
/// during intake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    /// Interprets the value as an integer.
    ///
    /// Returns `None` for non-numeric text, fractional floats, and
    /// values outside `i64`.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            Self::Float(v) => {
                if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
                    Some(*v as i64)
                } else {
                    None
                }
            }
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

/// An unvalidated task descriptor.
///
/// Every field is optional so that intake, not deserialization, decides
/// what is missing and reports it against the offending task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<FieldValue>,
    #[serde(
        default,
        alias = "burst",
        alias = "duration",
        skip_serializing_if = "Option::is_none"
    )]
    pub burst_time: Option<FieldValue>,
    #[serde(default, alias = "arrival", skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<FieldValue>,
}

impl TaskDescriptor {
    /// Creates a descriptor with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Sets the priority field.
    pub fn with_priority(mut self, priority: impl Into<FieldValue>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Sets the burst time field.
    pub fn with_burst_time(mut self, burst_time: impl Into<FieldValue>) -> Self {
        self.burst_time = Some(burst_time.into());
        self
    }

    /// Sets the arrival time field.
    pub fn with_arrival_time(mut self, arrival_time: impl Into<FieldValue>) -> Self {
        self.arrival_time = Some(arrival_time.into());
        self
    }
}

impl From<&Task> for TaskDescriptor {
    fn from(task: &Task) -> Self {
        Self {
            name: Some(task.name.clone()),
            priority: Some(FieldValue::Integer(i64::from(task.priority))),
            burst_time: Some(FieldValue::Integer(task.burst_time)),
            arrival_time: Some(FieldValue::Integer(task.arrival_time)),
        }
    }
}

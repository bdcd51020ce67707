//! Task intake: validation and normalization of raw descriptors.
//!
//! Turns a caller's [`TaskDescriptor`] list into canonical [`Task`]
//! records, preserving input order. Detects:
//! - Empty task sets and task sets over the configured limit
//! - Missing required fields (`name`, `priority`, `burst_time`)
//! - Non-integer, negative, or out-of-range numeric fields
//! - Non-positive burst times
//! - Duplicate task names
//! - Time horizons that would overflow during scheduling
//!
//! Intake is atomic: the first problem found (in input order) rejects the
//! whole request and no partial task list is returned.

use crate::error::ValidationError;
use crate::models::{FieldValue, Task, TaskDescriptor};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Validation result for already-built tasks.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

const UNNAMED: &str = "<unnamed>";

/// Validates and normalizes descriptors with no task count limit.
pub fn intake(descriptors: &[TaskDescriptor]) -> Result<Vec<Task>, ValidationError> {
    intake_bounded(descriptors, None)
}

/// Validates and normalizes descriptors.
///
/// # Checks (in order)
/// 1. At least one descriptor, and no more than `max_tasks`
/// 2. Per descriptor, in input order: name, priority, burst time,
///    arrival time (defaults to 0)
/// 3. Names unique across the set
/// 4. `(max(arrival_time) + sum(burst_time)) * task_count` fits in `i64`
///
/// # Returns
/// Tasks in input order with `input_index` set, or the first error.
pub fn intake_bounded(
    descriptors: &[TaskDescriptor],
    max_tasks: Option<usize>,
) -> Result<Vec<Task>, ValidationError> {
    let result = normalize(descriptors, max_tasks);
    match &result {
        Ok(tasks) => debug!(count = tasks.len(), "intake accepted task set"),
        Err(err) => warn!(error = %err, "intake rejected task set"),
    }
    result
}

fn normalize(
    descriptors: &[TaskDescriptor],
    max_tasks: Option<usize>,
) -> Result<Vec<Task>, ValidationError> {
    if descriptors.is_empty() {
        return Err(ValidationError::EmptyTaskSet);
    }
    if let Some(limit) = max_tasks {
        if descriptors.len() > limit {
            return Err(ValidationError::TooManyTasks {
                count: descriptors.len(),
                limit,
            });
        }
    }

    let mut tasks = Vec::with_capacity(descriptors.len());
    let mut seen: HashMap<&str, usize> = HashMap::with_capacity(descriptors.len());

    for (index, desc) in descriptors.iter().enumerate() {
        let task = normalize_one(index, desc)?;
        if let Some(desc_name) = desc.name.as_deref().map(str::trim) {
            if let Some(&first) = seen.get(desc_name) {
                return Err(ValidationError::DuplicateName {
                    name: task.name,
                    first,
                    second: index,
                });
            }
            seen.insert(desc_name, index);
        }
        tasks.push(task);
    }

    check_horizon(&tasks)?;
    Ok(tasks)
}

fn normalize_one(index: usize, desc: &TaskDescriptor) -> Result<Task, ValidationError> {
    let name = match desc.name.as_deref() {
        None => {
            return Err(ValidationError::MissingField {
                index,
                task: UNNAMED.to_string(),
                field: "name",
            })
        }
        Some(n) if n.trim().is_empty() => return Err(ValidationError::EmptyName { index }),
        Some(n) => n.trim(),
    };

    let priority = required_integer(index, name, "priority", desc.priority.as_ref())?;
    if priority < 0 {
        return Err(ValidationError::Negative {
            task: name.to_string(),
            field: "priority",
            value: priority,
        });
    }
    let priority = i32::try_from(priority).map_err(|_| ValidationError::OutOfRange {
        task: name.to_string(),
        field: "priority",
        value: priority,
    })?;

    let burst_time = required_integer(index, name, "burst_time", desc.burst_time.as_ref())?;
    if burst_time <= 0 {
        return Err(ValidationError::NonPositiveBurst {
            task: name.to_string(),
            value: burst_time,
        });
    }

    let arrival_time = match desc.arrival_time.as_ref() {
        None => 0,
        Some(raw) => integer(name, "arrival_time", raw)?,
    };
    if arrival_time < 0 {
        return Err(ValidationError::Negative {
            task: name.to_string(),
            field: "arrival_time",
            value: arrival_time,
        });
    }

    Ok(Task {
        name: name.to_string(),
        priority,
        burst_time,
        arrival_time,
        input_index: index,
    })
}

fn required_integer(
    index: usize,
    task: &str,
    field: &'static str,
    raw: Option<&FieldValue>,
) -> Result<i64, ValidationError> {
    let raw = raw.ok_or_else(|| ValidationError::MissingField {
        index,
        task: task.to_string(),
        field,
    })?;
    integer(task, field, raw)
}

fn integer(task: &str, field: &'static str, raw: &FieldValue) -> Result<i64, ValidationError> {
    raw.as_integer().ok_or_else(|| ValidationError::NotNumeric {
        task: task.to_string(),
        field,
        value: raw.to_string(),
    })
}

/// The scheduler's clock never exceeds `horizon = max(arrival) + sum(burst)`,
/// and every waiting or turnaround time is at most `horizon`, so summing
/// them over `n` tasks stays within `n * horizon`.
fn check_horizon(tasks: &[Task]) -> Result<(), ValidationError> {
    let latest_arrival = tasks.iter().map(|t| t.arrival_time).max().unwrap_or(0);
    let count = i64::try_from(tasks.len()).map_err(|_| ValidationError::HorizonOverflow)?;
    tasks
        .iter()
        .try_fold(latest_arrival, |acc, t| acc.checked_add(t.burst_time))
        .and_then(|horizon| horizon.checked_mul(count))
        .map(|_| ())
        .ok_or(ValidationError::HorizonOverflow)
}

/// Validates tasks built directly (bypassing descriptors).
///
/// Unlike [`intake`], reports every problem found rather than the first.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_tasks(tasks: &[Task]) -> ValidationResult {
    let mut errors = Vec::new();

    if tasks.is_empty() {
        errors.push(ValidationError::EmptyTaskSet);
    }

    let mut seen: HashMap<&str, usize> = HashMap::new();
    for (index, task) in tasks.iter().enumerate() {
        if task.name.trim().is_empty() {
            errors.push(ValidationError::EmptyName { index });
        } else if let Some(&first) = seen.get(task.name.trim()) {
            errors.push(ValidationError::DuplicateName {
                name: task.name.clone(),
                first,
                second: index,
            });
        } else {
            seen.insert(task.name.trim(), index);
        }

        if task.priority < 0 {
            errors.push(ValidationError::Negative {
                task: task.name.clone(),
                field: "priority",
                value: i64::from(task.priority),
            });
        }
        if task.burst_time <= 0 {
            errors.push(ValidationError::NonPositiveBurst {
                task: task.name.clone(),
                value: task.burst_time,
            });
        }
        if task.arrival_time < 0 {
            errors.push(ValidationError::Negative {
                task: task.name.clone(),
                field: "arrival_time",
                value: task.arrival_time,
            });
        }
    }

    if errors.is_empty() {
        if let Err(err) = check_horizon(tasks) {
            errors.push(err);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

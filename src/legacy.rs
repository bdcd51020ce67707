//! Legacy text interchange format.
//!
//! ```text
//! 3
//! A 3 4 0
//! B 1 2 0
//! C 2 1 1
//! 0
//! ```
//!
//! A task count, then one `name priority burst_time [arrival_time]` line
//! per task, then an optional dependency count. Dependency sections are
//! not supported; only a count of `0` is accepted.
//!
//! Parsing only splits columns. Numeric checks are left to intake so that
//! errors name the offending task and field the same way for every input
//! format.

use thiserror::Error;

use crate::models::{FieldValue, Task, TaskDescriptor};

/// Errors raised by the legacy text codec. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LegacyFormatError {
    #[error("input is empty")]
    Empty,

    #[error("line {line}: expected task count, got {found:?}")]
    BadCount { line: usize, found: String },

    #[error("line {line}: expected `name priority burst_time [arrival_time]`, got {found:?}")]
    BadTaskLine { line: usize, found: String },

    #[error("expected {expected} task lines, found {found}")]
    MissingTasks { expected: usize, found: usize },

    #[error("line {line}: {count} dependencies declared; dependencies are not supported")]
    UnsupportedDependencies { line: usize, count: usize },

    #[error("line {line}: unexpected trailing content {found:?}")]
    TrailingContent { line: usize, found: String },

    #[error("task name {name:?} cannot be written: names must be non-empty without whitespace")]
    UnencodableName { name: String },
}

/// Parses the legacy text format into raw descriptors.
pub fn parse_legacy(text: &str) -> Result<Vec<TaskDescriptor>, LegacyFormatError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty());

    let (count_line, count_text) = lines.next().ok_or(LegacyFormatError::Empty)?;
    let expected: usize = count_text
        .parse()
        .map_err(|_| LegacyFormatError::BadCount {
            line: count_line,
            found: count_text.to_string(),
        })?;

    let mut descriptors = Vec::with_capacity(expected);
    for (line, content) in lines.by_ref().take(expected) {
        descriptors.push(parse_task_line(line, content)?);
    }
    if descriptors.len() < expected {
        return Err(LegacyFormatError::MissingTasks {
            expected,
            found: descriptors.len(),
        });
    }

    if let Some((line, content)) = lines.next() {
        match content.parse::<usize>() {
            Ok(0) => {}
            Ok(count) => return Err(LegacyFormatError::UnsupportedDependencies { line, count }),
            Err(_) => {
                return Err(LegacyFormatError::TrailingContent {
                    line,
                    found: content.to_string(),
                })
            }
        }
    }
    if let Some((line, content)) = lines.next() {
        return Err(LegacyFormatError::TrailingContent {
            line,
            found: content.to_string(),
        });
    }

    Ok(descriptors)
}

fn parse_task_line(line: usize, content: &str) -> Result<TaskDescriptor, LegacyFormatError> {
    let columns: Vec<&str> = content.split_whitespace().collect();
    let (name, priority, burst, arrival) = match columns.as_slice() {
        [name, priority, burst] => (name, priority, burst, None),
        [name, priority, burst, arrival] => (name, priority, burst, Some(arrival)),
        _ => {
            return Err(LegacyFormatError::BadTaskLine {
                line,
                found: content.to_string(),
            })
        }
    };

    Ok(TaskDescriptor {
        name: Some((*name).to_string()),
        priority: Some(FieldValue::from(*priority)),
        burst_time: Some(FieldValue::from(*burst)),
        arrival_time: arrival.map(|a| FieldValue::from(*a)),
    })
}

/// Writes tasks in the legacy text format, with a trailing `0`
/// dependency count.
pub fn to_legacy(tasks: &[Task]) -> Result<String, LegacyFormatError> {
    let lines = tasks
        .iter()
        .map(|task| {
            if task.name.is_empty() || task.name.chars().any(char::is_whitespace) {
                return Err(LegacyFormatError::UnencodableName {
                    name: task.name.clone(),
                });
            }
            Ok(format!(
                "{} {} {} {}\n",
                task.name, task.priority, task.burst_time, task.arrival_time
            ))
        })
        .collect::<Result<String, _>>()?;
    Ok(format!("{}\n{lines}0\n", tasks.len()))
}

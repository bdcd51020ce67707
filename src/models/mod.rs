//! Scheduling domain models.
//!
//! | Type | Role |
//! |------|------|
//! | `TaskDescriptor` | Raw caller input, every field optional |
//! | `Task` | Validated task record |
//! | `ExecutionInterval` | One task's run, borrowing its `Task` |
//! | `Schedule` | Intervals in dispatch order |

mod schedule;
mod task;

pub use schedule::{ExecutionInterval, Schedule};
pub use task::{FieldValue, Task, TaskDescriptor};

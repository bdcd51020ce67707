//! Non-preemptive priority scheduling engine.
//!
//! Given a set of tasks (name, priority, burst time, arrival time), computes
//! the execution order, per-task waiting and turnaround times, their means,
//! and a Gantt timeline. Each call is a pure, request-local computation.
//!
//! # Modules
//!
//! - **`models`**: `TaskDescriptor`, `Task`, `ExecutionInterval`, `Schedule`
//! - **`validation`**: Task intake (raw descriptors → validated tasks)
//! - **`scheduler`**: Priority scheduler core, observer hook, metrics
//! - **`report`**: Result projection (flat results, timeline, summary)
//! - **`legacy`**: Line-based text interchange format
//! - **`config`**: Engine configuration (TOML)
//! - **`error`**: Validation and invariant error types
//!
//! # Pipeline
//!
//! ```text
//! descriptors ─▶ intake ─▶ PriorityScheduler ─▶ ScheduleMetrics ─▶ ScheduleReport
//! ```
//!
//! # Example
//!
//! ```
//! use prio_schedule::models::TaskDescriptor;
//!
//! let report = prio_schedule::schedule(&[
//!     TaskDescriptor::new("A").with_priority(3).with_burst_time(4),
//!     TaskDescriptor::new("B").with_priority(1).with_burst_time(2),
//! ])
//! .unwrap();
//!
//! assert_eq!(report.execution_order, vec!["B", "A"]);
//! assert!((report.avg_waiting_time - 1.0).abs() < 1e-10);
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod config;
pub mod error;
pub mod legacy;
pub mod models;
pub mod report;
pub mod scheduler;
pub mod validation;

use tracing::{error, info};

use crate::config::EngineConfig;
use crate::error::{ScheduleError, ValidationError};
use crate::models::{Task, TaskDescriptor};
use crate::report::ScheduleReport;
use crate::scheduler::{
    check_invariants, NoopObserver, PriorityScheduler, ScheduleMetrics, ScheduleObserver,
};

/// Schedules a task set with the default configuration.
pub fn schedule(descriptors: &[TaskDescriptor]) -> Result<ScheduleReport, ScheduleError> {
    Engine::default().run(descriptors)
}

/// Runs the full intake → schedule → metrics → projection pipeline.
///
/// Holds only configuration; every call allocates its own tasks,
/// intervals, and metrics, so an `Engine` can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    /// Creates an engine with the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Schedules raw descriptors.
    pub fn run(&self, descriptors: &[TaskDescriptor]) -> Result<ScheduleReport, ScheduleError> {
        self.run_observed(descriptors, &mut NoopObserver)
    }

    /// Schedules raw descriptors, reporting scheduler events to `observer`.
    pub fn run_observed<O>(
        &self,
        descriptors: &[TaskDescriptor],
        observer: &mut O,
    ) -> Result<ScheduleReport, ScheduleError>
    where
        O: ScheduleObserver + ?Sized,
    {
        let tasks = validation::intake_bounded(descriptors, self.config.max_tasks)?;
        self.execute(&tasks, observer)
    }

    /// Schedules tasks built directly. The first validation problem found
    /// rejects the request.
    pub fn run_tasks(&self, tasks: &[Task]) -> Result<ScheduleReport, ScheduleError> {
        if let Err(errors) = validation::validate_tasks(tasks) {
            let first = errors
                .into_iter()
                .next()
                .unwrap_or(ValidationError::EmptyTaskSet);
            return Err(first.into());
        }
        if let Some(limit) = self.config.max_tasks {
            if tasks.len() > limit {
                return Err(ValidationError::TooManyTasks {
                    count: tasks.len(),
                    limit,
                }
                .into());
            }
        }
        self.execute(tasks, &mut NoopObserver)
    }

    fn execute<O>(&self, tasks: &[Task], observer: &mut O) -> Result<ScheduleReport, ScheduleError>
    where
        O: ScheduleObserver + ?Sized,
    {
        let schedule = PriorityScheduler::new()
            .with_priority_order(self.config.priority_order)
            .schedule_observed(tasks, observer);

        if let Err(err) = check_invariants(&schedule, tasks.len()) {
            error!(error = %err, tasks = tasks.len(), "schedule invariant violated");
            return Err(err.into());
        }

        let metrics = ScheduleMetrics::calculate(&schedule);
        let report = ScheduleReport::project(&schedule, &metrics, self.config.report.sort);

        info!(
            tasks = tasks.len(),
            makespan = metrics.makespan,
            avg_waiting_time = metrics.avg_waiting_time,
            avg_turnaround_time = metrics.avg_turnaround_time,
            "schedule computed"
        );
        Ok(report)
    }
}

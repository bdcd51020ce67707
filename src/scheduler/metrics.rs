//! Schedule metrics.
//!
//! Derives per-task waiting and turnaround times and run-level figures
//! from a completed schedule.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Waiting time | start - arrival |
//! | Turnaround time | end - arrival |
//! | Avg waiting / turnaround | Unweighted mean over all tasks |
//! | Makespan | Latest completion time |
//! | Idle time | Gaps between intervals |
//! | Utilization | busy / (makespan - first start) |
//! | Throughput | tasks / (makespan - first start) |
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2: Scheduling Criteria

use crate::error::InvariantError;
use crate::models::Schedule;

/// Waiting and turnaround time of one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskMetrics {
    /// Task name.
    pub name: String,
    /// start - arrival.
    pub waiting_time: i64,
    /// end - arrival.
    pub turnaround_time: i64,
}

/// Metrics for a whole schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleMetrics {
    /// Per-task metrics, in execution order (parallel to the intervals).
    pub per_task: Vec<TaskMetrics>,
    /// Mean waiting time.
    pub avg_waiting_time: f64,
    /// Mean turnaround time.
    pub avg_turnaround_time: f64,
    /// Sum of waiting times.
    pub total_waiting_time: i64,
    /// Sum of turnaround times.
    pub total_turnaround_time: i64,
    /// Sum of burst times.
    pub total_burst_time: i64,
    /// Latest completion time.
    pub makespan: i64,
    /// Time the processor was idle between the first start and the makespan.
    pub idle_time: i64,
    /// Busy fraction of the active span (0.0..=1.0).
    pub utilization: f64,
    /// Completed tasks per time unit over the active span.
    pub throughput: f64,
}

impl ScheduleMetrics {
    /// Computes metrics from a schedule. Total: an empty schedule yields
    /// zeroed figures.
    pub fn calculate(schedule: &Schedule<'_>) -> Self {
        let per_task: Vec<TaskMetrics> = schedule
            .iter()
            .map(|interval| TaskMetrics {
                name: interval.task.name.clone(),
                waiting_time: interval.waiting_time(),
                turnaround_time: interval.turnaround_time(),
            })
            .collect();

        let total_waiting_time: i64 = per_task.iter().map(|m| m.waiting_time).sum();
        let total_turnaround_time: i64 = per_task.iter().map(|m| m.turnaround_time).sum();
        let total_burst_time = schedule.busy_time();

        let count = per_task.len();
        let (avg_waiting_time, avg_turnaround_time) = if count == 0 {
            (0.0, 0.0)
        } else {
            (
                total_waiting_time as f64 / count as f64,
                total_turnaround_time as f64 / count as f64,
            )
        };

        let makespan = schedule.makespan();
        let span = makespan - schedule.first_start();
        let (utilization, throughput) = if span <= 0 {
            (0.0, 0.0)
        } else {
            (
                total_burst_time as f64 / span as f64,
                count as f64 / span as f64,
            )
        };

        Self {
            per_task,
            avg_waiting_time,
            avg_turnaround_time,
            total_waiting_time,
            total_turnaround_time,
            total_burst_time,
            makespan,
            idle_time: schedule.idle_time(),
            utilization,
            throughput,
        }
    }

    /// Metrics for a task by name.
    pub fn for_task(&self, name: &str) -> Option<&TaskMetrics> {
        self.per_task.iter().find(|m| m.name == name)
    }
}

/// Checks the structural properties every correct schedule has.
///
/// 1. Exactly one interval per task
/// 2. No interval starts before its task arrives
/// 3. Turnaround is at least the burst time
/// 4. Intervals do not overlap and are in start order
pub fn check_invariants(schedule: &Schedule<'_>, task_count: usize) -> Result<(), InvariantError> {
    if schedule.len() != task_count {
        return Err(InvariantError::IntervalCountMismatch {
            tasks: task_count,
            intervals: schedule.len(),
        });
    }

    for interval in schedule {
        let task = interval.task;
        let waiting_time = interval.waiting_time();
        if waiting_time < 0 {
            return Err(InvariantError::NegativeWaitingTime {
                task: task.name.clone(),
                arrival_time: task.arrival_time,
                start_time: interval.start_time,
                waiting_time,
            });
        }
        let turnaround_time = interval.turnaround_time();
        if turnaround_time < task.burst_time {
            return Err(InvariantError::TurnaroundBelowBurst {
                task: task.name.clone(),
                burst_time: task.burst_time,
                turnaround_time,
            });
        }
    }

    for pair in schedule.intervals.windows(2) {
        if pair[1].start_time < pair[0].end_time {
            return Err(InvariantError::IntervalOverlap {
                previous: pair[0].task.name.clone(),
                previous_end: pair[0].end_time,
                next: pair[1].task.name.clone(),
                next_start: pair[1].start_time,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExecutionInterval, Task};

    #[test]
    fn test_metrics_basic() {
        let a = Task::new("A", 3, 4);
        let b = Task::new("B", 1, 2);
        let mut schedule = Schedule::new();
        schedule.push(ExecutionInterval::new(&b, 0));
        schedule.push(ExecutionInterval::new(&a, 2));

        let m = ScheduleMetrics::calculate(&schedule);
        assert_eq!(m.for_task("B").unwrap().waiting_time, 0);
        assert_eq!(m.for_task("A").unwrap().waiting_time, 2);
        assert_eq!(m.for_task("A").unwrap().turnaround_time, 6);
        assert!((m.avg_waiting_time - 1.0).abs() < 1e-10);
        assert!((m.avg_turnaround_time - 4.0).abs() < 1e-10); // (2 + 6) / 2
        assert_eq!(m.makespan, 6);
        assert_eq!(m.idle_time, 0);
        assert!((m.utilization - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_metrics_arrival_offsets() {
        let a = Task::new("A", 1, 3).with_arrival_time(2);
        let mut schedule = Schedule::new();
        schedule.push(ExecutionInterval::new(&a, 2));

        let m = ScheduleMetrics::calculate(&schedule);
        assert_eq!(m.per_task[0].waiting_time, 0);
        assert_eq!(m.per_task[0].turnaround_time, 3);
        // Active span is [2, 5), not [0, 5).
        assert!((m.utilization - 1.0).abs() < 1e-10);
        assert!((m.throughput - 1.0 / 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_metrics_idle_utilization() {
        let a = Task::new("A", 1, 2);
        let b = Task::new("B", 1, 2).with_arrival_time(6);
        let mut schedule = Schedule::new();
        schedule.push(ExecutionInterval::new(&a, 0));
        schedule.push(ExecutionInterval::new(&b, 6));

        let m = ScheduleMetrics::calculate(&schedule);
        assert_eq!(m.idle_time, 4);
        assert!((m.utilization - 0.5).abs() < 1e-10); // 4 busy / 8 span
    }

    #[test]
    fn test_sum_identity() {
        let a = Task::new("A", 2, 5).with_arrival_time(1);
        let b = Task::new("B", 1, 3);
        let mut schedule = Schedule::new();
        schedule.push(ExecutionInterval::new(&b, 0));
        schedule.push(ExecutionInterval::new(&a, 3));

        let m = ScheduleMetrics::calculate(&schedule);
        assert_eq!(
            m.total_waiting_time + m.total_burst_time,
            m.total_turnaround_time
        );
    }

    #[test]
    fn test_metrics_empty() {
        let m = ScheduleMetrics::calculate(&Schedule::new());
        assert!(m.per_task.is_empty());
        assert!((m.avg_waiting_time - 0.0).abs() < 1e-10);
        assert_eq!(m.makespan, 0);
        assert!((m.utilization - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_invariants_hold() {
        let a = Task::new("A", 1, 2);
        let mut schedule = Schedule::new();
        schedule.push(ExecutionInterval::new(&a, 0));
        assert!(check_invariants(&schedule, 1).is_ok());
    }

    #[test]
    fn test_invariant_count_mismatch() {
        let schedule = Schedule::new();
        assert_eq!(
            check_invariants(&schedule, 1),
            Err(InvariantError::IntervalCountMismatch {
                tasks: 1,
                intervals: 0
            })
        );
    }

    #[test]
    fn test_invariant_negative_waiting() {
        let a = Task::new("A", 1, 2).with_arrival_time(5);
        let mut schedule = Schedule::new();
        schedule.push(ExecutionInterval::new(&a, 3));
        assert!(matches!(
            check_invariants(&schedule, 1),
            Err(InvariantError::NegativeWaitingTime {
                waiting_time: -2,
                ..
            })
        ));
    }

    #[test]
    fn test_invariant_turnaround_below_burst() {
        let a = Task::new("A", 1, 4);
        let mut schedule = Schedule::new();
        schedule.push(ExecutionInterval {
            task: &a,
            start_time: 0,
            end_time: 2,
        });
        assert!(matches!(
            check_invariants(&schedule, 1),
            Err(InvariantError::TurnaroundBelowBurst { .. })
        ));
    }

    #[test]
    fn test_invariant_overlap() {
        let a = Task::new("A", 1, 4);
        let b = Task::new("B", 1, 4);
        let mut schedule = Schedule::new();
        schedule.push(ExecutionInterval::new(&a, 0));
        schedule.push(ExecutionInterval::new(&b, 2));
        assert!(matches!(
            check_invariants(&schedule, 2),
            Err(InvariantError::IntervalOverlap { .. })
        ));
    }
}

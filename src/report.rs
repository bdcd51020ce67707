//! Result projection.
//!
//! Assembles a [`ScheduleReport`] from a schedule and its metrics:
//! - a flat per-task result list (display order is configurable), and
//! - the timeline (Gantt) in true execution order, never re-sorted.
//!
//! The report owns its data, serializes to camelCase JSON, and renders a
//! plain-text summary.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::ReportSort;
use crate::models::Schedule;
use crate::scheduler::ScheduleMetrics;

/// One row of the flat result list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResult {
    pub name: String,
    pub priority: i32,
    pub burst_time: i64,
    pub arrival_time: i64,
    pub waiting_time: i64,
    pub turnaround_time: i64,
}

/// One bar of the Gantt chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub name: String,
    pub start_time: i64,
    pub end_time: i64,
    pub burst_time: i64,
    pub priority: i32,
}

/// Run-level figures beyond the two averages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStats {
    pub makespan: i64,
    pub idle_time: i64,
    pub utilization: f64,
    pub throughput: f64,
}

/// The result of one scheduling request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleReport {
    /// Per-task results in the configured display order.
    pub task_results: Vec<TaskResult>,
    /// Mean waiting time.
    pub avg_waiting_time: f64,
    /// Mean turnaround time.
    pub avg_turnaround_time: f64,
    /// Execution intervals, `start_time` ascending.
    pub timeline: Vec<TimelineEntry>,
    /// Task names in execution order.
    pub execution_order: Vec<String>,
    /// Makespan, idle time, utilization, throughput.
    pub stats: RunStats,
}

impl ScheduleReport {
    /// Builds the report.
    ///
    /// `metrics` must have been computed from `schedule`; its per-task
    /// entries are parallel to the schedule's intervals.
    pub fn project(schedule: &Schedule<'_>, metrics: &ScheduleMetrics, sort: ReportSort) -> Self {
        let timeline: Vec<TimelineEntry> = schedule
            .iter()
            .map(|interval| TimelineEntry {
                name: interval.task.name.clone(),
                start_time: interval.start_time,
                end_time: interval.end_time,
                burst_time: interval.task.burst_time,
                priority: interval.task.priority,
            })
            .collect();

        let mut rows: Vec<(usize, TaskResult)> = schedule
            .iter()
            .zip(&metrics.per_task)
            .map(|(interval, m)| {
                (
                    interval.task.input_index,
                    TaskResult {
                        name: interval.task.name.clone(),
                        priority: interval.task.priority,
                        burst_time: interval.task.burst_time,
                        arrival_time: interval.task.arrival_time,
                        waiting_time: m.waiting_time,
                        turnaround_time: m.turnaround_time,
                    },
                )
            })
            .collect();

        // Stable sorts: execution order breaks every tie.
        match sort {
            ReportSort::Execution => {}
            ReportSort::WaitingTime => rows.sort_by_key(|(_, r)| r.waiting_time),
            ReportSort::Input => rows.sort_by_key(|(index, _)| *index),
        }

        Self {
            task_results: rows.into_iter().map(|(_, r)| r).collect(),
            avg_waiting_time: metrics.avg_waiting_time,
            avg_turnaround_time: metrics.avg_turnaround_time,
            execution_order: schedule
                .execution_order()
                .into_iter()
                .map(str::to_string)
                .collect(),
            timeline,
            stats: RunStats {
                makespan: metrics.makespan,
                idle_time: metrics.idle_time,
                utilization: metrics.utilization,
                throughput: metrics.throughput,
            },
        }
    }

    /// Result for a task by name.
    pub fn result_for(&self, name: &str) -> Option<&TaskResult> {
        self.task_results.iter().find(|r| r.name == name)
    }

    /// Results ordered by ascending waiting time, for table display.
    pub fn sorted_by_waiting_time(&self) -> Vec<&TaskResult> {
        let mut rows: Vec<&TaskResult> = self.task_results.iter().collect();
        rows.sort_by_key(|r| r.waiting_time);
        rows
    }

    /// Pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Plain-text summary with averages at `precision` decimals.
    pub fn summary(&self, precision: usize) -> Summary<'_> {
        Summary {
            report: self,
            precision,
        }
    }
}

/// Text rendering of a [`ScheduleReport`]; see [`ScheduleReport::summary`].
#[derive(Debug, Clone, Copy)]
pub struct Summary<'a> {
    report: &'a ScheduleReport,
    precision: usize,
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.report;
        let p = self.precision;

        writeln!(f, "Scheduling Summary")?;
        writeln!(f, "==================")?;
        writeln!(f)?;
        writeln!(f, "Average Waiting Time: {:.p$}", r.avg_waiting_time)?;
        writeln!(f, "Average Turnaround Time: {:.p$}", r.avg_turnaround_time)?;
        writeln!(f, "Makespan: {}", r.stats.makespan)?;
        writeln!(f, "Idle Time: {}", r.stats.idle_time)?;
        writeln!(f, "Utilization: {:.p$}%", r.stats.utilization * 100.0)?;
        writeln!(f)?;

        writeln!(f, "Execution Order:")?;
        for (i, entry) in r.timeline.iter().enumerate() {
            writeln!(
                f,
                "{}. {} [{}, {})",
                i + 1,
                entry.name,
                entry.start_time,
                entry.end_time
            )?;
        }
        writeln!(f)?;

        writeln!(f, "Task Details:")?;
        for row in &r.task_results {
            writeln!(f, "{}:", row.name)?;
            writeln!(f, "  Priority: {}", row.priority)?;
            writeln!(f, "  Burst Time: {}", row.burst_time)?;
            writeln!(f, "  Arrival Time: {}", row.arrival_time)?;
            writeln!(f, "  Waiting Time: {}", row.waiting_time)?;
            writeln!(f, "  Turnaround Time: {}", row.turnaround_time)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Task;
    use crate::scheduler::PriorityScheduler;

    fn tasks() -> Vec<Task> {
        vec![
            Task::new("A", 3, 4).with_input_index(0),
            Task::new("B", 1, 2).with_input_index(1),
            Task::new("C", 2, 1).with_arrival_time(1).with_input_index(2),
        ]
    }

    fn report(tasks: &[Task], sort: ReportSort) -> ScheduleReport {
        let schedule = PriorityScheduler::new().schedule(tasks);
        let metrics = ScheduleMetrics::calculate(&schedule);
        ScheduleReport::project(&schedule, &metrics, sort)
    }

    #[test]
    fn test_timeline_in_execution_order() {
        let tasks = tasks();
        let r = report(&tasks, ReportSort::WaitingTime);
        let names: Vec<&str> = r.timeline.iter().map(|e| e.name.as_str()).collect();
        // B [0,2), C [2,3), A [3,7)
        assert_eq!(names, vec!["B", "C", "A"]);
        assert_eq!(r.execution_order, vec!["B", "C", "A"]);
        assert_eq!(r.timeline[1].start_time, 2);
        assert_eq!(r.timeline[1].end_time, 3);
        assert_eq!(r.timeline[2].burst_time, 4);
        assert_eq!(r.timeline[2].priority, 3);
    }

    #[test]
    fn test_sort_modes() {
        let tasks = tasks();
        let names = |r: &ScheduleReport| -> Vec<String> {
            r.task_results.iter().map(|t| t.name.clone()).collect()
        };

        assert_eq!(names(&report(&tasks, ReportSort::Execution)), ["B", "C", "A"]);
        assert_eq!(names(&report(&tasks, ReportSort::Input)), ["A", "B", "C"]);
        // Waiting: B=0, C=1, A=3.
        assert_eq!(names(&report(&tasks, ReportSort::WaitingTime)), ["B", "C", "A"]);
    }

    #[test]
    fn test_waiting_time_sort_differs_from_execution() {
        // A [0,10), C [10,11), B [11,12); waits A=0, C=9, B=2.
        let tasks = vec![
            Task::new("A", 9, 10).with_input_index(0),
            Task::new("B", 5, 1).with_arrival_time(9).with_input_index(1),
            Task::new("C", 1, 1).with_arrival_time(1).with_input_index(2),
        ];

        let r = report(&tasks, ReportSort::WaitingTime);
        let results: Vec<(&str, i64)> = r
            .task_results
            .iter()
            .map(|t| (t.name.as_str(), t.waiting_time))
            .collect();
        assert_eq!(results, vec![("A", 0), ("B", 2), ("C", 9)]);
        let timeline: Vec<&str> = r.timeline.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(timeline, vec!["A", "C", "B"]);
        assert_eq!(r.execution_order, vec!["A", "C", "B"]);

        let r = report(&tasks, ReportSort::Execution);
        let view: Vec<&str> = r
            .sorted_by_waiting_time()
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(view, vec!["A", "B", "C"]);
        let results: Vec<&str> = r.task_results.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(results, vec!["A", "C", "B"]);
    }

    #[test]
    fn test_result_values() {
        let tasks = tasks();
        let r = report(&tasks, ReportSort::Execution);
        let c = r.result_for("C").unwrap();
        assert_eq!(c.waiting_time, 1);
        assert_eq!(c.turnaround_time, 2);
        assert!((r.avg_waiting_time - 4.0 / 3.0).abs() < 1e-10);
        assert_eq!(r.stats.makespan, 7);
    }

    #[test]
    fn test_sorted_by_waiting_time_is_view_only() {
        let tasks = vec![
            Task::new("A", 1, 5).with_input_index(0),
            Task::new("B", 2, 1).with_input_index(1),
        ];
        let r = report(&tasks, ReportSort::Input);
        let view: Vec<&str> = r
            .sorted_by_waiting_time()
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(view, vec!["A", "B"]);
        assert_eq!(r.timeline[0].name, "A");
    }

    #[test]
    fn test_json_shape() {
        let tasks = tasks();
        let r = report(&tasks, ReportSort::Execution);
        let value: serde_json::Value = serde_json::from_str(&r.to_json_pretty().unwrap()).unwrap();

        assert!(value["taskResults"].is_array());
        assert_eq!(value["taskResults"][0]["waitingTime"], 0);
        assert_eq!(value["taskResults"][0]["burstTime"], 2);
        assert!(value["avgWaitingTime"].is_f64());
        assert_eq!(value["timeline"][2]["startTime"], 3);
        assert_eq!(value["timeline"][2]["endTime"], 7);
        assert_eq!(value["executionOrder"][0], "B");
    }

    #[test]
    fn test_json_roundtrip_equal() {
        let tasks = tasks();
        let r = report(&tasks, ReportSort::Execution);
        let back: ScheduleReport = serde_json::from_str(&r.to_json_pretty().unwrap()).unwrap();
        assert_eq!(back, r);
    }

    #[test]
    fn test_summary_text() {
        let tasks = vec![Task::new("A", 1, 5)];
        let text = report(&tasks, ReportSort::Execution).summary(2).to_string();
        assert!(text.contains("Average Waiting Time: 0.00"));
        assert!(text.contains("Average Turnaround Time: 5.00"));
        assert!(text.contains("1. A [0, 5)"));
        assert!(text.contains("  Turnaround Time: 5"));
    }

    #[test]
    fn test_summary_precision() {
        let tasks = vec![Task::new("A", 1, 5)];
        let text = report(&tasks, ReportSort::Execution).summary(0).to_string();
        assert!(text.contains("Average Turnaround Time: 5\n"));
    }
}

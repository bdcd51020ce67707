//! Schedule (solution) model.
//!
//! A schedule is the ordered list of execution intervals produced by the
//! scheduler core: one interval per task, in dispatch order. Intervals
//! borrow the tasks they run; the task slice outlives the schedule.

use super::Task;

/// One task's run on the processor, `[start_time, end_time)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionInterval<'a> {
    /// Task being run.
    pub task: &'a Task,
    /// Dispatch instant.
    pub start_time: i64,
    /// Completion instant, `start_time + task.burst_time`.
    pub end_time: i64,
}

impl<'a> ExecutionInterval<'a> {
    /// Creates an interval running `task` to completion from `start_time`.
    pub fn new(task: &'a Task, start_time: i64) -> Self {
        Self {
            task,
            start_time,
            end_time: start_time + task.burst_time,
        }
    }

    /// Interval length.
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end_time - self.start_time
    }

    /// Time spent eligible but not running.
    #[inline]
    pub fn waiting_time(&self) -> i64 {
        self.start_time - self.task.arrival_time
    }

    /// Time from arrival to completion.
    #[inline]
    pub fn turnaround_time(&self) -> i64 {
        self.end_time - self.task.arrival_time
    }
}

/// A complete non-preemptive schedule, intervals in dispatch order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule<'a> {
    /// Intervals sorted by `start_time` ascending.
    pub intervals: Vec<ExecutionInterval<'a>>,
}

impl<'a> Schedule<'a> {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an interval. Callers append in dispatch order.
    pub fn push(&mut self, interval: ExecutionInterval<'a>) {
        self.intervals.push(interval);
    }

    /// Number of intervals.
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Whether the schedule has no intervals.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Iterates intervals in dispatch order.
    pub fn iter(&self) -> std::slice::Iter<'_, ExecutionInterval<'a>> {
        self.intervals.iter()
    }

    /// Earliest start time (0 for an empty schedule).
    pub fn first_start(&self) -> i64 {
        self.intervals.first().map(|i| i.start_time).unwrap_or(0)
    }

    /// Makespan: latest completion time (0 for an empty schedule).
    pub fn makespan(&self) -> i64 {
        self.intervals.iter().map(|i| i.end_time).max().unwrap_or(0)
    }

    /// Total time the processor is running a task.
    pub fn busy_time(&self) -> i64 {
        self.intervals.iter().map(|i| i.duration()).sum()
    }

    /// Gaps between consecutive intervals where nothing had arrived yet.
    ///
    /// The span before the first start is not reported; the schedule
    /// clock starts at the earliest arrival.
    pub fn idle_gaps(&self) -> Vec<(i64, i64)> {
        self.intervals
            .windows(2)
            .filter(|w| w[1].start_time > w[0].end_time)
            .map(|w| (w[0].end_time, w[1].start_time))
            .collect()
    }

    /// Total idle time between the first start and the makespan.
    pub fn idle_time(&self) -> i64 {
        self.idle_gaps().iter().map(|(from, to)| to - from).sum()
    }

    /// Finds the interval for a task by name.
    pub fn interval_for(&self, name: &str) -> Option<&ExecutionInterval<'a>> {
        self.intervals.iter().find(|i| i.task.name == name)
    }

    /// Task names in execution order.
    pub fn execution_order(&self) -> Vec<&'a str> {
        self.intervals.iter().map(|i| i.task.name.as_str()).collect()
    }
}

impl<'s, 'a> IntoIterator for &'s Schedule<'a> {
    type Item = &'s ExecutionInterval<'a>;
    type IntoIter = std::slice::Iter<'s, ExecutionInterval<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_times() {
        let task = Task::new("A", 1, 3).with_arrival_time(2);
        let interval = ExecutionInterval::new(&task, 5);
        assert_eq!(interval.end_time, 8);
        assert_eq!(interval.duration(), 3);
        assert_eq!(interval.waiting_time(), 3);
        assert_eq!(interval.turnaround_time(), 6);
    }

    #[test]
    fn test_schedule_queries() {
        let a = Task::new("A", 1, 2);
        let b = Task::new("B", 1, 3).with_arrival_time(5);
        let mut schedule = Schedule::new();
        schedule.push(ExecutionInterval::new(&a, 0));
        schedule.push(ExecutionInterval::new(&b, 5));

        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule.first_start(), 0);
        assert_eq!(schedule.makespan(), 8);
        assert_eq!(schedule.busy_time(), 5);
        assert_eq!(schedule.idle_gaps(), vec![(2, 5)]);
        assert_eq!(schedule.idle_time(), 3);
        assert_eq!(schedule.execution_order(), vec!["A", "B"]);
        assert_eq!(schedule.interval_for("B").map(|i| i.start_time), Some(5));
        assert!(schedule.interval_for("C").is_none());
    }

    #[test]
    fn test_empty_schedule() {
        let schedule = Schedule::new();
        assert!(schedule.is_empty());
        assert_eq!(schedule.makespan(), 0);
        assert_eq!(schedule.first_start(), 0);
        assert!(schedule.idle_gaps().is_empty());
    }
}

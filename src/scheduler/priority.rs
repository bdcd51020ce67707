//! Non-preemptive priority scheduler with arrival gating.
//!
//! # Algorithm
//!
//! 1. Sort tasks by arrival; start the clock at the earliest arrival.
//! 2. Move every task with `arrival_time <= clock` into the ready heap.
//! 3. If the heap is empty, jump the clock to the next arrival (idle gap,
//!    no interval emitted).
//! 4. Otherwise pop the best-ranked task (priority rank, then arrival,
//!    then intake order), run it to completion, advance the clock to its
//!    end, and repeat from 2.
//!
//! A running task is never interrupted, even when a better-ranked task
//! arrives mid-run.
//!
//! # Complexity
//! O(n log n): one sort plus one heap push/pop per task.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3.4

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use tracing::{debug, trace};

use super::observer::{NoopObserver, ScheduleObserver};
use crate::config::PriorityOrder;
use crate::models::{ExecutionInterval, Schedule, Task};

/// Dispatch ordering key. Derived `Ord` compares fields top to bottom;
/// smaller keys dispatch first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct ReadyKey {
    rank: i64,
    arrival_time: i64,
    input_index: usize,
    slot: usize,
}

/// Non-preemptive priority scheduler.
///
/// Deterministic: the same task slice always yields the same schedule.
/// Holds no state between calls, so one instance may serve any number of
/// concurrent requests.
///
/// # Example
///
/// ```
/// use prio_schedule::models::Task;
/// use prio_schedule::scheduler::PriorityScheduler;
///
/// let tasks = vec![Task::new("A", 3, 4), Task::new("B", 1, 2)];
/// let schedule = PriorityScheduler::new().schedule(&tasks);
/// assert_eq!(schedule.execution_order(), vec!["B", "A"]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PriorityScheduler {
    order: PriorityOrder,
}

impl PriorityScheduler {
    /// Creates a scheduler where lower priority values run first.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the priority direction.
    pub fn with_priority_order(mut self, order: PriorityOrder) -> Self {
        self.order = order;
        self
    }

    /// Priority direction in use.
    pub fn priority_order(&self) -> PriorityOrder {
        self.order
    }

    /// Schedules tasks, one interval per task, in dispatch order.
    ///
    /// Tasks are expected to have passed intake
    /// ([`crate::validation::intake`] or
    /// [`crate::validation::validate_tasks`]).
    pub fn schedule<'a>(&self, tasks: &'a [Task]) -> Schedule<'a> {
        self.schedule_observed(tasks, &mut NoopObserver)
    }

    /// Schedules tasks, reporting each step to `observer`.
    pub fn schedule_observed<'a, O>(&self, tasks: &'a [Task], observer: &mut O) -> Schedule<'a>
    where
        O: ScheduleObserver + ?Sized,
    {
        let mut schedule = Schedule::new();
        if tasks.is_empty() {
            return schedule;
        }

        // Not-yet-arrived tasks, earliest arrival first.
        let mut pending: Vec<usize> = (0..tasks.len()).collect();
        pending.sort_by_key(|&slot| (tasks[slot].arrival_time, tasks[slot].input_index, slot));

        let mut ready: BinaryHeap<Reverse<ReadyKey>> = BinaryHeap::with_capacity(tasks.len());
        let mut next = 0;
        let mut clock = tasks[pending[0]].arrival_time;

        loop {
            while next < pending.len() && tasks[pending[next]].arrival_time <= clock {
                let slot = pending[next];
                let task = &tasks[slot];
                ready.push(Reverse(ReadyKey {
                    rank: self.order.rank(task.priority),
                    arrival_time: task.arrival_time,
                    input_index: task.input_index,
                    slot,
                }));
                trace!(task = %task.name, clock, "task arrived");
                observer.on_arrival(task, clock);
                next += 1;
            }

            let Some(Reverse(key)) = ready.pop() else {
                if next == pending.len() {
                    break;
                }
                let resume = tasks[pending[next]].arrival_time;
                debug!(from = clock, to = resume, "processor idle");
                observer.on_idle(clock, resume);
                clock = resume;
                continue;
            };

            let interval = ExecutionInterval::new(&tasks[key.slot], clock);
            debug!(
                task = %interval.task.name,
                priority = interval.task.priority,
                start = interval.start_time,
                end = interval.end_time,
                "dispatched"
            );
            observer.on_dispatch(&interval);
            clock = interval.end_time;
            schedule.push(interval);
        }

        schedule
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::observer::{RecordingObserver, ScheduleEvent};

    fn task(name: &str, priority: i32, burst: i64, arrival: i64, index: usize) -> Task {
        Task::new(name, priority, burst)
            .with_arrival_time(arrival)
            .with_input_index(index)
    }

    fn spans(schedule: &Schedule<'_>) -> Vec<(String, i64, i64)> {
        schedule
            .iter()
            .map(|i| (i.task.name.clone(), i.start_time, i.end_time))
            .collect()
    }

    #[test]
    fn test_single_task() {
        let tasks = vec![task("A", 1, 5, 0, 0)];
        let schedule = PriorityScheduler::new().schedule(&tasks);
        assert_eq!(spans(&schedule), vec![("A".into(), 0, 5)]);
    }

    #[test]
    fn test_priority_ordering_equal_arrival() {
        let tasks = vec![task("A", 3, 4, 0, 0), task("B", 1, 2, 0, 1)];
        let schedule = PriorityScheduler::new().schedule(&tasks);
        assert_eq!(
            spans(&schedule),
            vec![("B".into(), 0, 2), ("A".into(), 2, 6)]
        );
    }

    #[test]
    fn test_arrival_gating_starts_at_first_arrival() {
        let tasks = vec![task("A", 1, 3, 2, 0)];
        let schedule = PriorityScheduler::new().schedule(&tasks);
        assert_eq!(spans(&schedule), vec![("A".into(), 2, 5)]);
    }

    #[test]
    fn test_tie_break_input_order() {
        let tasks = vec![
            task("first", 2, 1, 0, 0),
            task("second", 2, 1, 0, 1),
            task("third", 2, 1, 0, 2),
        ];
        let schedule = PriorityScheduler::new().schedule(&tasks);
        assert_eq!(schedule.execution_order(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_tie_break_earlier_arrival() {
        // Equal priority, both ready at t=3: the earlier arrival wins even
        // though it comes later in input order.
        let tasks = vec![
            task("blocker", 0, 3, 0, 0),
            task("late", 5, 1, 2, 1),
            task("early", 5, 1, 1, 2),
        ];
        let schedule = PriorityScheduler::new().schedule(&tasks);
        assert_eq!(schedule.execution_order(), vec!["blocker", "early", "late"]);
    }

    #[test]
    fn test_non_preemptive() {
        // "low" starts alone at 0; "urgent" arrives at 1 but must wait.
        let tasks = vec![task("low", 9, 10, 0, 0), task("urgent", 0, 2, 1, 1)];
        let schedule = PriorityScheduler::new().schedule(&tasks);
        assert_eq!(
            spans(&schedule),
            vec![("low".into(), 0, 10), ("urgent".into(), 10, 12)]
        );
    }

    #[test]
    fn test_arrived_tasks_compete_after_each_completion() {
        let tasks = vec![
            task("A", 5, 4, 0, 0),
            task("B", 3, 2, 1, 1),
            task("C", 1, 2, 3, 2),
        ];
        let schedule = PriorityScheduler::new().schedule(&tasks);
        // At t=4 both B and C are ready; C has the better priority.
        assert_eq!(
            spans(&schedule),
            vec![("A".into(), 0, 4), ("C".into(), 4, 6), ("B".into(), 6, 8)]
        );
    }

    #[test]
    fn test_idle_gap_mid_run() {
        let tasks = vec![task("A", 1, 2, 0, 0), task("B", 1, 3, 10, 1)];
        let schedule = PriorityScheduler::new().schedule(&tasks);
        assert_eq!(
            spans(&schedule),
            vec![("A".into(), 0, 2), ("B".into(), 10, 13)]
        );
        assert_eq!(schedule.idle_gaps(), vec![(2, 10)]);
    }

    #[test]
    fn test_higher_first_order() {
        let tasks = vec![task("A", 3, 4, 0, 0), task("B", 1, 2, 0, 1)];
        let schedule = PriorityScheduler::new()
            .with_priority_order(PriorityOrder::HigherFirst)
            .schedule(&tasks);
        assert_eq!(schedule.execution_order(), vec!["A", "B"]);
    }

    #[test]
    fn test_unsorted_input_arrivals() {
        let tasks = vec![task("late", 0, 1, 7, 0), task("early", 9, 1, 4, 1)];
        let schedule = PriorityScheduler::new().schedule(&tasks);
        assert_eq!(
            spans(&schedule),
            vec![("early".into(), 4, 5), ("late".into(), 7, 8)]
        );
    }

    #[test]
    fn test_observer_events() {
        let tasks = vec![task("A", 1, 2, 0, 0), task("B", 1, 1, 5, 1)];
        let mut observer = RecordingObserver::new();
        PriorityScheduler::new().schedule_observed(&tasks, &mut observer);

        assert_eq!(
            observer.events,
            vec![
                ScheduleEvent::Arrival {
                    task: "A".into(),
                    clock: 0
                },
                ScheduleEvent::Dispatch {
                    task: "A".into(),
                    start_time: 0,
                    end_time: 2
                },
                ScheduleEvent::Idle { from: 2, to: 5 },
                ScheduleEvent::Arrival {
                    task: "B".into(),
                    clock: 5
                },
                ScheduleEvent::Dispatch {
                    task: "B".into(),
                    start_time: 5,
                    end_time: 6
                },
            ]
        );
        assert_eq!(observer.dispatches().count(), 2);
    }

    #[test]
    fn test_empty_input() {
        let schedule = PriorityScheduler::new().schedule(&[]);
        assert!(schedule.is_empty());
    }

    #[test]
    fn test_deterministic() {
        let tasks: Vec<Task> = (0..20)
            .map(|i| task(&format!("T{i}"), (i % 3) as i32, 1 + (i % 4) as i64, (i / 5) as i64, i))
            .collect();
        let scheduler = PriorityScheduler::new();
        assert_eq!(scheduler.schedule(&tasks), scheduler.schedule(&tasks));
    }
}

//! Caller-supplied observation hook for the scheduler core.
//!
//! The scheduler reports arrivals, idle gaps, and dispatches to an
//! observer instead of writing to any global output. All methods default
//! to no-ops.

use crate::models::{ExecutionInterval, Task};

/// Receives scheduling events as the simulated clock advances.
pub trait ScheduleObserver {
    /// A task entered the ready set at `clock`.
    fn on_arrival(&mut self, _task: &Task, _clock: i64) {}

    /// The processor sat idle over `[from, to)`.
    fn on_idle(&mut self, _from: i64, _to: i64) {}

    /// A task was dispatched and will run to completion.
    fn on_dispatch(&mut self, _interval: &ExecutionInterval<'_>) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ScheduleObserver for NoopObserver {}

/// A recorded scheduling event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleEvent {
    Arrival { task: String, clock: i64 },
    Idle { from: i64, to: i64 },
    Dispatch {
        task: String,
        start_time: i64,
        end_time: i64,
    },
}

/// Observer that keeps every event in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    pub events: Vec<ScheduleEvent>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatch events only, in dispatch order.
    pub fn dispatches(&self) -> impl Iterator<Item = &ScheduleEvent> {
        self.events
            .iter()
            .filter(|e| matches!(e, ScheduleEvent::Dispatch { .. }))
    }
}

impl ScheduleObserver for RecordingObserver {
    fn on_arrival(&mut self, task: &Task, clock: i64) {
        self.events.push(ScheduleEvent::Arrival {
            task: task.name.clone(),
            clock,
        });
    }

    fn on_idle(&mut self, from: i64, to: i64) {
        self.events.push(ScheduleEvent::Idle { from, to });
    }

    fn on_dispatch(&mut self, interval: &ExecutionInterval<'_>) {
        self.events.push(ScheduleEvent::Dispatch {
            task: interval.task.name.clone(),
            start_time: interval.start_time,
            end_time: interval.end_time,
        });
    }
}

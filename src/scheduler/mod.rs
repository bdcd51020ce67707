//! Scheduler core and metrics.
//!
//! # Algorithm
//!
//! `PriorityScheduler` runs non-preemptive priority scheduling with arrival
//! gating over a single processor. Ties are broken by earlier arrival,
//! then by intake order, so output is fully deterministic.
//!
//! # Metrics
//!
//! `ScheduleMetrics` computes waiting time, turnaround time, their means,
//! and run-level figures (makespan, idle time, utilization, throughput).
//! `check_invariants` guards against defective schedules.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3

mod metrics;
mod observer;
mod priority;

pub use metrics::{check_invariants, ScheduleMetrics, TaskMetrics};
pub use observer::{NoopObserver, RecordingObserver, ScheduleEvent, ScheduleObserver};
pub use priority::PriorityScheduler;

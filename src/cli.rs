use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use prio_schedule::config::{PriorityOrder, ReportSort};

/// Non-preemptive priority scheduler.
///
/// Reads one task set, schedules it, and writes the result to stdout.
/// Logs go to stderr (filter with RUST_LOG).
#[derive(Parser, Debug)]
#[command(name = "prio-schedule", version, about)]
pub struct CliArgs {
    /// Task file to read, or `-` for stdin
    #[arg(long, short, default_value = "-")]
    pub input: String,

    /// Input format
    #[arg(long, short, value_enum, default_value_t = InputFormat::Json)]
    pub format: InputFormat,

    /// Output format
    #[arg(long, short, value_enum, default_value_t = OutputFormat::Json)]
    pub output: OutputFormat,

    /// Path to a TOML config file
    #[arg(long, env = "PRIO_SCHEDULE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Display order of the per-task result list (overrides config)
    #[arg(long, value_enum)]
    pub sort: Option<SortArg>,

    /// Treat higher priority numbers as more urgent (overrides config)
    #[arg(long)]
    pub higher_first: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// JSON array of task descriptors, or `{"tasks": [...]}`
    Json,
    /// Count line followed by `name priority burst_time [arrival_time]` lines
    Legacy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Full result as JSON
    Json,
    /// Human-readable text summary
    Summary,
    /// Validated task set re-encoded in the legacy text format
    Legacy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Execution,
    WaitingTime,
    Input,
}

impl From<SortArg> for ReportSort {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Execution => ReportSort::Execution,
            SortArg::WaitingTime => ReportSort::WaitingTime,
            SortArg::Input => ReportSort::Input,
        }
    }
}

impl CliArgs {
    /// Priority order override, if any.
    pub fn priority_order(&self) -> Option<PriorityOrder> {
        self.higher_first.then_some(PriorityOrder::HigherFirst)
    }
}

//! Engine configuration.
//!
//! Loaded from TOML. Every field has a default, so an empty file (or no
//! file) yields [`EngineConfig::default`].
//!
//! ```toml
//! priority_order = "lower_first"
//! max_tasks = 100
//! log_level = "info"
//!
//! [report]
//! sort = "waiting_time"
//! precision = 2
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Which end of the priority scale runs first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityOrder {
    /// Lower numeric value = higher scheduling priority (1 beats 3).
    #[default]
    LowerFirst,
    /// Higher numeric value = higher scheduling priority (3 beats 1).
    HigherFirst,
}

impl PriorityOrder {
    /// Maps a priority to a rank where lower rank is dispatched first.
    #[inline]
    pub fn rank(self, priority: i32) -> i64 {
        match self {
            Self::LowerFirst => i64::from(priority),
            Self::HigherFirst => -i64::from(priority),
        }
    }
}

/// Display order of the flat result list.
///
/// Never affects the timeline, which is always in execution order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportSort {
    /// Execution order.
    #[default]
    Execution,
    /// Ascending waiting time, execution order on ties.
    WaitingTime,
    /// Intake order.
    Input,
}

/// Result projection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Flat result list order.
    pub sort: ReportSort,
    /// Decimal places for averages in the text summary.
    pub precision: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            sort: ReportSort::Execution,
            precision: 2,
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Priority direction.
    pub priority_order: PriorityOrder,
    /// Upper bound on tasks per request. `None` = unbounded.
    pub max_tasks: Option<usize>,
    /// Result projection settings.
    pub report: ReportConfig,
    /// Default log filter for the binary when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            priority_order: PriorityOrder::LowerFirst,
            max_tasks: None,
            report: ReportConfig::default(),
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl EngineConfig {
    /// Parses configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Loads configuration from `path`, or defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            debug!("no config file given, using defaults");
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    /// Sets the priority direction.
    pub fn with_priority_order(mut self, order: PriorityOrder) -> Self {
        self.priority_order = order;
        self
    }

    /// Sets the task count limit.
    pub fn with_max_tasks(mut self, max_tasks: usize) -> Self {
        self.max_tasks = Some(max_tasks);
        self
    }

    /// Sets the flat result list order.
    pub fn with_report_sort(mut self, sort: ReportSort) -> Self {
        self.report.sort = sort;
        self
    }
}

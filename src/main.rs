mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::io::Read;
use tracing::debug;

use prio_schedule::config::EngineConfig;
use prio_schedule::legacy::{parse_legacy, to_legacy};
use prio_schedule::models::TaskDescriptor;
use prio_schedule::validation::intake_bounded;
use prio_schedule::Engine;

use crate::cli::{CliArgs, InputFormat, OutputFormat};

/// JSON input: a bare array, or an object with a `tasks` array.
#[derive(Deserialize)]
#[serde(untagged)]
enum JsonInput {
    Bare(Vec<TaskDescriptor>),
    Wrapped { tasks: Vec<TaskDescriptor> },
}

fn main() -> Result<()> {
    let args = CliArgs::parse();

    let mut config = EngineConfig::load(args.config.as_deref())
        .context("failed to load configuration")?;
    if let Some(sort) = args.sort {
        config.report.sort = sort.into();
    }
    if let Some(order) = args.priority_order() {
        config.priority_order = order;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    debug!(
        config_path = ?args.config,
        priority_order = ?config.priority_order,
        max_tasks = ?config.max_tasks,
        sort = ?config.report.sort,
        "effective configuration"
    );

    let text = read_input(&args.input)?;
    let descriptors = match args.format {
        InputFormat::Json => parse_json_tasks(&text)?,
        InputFormat::Legacy => parse_legacy(&text).context("invalid legacy task file")?,
    };
    debug!(count = descriptors.len(), "read task descriptors");

    match args.output {
        OutputFormat::Legacy => {
            let tasks = intake_bounded(&descriptors, config.max_tasks)?;
            print!("{}", to_legacy(&tasks)?);
        }
        OutputFormat::Json => {
            let report = Engine::new(config).run(&descriptors)?;
            println!("{}", report.to_json_pretty()?);
        }
        OutputFormat::Summary => {
            let precision = config.report.precision;
            let report = Engine::new(config).run(&descriptors)?;
            print!("{}", report.summary(precision));
        }
    }

    Ok(())
}

fn parse_json_tasks(text: &str) -> Result<Vec<TaskDescriptor>> {
    match serde_json::from_str::<JsonInput>(text).context("invalid JSON task list")? {
        JsonInput::Bare(tasks) | JsonInput::Wrapped { tasks } => Ok(tasks),
    }
}

fn read_input(input: &str) -> Result<String> {
    let mut text = String::new();
    if input == "-" {
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
    } else {
        text = std::fs::read_to_string(input)
            .with_context(|| format!("failed to read {input}"))?;
    }
    Ok(text)
}

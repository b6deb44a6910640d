//! tagmill binary entry point.

mod cli;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tagmill_cli::config::PipelineConfig;
use tagmill_cli::pipeline;

use crate::cli::{Cli, Command};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Cli::parse();
    let mut config = PipelineConfig::load(args.config.as_deref())?;

    match args.command {
        Command::Generate { overrides } => {
            config.apply(&overrides);
            pipeline::run_generate(&config)
        }
        Command::Feedback { overrides } => {
            config.apply(&overrides);
            pipeline::run_feedback(&config)
        }
        Command::Learn { overrides } => {
            config.apply(&overrides);
            pipeline::run_learn(&config)
        }
        Command::Run { overrides } => {
            config.apply(&overrides);
            let summary = pipeline::run_pipeline(&config)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
            Ok(())
        }
    }
}

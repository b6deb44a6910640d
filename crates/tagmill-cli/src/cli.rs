use std::path::PathBuf;

use clap::{Parser, Subcommand};

use tagmill_cli::config::Overrides;

#[derive(Parser)]
#[command(name = "tagmill")]
#[command(about = "Tag documents with TF-IDF keywords, simulate feedback, learn tag weights.")]
pub(crate) struct Cli {
    /// Path to a YAML config file overriding the built-in defaults.
    #[arg(long, global = true)]
    pub(crate) config: Option<PathBuf>,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Generate TF-IDF tags for every document and write tags.json.
    Generate {
        #[command(flatten)]
        overrides: Overrides,
    },
    /// Score generated tags with simulated feedback and write feedback.json.
    Feedback {
        #[command(flatten)]
        overrides: Overrides,
    },
    /// Learn tag weights from feedback and write tag_weights.json.
    Learn {
        #[command(flatten)]
        overrides: Overrides,
    },
    /// Run the full pipeline: generate, then feedback, then learn.
    Run {
        #[command(flatten)]
        overrides: Overrides,
    },
}

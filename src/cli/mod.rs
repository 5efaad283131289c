//! Command-line interface wiring for onco-assistant.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::warn;

use crate::config::Settings;

pub mod ask;
pub mod seed;
pub mod serve;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "Cancer treatment question-answering assistant", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Serve(args) => serve::run(args, settings).await,
            Commands::Ask(args) => ask::run(args, settings).await,
            Commands::Seed => seed::run(settings).await,
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Serve the JSON query API.
    Serve(serve::Args),
    /// Answer one query from the command line.
    Ask(ask::Args),
    /// Write built-in reference tables and a starter corpus.
    Seed,
}

/// Response strategy for the orchestrator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ResponseMode {
    /// Retrieval plus span extraction against the corpus.
    Extractive,
    /// Intent templates filled from the reference tables.
    Templated,
}

impl ResponseMode {
    /// Read the configured default, falling back to extractive.
    pub fn from_settings(settings: &Settings) -> Self {
        match settings.response_mode.to_lowercase().as_str() {
            "templated" => Self::Templated,
            "extractive" => Self::Extractive,
            other => {
                warn!(mode = other, "unknown response mode; using extractive");
                Self::Extractive
            }
        }
    }

    /// CLI override wins over configuration.
    pub fn resolve(cli: Option<Self>, settings: &Settings) -> Self {
        cli.unwrap_or_else(|| Self::from_settings(settings))
    }
}

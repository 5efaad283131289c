//! CLI entry-point for answering a single query.

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{cli::ResponseMode, config::Settings, qa};

/// Answer one question and print the JSON payload.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// The question to answer.
    pub query: String,
    /// Response strategy override.
    #[arg(long, value_enum)]
    pub mode: Option<ResponseMode>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let mode = ResponseMode::resolve(args.mode, &settings);
    let orchestrator = qa::build_orchestrator(&settings, mode)?;
    let outcome = orchestrator.answer_query(&args.query)?;
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

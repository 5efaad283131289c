//! CLI entry-point for serving the HTTP API.

use std::sync::Arc;

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{api, cli::ResponseMode, config::Settings, qa};

/// Run the Axum server.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Port to bind (default 8080).
    #[arg(long, default_value_t = 8080)]
    pub port: u16,
    /// Host address, defaults to localhost.
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,
    /// Response strategy override.
    #[arg(long, value_enum)]
    pub mode: Option<ResponseMode>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let mode = ResponseMode::resolve(args.mode, &settings);
    let orchestrator = Arc::new(qa::build_orchestrator(&settings, mode)?);
    let store = orchestrator.store();
    api::serve(orchestrator, store, args.host, args.port).await
}

//! Entry point wiring CLI dispatch to pipeline modules.

use anyhow::Result;
use onco_assistant::cli::Cli;
use onco_assistant::config::Settings;
use onco_assistant::logging;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_tracing()?;
    let settings = Settings::load()?;
    let cli = Cli::parse();

    info!(?cli, "starting command");
    cli.dispatch(settings).await
}

//! rtbf CLI entry point.

use anyhow::{Context, Result};
use clap::Parser;
use rtbf_client::cli::{Cli, Commands, OutputFormat};
use rtbf_client::commands::{Console, Session};
use rtbf_client::config::load_config;
use rtbf_client::gdpr::GdprService;
use rtbf_client::WarehouseClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "rtbf=debug,rtbf_client=debug"
    } else {
        "rtbf=warn,rtbf_client=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let console = Console::new(cli.format, cli.quiet);
    console.banner("SNOWFLAKE GDPR RIGHT TO BE FORGOTTEN DEMO");
    if cli.format == OutputFormat::Pretty && !cli.quiet {
        console.heading("Demonstrating GDPR Article 17 compliance using Snowflake Data Cloud");
        console.rule();
    }

    // The menu needs a terminal anyway; other commands honor --no-prompt.
    let interactive = !cli.no_prompt || matches!(cli.command, Commands::Interactive);
    let config = load_config(interactive).context("Failed to load Snowflake configuration")?;
    let client = WarehouseClient::new(config).context("Failed to create Snowflake client")?;

    if let Err(e) = client.connect().await {
        console.error("connect", "Failed to connect to Snowflake", &e);
        std::process::exit(1);
    }

    let session = Session::new(GdprService::new(client), console);
    let result = session.run(cli.command).await;
    session.service().executor().disconnect();

    result.context("Command failed")
}

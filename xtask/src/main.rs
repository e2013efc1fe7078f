//! See <https://github.com/matklad/cargo-xtask/>
//!
//! This binary defines various auxiliary commands, which are not
//! expressible with just `cargo`.
//!
//! The binary is integrated into the `cargo` command line by using an
//! alias in `.cargo/config.toml`.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod prelude;
mod setup;

/// Development tasks for the rtbf repository
#[derive(Debug, Parser)]
#[command(name = "xtask")]
#[command(about = "Development tasks for rtbf", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: Global,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Silence the command output
    #[clap(long, global = true)]
    pub silent: bool,

    /// Enable verbose output
    #[clap(long, global = true)]
    pub verbose: bool,
}

impl Global {
    pub fn is_silent(&self) -> bool {
        self.silent
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Install the GDPR demo schema, procedures, and data in Snowflake
    Setup(setup::SetupCommand),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_filter = if cli.global.is_verbose() {
        "xtask=debug,rtbf_client=debug"
    } else {
        "xtask=warn,rtbf_client=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Setup(setup_cmd) => {
            setup::run(setup_cmd, cli.global).await?;
        }
    }

    Ok(())
}

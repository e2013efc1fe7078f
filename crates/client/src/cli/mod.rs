//! CLI command definitions.

pub mod reason;

use clap::{Parser, Subcommand, ValueEnum};
use rtbf_core::gdpr::procedures::{DEFAULT_REQUEST_LIMIT, DEFAULT_VERIFY_HOURS_BACK};

pub use reason::ReasonArg;

/// Right-to-be-forgotten workflow against Snowflake.
#[derive(Debug, Parser)]
#[command(name = "rtbf")]
#[command(
    about = "GDPR right to be forgotten workflow on Snowflake",
    long_about = "Discovers, erases, and verifies deletion of customer personal data by \
calling the GDPR stored procedures installed in a Snowflake account.

Connection settings are read from SNOWFLAKE_* environment variables. Missing \
account, user, or token are prompted for unless --no-prompt is set."
)]
pub struct Cli {
    /// Output format.
    #[arg(long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress banners.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable debug logging on stderr.
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Fail instead of prompting for missing connection settings.
    #[arg(long, global = true, env = "RTBF_NO_PROMPT")]
    pub no_prompt: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One JSON document per result.
    Json,
    /// Human-readable output with colors.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Discover personal data for a customer.
    Discover {
        /// Customer email to discover data for.
        #[arg(long, short = 'e')]
        customer_email: String,
    },
    /// Submit a GDPR erasure request.
    RequestErasure {
        /// Customer email for the erasure request.
        #[arg(long, short = 'e')]
        customer_email: String,
        /// GDPR erasure reason.
        #[arg(long, short, value_enum, default_value_t = ReasonArg::WithdrawnConsent)]
        reason: ReasonArg,
    },
    /// Run the complete erasure scenario for a customer.
    FullDemo {
        /// Customer email for the scenario.
        #[arg(long, short = 'e')]
        customer_email: String,
    },
    /// Show the compliance dashboard and recent erasure requests.
    Dashboard {
        /// Number of recent requests to list.
        #[arg(long, default_value_t = DEFAULT_REQUEST_LIMIT)]
        limit: u32,
    },
    /// Verify data deletion for a customer.
    Verify {
        /// Customer email to verify deletion for.
        #[arg(long, short = 'e')]
        customer_email: String,
        /// How far back to look for deletions, in hours.
        #[arg(long, default_value_t = DEFAULT_VERIFY_HOURS_BACK)]
        hours_back: u32,
    },
    /// Menu-driven mode.
    Interactive,
    /// Process a submitted erasure request.
    Process {
        /// Request ID returned when the request was submitted.
        request_id: String,
    },
    /// Notify third-party processors of a customer's erasure.
    Coordinate {
        #[arg(long, short = 'e')]
        customer_email: String,
    },
    /// Show a customer's compliance status.
    Status {
        #[arg(long, short = 'e')]
        customer_email: String,
    },
    /// List recent erasure requests.
    Requests {
        /// Number of requests to list.
        #[arg(long, default_value_t = DEFAULT_REQUEST_LIMIT)]
        limit: u32,
    },
}

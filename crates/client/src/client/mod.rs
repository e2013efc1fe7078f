//! HTTP client for the Snowflake SQL API.

pub mod auth;
mod statements;
pub mod wire;

use std::time::Duration;

use rtbf_core::warehouse::{Result, WarehouseError};

use crate::config::WarehouseConfig;

const USER_AGENT: &str = concat!("rtbf/", env!("CARGO_PKG_VERSION"));
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the SQL API.
///
/// Each request is its own warehouse session; the configured
/// [`SessionContext`](rtbf_core::warehouse::SessionContext) is sent with
/// every statement.
#[derive(Debug, Clone)]
pub struct WarehouseClient {
    client: reqwest::Client,
    config: WarehouseConfig,
    base_url: String,
    poll_interval: Duration,
}

impl WarehouseClient {
    /// Create a new client for the given configuration.
    pub fn new(config: WarehouseConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| WarehouseError::Config(e.to_string()))?;
        let base_url = config.base_url();

        Ok(Self {
            client,
            config,
            base_url,
            poll_interval: DEFAULT_POLL_INTERVAL,
        })
    }

    /// Sets how long to wait between status requests for running statements.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn config(&self) -> &WarehouseConfig {
        &self.config
    }

    /// Build a URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Checks that the account is reachable and the credentials are accepted.
    pub async fn connect(&self) -> Result<String> {
        let version = self
            .execute_with_context(&self.config.context, "SELECT CURRENT_VERSION()", &[])
            .await?
            .first_scalar()
            .unwrap_or("unknown")
            .to_string();

        tracing::info!(
            account = %self.config.target_display(),
            %version,
            "Connected to Snowflake"
        );
        Ok(version)
    }

    /// Ends the session.
    ///
    /// The SQL API keeps no connection state between requests, so this only
    /// records the end of the run.
    pub fn disconnect(&self) {
        tracing::info!(account = %self.config.target_display(), "Disconnected from Snowflake");
    }
}

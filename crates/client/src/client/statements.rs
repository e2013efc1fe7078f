//! Statement submission, status polling, and partition retrieval.

use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{RequestBuilder, StatusCode};
use rtbf_core::warehouse::{
    statement_preview, Binding, ResultSet, Result, SessionContext, StatementExecutor,
    WarehouseError,
};
use uuid::Uuid;

use super::auth::authorization;
use super::wire::{StatementRequest, StatementResponse};
use super::WarehouseClient;

const STATEMENTS_PATH: &str = "/api/v2/statements";

/// State of a submitted statement.
enum Progress {
    Complete(StatementResponse),
    Running(String),
}

impl WarehouseClient {
    /// Runs a statement under an explicit session context.
    ///
    /// Statements that outlive the synchronous window are polled until they
    /// finish or the configured timeout elapses. Results spread over several
    /// partitions are fetched and concatenated.
    pub async fn execute_with_context(
        &self,
        context: &SessionContext,
        sql: &str,
        bindings: &[Binding],
    ) -> Result<ResultSet> {
        let started = Instant::now();
        let timeout = self.config.timeout;
        let request_id = Uuid::new_v4();
        let body = StatementRequest::new(sql, bindings, context, timeout.as_secs());

        tracing::debug!(
            %request_id,
            statement = %statement_preview(sql, 80),
            bindings = bindings.len(),
            "Submitting statement"
        );

        let response = self
            .authorized(self.client.post(self.url(STATEMENTS_PATH)))?
            .query(&[("requestId", request_id.to_string())])
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let mut progress = self.handle_response(response).await?;
        let response = loop {
            match progress {
                Progress::Complete(response) => break response,
                Progress::Running(handle) => {
                    if started.elapsed() >= timeout {
                        return Err(WarehouseError::Timeout {
                            seconds: timeout.as_secs(),
                        });
                    }
                    tracing::debug!(%handle, "Statement still running");
                    tokio::time::sleep(self.poll_interval).await;
                    progress = self.statement_status(&handle).await?;
                }
            }
        };

        let extra_partitions = match (&response.statement_handle, response.partition_count()) {
            (Some(handle), count) if count > 1 => {
                let mut partitions = Vec::with_capacity(count - 1);
                for partition in 1..count {
                    partitions.push(self.fetch_partition(handle, partition).await?);
                }
                partitions
            }
            _ => Vec::new(),
        };

        let result = response.into_result_set(extra_partitions);
        tracing::debug!(
            %request_id,
            rows = result.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Statement completed"
        );
        Ok(result)
    }

    async fn statement_status(&self, handle: &str) -> Result<Progress> {
        let response = self
            .authorized(self.client.get(self.handle_url(handle)))?
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        self.handle_response(response).await
    }

    async fn fetch_partition(
        &self,
        handle: &str,
        partition: usize,
    ) -> Result<Vec<Vec<Option<String>>>> {
        tracing::debug!(%handle, partition, "Fetching result partition");
        let response = self
            .authorized(self.client.get(self.handle_url(handle)))?
            .query(&[("partition", partition)])
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        // Partition bodies carry only `data`, which deserializes as a
        // statement response with no metadata.
        match self.handle_response(response).await? {
            Progress::Complete(body) => Ok(body.data),
            Progress::Running(_) => Err(WarehouseError::InvalidResponse(format!(
                "partition {} of {} is not ready",
                partition, handle
            ))),
        }
    }

    fn handle_url(&self, handle: &str) -> String {
        self.url(&format!("{}/{}", STATEMENTS_PATH, handle))
    }

    /// Adds the authorization headers for a request issued now.
    fn authorized(&self, builder: RequestBuilder) -> Result<RequestBuilder> {
        let auth = authorization(&self.config, Utc::now())?;
        Ok(builder
            .bearer_auth(auth.bearer)
            .header("X-Snowflake-Authorization-Token-Type", auth.token_type)
            .header(reqwest::header::ACCEPT, "application/json"))
    }

    fn transport_error(&self, error: reqwest::Error) -> WarehouseError {
        if error.is_timeout() {
            WarehouseError::Timeout {
                seconds: self.config.timeout.as_secs(),
            }
        } else {
            WarehouseError::Connection(error.to_string())
        }
    }

    /// Maps an SQL API response onto the statement's progress or an error.
    async fn handle_response(&self, response: reqwest::Response) -> Result<Progress> {
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| WarehouseError::Connection(e.to_string()))?;

        match status {
            StatusCode::OK => {
                let body: StatementResponse = serde_json::from_str(&text)
                    .map_err(|e| WarehouseError::InvalidResponse(e.to_string()))?;
                Ok(Progress::Complete(body))
            }
            StatusCode::ACCEPTED => {
                let body: StatementResponse = serde_json::from_str(&text)
                    .map_err(|e| WarehouseError::InvalidResponse(e.to_string()))?;
                body.statement_handle
                    .map(Progress::Running)
                    .ok_or_else(|| {
                        WarehouseError::InvalidResponse(
                            "running statement without a handle".to_string(),
                        )
                    })
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                let body: StatementResponse = serde_json::from_str(&text).unwrap_or_default();
                Err(WarehouseError::Authentication(
                    body.message.unwrap_or_else(|| status.to_string()),
                ))
            }
            StatusCode::REQUEST_TIMEOUT => Err(WarehouseError::Timeout {
                seconds: self.config.timeout.as_secs(),
            }),
            _ => {
                let body: StatementResponse = serde_json::from_str(&text).unwrap_or_default();
                Err(WarehouseError::Statement {
                    code: body.code.unwrap_or_else(|| status.as_u16().to_string()),
                    sql_state: body.sql_state,
                    message: body.message.unwrap_or(text),
                })
            }
        }
    }
}

#[async_trait]
impl StatementExecutor for WarehouseClient {
    async fn execute(&self, sql: &str, bindings: &[Binding]) -> Result<ResultSet> {
        self.execute_with_context(&self.config.context, sql, bindings)
            .await
    }

    async fn execute_in(
        &self,
        context: &SessionContext,
        sql: &str,
        bindings: &[Binding],
    ) -> Result<ResultSet> {
        self.execute_with_context(context, sql, bindings).await
    }
}

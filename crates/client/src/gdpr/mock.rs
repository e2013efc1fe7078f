//! Scripted in-memory executor for workflow tests.

use async_trait::async_trait;
use rtbf_core::warehouse::{Binding, Column, ResultSet, Result, StatementExecutor, WarehouseError};
use tokio::sync::Mutex;

/// A statement the executor received.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub sql: String,
    pub bindings: Vec<Binding>,
}

/// Answers statements by the first scripted fragment their SQL contains.
/// Unscripted statements return an empty result set.
#[derive(Default)]
pub struct ScriptedExecutor {
    responses: Vec<(String, Result<ResultSet>)>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, fragment: &str, columns: &[&str], rows: &[&[Option<&str>]]) -> Self {
        let columns = columns.iter().map(|name| Column::new(*name, "text")).collect();
        let data = rows
            .iter()
            .map(|row| row.iter().map(|cell| cell.map(str::to_string)).collect())
            .collect();
        self.responses
            .push((fragment.to_string(), Ok(ResultSet::from_raw(columns, data))));
        self
    }

    /// Scripts a single-cell result, the shape scalar procedures return.
    pub fn respond_scalar(self, fragment: &str, column: &str, value: &str) -> Self {
        self.respond(fragment, &[column], &[&[Some(value)]])
    }

    pub fn fail(mut self, fragment: &str, error: WarehouseError) -> Self {
        self.responses.push((fragment.to_string(), Err(error)));
        self
    }

    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl StatementExecutor for ScriptedExecutor {
    async fn execute(&self, sql: &str, bindings: &[Binding]) -> Result<ResultSet> {
        self.calls.lock().await.push(RecordedCall {
            sql: sql.to_string(),
            bindings: bindings.to_vec(),
        });

        self.responses
            .iter()
            .find(|(fragment, _)| sql.contains(fragment.as_str()))
            .map(|(_, response)| response.clone())
            .unwrap_or_else(|| Ok(ResultSet::default()))
    }
}

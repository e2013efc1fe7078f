use async_trait::async_trait;

use super::{Binding, ResultSet, Result, SessionContext};

/// Executes SQL statements against the warehouse.
///
/// The production implementation talks to the SQL API; tests use scripted
/// in-memory executors.
#[async_trait]
pub trait StatementExecutor: Send + Sync {
    /// Runs a single statement with positional `?` bindings.
    async fn execute(&self, sql: &str, bindings: &[Binding]) -> Result<ResultSet>;

    /// Runs a statement under an explicit session context instead of the
    /// executor's own.
    ///
    /// Executors that keep a server-side session ignore `context`.
    async fn execute_in(
        &self,
        context: &SessionContext,
        sql: &str,
        bindings: &[Binding],
    ) -> Result<ResultSet> {
        let _ = context;
        self.execute(sql, bindings).await
    }
}

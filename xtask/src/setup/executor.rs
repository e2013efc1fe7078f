//! Runs setup SQL files statement by statement.
//!
//! The SQL API is stateless, so the session context that `USE` and
//! `CREATE DATABASE` statements would change on a live connection is tracked
//! here and sent along with every statement.

use std::path::Path;

use rtbf_core::script::{is_executable, split_statements, track_session_context};
use rtbf_core::warehouse::{SessionContext, StatementExecutor};

use super::error::{Result, SetupError};
use crate::prelude::*;

/// Outcome of running one script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptReport {
    /// Statements found in the script, including skipped ones.
    pub total: usize,
    pub executed: usize,
    pub warnings: usize,
}

pub struct ScriptRunner<'a, E> {
    executor: &'a E,
    context: SessionContext,
    silent: bool,
}

impl<'a, E: StatementExecutor> ScriptRunner<'a, E> {
    pub fn new(executor: &'a E, context: SessionContext, silent: bool) -> Self {
        Self {
            executor,
            context,
            silent,
        }
    }

    /// The session context after the statements run so far.
    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    /// Reads and runs a setup file.
    ///
    /// # Errors
    ///
    /// Fails only when the file cannot be read. Statement failures are
    /// reported as warnings.
    pub async fn run_file(&mut self, path: &Path, description: &str) -> Result<ScriptReport> {
        if !self.silent {
            aprintln!("\n{}", p_c(&format!("Executing {}...", description)));
        }

        let sql = std::fs::read_to_string(path).map_err(|source| SetupError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let report = self.run_script(&sql).await;

        tracing::info!(
            file = %path.display(),
            executed = report.executed,
            warnings = report.warnings,
            "Setup file finished"
        );
        if !self.silent {
            aprintln!("{}", p_g(&format!("{} completed successfully", description)));
        }

        Ok(report)
    }

    /// Runs every executable statement in `sql`, continuing past failures.
    pub async fn run_script(&mut self, sql: &str) -> ScriptReport {
        let statements = split_statements(sql);
        let mut report = ScriptReport {
            total: statements.len(),
            ..Default::default()
        };

        for (i, statement) in statements.iter().enumerate() {
            let number = i + 1;
            if !is_executable(statement) {
                continue;
            }

            match self.executor.execute_in(&self.context, statement, &[]).await {
                Ok(_) => {
                    report.executed += 1;
                    if track_session_context(&mut self.context, statement) {
                        tracing::debug!(context = ?self.context, "Session context changed");
                    }
                    if !self.silent {
                        aprintln!("   ✓ Statement {}/{} executed", number, report.total);
                    }
                }
                Err(e) => {
                    report.warnings += 1;
                    tracing::warn!(statement = number, error = %e, "Setup statement failed");
                    if !self.silent {
                        aprintln!("   {}", p_y(&format!("Statement {} warning: {}", number, e)));
                    }
                }
            }
        }

        report
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use rtbf_core::warehouse::{Binding, ResultSet, WarehouseError};
    use std::sync::Mutex;

    /// Records each statement with the context it ran under.
    #[derive(Default)]
    pub(crate) struct RecordingExecutor {
        pub calls: Mutex<Vec<(SessionContext, String)>>,
        pub failing: Vec<&'static str>,
        pub results: Vec<(&'static str, ResultSet)>,
    }

    #[async_trait]
    impl StatementExecutor for RecordingExecutor {
        async fn execute(
            &self,
            sql: &str,
            bindings: &[Binding],
        ) -> rtbf_core::warehouse::Result<ResultSet> {
            self.execute_in(&SessionContext::default(), sql, bindings).await
        }

        async fn execute_in(
            &self,
            context: &SessionContext,
            sql: &str,
            _bindings: &[Binding],
        ) -> rtbf_core::warehouse::Result<ResultSet> {
            self.calls
                .lock()
                .unwrap()
                .push((context.clone(), sql.to_string()));
            if self.failing.iter().any(|fragment| sql.contains(fragment)) {
                return Err(WarehouseError::Statement {
                    code: "002002".to_string(),
                    sql_state: Some("42710".to_string()),
                    message: "Object already exists.".to_string(),
                });
            }
            Ok(self
                .results
                .iter()
                .find(|(fragment, _)| sql.contains(fragment))
                .map(|(_, result)| result.clone())
                .unwrap_or_default())
        }
    }

    const SCRIPT: &str = "-- Databases
CREATE DATABASE IF NOT EXISTS COMPLIANCE_DB;
CREATE SCHEMA IF NOT EXISTS REQUESTS;
CREATE TABLE ERASURE_REQUESTS (
    REQUEST_ID STRING
);
CREATE OR REPLACE PROCEDURE SP_NOOP()
RETURNS STRING
LANGUAGE SQL
AS
$$
BEGIN
    RETURN 'ok';
END;
$$;
";

    #[tokio::test]
    async fn test_runs_statements_under_tracked_context() {
        let executor = RecordingExecutor::default();
        let start = SessionContext {
            role: Some("SYSADMIN".to_string()),
            ..Default::default()
        };
        let mut runner = ScriptRunner::new(&executor, start, true);

        let report = runner.run_script(SCRIPT).await;

        assert_eq!(
            report,
            ScriptReport {
                total: 4,
                executed: 4,
                warnings: 0
            }
        );
        let calls = executor.calls.lock().unwrap();
        assert_eq!(calls[0].0.database, None);
        assert_eq!(calls[1].0.database.as_deref(), Some("COMPLIANCE_DB"));
        assert_eq!(calls[2].0.schema.as_deref(), Some("REQUESTS"));
        assert!(calls[3].1.starts_with("CREATE OR REPLACE PROCEDURE"));
        assert!(calls[3].1.ends_with("$$;"));
        assert_eq!(runner.context().role.as_deref(), Some("SYSADMIN"));
    }

    #[tokio::test]
    async fn test_failed_statement_is_a_warning() {
        let executor = RecordingExecutor {
            failing: vec!["CREATE SCHEMA"],
            ..Default::default()
        };
        let mut runner = ScriptRunner::new(&executor, SessionContext::default(), true);

        let report = runner.run_script(SCRIPT).await;

        assert_eq!(report.executed, 3);
        assert_eq!(report.warnings, 1);
        assert_eq!(executor.calls.lock().unwrap().len(), 4);
        // The failed CREATE SCHEMA did not switch the schema.
        assert_eq!(runner.context().schema.as_deref(), Some("PUBLIC"));
    }

    #[tokio::test]
    async fn test_block_comments_are_skipped() {
        let executor = RecordingExecutor::default();
        let mut runner = ScriptRunner::new(&executor, SessionContext::default(), true);

        let report = runner
            .run_script("/* header */ SELECT 1;\nSELECT 2;\n")
            .await;

        assert_eq!(report.total, 2);
        assert_eq!(report.executed, 1);
        assert_eq!(executor.calls.lock().unwrap()[0].1, "SELECT 2;");
    }

    #[tokio::test]
    async fn test_missing_file_fails() {
        let executor = RecordingExecutor::default();
        let mut runner = ScriptRunner::new(&executor, SessionContext::default(), true);

        let err = runner
            .run_file(Path::new("/nonexistent/setup/demo_data.sql"), "Demo Data")
            .await
            .unwrap_err();

        assert!(matches!(err, SetupError::ReadFile { .. }));
        assert!(executor.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_runs_file_from_disk() {
        let path = std::env::temp_dir().join(format!("rtbf-setup-{}.sql", std::process::id()));
        std::fs::write(&path, "USE WAREHOUSE GDPR_PROCESSING_WH;\nSELECT 1;\n").unwrap();

        let executor = RecordingExecutor::default();
        let mut runner = ScriptRunner::new(&executor, SessionContext::default(), true);
        let report = runner.run_file(&path, "Demo Data").await.unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(report.executed, 2);
        let calls = executor.calls.lock().unwrap();
        assert_eq!(
            calls[1].0.warehouse.as_deref(),
            Some("GDPR_PROCESSING_WH")
        );
    }
}

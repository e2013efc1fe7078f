use rtbf_core::gdpr::procedures::{
    REQUEST_CHANNEL, SP_COORDINATE_THIRD_PARTY_DELETION, SP_PROCESS_ERASURE_REQUEST,
    SP_SUBMIT_ERASURE_REQUEST, SP_VERIFY_DELETION,
};
use rtbf_core::gdpr::{parse_procedure_message, ErasureReason, ErasureSubmission, ProcedureOutcome};
use rtbf_core::warehouse::{call_statement, Binding, ResultSet, StatementExecutor};

use super::GdprService;
use crate::error::Result;

impl<E: StatementExecutor> GdprService<E> {
    /// Records a new erasure request submitted through the API channel.
    pub async fn submit_erasure_request(
        &self,
        email: &str,
        reason: ErasureReason,
    ) -> Result<ErasureSubmission> {
        let results = self
            .executor
            .execute(
                &call_statement(SP_SUBMIT_ERASURE_REQUEST, 3),
                &[
                    Binding::from(email),
                    Binding::from(reason.as_str()),
                    Binding::from(REQUEST_CHANNEL),
                ],
            )
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Erasure request submission failed"))?;

        let submission = ErasureSubmission::from_message(results.first_scalar());
        tracing::info!(
            success = submission.outcome.is_success(),
            request_id = submission.request_id.as_deref().unwrap_or("-"),
            "Erasure request submitted"
        );
        Ok(submission)
    }

    /// Runs the deletion for a previously submitted request.
    pub async fn process_erasure_request(&self, request_id: &str) -> Result<ProcedureOutcome> {
        let results = self
            .executor
            .execute(
                &call_statement(SP_PROCESS_ERASURE_REQUEST, 1),
                &[Binding::from(request_id)],
            )
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Erasure request processing failed"))?;

        Ok(parse_procedure_message(results.first_scalar()))
    }

    /// Returns one row per table checked, covering deletions in the last
    /// `hours_back` hours.
    pub async fn verify_deletion(&self, email: &str, hours_back: u32) -> Result<ResultSet> {
        self.executor
            .execute(
                &call_statement(SP_VERIFY_DELETION, 2),
                &[Binding::from(email), Binding::from(hours_back)],
            )
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Deletion verification failed"))
            .map_err(Into::into)
    }

    /// Notifies third-party processors holding the customer's data.
    pub async fn coordinate_third_party_deletion(&self, email: &str) -> Result<ProcedureOutcome> {
        let results = self
            .executor
            .execute(
                &call_statement(SP_COORDINATE_THIRD_PARTY_DELETION, 1),
                &[Binding::from(email)],
            )
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Third-party coordination failed"))?;

        Ok(parse_procedure_message(results.first_scalar()))
    }
}

#[cfg(test)]
mod tests {
    use super::super::mock::ScriptedExecutor;
    use super::*;
    use rtbf_core::warehouse::WarehouseError;

    #[tokio::test]
    async fn test_submit_binds_email_reason_and_channel() {
        let executor = ScriptedExecutor::new().respond_scalar(
            "SP_SUBMIT_ERASURE_REQUEST",
            "SP_SUBMIT_ERASURE_REQUEST",
            "SUCCESS: Erasure request created with ID: REQ-42",
        );
        let service = GdprService::new(executor);

        let submission = service
            .submit_erasure_request("jean.dupont@email.fr", ErasureReason::Objection)
            .await
            .unwrap();

        assert!(submission.outcome.is_success());
        assert_eq!(submission.request_id.as_deref(), Some("REQ-42"));
        let calls = service.executor().calls().await;
        assert_eq!(calls[0].sql, "CALL SP_SUBMIT_ERASURE_REQUEST(?, ?, ?)");
        assert_eq!(
            calls[0].bindings,
            vec![
                Binding::from("jean.dupont@email.fr"),
                Binding::from("OBJECTION"),
                Binding::from("API"),
            ]
        );
    }

    #[tokio::test]
    async fn test_submit_failure_has_no_request_id() {
        let executor = ScriptedExecutor::new().respond_scalar(
            "SP_SUBMIT_ERASURE_REQUEST",
            "RESULT",
            "ERROR: Customer not found",
        );
        let service = GdprService::new(executor);

        let submission = service
            .submit_erasure_request("nobody@email.de", ErasureReason::default())
            .await
            .unwrap();

        assert!(!submission.outcome.is_success());
        assert_eq!(submission.outcome.message(), "ERROR: Customer not found");
        assert_eq!(submission.request_id, None);
    }

    #[tokio::test]
    async fn test_process_without_result_is_unknown_failure() {
        let service = GdprService::new(ScriptedExecutor::new());

        let outcome = service.process_erasure_request("REQ-42").await.unwrap();

        assert!(!outcome.is_success());
        assert_eq!(outcome.message(), "Unknown result");
        let calls = service.executor().calls().await;
        assert_eq!(calls[0].sql, "CALL SP_PROCESS_ERASURE_REQUEST(?)");
        assert_eq!(calls[0].bindings, vec![Binding::from("REQ-42")]);
    }

    #[tokio::test]
    async fn test_verify_binds_hours_back_as_number() {
        let executor = ScriptedExecutor::new().respond(
            "SP_VERIFY_DELETION",
            &["TABLE_NAME", "DELETION_VERIFIED"],
            &[&[Some("CUSTOMERS"), Some("true")]],
        );
        let service = GdprService::new(executor);

        let results = service.verify_deletion("a@b.c", 48).await.unwrap();

        assert_eq!(results.len(), 1);
        let calls = service.executor().calls().await;
        assert_eq!(calls[0].bindings[1], Binding::Fixed(48));
    }

    #[tokio::test]
    async fn test_coordinate_reports_procedure_message() {
        let executor = ScriptedExecutor::new().respond_scalar(
            "SP_COORDINATE_THIRD_PARTY_DELETION",
            "RESULT",
            "SUCCESS: 3 third-party processors notified",
        );
        let service = GdprService::new(executor);

        let outcome = service.coordinate_third_party_deletion("a@b.c").await.unwrap();

        assert_eq!(
            outcome,
            ProcedureOutcome::Success {
                message: "SUCCESS: 3 third-party processors notified".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_statement_errors_propagate() {
        let executor = ScriptedExecutor::new().fail(
            "SP_PROCESS_ERASURE_REQUEST",
            WarehouseError::Statement {
                code: "100132".to_string(),
                sql_state: Some("P0000".to_string()),
                message: "JavaScript execution error".to_string(),
            },
        );
        let service = GdprService::new(executor);

        let err = service.process_erasure_request("REQ-1").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Statement failed (100132): JavaScript execution error"
        );
    }
}

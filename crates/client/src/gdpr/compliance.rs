use rtbf_core::gdpr::procedures::{
    ERASURE_REQUESTS_TABLE, FN_CHECK_GDPR_COMPLIANCE_STATUS, VW_GDPR_COMPLIANCE_DASHBOARD,
};
use rtbf_core::gdpr::{ComplianceDashboard, CustomerComplianceStatus};
use rtbf_core::warehouse::{Binding, ResultSet, StatementExecutor};

use super::GdprService;
use crate::error::Result;

impl<E: StatementExecutor> GdprService<E> {
    /// Returns the customer's compliance status, or `None` when the function
    /// returned nothing.
    pub async fn customer_compliance_status(
        &self,
        email: &str,
    ) -> Result<Option<CustomerComplianceStatus>> {
        let sql = format!(
            "SELECT {}(?) AS COMPLIANCE_STATUS",
            FN_CHECK_GDPR_COMPLIANCE_STATUS
        );
        let results = self
            .executor
            .execute(&sql, &[Binding::from(email)])
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to check compliance status"))?;

        let Some(payload) = results.first_row().and_then(|row| row.get("COMPLIANCE_STATUS"))
        else {
            return Ok(None);
        };
        let status = CustomerComplianceStatus::from_json(payload)
            .inspect_err(|e| tracing::error!(error = %e, "Failed to check compliance status"))?;
        Ok(Some(status))
    }

    /// Reads the aggregate metrics, or `None` when the view is empty.
    pub async fn compliance_dashboard(&self) -> Result<Option<ComplianceDashboard>> {
        let sql = format!("SELECT * FROM {}", VW_GDPR_COMPLIANCE_DASHBOARD);
        let results = self
            .executor
            .execute(&sql, &[])
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to load compliance dashboard"))?;

        Ok(results.first_row().map(ComplianceDashboard::from_row))
    }

    /// Lists the most recent erasure requests, newest first.
    pub async fn recent_erasure_requests(&self, limit: u32) -> Result<ResultSet> {
        let sql = format!(
            "SELECT request_id, customer_email, status, erasure_reason,
       requested_at, estimated_completion_date,
       DATEDIFF('day', requested_at, CURRENT_TIMESTAMP()) AS days_since_request
FROM {}
ORDER BY requested_at DESC
LIMIT ?",
            ERASURE_REQUESTS_TABLE
        );
        self.executor
            .execute(&sql, &[Binding::from(limit)])
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to get erasure requests"))
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::super::mock::ScriptedExecutor;
    use super::*;
    use crate::error::ClientError;

    #[tokio::test]
    async fn test_customer_status_parses_json() {
        let executor = ScriptedExecutor::new().respond_scalar(
            "FN_CHECK_GDPR_COMPLIANCE_STATUS",
            "COMPLIANCE_STATUS",
            r#"{"has_active_request": true, "deletion_completed": false,
                "last_request_date": "2024-03-01", "consent_status": {"marketing": false}}"#,
        );
        let service = GdprService::new(executor);

        let status = service
            .customer_compliance_status("maria.garcia@email.es")
            .await
            .unwrap()
            .unwrap();

        assert!(status.has_active_request);
        assert!(!status.deletion_completed);
        assert_eq!(status.last_request_date.as_deref(), Some("2024-03-01"));
        assert_eq!(status.consent("marketing").as_deref(), Some("false"));

        let calls = service.executor().calls().await;
        assert_eq!(
            calls[0].sql,
            "SELECT FN_CHECK_GDPR_COMPLIANCE_STATUS(?) AS COMPLIANCE_STATUS"
        );
    }

    #[tokio::test]
    async fn test_customer_status_empty_is_none() {
        let service = GdprService::new(ScriptedExecutor::new());
        assert_eq!(service.customer_compliance_status("a@b.c").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_customer_status_invalid_json_is_error() {
        let executor = ScriptedExecutor::new().respond_scalar(
            "FN_CHECK_GDPR_COMPLIANCE_STATUS",
            "COMPLIANCE_STATUS",
            "not json",
        );
        let service = GdprService::new(executor);

        let err = service.customer_compliance_status("a@b.c").await.unwrap_err();
        assert!(matches!(err, ClientError::Compliance(_)));
    }

    #[tokio::test]
    async fn test_dashboard_reads_first_row() {
        let executor = ScriptedExecutor::new().respond(
            "VW_GDPR_COMPLIANCE_DASHBOARD",
            &[
                "PENDING_REQUESTS",
                "COMPLETED_REQUESTS",
                "AVG_PROCESSING_DAYS",
                "OVERALL_COMPLIANCE_STATUS",
            ],
            &[&[Some("2"), Some("7"), Some("1.25"), Some("COMPLIANT")]],
        );
        let service = GdprService::new(executor);

        let dashboard = service.compliance_dashboard().await.unwrap().unwrap();

        assert_eq!(dashboard.pending_requests, 2);
        assert_eq!(dashboard.completed_requests, 7);
        assert_eq!(dashboard.in_progress_requests, 0);
        assert!(dashboard.is_compliant());
    }

    #[tokio::test]
    async fn test_dashboard_empty_view_is_none() {
        let service = GdprService::new(ScriptedExecutor::new());
        assert_eq!(service.compliance_dashboard().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_recent_requests_binds_limit() {
        let service = GdprService::new(ScriptedExecutor::new());

        service.recent_erasure_requests(5).await.unwrap();

        let calls = service.executor().calls().await;
        assert!(calls[0].sql.contains("FROM ERASURE_REQUESTS"));
        assert!(calls[0].sql.ends_with("LIMIT ?"));
        assert_eq!(calls[0].bindings, vec![Binding::Fixed(5)]);
    }
}

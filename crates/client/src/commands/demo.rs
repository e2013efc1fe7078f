//! The full erasure scenario.

use rtbf_core::gdpr::procedures::DEFAULT_VERIFY_HOURS_BACK;
use rtbf_core::gdpr::ErasureReason;
use rtbf_core::warehouse::StatementExecutor;
use serde::Serialize;

use super::Session;

/// How the scenario ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DemoOutcome {
    Completed,
    /// Stopped at the given step because later steps depend on it.
    Aborted { step: u8 },
}

impl<E: StatementExecutor> Session<E> {
    /// Runs the eight-step scenario for one customer: status, discovery,
    /// request, processing, third-party coordination, verification, final
    /// status, dashboard.
    ///
    /// Stops early when no data is found, the request is not accepted, or
    /// processing fails.
    pub async fn full_demo(&self, email: &str) -> DemoOutcome {
        let console = self.console();
        console.banner("GDPR RIGHT TO BE FORGOTTEN - FULL DEMO SCENARIO");
        console.heading(&format!("Customer: {}", email));
        console.rule();

        let outcome = self.scenario(email).await;
        tracing::info!(customer_email = %email, ?outcome, "Full demo finished");

        match outcome {
            DemoOutcome::Completed => {
                console.completion_banner("GDPR ERASURE SCENARIO COMPLETED SUCCESSFULLY!")
            }
            DemoOutcome::Aborted { .. } => {}
        }
        console.document(&serde_json::json!({ "scenario": "full_demo", "result": outcome }));
        outcome
    }

    async fn scenario(&self, email: &str) -> DemoOutcome {
        let console = self.console();

        console.step("Step 1: Initial Compliance Status");
        self.status(email).await;

        console.step("Step 2: Data Discovery");
        if !self.discover(email).await.is_some_and(|results| !results.is_empty()) {
            console.failure("No data found for customer. Demo cannot continue.");
            return DemoOutcome::Aborted { step: 2 };
        }

        console.step("Step 3: Submit Erasure Request");
        let Some(request_id) = self
            .request_erasure(email, ErasureReason::WithdrawnConsent)
            .await
        else {
            console.failure("Failed to submit erasure request. Demo cannot continue.");
            return DemoOutcome::Aborted { step: 3 };
        };

        console.step("Step 4: Process Erasure Request");
        if !self.process(&request_id).await {
            console.failure("Failed to process erasure request.");
            return DemoOutcome::Aborted { step: 4 };
        }

        console.step("Step 5: Third-Party Coordination");
        self.coordinate(email).await;

        console.step("Step 6: Verify Deletion");
        self.verify(email, DEFAULT_VERIFY_HOURS_BACK).await;

        console.step("Step 7: Final Compliance Status");
        self.status(email).await;

        console.step("Step 8: Updated Compliance Dashboard");
        self.dashboard().await;

        DemoOutcome::Completed
    }
}

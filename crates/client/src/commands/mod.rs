//! Command handlers.
//!
//! Handlers print their result and never fail: warehouse errors are logged,
//! reported on the console, and turned into an empty return value so the
//! full demo and the interactive menu can decide whether to continue.

mod console;
pub mod demo;
pub mod interactive;

use rtbf_core::gdpr::{
    summarize_discovery, verification_report, ComplianceDashboard, CustomerComplianceStatus,
    ErasureReason, VerificationReport,
};
use rtbf_core::warehouse::{ResultSet, StatementExecutor};
use serde_json::json;

use crate::cli::Commands;
use crate::error::Result;
use crate::gdpr::GdprService;
use crate::output::pretty;
use crate::output::style::{p_g, p_r, p_y};
use crate::output::table::format_grid;

pub use console::Console;
pub use demo::DemoOutcome;
pub use interactive::{DialoguerPrompter, MenuChoice, Prompter};

/// A connected workflow plus the console it reports to.
pub struct Session<E> {
    service: GdprService<E>,
    console: Console,
}

impl<E: StatementExecutor> Session<E> {
    pub fn new(service: GdprService<E>, console: Console) -> Self {
        Self { service, console }
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    pub fn service(&self) -> &GdprService<E> {
        &self.service
    }

    /// Runs a single CLI command.
    pub async fn run(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Discover { customer_email } => {
                self.discover(&customer_email).await;
            }
            Commands::RequestErasure {
                customer_email,
                reason,
            } => {
                self.request_erasure(&customer_email, reason.into()).await;
            }
            Commands::FullDemo { customer_email } => {
                self.full_demo(&customer_email).await;
            }
            Commands::Dashboard { limit } => {
                self.dashboard().await;
                self.requests(limit).await;
            }
            Commands::Verify {
                customer_email,
                hours_back,
            } => {
                self.verify(&customer_email, hours_back).await;
            }
            Commands::Interactive => {
                interactive::run(self, &DialoguerPrompter).await?;
            }
            Commands::Process { request_id } => {
                self.process(&request_id).await;
            }
            Commands::Coordinate { customer_email } => {
                self.coordinate(&customer_email).await;
            }
            Commands::Status { customer_email } => {
                self.status(&customer_email).await;
            }
            Commands::Requests { limit } => {
                self.requests(limit).await;
            }
        }
        Ok(())
    }

    /// Prints the discovery table and summary. Returns `None` if the call
    /// failed.
    pub async fn discover(&self, email: &str) -> Option<ResultSet> {
        self.console
            .heading(&format!("Discovering personal data for: {}", email));

        let results = match self.service.discover_customer_data(email).await {
            Ok(results) => results,
            Err(e) => {
                self.console.error("discover", "Data discovery failed", &e);
                return None;
            }
        };

        let summary = summarize_discovery(&results);
        let document = json!({
            "customer_email": email,
            "records": &results,
            "summary": &summary,
        });
        if results.is_empty() {
            self.console.emit(&document, || {
                p_r(&format!("No personal data found for {}", email))
            });
        } else {
            self.console.emit(&document, || {
                format!(
                    "\n{}\n{}\n\n{}",
                    p_g("Data Discovery Results:"),
                    format_grid(&results),
                    pretty::format_discovery_summary(&summary)
                )
            });
        }
        Some(results)
    }

    /// Submits an erasure request and returns its ID on success.
    pub async fn request_erasure(&self, email: &str, reason: ErasureReason) -> Option<String> {
        self.console
            .heading(&format!("Submitting erasure request for: {}", email));
        self.console.line(&format!("   Reason: {}", reason));

        let submission = match self.service.submit_erasure_request(email, reason).await {
            Ok(submission) => submission,
            Err(e) => {
                self.console
                    .error("request-erasure", "Erasure request submission failed", &e);
                return None;
            }
        };

        let document = json!({
            "customer_email": email,
            "reason": reason.as_str(),
            "submission": &submission,
        });
        self.console.emit(&document, || {
            if submission.outcome.is_success() {
                format!(
                    "{}\n   Request ID: {}",
                    p_g("Erasure request submitted successfully"),
                    submission.request_id.as_deref().unwrap_or("Unknown")
                )
            } else {
                p_r(&format!(
                    "Failed to submit erasure request: {}",
                    submission.outcome.message()
                ))
            }
        });

        if submission.outcome.is_success() {
            submission.request_id
        } else {
            None
        }
    }

    /// Processes a submitted request. Returns true on success.
    pub async fn process(&self, request_id: &str) -> bool {
        self.console
            .heading(&format!("Processing erasure request: {}", request_id));

        let outcome = match self.service.process_erasure_request(request_id).await {
            Ok(outcome) => outcome,
            Err(e) => {
                self.console
                    .error("process", "Erasure request processing failed", &e);
                return false;
            }
        };

        let document = json!({ "request_id": request_id, "result": &outcome });
        self.console.emit(&document, || {
            if outcome.is_success() {
                p_g("Erasure request processed successfully")
            } else {
                p_r(&format!(
                    "Failed to process erasure request: {}",
                    outcome.message()
                ))
            }
        });
        outcome.is_success()
    }

    /// Prints the verification table and verdict.
    pub async fn verify(&self, email: &str, hours_back: u32) -> Option<VerificationReport> {
        self.console
            .heading(&format!("Verifying deletion for: {}", email));

        let results = match self.service.verify_deletion(email, hours_back).await {
            Ok(results) => results,
            Err(e) => {
                self.console
                    .error("verify", "Deletion verification failed", &e);
                return None;
            }
        };

        if results.is_empty() {
            self.console.emit(
                &json!({ "customer_email": email, "hours_back": hours_back, "results": &results }),
                || p_y("No verification data available"),
            );
            return None;
        }

        let report = verification_report(&results);
        let document = json!({
            "customer_email": email,
            "hours_back": hours_back,
            "results": &results,
            "report": &report,
        });
        self.console.emit(&document, || {
            format!(
                "\n{}\n{}\n\n{}",
                p_g("Deletion Verification Results:"),
                format_grid(&results),
                pretty::format_verification(&report)
            )
        });
        Some(report)
    }

    /// Notifies third-party processors. Returns true on success.
    pub async fn coordinate(&self, email: &str) -> bool {
        self.console
            .heading(&format!("Coordinating third-party deletion for: {}", email));

        let outcome = match self.service.coordinate_third_party_deletion(email).await {
            Ok(outcome) => outcome,
            Err(e) => {
                self.console
                    .error("coordinate", "Third-party coordination failed", &e);
                return false;
            }
        };

        let document = json!({ "customer_email": email, "result": &outcome });
        self.console.emit(&document, || {
            if outcome.is_success() {
                format!(
                    "{}\n   {}",
                    p_g("Third-party coordination initiated"),
                    outcome.message()
                )
            } else {
                p_r(&format!(
                    "Third-party coordination failed: {}",
                    outcome.message()
                ))
            }
        });
        outcome.is_success()
    }

    /// Prints a customer's compliance status.
    pub async fn status(&self, email: &str) -> Option<CustomerComplianceStatus> {
        let status = match self.service.customer_compliance_status(email).await {
            Ok(status) => status,
            Err(e) => {
                self.console
                    .error("status", "Failed to check compliance status", &e);
                return None;
            }
        };

        let document = json!({ "customer_email": email, "status": &status });
        self.console.emit(&document, || match &status {
            Some(status) => format!("\n{}", pretty::format_customer_status(email, status)),
            None => p_y(&format!(
                "No compliance data found for {}",
                email
            )),
        });
        status
    }

    /// Prints the aggregate compliance metrics.
    pub async fn dashboard(&self) -> Option<ComplianceDashboard> {
        self.console.heading("Loading GDPR Compliance Dashboard");

        let dashboard = match self.service.compliance_dashboard().await {
            Ok(dashboard) => dashboard,
            Err(e) => {
                self.console
                    .error("dashboard", "Failed to load compliance dashboard", &e);
                return None;
            }
        };

        let document = json!({ "dashboard": &dashboard });
        self.console.emit(&document, || match &dashboard {
            Some(dashboard) => format!("\n{}", pretty::format_dashboard(dashboard)),
            None => p_y("No compliance data available"),
        });
        dashboard
    }

    /// Prints the most recent erasure requests.
    pub async fn requests(&self, limit: u32) -> Option<ResultSet> {
        let results = match self.service.recent_erasure_requests(limit).await {
            Ok(results) => results,
            Err(e) => {
                self.console
                    .error("requests", "Failed to get erasure requests", &e);
                return None;
            }
        };

        let document = json!({ "requests": &results });
        self.console.emit(&document, || {
            if results.is_empty() {
                p_y("No erasure requests found")
            } else {
                format!(
                    "\n{}\n{}",
                    p_g("Recent Erasure Requests:"),
                    format_grid(&results)
                )
            }
        });
        Some(results)
    }
}

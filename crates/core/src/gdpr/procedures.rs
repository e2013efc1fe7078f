//! Names of the warehouse objects the workflow calls, and parsing of the
//! status messages scalar procedures return.

use serde::Serialize;

pub const SP_DISCOVER_CUSTOMER_DATA: &str = "SP_DISCOVER_CUSTOMER_DATA";
pub const SP_SUBMIT_ERASURE_REQUEST: &str = "SP_SUBMIT_ERASURE_REQUEST";
pub const SP_PROCESS_ERASURE_REQUEST: &str = "SP_PROCESS_ERASURE_REQUEST";
pub const SP_VERIFY_DELETION: &str = "SP_VERIFY_DELETION";
pub const SP_COORDINATE_THIRD_PARTY_DELETION: &str = "SP_COORDINATE_THIRD_PARTY_DELETION";
pub const FN_CHECK_GDPR_COMPLIANCE_STATUS: &str = "FN_CHECK_GDPR_COMPLIANCE_STATUS";
pub const VW_GDPR_COMPLIANCE_DASHBOARD: &str = "VW_GDPR_COMPLIANCE_DASHBOARD";
pub const ERASURE_REQUESTS_TABLE: &str = "ERASURE_REQUESTS";

/// Channel recorded on requests submitted by this client.
pub const REQUEST_CHANNEL: &str = "API";

/// Default look-back window for deletion verification.
pub const DEFAULT_VERIFY_HOURS_BACK: u32 = 24;

/// Default number of requests shown by the request listing.
pub const DEFAULT_REQUEST_LIMIT: u32 = 10;

const UNKNOWN_RESULT: &str = "Unknown result";
const SUCCESS_MARKER: &str = "SUCCESS";
const REQUEST_ID_MARKER: &str = "ID: ";

/// Outcome of a scalar procedure call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ProcedureOutcome {
    Success { message: String },
    Failure { message: String },
}

impl ProcedureOutcome {
    /// Returns true for a successful outcome.
    pub fn is_success(&self) -> bool {
        matches!(self, ProcedureOutcome::Success { .. })
    }

    /// Returns the message the procedure produced.
    pub fn message(&self) -> &str {
        match self {
            ProcedureOutcome::Success { message } | ProcedureOutcome::Failure { message } => {
                message
            }
        }
    }
}

/// Classifies a procedure's return message.
///
/// A missing result reads as "Unknown result". Any message containing
/// `SUCCESS` is a success.
pub fn parse_procedure_message(result: Option<&str>) -> ProcedureOutcome {
    let message = result.unwrap_or(UNKNOWN_RESULT).to_string();
    if message.contains(SUCCESS_MARKER) {
        ProcedureOutcome::Success { message }
    } else {
        ProcedureOutcome::Failure { message }
    }
}

/// Extracts the request ID from a message such as
/// `"SUCCESS: Erasure request created with ID: REQ-123"`.
///
/// The text after the last `"ID: "` marker is the ID.
pub fn extract_request_id(message: &str) -> Option<String> {
    message
        .rsplit_once(REQUEST_ID_MARKER)
        .map(|(_, id)| id.trim().to_string())
        .filter(|id| !id.is_empty())
}

/// Result of submitting an erasure request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErasureSubmission {
    #[serde(flatten)]
    pub outcome: ProcedureOutcome,
    pub request_id: Option<String>,
}

impl ErasureSubmission {
    /// Builds a submission from the submit procedure's return message.
    ///
    /// A request ID is only extracted from successful messages.
    pub fn from_message(result: Option<&str>) -> Self {
        let outcome = parse_procedure_message(result);
        let request_id = if outcome.is_success() {
            extract_request_id(outcome.message())
        } else {
            None
        };
        Self {
            outcome,
            request_id,
        }
    }
}

mod compliance;
mod discovery;
mod error;
pub mod procedures;
mod reason;
mod verification;

pub use compliance::{ComplianceDashboard, CustomerComplianceStatus, COMPLIANT};
pub use discovery::{summarize_discovery, DiscoverySummary};
pub use error::ComplianceError;
pub use procedures::{
    extract_request_id, parse_procedure_message, ErasureSubmission, ProcedureOutcome,
};
pub use reason::{parse_reason_input, ErasureReason};
pub use verification::{verification_report, VerificationReport};

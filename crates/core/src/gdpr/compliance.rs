use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::ComplianceError;
use crate::serde::{deserialize_lenient_bool, deserialize_optional_scalar};
use crate::warehouse::Row;

/// Status value the dashboard view reports when every request is on time.
pub const COMPLIANT: &str = "COMPLIANT";

/// Aggregate compliance metrics from the dashboard view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplianceDashboard {
    pub pending_requests: i64,
    pub in_progress_requests: i64,
    pub completed_requests: i64,
    /// Requests open for more than 30 days.
    pub overdue_requests: i64,
    pub avg_processing_days: f64,
    pub overall_compliance_status: String,
}

impl ComplianceDashboard {
    /// Reads the dashboard from the view's single row.
    ///
    /// Missing counters read as zero and a missing status as `UNKNOWN`.
    pub fn from_row(row: &Row) -> Self {
        Self {
            pending_requests: row.get_i64("PENDING_REQUESTS").unwrap_or(0),
            in_progress_requests: row.get_i64("IN_PROGRESS_REQUESTS").unwrap_or(0),
            completed_requests: row.get_i64("COMPLETED_REQUESTS").unwrap_or(0),
            overdue_requests: row.get_i64("OVERDUE_REQUESTS").unwrap_or(0),
            avg_processing_days: row.get_f64("AVG_PROCESSING_DAYS").unwrap_or(0.0),
            overall_compliance_status: row
                .get("OVERALL_COMPLIANCE_STATUS")
                .unwrap_or("UNKNOWN")
                .to_string(),
        }
    }

    /// Returns true when the overall status is `COMPLIANT`.
    pub fn is_compliant(&self) -> bool {
        self.overall_compliance_status == COMPLIANT
    }
}

/// Per-customer status returned by the compliance status function.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerComplianceStatus {
    #[serde(default, deserialize_with = "deserialize_lenient_bool")]
    pub has_active_request: bool,
    #[serde(default, deserialize_with = "deserialize_lenient_bool")]
    pub deletion_completed: bool,
    #[serde(default, deserialize_with = "deserialize_optional_scalar")]
    pub last_request_date: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_scalar")]
    pub data_retention_until: Option<String>,
    #[serde(default)]
    pub consent_status: Option<BTreeMap<String, Value>>,
}

impl CustomerComplianceStatus {
    /// Parses the JSON document produced by the status function.
    pub fn from_json(payload: &str) -> Result<Self, ComplianceError> {
        serde_json::from_str(payload).map_err(|e| ComplianceError::InvalidStatusJson(e.to_string()))
    }

    /// Returns a consent flag rendered for display, e.g. `marketing`.
    pub fn consent(&self, purpose: &str) -> Option<String> {
        self.consent_status
            .as_ref()?
            .get(purpose)
            .map(|value| match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
    }

    /// Returns true when a non-empty consent object was returned.
    pub fn has_consent_status(&self) -> bool {
        self.consent_status
            .as_ref()
            .is_some_and(|consents| !consents.is_empty())
    }
}

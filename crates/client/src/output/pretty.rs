//! Pretty output formatting.

use rtbf_core::gdpr::{
    ComplianceDashboard, CustomerComplianceStatus, DiscoverySummary, VerificationReport,
};

use super::style::{p_g, p_r, p_y};

/// Format the discovery totals.
pub fn format_discovery_summary(summary: &DiscoverySummary) -> String {
    format!(
        "{}\n  • Total records found: {}\n  • Systems affected: {}\n  • High sensitivity items: {}",
        p_y("Discovery Summary:"),
        summary.total_records,
        summary.systems_affected,
        summary.high_sensitivity
    )
}

/// Format the verification verdict.
pub fn format_verification(report: &VerificationReport) -> String {
    if report.all_verified {
        p_g("All data successfully deleted and verified")
    } else {
        p_r(&format!(
            "Verification failed for tables: [{}]",
            report
                .failed_tables
                .iter()
                .map(|table| format!("'{}'", table))
                .collect::<Vec<_>>()
                .join(", ")
        ))
    }
}

/// Format the compliance dashboard metrics.
pub fn format_dashboard(dashboard: &ComplianceDashboard) -> String {
    let status = if dashboard.is_compliant() {
        p_g(&dashboard.overall_compliance_status)
    } else {
        p_r(&dashboard.overall_compliance_status)
    };
    format!(
        "{}\n  • Pending Requests: {}\n  • In Progress: {}\n  • Completed: {}\n  \
         • Overdue (>30 days): {}\n  • Average Processing Time: {:.1} days\n  \
         • Overall Status: {}",
        p_g("GDPR Compliance Status:"),
        dashboard.pending_requests,
        dashboard.in_progress_requests,
        dashboard.completed_requests,
        dashboard.overdue_requests,
        dashboard.avg_processing_days,
        status
    )
}

/// Format a customer's compliance status.
pub fn format_customer_status(email: &str, status: &CustomerComplianceStatus) -> String {
    let mut output = format!(
        "{}\n  • Has Active Request: {}\n  • Deletion Completed: {}\n  \
         • Last Request Date: {}\n  • Data Retention Until: {}",
        p_g(&format!("GDPR Compliance Status for {}:", email)),
        status.has_active_request,
        status.deletion_completed,
        status.last_request_date.as_deref().unwrap_or("None"),
        status.data_retention_until.as_deref().unwrap_or("Not set"),
    );
    if status.has_consent_status() {
        output.push_str(&format!(
            "\n  • Marketing Consent: {}\n  • Analytics Consent: {}",
            status.consent("marketing").as_deref().unwrap_or("Unknown"),
            status.consent("analytics").as_deref().unwrap_or("Unknown"),
        ));
    }
    output
}

use thiserror::Error;

/// Errors that can occur when interpreting compliance data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ComplianceError {
    #[error("Invalid compliance status payload: {0}")]
    InvalidStatusJson(String),
    #[error("Unknown erasure reason: {0}")]
    UnknownReason(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compliance_error_display() {
        assert_eq!(
            ComplianceError::UnknownReason("BORED".to_string()).to_string(),
            "Unknown erasure reason: BORED"
        );
        assert_eq!(
            ComplianceError::InvalidStatusJson("expected value".to_string()).to_string(),
            "Invalid compliance status payload: expected value"
        );
    }
}

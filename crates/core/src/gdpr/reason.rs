use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ComplianceError;

/// Legal ground for an erasure request (GDPR Article 17(1)).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErasureReason {
    #[default]
    WithdrawnConsent,
    NoLongerNecessary,
    UnlawfulProcessing,
    Objection,
}

impl ErasureReason {
    /// All reasons, in menu order.
    pub const ALL: [ErasureReason; 4] = [
        ErasureReason::WithdrawnConsent,
        ErasureReason::NoLongerNecessary,
        ErasureReason::UnlawfulProcessing,
        ErasureReason::Objection,
    ];

    /// Returns the value the submission procedure expects.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErasureReason::WithdrawnConsent => "WITHDRAWN_CONSENT",
            ErasureReason::NoLongerNecessary => "NO_LONGER_NECESSARY",
            ErasureReason::UnlawfulProcessing => "UNLAWFUL_PROCESSING",
            ErasureReason::Objection => "OBJECTION",
        }
    }
}

impl fmt::Display for ErasureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErasureReason {
    type Err = ComplianceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim();
        Self::ALL
            .into_iter()
            .find(|reason| reason.as_str().eq_ignore_ascii_case(normalized))
            .ok_or_else(|| ComplianceError::UnknownReason(normalized.to_string()))
    }
}

/// Parses a reason typed at a prompt. Blank input selects the default.
pub fn parse_reason_input(input: &str) -> Result<ErasureReason, ComplianceError> {
    if input.trim().is_empty() {
        Ok(ErasureReason::default())
    } else {
        input.parse()
    }
}

//! Erasure reason argument.

use clap::ValueEnum;
use rtbf_core::gdpr::ErasureReason;

/// CLI erasure reason, spelled the way the procedures expect it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReasonArg {
    #[value(name = "WITHDRAWN_CONSENT")]
    WithdrawnConsent,
    #[value(name = "NO_LONGER_NECESSARY")]
    NoLongerNecessary,
    #[value(name = "UNLAWFUL_PROCESSING")]
    UnlawfulProcessing,
    #[value(name = "OBJECTION")]
    Objection,
}

impl From<ReasonArg> for ErasureReason {
    fn from(reason: ReasonArg) -> Self {
        match reason {
            ReasonArg::WithdrawnConsent => ErasureReason::WithdrawnConsent,
            ReasonArg::NoLongerNecessary => ErasureReason::NoLongerNecessary,
            ReasonArg::UnlawfulProcessing => ErasureReason::UnlawfulProcessing,
            ReasonArg::Objection => ErasureReason::Objection,
        }
    }
}

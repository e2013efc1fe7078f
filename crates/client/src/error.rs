//! Client error types.

use rtbf_core::gdpr::ComplianceError;
use rtbf_core::warehouse::WarehouseError;
use thiserror::Error;

/// Result type alias for client module.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Warehouse(#[from] WarehouseError),

    #[error(transparent)]
    Compliance(#[from] ComplianceError),

    #[error("Missing required connection parameters: {}", .0.join(", "))]
    MissingConfig(Vec<&'static str>),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

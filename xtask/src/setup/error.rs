//! Error types for the setup command.

use std::path::PathBuf;

use rtbf_client::ClientError;
use rtbf_core::warehouse::WarehouseError;
use thiserror::Error;

/// Result type alias for the setup module.
pub type Result<T> = std::result::Result<T, SetupError>;

#[derive(Error, Debug)]
pub enum SetupError {
    #[error("Missing required setup files: {}", .0.join(", "))]
    MissingFiles(Vec<String>),

    #[error("Failed to read {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Warehouse(#[from] WarehouseError),

    #[error("Setup failed at: {step}")]
    StepFailed { step: String },

    #[error("Operation cancelled by user")]
    UserCancelled,

    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

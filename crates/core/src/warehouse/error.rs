use thiserror::Error;

/// Errors that can occur while running statements against the warehouse.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WarehouseError {
    #[error("Connection failed: {0}")]
    Connection(String),
    #[error("Authentication failed: {0}")]
    Authentication(String),
    #[error("Statement failed ({code}): {message}")]
    Statement {
        code: String,
        sql_state: Option<String>,
        message: String,
    },
    #[error("Statement did not complete within {seconds}s")]
    Timeout { seconds: u64 },
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for warehouse operations.
pub type Result<T> = std::result::Result<T, WarehouseError>;

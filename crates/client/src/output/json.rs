//! JSON output formatting.

use serde::Serialize;

/// Format a value as compact JSON.
pub fn format_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

/// Error document printed in JSON mode when an operation fails.
#[derive(Debug, Serialize)]
pub struct ErrorDocument<'a> {
    pub operation: &'a str,
    pub error: String,
}

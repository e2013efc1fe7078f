//! Serde helper functions for warehouse JSON payloads.
//!
//! Objects returned from `VARIANT` columns are loosely typed: booleans may
//! arrive as strings, dates as strings or numbers, and any field may be
//! `null`. These helpers normalize them.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize an optional scalar as a string, treating null and empty
/// strings as None.
pub fn deserialize_optional_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s).filter(|s| !s.trim().is_empty()),
        Some(other) => Some(other.to_string()),
    })
}

/// Deserialize a boolean that may be encoded as a bool, a string, or a
/// number. Null becomes false.
pub fn deserialize_lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(b)) => Ok(b),
        Some(Value::String(s)) => Ok(crate::warehouse::parse_bool(Some(&s))),
        Some(Value::Number(n)) => Ok(n.as_i64().is_some_and(|n| n != 0)),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected boolean, found {}",
            other
        ))),
    }
}

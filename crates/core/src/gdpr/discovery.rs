use std::collections::BTreeSet;

use serde::Serialize;

use crate::warehouse::ResultSet;

/// Aggregate view of a data discovery result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiscoverySummary {
    /// Sum of `RECORDS_FOUND` across all rows.
    pub total_records: i64,
    /// Number of distinct `DATABASE_NAME` values.
    pub systems_affected: usize,
    /// Rows whose `SENSITIVITY_LEVEL` is `HIGH`.
    pub high_sensitivity: usize,
}

/// Summarizes the rows returned by the discovery procedure.
pub fn summarize_discovery(results: &ResultSet) -> DiscoverySummary {
    let total_records = results
        .rows
        .iter()
        .filter_map(|row| row.get_i64("RECORDS_FOUND"))
        .sum();

    let systems_affected = results
        .rows
        .iter()
        .filter_map(|row| row.get("DATABASE_NAME"))
        .collect::<BTreeSet<_>>()
        .len();

    let high_sensitivity = results
        .rows
        .iter()
        .filter(|row| row.get("SENSITIVITY_LEVEL") == Some("HIGH"))
        .count();

    DiscoverySummary {
        total_records,
        systems_affected,
        high_sensitivity,
    }
}

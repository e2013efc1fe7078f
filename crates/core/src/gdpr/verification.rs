use serde::Serialize;

use crate::warehouse::ResultSet;

/// Outcome of a deletion verification run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationReport {
    pub all_verified: bool,
    /// Tables whose `DELETION_VERIFIED` flag is not set.
    pub failed_tables: Vec<String>,
}

/// Builds a verification report from the verification procedure's rows.
pub fn verification_report(results: &ResultSet) -> VerificationReport {
    let failed_tables: Vec<String> = results
        .rows
        .iter()
        .filter(|row| !row.get_bool("DELETION_VERIFIED"))
        .map(|row| row.get("TABLE_NAME").unwrap_or("UNKNOWN").to_string())
        .collect();

    VerificationReport {
        all_verified: failed_tables.is_empty(),
        failed_tables,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::warehouse::Column;

    fn verification_rows(rows: &[(&str, Option<&str>)]) -> ResultSet {
        ResultSet::from_raw(
            vec![
                Column::new("TABLE_NAME", "text"),
                Column::new("DELETION_VERIFIED", "boolean"),
            ],
            rows.iter()
                .map(|(table, verified)| {
                    vec![Some(table.to_string()), verified.map(str::to_string)]
                })
                .collect(),
        )
    }

    #[test]
    fn test_all_verified() {
        let report = verification_report(&verification_rows(&[
            ("CUSTOMERS", Some("true")),
            ("ORDERS", Some("TRUE")),
        ]));
        assert!(report.all_verified);
        assert!(report.failed_tables.is_empty());
    }

    #[test]
    fn test_failed_tables_include_null_flags() {
        let report = verification_report(&verification_rows(&[
            ("CUSTOMERS", Some("true")),
            ("ORDERS", Some("false")),
            ("CONSENTS", None),
        ]));
        assert!(!report.all_verified);
        assert_eq!(report.failed_tables, vec!["ORDERS", "CONSENTS"]);
    }
}

//! Post-setup checks.

use rtbf_core::warehouse::{ResultSet, SessionContext, StatementExecutor};

use crate::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckKind {
    /// A `SELECT COUNT(*)`; the first cell is the count.
    Count,
    /// A `SHOW` command; every row is one object.
    Listing,
}

#[derive(Debug, Clone, Copy)]
pub struct Check {
    pub name: &'static str,
    pub query: &'static str,
    pub kind: CheckKind,
}

pub const CHECKS: &[Check] = &[
    Check {
        name: "Databases",
        query: "SHOW DATABASES LIKE '%_DB'",
        kind: CheckKind::Listing,
    },
    Check {
        name: "Warehouses",
        query: "SHOW WAREHOUSES LIKE 'GDPR_%'",
        kind: CheckKind::Listing,
    },
    Check {
        name: "Procedures",
        query: "SHOW PROCEDURES LIKE 'SP_%'",
        kind: CheckKind::Listing,
    },
    Check {
        name: "Views",
        query: "SHOW VIEWS LIKE 'VW_%'",
        kind: CheckKind::Listing,
    },
    Check {
        name: "Demo Customers",
        query: "SELECT COUNT(*) AS CUSTOMER_COUNT FROM CUSTOMER_DATA_DB.CORE.CUSTOMERS",
        kind: CheckKind::Count,
    },
    Check {
        name: "Erasure Requests",
        query: "SELECT COUNT(*) AS REQUEST_COUNT FROM COMPLIANCE_DB.REQUESTS.ERASURE_REQUESTS",
        kind: CheckKind::Count,
    },
];

/// Describes a check's result, e.g. `"12 records"` or `"4 items found"`.
pub fn check_summary(kind: CheckKind, result: &ResultSet) -> String {
    match kind {
        CheckKind::Count => format!("{} records", result.first_scalar().unwrap_or("0")),
        CheckKind::Listing => format!("{} items found", result.len()),
    }
}

/// Runs every check. Returns false if any query failed.
pub async fn run_verification<E: StatementExecutor>(
    executor: &E,
    context: &SessionContext,
    silent: bool,
) -> bool {
    if !silent {
        aprintln!("\n{}", p_c("Verifying setup..."));
    }

    let mut all_passed = true;
    for check in CHECKS {
        match executor.execute_in(context, check.query, &[]).await {
            Ok(result) => {
                if !silent {
                    aprintln!(
                        "   ✓ {}: {}",
                        check.name,
                        check_summary(check.kind, &result)
                    );
                }
            }
            Err(e) => {
                all_passed = false;
                tracing::warn!(check = check.name, error = %e, "Setup check failed");
                if !silent {
                    aprintln!("   {}", p_r(&format!("{}: Failed - {}", check.name, e)));
                }
            }
        }
    }

    if !silent {
        if all_passed {
            aprintln!("{}", p_g("Setup verification completed successfully"));
        } else {
            aprintln!("{}", p_y("Setup verification completed with warnings"));
        }
    }

    all_passed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::executor::tests::RecordingExecutor;
    use rtbf_core::warehouse::Column;

    fn count(value: &str) -> ResultSet {
        ResultSet::from_raw(
            vec![Column::new("CUSTOMER_COUNT", "fixed")],
            vec![vec![Some(value.to_string())]],
        )
    }

    #[test]
    fn test_count_summary_uses_first_cell() {
        assert_eq!(check_summary(CheckKind::Count, &count("12")), "12 records");
        assert_eq!(
            check_summary(CheckKind::Count, &ResultSet::default()),
            "0 records"
        );
    }

    #[test]
    fn test_listing_summary_counts_rows() {
        let listing = ResultSet::from_raw(
            vec![Column::new("name", "text")],
            vec![
                vec![Some("COMPLIANCE_DB".to_string())],
                vec![Some("CUSTOMER_DATA_DB".to_string())],
            ],
        );
        assert_eq!(
            check_summary(CheckKind::Listing, &listing),
            "2 items found"
        );
    }

    #[tokio::test]
    async fn test_runs_every_check() {
        let executor = RecordingExecutor {
            results: vec![("CUSTOMERS", count("5"))],
            ..Default::default()
        };

        assert!(run_verification(&executor, &SessionContext::default(), true).await);
        let calls = executor.calls.lock().unwrap();
        assert_eq!(calls.len(), CHECKS.len());
        assert!(calls[4].1.contains("CUSTOMER_DATA_DB.CORE.CUSTOMERS"));
    }

    #[tokio::test]
    async fn test_failed_check_is_reported_but_others_run() {
        let executor = RecordingExecutor {
            failing: vec!["SHOW VIEWS"],
            ..Default::default()
        };

        assert!(!run_verification(&executor, &SessionContext::default(), true).await);
        assert_eq!(executor.calls.lock().unwrap().len(), CHECKS.len());
    }
}

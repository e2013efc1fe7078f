/// Renders `CALL NAME(?, ?, ...)` for a procedure taking `arg_count` bound
/// arguments.
pub fn call_statement(procedure: &str, arg_count: usize) -> String {
    format!("CALL {}({})", procedure, placeholders(arg_count))
}

/// Renders `n` comma-separated `?` placeholders.
pub fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

/// Shortens a statement for log output, keeping the first line only.
pub fn statement_preview(sql: &str, max_len: usize) -> String {
    let first_line = sql.trim().lines().next().unwrap_or_default();
    if first_line.chars().count() > max_len {
        let truncated: String = first_line.chars().take(max_len).collect();
        format!("{}...", truncated)
    } else {
        first_line.to_string()
    }
}

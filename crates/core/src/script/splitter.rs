const BODY_DELIMITER: &str = "$$";

/// Splits a setup script into individual statements.
///
/// Lines are trimmed, and blank lines and `--` comment lines are dropped.
/// Statements end at a line ending with `;`, except inside `$$`-quoted
/// procedure bodies, which end at the line that closes the body.
pub fn split_statements(sql: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut in_body = false;

    for line in sql.lines().map(str::trim) {
        if line.is_empty() || line.starts_with("--") {
            continue;
        }

        current.push_str(line);
        current.push('\n');

        // A line holding both delimiters (`AS $$ SELECT 1 $$;`) opens and
        // closes a body on its own and leaves the state unchanged.
        let delimiters = line.matches(BODY_DELIMITER).count();
        if delimiters % 2 == 1 {
            if in_body {
                in_body = false;
                push_statement(&mut statements, &mut current);
            } else {
                in_body = true;
            }
        } else if !in_body && line.ends_with(';') {
            push_statement(&mut statements, &mut current);
        }
    }

    push_statement(&mut statements, &mut current);
    statements
}

fn push_statement(statements: &mut Vec<String>, current: &mut String) {
    let statement = current.trim();
    if !statement.is_empty() {
        statements.push(statement.to_string());
    }
    current.clear();
}

/// Returns false for statements that are only a comment.
pub fn is_executable(statement: &str) -> bool {
    let upper = statement.trim().to_uppercase();
    !(upper.is_empty() || upper.starts_with("--") || upper.starts_with("/*"))
}

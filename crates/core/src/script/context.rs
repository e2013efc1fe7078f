use crate::warehouse::SessionContext;

const DEFAULT_SCHEMA: &str = "PUBLIC";

/// Updates the session context the way the warehouse would after running
/// `statement`.
///
/// Handles `USE ROLE/WAREHOUSE/DATABASE/SCHEMA` and the implicit switch that
/// `CREATE DATABASE`, `CREATE SCHEMA` and `CREATE WAREHOUSE` perform. Returns
/// true if the context changed.
pub fn track_session_context(context: &mut SessionContext, statement: &str) -> bool {
    let tokens: Vec<&str> = statement
        .split_whitespace()
        .map(|t| t.trim_end_matches(';'))
        .filter(|t| !t.is_empty())
        .collect();
    let upper: Vec<String> = tokens.iter().map(|t| t.to_uppercase()).collect();
    let keyword = |i: usize| upper.get(i).map(String::as_str);

    let before = context.clone();

    match keyword(0) {
        Some("USE") => match (keyword(1), tokens.get(2)) {
            (Some("ROLE"), Some(name)) => context.role = Some(name.to_string()),
            (Some("WAREHOUSE"), Some(name)) => context.warehouse = Some(name.to_string()),
            (Some("DATABASE"), Some(name)) => use_database(context, name),
            (Some("SCHEMA"), Some(name)) => use_schema(context, name),
            (Some(name), None)
                if !matches!(name, "ROLE" | "WAREHOUSE" | "DATABASE" | "SCHEMA") =>
            {
                use_database(context, tokens[1])
            }
            _ => {}
        },
        Some("CREATE") => {
            let mut i = 1;
            if keyword(i) == Some("OR") && keyword(i + 1) == Some("REPLACE") {
                i += 2;
            }
            while matches!(keyword(i), Some("TRANSIENT") | Some("MANAGED") | Some("ACCESS")) {
                i += 1;
            }
            let object = keyword(i);
            i += 1;
            if keyword(i) == Some("IF")
                && keyword(i + 1) == Some("NOT")
                && keyword(i + 2) == Some("EXISTS")
            {
                i += 3;
            }
            if let Some(name) = tokens.get(i).map(|n| n.split('(').next().unwrap_or_default()) {
                match object {
                    Some("DATABASE") => use_database(context, name),
                    Some("SCHEMA") => use_schema(context, name),
                    Some("WAREHOUSE") => context.warehouse = Some(name.to_string()),
                    _ => {}
                }
            }
        }
        _ => {}
    }

    *context != before
}

fn use_database(context: &mut SessionContext, name: &str) {
    context.database = Some(name.to_string());
    context.schema = Some(DEFAULT_SCHEMA.to_string());
}

fn use_schema(context: &mut SessionContext, name: &str) {
    match name.split_once('.') {
        Some((database, schema)) => {
            context.database = Some(database.to_string());
            context.schema = Some(schema.to_string());
        }
        None => context.schema = Some(name.to_string()),
    }
}

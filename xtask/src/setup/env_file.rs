//! The `.env` file written after a successful setup.

use std::path::Path;

use rtbf_client::config::{
    PartialConfig, DEFAULT_DATABASE, DEFAULT_ROLE, DEFAULT_SCHEMA, DEFAULT_WAREHOUSE,
};

use super::error::Result;

/// Renders the connection settings the `rtbf` CLI reads on startup.
pub fn render_env_file(settings: &PartialConfig) -> String {
    let mut lines = vec!["# Snowflake GDPR Demo Configuration".to_string()];
    let mut push = |key: &str, value: &str| lines.push(format!("{}={}", key, value));

    push("SNOWFLAKE_ACCOUNT", settings.account.as_deref().unwrap_or_default());
    push("SNOWFLAKE_USER", settings.user.as_deref().unwrap_or_default());

    if let Some(token) = &settings.token {
        push("SNOWFLAKE_TOKEN", token);
        if let Some(token_type) = &settings.token_type {
            push("SNOWFLAKE_TOKEN_TYPE", token_type);
        }
    } else if let (Some(path), Some(fingerprint)) =
        (&settings.private_key_path, &settings.public_key_fingerprint)
    {
        push("SNOWFLAKE_PRIVATE_KEY_PATH", &path.display().to_string());
        push("SNOWFLAKE_PUBLIC_KEY_FP", fingerprint);
    }

    push("SNOWFLAKE_WAREHOUSE", DEFAULT_WAREHOUSE);
    push("SNOWFLAKE_DATABASE", DEFAULT_DATABASE);
    push("SNOWFLAKE_SCHEMA", DEFAULT_SCHEMA);
    push(
        "SNOWFLAKE_ROLE",
        settings.role.as_deref().unwrap_or(DEFAULT_ROLE),
    );
    if let Some(host) = &settings.host {
        push("SNOWFLAKE_HOST", host);
    }

    let mut content = lines.join("\n");
    content.push('\n');
    content
}

pub fn write_env_file(path: &Path, settings: &PartialConfig) -> Result<()> {
    std::fs::write(path, render_env_file(settings))?;
    tracing::info!(path = %path.display(), "Wrote connection settings");
    Ok(())
}

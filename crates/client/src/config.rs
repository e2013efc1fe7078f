//! Warehouse connection configuration.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use dialoguer::{Input, Password};
use rtbf_core::warehouse::SessionContext;

use crate::error::{ClientError, Result};

pub const DEFAULT_WAREHOUSE: &str = "GDPR_PROCESSING_WH";
pub const DEFAULT_DATABASE: &str = "COMPLIANCE_DB";
pub const DEFAULT_SCHEMA: &str = "REQUESTS";
pub const DEFAULT_ROLE: &str = "SYSADMIN";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Settings file written by `cargo xtask setup`, read from the working
/// directory.
pub const ENV_FILE: &str = ".env";

/// How a token credential is presented to the SQL API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TokenType {
    #[default]
    ProgrammaticAccessToken,
    OAuth,
}

impl TokenType {
    /// Value of the `X-Snowflake-Authorization-Token-Type` header.
    pub fn header_value(&self) -> &'static str {
        match self {
            TokenType::ProgrammaticAccessToken => "PROGRAMMATIC_ACCESS_TOKEN",
            TokenType::OAuth => "OAUTH",
        }
    }

    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_uppercase().as_str() {
            "PROGRAMMATIC_ACCESS_TOKEN" | "PAT" => Ok(TokenType::ProgrammaticAccessToken),
            "OAUTH" => Ok(TokenType::OAuth),
            other => Err(ClientError::InvalidConfig(format!(
                "unknown SNOWFLAKE_TOKEN_TYPE '{}'",
                other
            ))),
        }
    }
}

/// Credentials accepted by the SQL API.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Programmatic access token or OAuth access token.
    Token { token: String, token_type: TokenType },
    /// RSA key pair registered on the user.
    KeyPair {
        /// PEM-encoded PKCS#8 private key.
        private_key_pem: String,
        /// `SHA256:...` fingerprint of the registered public key
        /// (`RSA_PUBLIC_KEY_FP` in `DESC USER`).
        public_key_fingerprint: String,
    },
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Token { token_type, .. } => f
                .debug_struct("Token")
                .field("token", &"<redacted>")
                .field("token_type", token_type)
                .finish(),
            Credentials::KeyPair {
                public_key_fingerprint,
                ..
            } => f
                .debug_struct("KeyPair")
                .field("private_key_pem", &"<redacted>")
                .field("public_key_fingerprint", public_key_fingerprint)
                .finish(),
        }
    }
}

/// Complete connection configuration.
#[derive(Debug, Clone)]
pub struct WarehouseConfig {
    /// Account identifier, e.g. `abc12345.us-east-1` or `myorg-myaccount`.
    pub account: String,
    pub user: String,
    pub credentials: Credentials,
    /// Role, warehouse, database and schema statements run under.
    pub context: SessionContext,
    /// Overrides `https://{account}.snowflakecomputing.com`.
    pub host: Option<String>,
    pub timeout: Duration,
}

impl WarehouseConfig {
    /// Returns the SQL API base URL without a trailing slash.
    pub fn base_url(&self) -> String {
        match &self.host {
            Some(host) => host.trim_end_matches('/').to_string(),
            None => format!("https://{}.snowflakecomputing.com", self.account),
        }
    }

    /// Returns a display string for the target environment.
    pub fn target_display(&self) -> String {
        let mut target = format!("{}@{}", self.user, self.account);
        if let Some(role) = &self.context.role {
            target.push_str(&format!(" (role: {})", role));
        }
        target
    }
}

/// Connection settings as read from the environment, before prompting.
#[derive(Debug, Clone, Default)]
pub struct PartialConfig {
    pub account: Option<String>,
    pub user: Option<String>,
    pub token: Option<String>,
    pub token_type: Option<String>,
    pub private_key_path: Option<PathBuf>,
    pub public_key_fingerprint: Option<String>,
    pub role: Option<String>,
    pub warehouse: Option<String>,
    pub database: Option<String>,
    pub schema: Option<String>,
    pub host: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl PartialConfig {
    /// Load from environment variables, falling back to the `KEY=value`
    /// settings in `path`. A missing file counts as empty.
    ///
    /// # Environment Variables
    ///
    /// - `SNOWFLAKE_ACCOUNT`, `SNOWFLAKE_USER`: required
    /// - `SNOWFLAKE_TOKEN`: programmatic access token or OAuth token
    /// - `SNOWFLAKE_TOKEN_TYPE`: `PROGRAMMATIC_ACCESS_TOKEN` (default) or `OAUTH`
    /// - `SNOWFLAKE_PRIVATE_KEY_PATH`, `SNOWFLAKE_PUBLIC_KEY_FP`: key-pair auth
    /// - `SNOWFLAKE_ROLE`, `SNOWFLAKE_WAREHOUSE`, `SNOWFLAKE_DATABASE`, `SNOWFLAKE_SCHEMA`
    /// - `SNOWFLAKE_HOST`: SQL API base URL override
    /// - `SNOWFLAKE_TIMEOUT_SECS`: statement timeout (default: 60)
    pub fn from_env_and_file(path: &Path) -> Result<Self> {
        let file = read_env_file(path)?;
        Ok(Self::layered(|key| std::env::var(key).ok(), &file))
    }

    /// Load from `env`, using `file` for keys that are unset or blank there.
    pub fn layered<F>(env: F, file: &HashMap<String, String>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_lookup(|key| {
            env(key)
                .filter(|v| !v.trim().is_empty())
                .or_else(|| file.get(key).cloned())
        })
    }

    /// Load from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            account: get("SNOWFLAKE_ACCOUNT"),
            user: get("SNOWFLAKE_USER"),
            token: get("SNOWFLAKE_TOKEN"),
            token_type: get("SNOWFLAKE_TOKEN_TYPE"),
            private_key_path: get("SNOWFLAKE_PRIVATE_KEY_PATH").map(PathBuf::from),
            public_key_fingerprint: get("SNOWFLAKE_PUBLIC_KEY_FP"),
            role: get("SNOWFLAKE_ROLE"),
            warehouse: get("SNOWFLAKE_WAREHOUSE"),
            database: get("SNOWFLAKE_DATABASE"),
            schema: get("SNOWFLAKE_SCHEMA"),
            host: get("SNOWFLAKE_HOST"),
            timeout_secs: get("SNOWFLAKE_TIMEOUT_SECS").and_then(|v| v.parse().ok()),
        }
    }

    /// Fills the session context defaults the erasure workflow runs under.
    pub fn with_workflow_defaults(mut self) -> Self {
        self.role.get_or_insert_with(|| DEFAULT_ROLE.to_string());
        self.warehouse
            .get_or_insert_with(|| DEFAULT_WAREHOUSE.to_string());
        self.database.get_or_insert_with(|| DEFAULT_DATABASE.to_string());
        self.schema.get_or_insert_with(|| DEFAULT_SCHEMA.to_string());
        self
    }

    /// Returns true when some form of credentials is configured.
    pub fn has_credentials(&self) -> bool {
        self.token.is_some()
            || (self.private_key_path.is_some() && self.public_key_fingerprint.is_some())
    }

    /// Lists the required settings that are still missing.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.account.is_none() {
            missing.push("SNOWFLAKE_ACCOUNT");
        }
        if self.user.is_none() {
            missing.push("SNOWFLAKE_USER");
        }
        if !self.has_credentials() {
            missing.push("SNOWFLAKE_TOKEN");
        }
        missing
    }

    /// Resolves the configured credentials, reading the private key file if
    /// key-pair authentication is configured. A token takes precedence.
    fn credentials(&self) -> Result<Option<Credentials>> {
        if let Some(token) = &self.token {
            let token_type = match &self.token_type {
                Some(value) => TokenType::parse(value)?,
                None => TokenType::default(),
            };
            return Ok(Some(Credentials::Token {
                token: token.clone(),
                token_type,
            }));
        }

        match (&self.private_key_path, &self.public_key_fingerprint) {
            (Some(path), Some(fingerprint)) => {
                let private_key_pem = std::fs::read_to_string(path).map_err(|e| {
                    ClientError::InvalidConfig(format!(
                        "cannot read private key {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                Ok(Some(Credentials::KeyPair {
                    private_key_pem,
                    public_key_fingerprint: fingerprint.clone(),
                }))
            }
            _ => Ok(None),
        }
    }

    /// Converts into a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns `MissingConfig` listing every required setting that is unset.
    pub fn into_config(self) -> Result<WarehouseConfig> {
        let missing = self.missing();
        if !missing.is_empty() {
            return Err(ClientError::MissingConfig(missing));
        }
        let credentials = self
            .credentials()?
            .ok_or_else(|| ClientError::MissingConfig(vec!["SNOWFLAKE_TOKEN"]))?;

        Ok(WarehouseConfig {
            account: self.account.unwrap_or_default(),
            user: self.user.unwrap_or_default(),
            credentials,
            context: SessionContext {
                role: self.role,
                warehouse: self.warehouse,
                database: self.database,
                schema: self.schema,
            },
            host: self.host,
            timeout: Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        })
    }
}

/// Prompts for any missing account, user, or token.
pub fn prompt_missing(mut partial: PartialConfig) -> Result<PartialConfig> {
    if partial.missing().is_empty() {
        return Ok(partial);
    }

    anstream::eprintln!("\nSnowflake Configuration Required");
    anstream::eprintln!("Please provide your Snowflake connection details:");

    if partial.account.is_none() {
        let account: String = Input::new()
            .with_prompt("Account (e.g., abc12345.us-east-1)")
            .interact_text()?;
        partial.account = Some(account.trim().to_string());
    }
    if partial.user.is_none() {
        let user: String = Input::new().with_prompt("Username").interact_text()?;
        partial.user = Some(user.trim().to_string());
    }
    if !partial.has_credentials() {
        let token = Password::new()
            .with_prompt("Programmatic access token")
            .interact()?;
        partial.token = Some(token);
    }

    Ok(partial)
}

/// Parses `KEY=value` lines.
///
/// Blank lines and `#` comments are skipped, an `export ` prefix is allowed,
/// and one pair of matching quotes around a value is removed.
pub fn parse_env_file(content: &str) -> HashMap<String, String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let line = line.strip_prefix("export ").unwrap_or(line);
            let (key, value) = line.split_once('=')?;
            let value = value.trim();
            let value = ['"', '\'']
                .iter()
                .find_map(|q| value.strip_prefix(*q).and_then(|v| v.strip_suffix(*q)))
                .unwrap_or(value);
            Some((key.trim().to_string(), value.to_string()))
        })
        .collect()
}

/// Reads an env file. A missing file yields no settings.
pub fn read_env_file(path: &Path) -> Result<HashMap<String, String>> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            tracing::debug!(path = %path.display(), "Loaded settings file");
            Ok(parse_env_file(&content))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
        Err(e) => Err(e.into()),
    }
}

/// Loads the workflow configuration from the environment and the `.env`
/// file, prompting for missing values when `interactive` is set.
///
/// Variables set in the environment take precedence over the file.
pub fn load_config(interactive: bool) -> Result<WarehouseConfig> {
    let partial =
        PartialConfig::from_env_and_file(Path::new(ENV_FILE))?.with_workflow_defaults();
    let partial = if interactive {
        prompt_missing(partial)?
    } else {
        partial
    };
    partial.into_config()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_token_config_with_workflow_defaults() {
        let config = PartialConfig::from_lookup(lookup(&[
            ("SNOWFLAKE_ACCOUNT", "abc12345.us-east-1"),
            ("SNOWFLAKE_USER", "gdpr_admin"),
            ("SNOWFLAKE_TOKEN", "pat-secret"),
        ]))
        .with_workflow_defaults()
        .into_config()
        .unwrap();

        assert_eq!(config.context.warehouse.as_deref(), Some("GDPR_PROCESSING_WH"));
        assert_eq!(config.context.database.as_deref(), Some("COMPLIANCE_DB"));
        assert_eq!(config.context.schema.as_deref(), Some("REQUESTS"));
        assert_eq!(config.context.role.as_deref(), Some("SYSADMIN"));
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(
            config.credentials,
            Credentials::Token {
                token: "pat-secret".to_string(),
                token_type: TokenType::ProgrammaticAccessToken,
            }
        );
        assert_eq!(
            config.base_url(),
            "https://abc12345.us-east-1.snowflakecomputing.com"
        );
    }

    #[test]
    fn test_env_overrides_defaults() {
        let config = PartialConfig::from_lookup(lookup(&[
            ("SNOWFLAKE_ACCOUNT", "acct"),
            ("SNOWFLAKE_USER", "u"),
            ("SNOWFLAKE_TOKEN", "t"),
            ("SNOWFLAKE_TOKEN_TYPE", "oauth"),
            ("SNOWFLAKE_WAREHOUSE", "OTHER_WH"),
            ("SNOWFLAKE_HOST", "http://127.0.0.1:9000/"),
            ("SNOWFLAKE_TIMEOUT_SECS", "5"),
        ]))
        .with_workflow_defaults()
        .into_config()
        .unwrap();

        assert_eq!(config.context.warehouse.as_deref(), Some("OTHER_WH"));
        assert_eq!(config.base_url(), "http://127.0.0.1:9000");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(matches!(
            config.credentials,
            Credentials::Token {
                token_type: TokenType::OAuth,
                ..
            }
        ));
    }

    #[test]
    fn test_missing_settings_are_reported_together() {
        let err = PartialConfig::from_lookup(lookup(&[("SNOWFLAKE_USER", "  ")]))
            .into_config()
            .unwrap_err();

        match err {
            ClientError::MissingConfig(missing) => assert_eq!(
                missing,
                vec!["SNOWFLAKE_ACCOUNT", "SNOWFLAKE_USER", "SNOWFLAKE_TOKEN"]
            ),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_key_pair_requires_fingerprint() {
        let partial = PartialConfig::from_lookup(lookup(&[
            ("SNOWFLAKE_ACCOUNT", "acct"),
            ("SNOWFLAKE_USER", "u"),
            ("SNOWFLAKE_PRIVATE_KEY_PATH", "/tmp/rsa_key.p8"),
        ]));
        assert_eq!(partial.missing(), vec!["SNOWFLAKE_TOKEN"]);
    }

    #[test]
    fn test_unknown_token_type_is_rejected() {
        let err = PartialConfig::from_lookup(lookup(&[
            ("SNOWFLAKE_ACCOUNT", "acct"),
            ("SNOWFLAKE_USER", "u"),
            ("SNOWFLAKE_TOKEN", "t"),
            ("SNOWFLAKE_TOKEN_TYPE", "password"),
        ]))
        .into_config()
        .unwrap_err();
        assert!(matches!(err, ClientError::InvalidConfig(_)));
    }

    #[test]
    fn test_env_file_settings_complete_the_config() {
        let path = std::env::temp_dir().join(format!("rtbf-config-{}.env", std::process::id()));
        std::fs::write(
            &path,
            "# Snowflake GDPR Demo Configuration\n\
             SNOWFLAKE_ACCOUNT=abc12345.us-east-1\n\
             SNOWFLAKE_USER=gdpr_admin\n\
             SNOWFLAKE_TOKEN=\"pat-secret\"\n\
             export SNOWFLAKE_ROLE=ACCOUNTADMIN\n",
        )
        .unwrap();
        let file = read_env_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let config = PartialConfig::layered(|_| None, &file)
            .with_workflow_defaults()
            .into_config()
            .unwrap();

        assert_eq!(config.account, "abc12345.us-east-1");
        assert_eq!(config.user, "gdpr_admin");
        assert_eq!(config.context.role.as_deref(), Some("ACCOUNTADMIN"));
        assert_eq!(
            config.credentials,
            Credentials::Token {
                token: "pat-secret".to_string(),
                token_type: TokenType::ProgrammaticAccessToken,
            }
        );
    }

    #[test]
    fn test_environment_wins_over_env_file() {
        let file = parse_env_file("SNOWFLAKE_ACCOUNT=file-account\nSNOWFLAKE_USER=file-user\n");
        let partial = PartialConfig::layered(
            lookup(&[("SNOWFLAKE_ACCOUNT", "env-account"), ("SNOWFLAKE_USER", " ")]),
            &file,
        );

        assert_eq!(partial.account.as_deref(), Some("env-account"));
        assert_eq!(partial.user.as_deref(), Some("file-user"));
    }

    #[test]
    fn test_missing_env_file_is_empty() {
        let file = read_env_file(Path::new("/nonexistent/rtbf/.env")).unwrap();
        assert!(file.is_empty());
    }

    #[test]
    fn test_credentials_debug_is_redacted() {
        let creds = Credentials::Token {
            token: "super-secret".to_string(),
            token_type: TokenType::ProgrammaticAccessToken,
        };
        let rendered = format!("{:?}", creds);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}

//! Installs the GDPR demo into a Snowflake account.

mod env_file;
mod error;
mod executor;
mod verify;

pub use error::{Result, SetupError};

use std::path::{Path, PathBuf};

use dialoguer::{Confirm, Input, Password};
use rtbf_client::config::{prompt_missing, PartialConfig, DEFAULT_ROLE};
use rtbf_client::WarehouseClient;

use crate::prelude::*;
use executor::ScriptRunner;

/// Setup files, in the order they run.
const SETUP_FILES: &[(&str, &str, &str)] = &[
    (
        "1. Databases and Schemas",
        "snowflake_setup.sql",
        "Database and Schema Setup",
    ),
    (
        "2. GDPR Procedures",
        "gdpr_procedures.sql",
        "GDPR Procedures and Functions",
    ),
    (
        "3. Security Policies",
        "security_policies.sql",
        "Security Policies and Views",
    ),
    ("4. Demo Data", "demo_data.sql", "Demo Data"),
];

const VERIFY_STEP: &str = "5. Setup Verification";

/// Install the GDPR demo schema, procedures, and data.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Install the GDPR right-to-be-forgotten demo in Snowflake.

Runs the SQL files in the setup directory statement by statement, verifies
that the databases, warehouses, procedures, views, and demo data exist, and
writes the connection settings to an env file for the rtbf CLI.

A failing statement is reported as a warning and setup continues.

Environment variables:
  SNOWFLAKE_ACCOUNT, SNOWFLAKE_USER, SNOWFLAKE_TOKEN   - used when flags are absent,
                                                       falling back to the env file
  SNOWFLAKE_PRIVATE_KEY_PATH, SNOWFLAKE_PUBLIC_KEY_FP  - key-pair authentication
  SNOWFLAKE_HOST                                       - SQL API base URL override")]
pub struct SetupCommand {
    /// Snowflake account identifier.
    #[arg(short, long)]
    pub account: Option<String>,

    /// Snowflake username.
    #[arg(short, long)]
    pub user: Option<String>,

    /// Programmatic access token.
    #[arg(short, long)]
    pub token: Option<String>,

    /// Role to run the setup as.
    #[arg(short, long, default_value = DEFAULT_ROLE)]
    pub role: String,

    /// Prompt for every connection setting.
    #[arg(short, long)]
    pub interactive: bool,

    /// Directory holding the setup SQL files.
    #[arg(long, default_value = "setup")]
    pub setup_dir: PathBuf,

    /// Where to write the connection settings.
    #[arg(long, default_value = ".env")]
    pub env_file: PathBuf,

    /// Skip confirmation prompts.
    #[arg(long)]
    pub force: bool,
}

impl SetupCommand {
    /// Environment settings overridden by command-line flags.
    fn settings(&self, env: PartialConfig) -> PartialConfig {
        PartialConfig {
            account: self.account.clone().or(env.account),
            user: self.user.clone().or(env.user),
            token: self.token.clone().or(env.token),
            role: Some(self.role.clone()),
            ..env
        }
    }
}

/// Main entry point for the setup command.
pub async fn run(cmd: SetupCommand, global: crate::Global) -> Result<()> {
    let silent = global.is_silent();

    let missing = missing_files(&cmd.setup_dir);
    if !missing.is_empty() {
        aeprintln!("{}", p_r("Missing required setup files:"));
        for file in &missing {
            aeprintln!("   • {}", file);
        }
        aeprintln!(
            "\n{}",
            p_y("Please ensure you're running this command from the project root directory.")
        );
        return Err(SetupError::MissingFiles(missing));
    }

    let settings = cmd.settings(PartialConfig::from_env_and_file(&cmd.env_file)?);
    let settings = if cmd.interactive {
        prompt_all(settings)?
    } else {
        prompt_missing(settings)?
    };
    let config = settings.clone().into_config()?;

    if !silent {
        aprintln!("{} {}", p_b("Target:"), config.target_display());
        aprintln!();
    }

    if !cmd.force {
        let confirmed = Confirm::new()
            .with_prompt("Install the GDPR demo into this account?")
            .default(true)
            .interact()?;

        if !confirmed {
            return Err(SetupError::UserCancelled);
        }
    }

    let context = config.context.clone();
    let client = WarehouseClient::new(config)?;
    if let Err(e) = client.connect().await {
        aeprintln!("{}", p_r(&format!("Failed to connect to Snowflake: {}", e)));
        return Err(e.into());
    }
    if !silent {
        aprintln!("{}", p_g("Connected to Snowflake successfully"));
    }

    let result = install(&client, &cmd.setup_dir, context, silent).await;
    client.disconnect();

    if let Err(e) = &result {
        aeprintln!("{}", p_r(&e.to_string()));
        aeprintln!("\n{}", p_r("Setup failed. Please check the errors above."));
        return result;
    }

    env_file::write_env_file(&cmd.env_file, &settings)?;
    if !silent {
        aprintln!(
            "\n{}",
            p_g(&format!(
                "Configuration saved to {}",
                cmd.env_file.display()
            ))
        );
        aprintln!(
            "{}",
            p_c("You can now run the demo without entering credentials again!")
        );
    }

    Ok(())
}

async fn install(
    client: &WarehouseClient,
    setup_dir: &Path,
    context: rtbf_core::warehouse::SessionContext,
    silent: bool,
) -> Result<()> {
    if !silent {
        aprintln!("\n{}", banner_blue("SNOWFLAKE GDPR DEMO SETUP"));
        aprintln!(
            "{}",
            p_c("Setting up GDPR Right to be Forgotten demo in Snowflake...")
        );
        aprintln!("{}", "=".repeat(60));
    }

    let mut runner = ScriptRunner::new(client, context, silent);
    for (step, file, description) in SETUP_FILES {
        if !silent {
            aprintln!("\n{}", p_y(step));
        }
        if let Err(e) = runner.run_file(&setup_dir.join(file), description).await {
            tracing::error!(step, error = %e, "Setup step failed");
            aeprintln!("{}", p_r(&e.to_string()));
            return Err(SetupError::StepFailed {
                step: step.to_string(),
            });
        }
    }

    if !silent {
        aprintln!("\n{}", p_y(VERIFY_STEP));
    }
    if !verify::run_verification(client, runner.context(), silent).await {
        return Err(SetupError::StepFailed {
            step: VERIFY_STEP.to_string(),
        });
    }

    if !silent {
        aprintln!(
            "\n{}",
            banner_green("SNOWFLAKE GDPR DEMO SETUP COMPLETED SUCCESSFULLY!")
        );
        aprintln!("\n{}", p_c("Next steps:"));
        aprintln!("  1. Run: rtbf interactive");
        aprintln!("  2. Or try: rtbf full-demo -e anna.mueller@email.de");
        aprintln!("  3. View dashboard: rtbf dashboard");
    }

    Ok(())
}

/// Lists the setup files missing from `setup_dir`.
fn missing_files(setup_dir: &Path) -> Vec<String> {
    SETUP_FILES
        .iter()
        .map(|(_, file, _)| setup_dir.join(file))
        .filter(|path| !path.exists())
        .map(|path| path.display().to_string())
        .collect()
}

/// Prompts for every connection setting, offering current values as defaults.
fn prompt_all(mut settings: PartialConfig) -> Result<PartialConfig> {
    aeprintln!("\n{}", p_c("Snowflake Connection Details"));
    aeprintln!("Please provide your Snowflake connection information:");

    let text = |prompt: &str, current: Option<String>| -> Result<String> {
        let mut input = Input::<String>::new().with_prompt(prompt);
        if let Some(current) = current {
            input = input.default(current);
        }
        Ok(input.interact_text()?.trim().to_string())
    };

    settings.account = Some(text("Account (e.g., abc12345.us-east-1)", settings.account.take())?);
    settings.user = Some(text("Username", settings.user.take())?);
    let token = Password::new()
        .with_prompt("Programmatic access token")
        .allow_empty_password(settings.has_credentials())
        .interact()?;
    if !token.is_empty() {
        settings.token = Some(token);
    }
    settings.role = Some(text(
        "Role",
        Some(settings.role.take().unwrap_or_else(|| DEFAULT_ROLE.to_string())),
    )?);

    Ok(settings)
}

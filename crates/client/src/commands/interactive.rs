//! Menu-driven mode.

use std::io;

use dialoguer::{Input, Select};
use rtbf_core::gdpr::procedures::{DEFAULT_REQUEST_LIMIT, DEFAULT_VERIFY_HOURS_BACK};
use rtbf_core::gdpr::{parse_reason_input, ErasureReason};
use rtbf_core::warehouse::StatementExecutor;

use super::Session;
use crate::error::Result;

/// Customers seeded by the demo data.
pub const DEMO_CUSTOMERS: [(&str, &str); 4] = [
    ("anna.mueller@email.de", "German customer with full consent"),
    ("jean.dupont@email.fr", "French customer, consent withdrawn"),
    ("maria.garcia@email.es", "Spanish customer, partial consent"),
    ("consent.withdrawn@email.de", "Customer with withdrawn consent"),
];

/// Menu entries, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Discover,
    SubmitErasure,
    Dashboard,
    Verify,
    FullDemo,
    CustomerStatus,
    ListRequests,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 8] = [
        MenuChoice::Discover,
        MenuChoice::SubmitErasure,
        MenuChoice::Dashboard,
        MenuChoice::Verify,
        MenuChoice::FullDemo,
        MenuChoice::CustomerStatus,
        MenuChoice::ListRequests,
        MenuChoice::Exit,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::Discover => "1. Discover customer data",
            MenuChoice::SubmitErasure => "2. Submit erasure request",
            MenuChoice::Dashboard => "3. View compliance dashboard",
            MenuChoice::Verify => "4. Verify customer deletion",
            MenuChoice::FullDemo => "5. Run full demo scenario",
            MenuChoice::CustomerStatus => "6. Check customer compliance status",
            MenuChoice::ListRequests => "7. List erasure requests",
            MenuChoice::Exit => "0. Exit",
        }
    }
}

/// Reads menu selections and free-text answers.
///
/// `None` means the user cancelled the prompt.
pub trait Prompter {
    fn select(&self, prompt: &str, items: &[&str]) -> Result<Option<usize>>;
    fn input(&self, prompt: &str) -> Result<Option<String>>;
}

/// Terminal prompts.
pub struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
    fn select(&self, prompt: &str, items: &[&str]) -> Result<Option<usize>> {
        let selection = Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact_opt();
        cancelled_as_none(selection)
    }

    fn input(&self, prompt: &str) -> Result<Option<String>> {
        let answer = Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map(Some);
        cancelled_as_none(answer).map(|answer| answer.map(|text| text.trim().to_string()))
    }
}

fn cancelled_as_none<T>(result: std::result::Result<Option<T>, dialoguer::Error>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(value),
        Err(dialoguer::Error::IO(e)) if e.kind() == io::ErrorKind::Interrupted => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Runs the menu loop until the user exits or cancels a prompt.
pub async fn run<E, P>(session: &Session<E>, prompter: &P) -> Result<()>
where
    E: StatementExecutor,
    P: Prompter,
{
    let console = session.console();
    console.banner("SNOWFLAKE GDPR COMPLIANCE DEMO - INTERACTIVE MODE");
    console.line("\nAvailable demo customers (from demo data):");
    for (email, description) in DEMO_CUSTOMERS {
        console.line(&format!("  • {} ({})", email, description));
    }

    let labels: Vec<&str> = MenuChoice::ALL.iter().map(MenuChoice::label).collect();
    loop {
        console.heading("Choose an action:");
        let Some(choice) = prompter
            .select("Enter your choice", &labels)?
            .and_then(MenuChoice::from_index)
        else {
            console.warning("\nDemo interrupted by user");
            return Ok(());
        };

        if choice == MenuChoice::Exit {
            console.success("Goodbye!");
            return Ok(());
        }
        if !handle(session, prompter, choice).await? {
            console.warning("\nDemo interrupted by user");
            return Ok(());
        }
    }
}

/// Runs one menu action. Returns false if the user cancelled a prompt.
async fn handle<E, P>(session: &Session<E>, prompter: &P, choice: MenuChoice) -> Result<bool>
where
    E: StatementExecutor,
    P: Prompter,
{
    let console = session.console();
    match choice {
        MenuChoice::Dashboard => {
            session.dashboard().await;
            return Ok(true);
        }
        MenuChoice::ListRequests => {
            session.requests(DEFAULT_REQUEST_LIMIT).await;
            return Ok(true);
        }
        _ => {}
    }

    let Some(email) = prompter.input("Enter customer email")? else {
        return Ok(false);
    };
    if email.is_empty() {
        console.failure("A customer email is required.");
        return Ok(true);
    }

    match choice {
        MenuChoice::Discover => {
            session.discover(&email).await;
        }
        MenuChoice::SubmitErasure => {
            let Some(answer) = prompter.input(&format!(
                "Enter erasure reason ({}) [{}]",
                ErasureReason::ALL.map(|r| r.as_str()).join("/"),
                ErasureReason::default()
            ))?
            else {
                return Ok(false);
            };
            match parse_reason_input(&answer) {
                Ok(reason) => {
                    session.request_erasure(&email, reason).await;
                }
                Err(e) => console.failure(&e.to_string()),
            }
        }
        MenuChoice::Verify => {
            session.verify(&email, DEFAULT_VERIFY_HOURS_BACK).await;
        }
        MenuChoice::FullDemo => {
            session.full_demo(&email).await;
        }
        MenuChoice::CustomerStatus => {
            session.status(&email).await;
        }
        MenuChoice::Dashboard | MenuChoice::ListRequests | MenuChoice::Exit => {}
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;
    use crate::cli::OutputFormat;
    use crate::commands::Console;
    use crate::gdpr::mock::ScriptedExecutor;
    use crate::gdpr::GdprService;
    use rtbf_core::warehouse::Binding;

    #[derive(Default)]
    struct ScriptedPrompter {
        selections: Mutex<VecDeque<Option<usize>>>,
        answers: Mutex<VecDeque<Option<String>>>,
    }

    impl ScriptedPrompter {
        fn new(selections: &[Option<usize>], answers: &[Option<&str>]) -> Self {
            Self {
                selections: Mutex::new(selections.iter().copied().collect()),
                answers: Mutex::new(answers.iter().map(|a| a.map(str::to_string)).collect()),
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        fn select(&self, _prompt: &str, _items: &[&str]) -> Result<Option<usize>> {
            Ok(self.selections.lock().unwrap().pop_front().flatten())
        }

        fn input(&self, _prompt: &str) -> Result<Option<String>> {
            Ok(self.answers.lock().unwrap().pop_front().flatten())
        }
    }

    fn session() -> Session<ScriptedExecutor> {
        Session::new(
            GdprService::new(ScriptedExecutor::new()),
            Console::new(OutputFormat::Json, true),
        )
    }

    #[test]
    fn test_menu_order() {
        assert_eq!(MenuChoice::from_index(0), Some(MenuChoice::Discover));
        assert_eq!(MenuChoice::from_index(6), Some(MenuChoice::ListRequests));
        assert_eq!(MenuChoice::from_index(7), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::from_index(8), None);
        assert!(MenuChoice::Exit.label().starts_with("0."));
    }

    #[tokio::test]
    async fn test_runs_actions_until_exit() {
        let session = session();
        let prompter = ScriptedPrompter::new(
            &[Some(0), Some(6), Some(7)],
            &[Some("anna.mueller@email.de")],
        );

        run(&session, &prompter).await.unwrap();

        let calls = session.service().executor().calls().await;
        assert_eq!(calls.len(), 2);
        assert!(calls[0].sql.contains("SP_DISCOVER_CUSTOMER_DATA"));
        assert!(calls[1].sql.contains("ERASURE_REQUESTS"));
    }

    #[tokio::test]
    async fn test_blank_reason_defaults_to_withdrawn_consent() {
        let session = session();
        let prompter = ScriptedPrompter::new(&[Some(1), Some(7)], &[Some("a@b.c"), Some("")]);

        run(&session, &prompter).await.unwrap();

        let calls = session.service().executor().calls().await;
        assert_eq!(calls[0].bindings[1], Binding::from("WITHDRAWN_CONSENT"));
    }

    #[tokio::test]
    async fn test_invalid_reason_skips_submission() {
        let session = session();
        let prompter =
            ScriptedPrompter::new(&[Some(1), Some(7)], &[Some("a@b.c"), Some("BORED")]);

        run(&session, &prompter).await.unwrap();

        assert!(session.service().executor().calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_empty_email_returns_to_menu() {
        let session = session();
        let prompter = ScriptedPrompter::new(&[Some(0), Some(2), Some(7)], &[Some(""), Some("")]);

        run(&session, &prompter).await.unwrap();

        assert!(session.service().executor().calls().await.is_empty());
        assert!(prompter.selections.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_prompt_ends_loop() {
        let session = session();
        let prompter = ScriptedPrompter::new(&[Some(3)], &[None]);

        run(&session, &prompter).await.unwrap();

        assert!(session.service().executor().calls().await.is_empty());
    }
}

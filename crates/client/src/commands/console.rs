//! Where command output goes.
//!
//! Pretty mode prints colored headings and results to stdout and failures to
//! stderr. JSON mode prints exactly one document per operation to stdout,
//! either the result or an error document, and nothing else.

use std::fmt::Display;

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::output::json::ErrorDocument;
use crate::output::style::{aeprintln, aprintln, banner_blue, banner_green, p_c, p_g, p_r, p_y};
use crate::output::{format_output, json};

#[derive(Debug, Clone, Copy)]
pub struct Console {
    format: OutputFormat,
    quiet: bool,
}

impl Console {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    fn is_pretty(&self) -> bool {
        self.format == OutputFormat::Pretty
    }

    /// Prints a banner bar. Suppressed by `--quiet`.
    pub fn banner(&self, text: &str) {
        if self.is_pretty() && !self.quiet {
            aprintln!("\n{}", banner_blue(text));
        }
    }

    pub fn completion_banner(&self, text: &str) {
        if self.is_pretty() && !self.quiet {
            aprintln!("\n{}", banner_green(text));
        }
    }

    pub fn rule(&self) {
        if self.is_pretty() && !self.quiet {
            aprintln!("{}", "=".repeat(70));
        }
    }

    pub fn heading(&self, text: &str) {
        if self.is_pretty() {
            aprintln!("\n{}", p_c(text));
        }
    }

    pub fn step(&self, text: &str) {
        if self.is_pretty() {
            aprintln!("\n{}", p_y(text));
        }
    }

    pub fn line(&self, text: &str) {
        if self.is_pretty() {
            aprintln!("{}", text);
        }
    }

    pub fn success(&self, text: &str) {
        if self.is_pretty() {
            aprintln!("{}", p_g(text));
        }
    }

    pub fn warning(&self, text: &str) {
        if self.is_pretty() {
            aprintln!("{}", p_y(text));
        }
    }

    /// Reports a failed check that is not an error, such as a procedure
    /// returning a failure message.
    pub fn failure(&self, text: &str) {
        if self.is_pretty() {
            aeprintln!("{}", p_r(text));
        }
    }

    /// Reports an operation that could not run.
    pub fn error(&self, operation: &str, context: &str, error: &dyn Display) {
        tracing::error!(operation, error = %error, "{}", context);
        match self.format {
            OutputFormat::Pretty => aeprintln!("{}", p_r(&format!("{}: {}", context, error))),
            OutputFormat::Json => aprintln!(
                "{}",
                json::format_json(&ErrorDocument {
                    operation,
                    error: error.to_string(),
                })
            ),
        }
    }

    /// Prints an operation's result: the pretty rendering, or the value as
    /// JSON.
    pub fn emit<T, F>(&self, value: &T, pretty: F)
    where
        T: Serialize,
        F: FnOnce() -> String,
    {
        match self.format {
            OutputFormat::Pretty => aprintln!("{}", pretty()),
            OutputFormat::Json => aprintln!("{}", format_output(value, self.format)),
        }
    }

    /// Prints a document in JSON mode only.
    pub fn document<T: Serialize>(&self, value: &T) {
        if self.format == OutputFormat::Json {
            aprintln!("{}", json::format_json(value));
        }
    }
}

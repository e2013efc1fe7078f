//! rtbf_client - GDPR right-to-be-forgotten workflow client for Snowflake.
//!
//! # Architecture
//!
//! This crate is the imperative shell around [`rtbf_core`]:
//!
//! - [`client`]: the Snowflake SQL API client, the production
//!   [`StatementExecutor`](rtbf_core::warehouse::StatementExecutor)
//! - [`gdpr`]: one method per stored procedure, function, or view
//! - [`commands`]: printing, the full demo scenario, and the interactive menu
//! - [`config`]: connection settings from the environment and prompts

pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod gdpr;
pub mod output;

pub use client::WarehouseClient;
pub use error::{ClientError, Result};

//! rtbf_core - Functional core for the right-to-be-forgotten warehouse client.
//!
//! Everything in this crate is pure: result-set modelling, parsing of the
//! messages returned by the erasure procedures, report summaries, and SQL
//! script splitting. All I/O lives in `rtbf_client` and `xtask`.

pub mod gdpr;
pub mod script;
pub mod serde;
pub mod warehouse;

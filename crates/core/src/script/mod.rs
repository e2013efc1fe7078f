//! SQL setup script handling.

mod context;
mod splitter;

pub use context::track_session_context;
pub use splitter::{is_executable, split_statements};

mod error;
mod statements;
mod traits;
mod types;

pub use error::{Result, WarehouseError};
pub use statements::{call_statement, placeholders, statement_preview};
pub use traits::StatementExecutor;
pub use types::{parse_bool, Binding, Column, ResultSet, Row, SessionContext};

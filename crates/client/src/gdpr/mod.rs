//! Erasure workflow calls against the warehouse.
//!
//! Every operation maps onto one stored procedure, function, or query owned
//! by the warehouse schema. This module only renders the call, binds the
//! arguments, and projects the result into the typed values from
//! [`rtbf_core::gdpr`].

mod compliance;
mod erasure;
#[cfg(test)]
pub(crate) mod mock;

use rtbf_core::gdpr::procedures::SP_DISCOVER_CUSTOMER_DATA;
use rtbf_core::warehouse::{call_statement, Binding, ResultSet, StatementExecutor};

use crate::error::Result;

/// The erasure workflow, generic over how statements are executed.
#[derive(Debug, Clone)]
pub struct GdprService<E> {
    executor: E,
}

impl<E: StatementExecutor> GdprService<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Lists every system, table, and column holding personal data for the
    /// customer.
    pub async fn discover_customer_data(&self, email: &str) -> Result<ResultSet> {
        let results = self
            .executor
            .execute(
                &call_statement(SP_DISCOVER_CUSTOMER_DATA, 1),
                &[Binding::from(email)],
            )
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Data discovery failed"))?;

        tracing::debug!(rows = results.len(), "Discovery returned");
        Ok(results)
    }
}

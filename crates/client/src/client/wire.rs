//! SQL API request and response bodies.
//!
//! See <https://docs.snowflake.com/en/developer-guide/sql-api/reference>.

use std::collections::BTreeMap;

use rtbf_core::warehouse::{Binding, Column, ResultSet, SessionContext};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/v2/statements`.
#[derive(Debug, Serialize)]
pub struct StatementRequest<'a> {
    pub statement: &'a str,
    /// Server-side timeout in seconds.
    pub timeout: u64,
    #[serde(flatten)]
    pub context: &'a SessionContext,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub bindings: BTreeMap<String, BindingValue>,
}

impl<'a> StatementRequest<'a> {
    pub fn new(
        statement: &'a str,
        bindings: &[Binding],
        context: &'a SessionContext,
        timeout: u64,
    ) -> Self {
        Self {
            statement,
            timeout,
            context,
            bindings: bindings
                .iter()
                .enumerate()
                .map(|(i, binding)| {
                    (
                        (i + 1).to_string(),
                        BindingValue {
                            binding_type: binding.type_name(),
                            value: binding.value(),
                        },
                    )
                })
                .collect(),
        }
    }
}

/// A positional binding, keyed by its 1-based index in the request.
#[derive(Debug, Serialize)]
pub struct BindingValue {
    #[serde(rename = "type")]
    pub binding_type: &'static str,
    pub value: String,
}

/// Response to a statement submission or status request.
///
/// Successful, running, and failed statements share this shape; which fields
/// are present depends on the HTTP status.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementResponse {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub sql_state: Option<String>,
    #[serde(default)]
    pub statement_handle: Option<String>,
    #[serde(default)]
    pub result_set_meta_data: Option<ResultSetMetaData>,
    #[serde(default)]
    pub data: Vec<Vec<Option<String>>>,
}

impl StatementResponse {
    /// Number of result partitions; the first one is inline in the response.
    pub fn partition_count(&self) -> usize {
        self.result_set_meta_data
            .as_ref()
            .map(|meta| meta.partition_info.len())
            .unwrap_or(0)
    }

    /// Converts the inline partition and any extra partitions into a result
    /// set.
    pub fn into_result_set(self, extra_partitions: Vec<Vec<Vec<Option<String>>>>) -> ResultSet {
        let columns = self
            .result_set_meta_data
            .map(|meta| meta.row_type.into_iter().map(Column::from).collect())
            .unwrap_or_default();
        let mut data = self.data;
        for partition in extra_partitions {
            data.extend(partition);
        }
        ResultSet::from_raw(columns, data)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSetMetaData {
    #[serde(default)]
    pub num_rows: u64,
    #[serde(default)]
    pub partition_info: Vec<PartitionInfo>,
    #[serde(default)]
    pub row_type: Vec<RowType>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartitionInfo {
    #[serde(default)]
    pub row_count: u64,
}

#[derive(Debug, Deserialize)]
pub struct RowType {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
    #[serde(default = "default_nullable")]
    pub nullable: bool,
}

fn default_nullable() -> bool {
    true
}

impl From<RowType> for Column {
    fn from(row_type: RowType) -> Self {
        Column {
            name: row_type.name,
            data_type: row_type.data_type,
            nullable: row_type.nullable,
        }
    }
}

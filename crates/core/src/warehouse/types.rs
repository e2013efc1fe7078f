use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Column metadata for a result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    /// Warehouse type name as reported by the server (e.g. `text`, `fixed`).
    #[serde(rename = "type")]
    pub data_type: String,
    pub nullable: bool,
}

impl Column {
    /// Creates a nullable column with the given name and type.
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            nullable: true,
        }
    }
}

/// A single result row. Cells keep the column order of the result set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: Vec<(String, Option<String>)>,
}

impl Row {
    /// Creates a row from `(column, value)` pairs.
    pub fn new(cells: Vec<(String, Option<String>)>) -> Self {
        Self { cells }
    }

    /// Returns the raw cells in column order.
    pub fn cells(&self) -> &[(String, Option<String>)] {
        &self.cells
    }

    /// Returns the value of a column, matching the name case-insensitively.
    ///
    /// Returns `None` both for unknown columns and for SQL `NULL`.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(column))
            .and_then(|(_, value)| value.as_deref())
    }

    /// Returns a column parsed as an integer.
    ///
    /// Integral decimals such as `"12.000"` are accepted since `NUMBER(38,3)`
    /// columns are rendered that way.
    pub fn get_i64(&self, column: &str) -> Option<i64> {
        let raw = self.get(column)?.trim();
        raw.parse::<i64>().ok().or_else(|| {
            raw.parse::<f64>()
                .ok()
                .filter(|v| v.fract() == 0.0)
                .map(|v| v as i64)
        })
    }

    /// Returns a column parsed as a float.
    pub fn get_f64(&self, column: &str) -> Option<f64> {
        self.get(column)?.trim().parse().ok()
    }

    /// Returns a column interpreted as a boolean. See [`parse_bool`].
    pub fn get_bool(&self, column: &str) -> bool {
        parse_bool(self.get(column))
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (name, value) in &self.cells {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Rows and column metadata returned by a statement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultSet {
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
}

impl ResultSet {
    /// Builds a result set from column metadata and positional row data.
    ///
    /// Short rows are padded with `NULL`; extra cells are dropped.
    pub fn from_raw(columns: Vec<Column>, data: Vec<Vec<Option<String>>>) -> Self {
        let rows = data
            .into_iter()
            .map(|values| {
                let mut values = values.into_iter();
                Row::new(
                    columns
                        .iter()
                        .map(|column| (column.name.clone(), values.next().flatten()))
                        .collect(),
                )
            })
            .collect();
        Self { columns, rows }
    }

    /// Returns true if the statement produced no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns the first row, if any.
    pub fn first_row(&self) -> Option<&Row> {
        self.rows.first()
    }

    /// Returns the first cell of the first row.
    ///
    /// Scalar procedures and functions return their value this way.
    pub fn first_scalar(&self) -> Option<&str> {
        self.first_row()
            .and_then(|row| row.cells().first())
            .and_then(|(_, value)| value.as_deref())
    }

    /// Returns the column names in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

/// A positional statement parameter bound to a `?` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    Text(String),
    Fixed(i64),
    Boolean(bool),
}

impl Binding {
    /// Returns the warehouse binding type name.
    pub fn type_name(&self) -> &'static str {
        match self {
            Binding::Text(_) => "TEXT",
            Binding::Fixed(_) => "FIXED",
            Binding::Boolean(_) => "BOOLEAN",
        }
    }

    /// Returns the value in its wire representation.
    pub fn value(&self) -> String {
        match self {
            Binding::Text(value) => value.clone(),
            Binding::Fixed(value) => value.to_string(),
            Binding::Boolean(value) => value.to_string(),
        }
    }
}

impl From<&str> for Binding {
    fn from(value: &str) -> Self {
        Binding::Text(value.to_string())
    }
}

impl From<String> for Binding {
    fn from(value: String) -> Self {
        Binding::Text(value)
    }
}

impl From<i64> for Binding {
    fn from(value: i64) -> Self {
        Binding::Fixed(value)
    }
}

impl From<u32> for Binding {
    fn from(value: u32) -> Self {
        Binding::Fixed(i64::from(value))
    }
}

impl From<bool> for Binding {
    fn from(value: bool) -> Self {
        Binding::Boolean(value)
    }
}

/// Session context a statement runs under.
///
/// Every SQL API request is its own session, so the context has to travel
/// with each statement instead of being set once with `USE`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warehouse: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
}

/// Interprets a warehouse boolean cell.
///
/// `true` (any case) and `1` are true; everything else, including `NULL`,
/// is false.
pub fn parse_bool(value: Option<&str>) -> bool {
    match value.map(str::trim) {
        Some(v) => v.eq_ignore_ascii_case("true") || v == "1",
        None => false,
    }
}

//! Named record tables.
//!
//! A table is a list of rows addressed by column name. Values are kept as
//! the raw export text; typing happens when rows are converted to domain
//! records.

use serde::{Deserialize, Serialize};

use crate::error::{EdmError, Result};

/// A table of text cells with named columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordTable {
    /// Entity-type tag (e.g. `TASK`, `PROJWBS`).
    pub name: String,
    /// Column names in export order.
    pub columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// A borrowed row of a [`RecordTable`].
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    table: &'a RecordTable,
    values: &'a [String],
}

impl RecordTable {
    /// Creates an empty table with the given columns.
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Appends a row, padding short rows with empty cells and dropping
    /// cells beyond the last column.
    pub fn push_row(&mut self, mut values: Vec<String>) {
        values.resize(self.columns.len(), String::new());
        self.rows.push(values);
    }

    /// Adds a row given as `(column, value)` pairs; unknown columns are ignored.
    pub fn with_row(mut self, cells: &[(&str, &str)]) -> Self {
        let mut values = vec![String::new(); self.columns.len()];
        for (column, value) in cells {
            if let Some(idx) = self.column_index(column) {
                values[idx] = (*value).to_string();
            }
        }
        self.rows.push(values);
        self
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column, if present.
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Whether the table has a column.
    pub fn has_column(&self, column: &str) -> bool {
        self.column_index(column).is_some()
    }

    /// Fails with a schema error naming the first missing column.
    pub fn require_columns<'c>(&self, columns: impl IntoIterator<Item = &'c str>) -> Result<()> {
        for column in columns {
            if !self.has_column(column) {
                return Err(EdmError::schema(&self.name, column));
            }
        }
        Ok(())
    }

    /// Iterates rows in export order.
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows.iter().map(move |values| Record {
            table: self,
            values: values.as_slice(),
        })
    }

    /// First row, if any.
    pub fn first(&self) -> Option<Record<'_>> {
        self.records().next()
    }

    /// A new table holding the rows that satisfy `keep`.
    pub fn filtered(&self, mut keep: impl FnMut(&Record<'_>) -> bool) -> RecordTable {
        let rows = self
            .records()
            .filter(|r| keep(r))
            .map(|r| r.values.to_vec())
            .collect();
        RecordTable {
            name: self.name.clone(),
            columns: self.columns.clone(),
            rows,
        }
    }
}

impl<'a> Record<'a> {
    /// Cell text for `column`; `None` if the table has no such column.
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let idx = self.table.column_index(column)?;
        self.values.get(idx).map(String::as_str)
    }

    /// Cell text for `column`, empty when the column is absent.
    pub fn text(&self, column: &str) -> &'a str {
        self.get(column).unwrap_or("")
    }

    /// Non-empty cell text for `column`.
    pub fn non_empty(&self, column: &str) -> Option<&'a str> {
        self.get(column).filter(|v| !v.trim().is_empty())
    }

    /// `(column, value)` pairs in column order.
    pub fn cells(&self) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.table
            .columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(String::as_str))
    }

    /// Owning table's name.
    pub fn table_name(&self) -> &'a str {
        &self.table.name
    }
}

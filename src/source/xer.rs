//! Primavera P6 XER table extractor.
//!
//! An XER export is tab-separated text. Each line starts with a marker:
//!
//! | Marker | Meaning |
//! |--------|---------|
//! | `ERMHDR` | File header (ignored) |
//! | `%T` | Start of a table; second cell is the table name |
//! | `%F` | Field names of the current table |
//! | `%R` | One row of the current table |
//! | `%E` | End of file |
//!
//! Exports are written in ISO-8859-1; [`XerDocument::from_latin1`] decodes
//! raw bytes accordingly.

use chrono::NaiveDateTime;
use std::collections::BTreeMap;

use super::RecordTable;
use crate::error::{EdmError, Result};
use crate::models::parse_date;

/// Project table holding the data date.
pub const PROJECT_TABLE: &str = "PROJECT";
/// Data-date column of the project table.
pub const DATA_DATE_COLUMN: &str = "last_recalc_date";

/// All tables of one XER export, by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XerDocument {
    tables: BTreeMap<String, RecordTable>,
}

impl XerDocument {
    /// Decodes ISO-8859-1 bytes and parses them.
    pub fn from_latin1(bytes: &[u8]) -> Result<Self> {
        let text: String = bytes.iter().map(|&b| char::from(b)).collect();
        Self::parse(&text)
    }

    /// Parses XER text.
    ///
    /// # Errors
    /// `MalformedXer` when a field or row line appears outside a table,
    /// or a row appears before its table's field line.
    pub fn parse(text: &str) -> Result<Self> {
        let mut tables = BTreeMap::new();
        let mut current: Option<(String, Option<RecordTable>)> = None;

        for (line_no, raw) in text.lines().enumerate() {
            let line = raw.trim_end_matches('\r');
            let mut cells = line.split('\t');
            match cells.next() {
                Some("%T") => {
                    if let Some((_, Some(table))) = current.take() {
                        tables.insert(table.name.clone(), table);
                    }
                    let name = cells.next().map(str::trim).unwrap_or_default();
                    if name.is_empty() {
                        return Err(EdmError::MalformedXer(format!(
                            "line {}: table marker without a name",
                            line_no + 1
                        )));
                    }
                    current = Some((name.to_string(), None));
                }
                Some("%F") => {
                    let Some((name, table)) = current.as_mut() else {
                        return Err(EdmError::MalformedXer(format!(
                            "line {}: field list outside a table",
                            line_no + 1
                        )));
                    };
                    let columns = cells.map(|c| c.trim().to_string()).collect();
                    *table = Some(RecordTable::new(name.clone(), columns));
                }
                Some("%R") => {
                    let Some((name, Some(table))) = current.as_mut() else {
                        return Err(EdmError::MalformedXer(format!(
                            "line {}: row before field list",
                            line_no + 1
                        )));
                    };
                    log::trace!("{name}: row at line {}", line_no + 1);
                    table.push_row(cells.map(str::to_string).collect());
                }
                Some("%E") => break,
                _ => {}
            }
        }

        if let Some((_, Some(table))) = current.take() {
            tables.insert(table.name.clone(), table);
        }

        log::debug!("parsed XER with {} tables", tables.len());
        Ok(Self { tables })
    }

    /// Adds or replaces a table.
    pub fn with_table(mut self, table: RecordTable) -> Self {
        self.tables.insert(table.name.clone(), table);
        self
    }

    /// Looks up a table by name.
    pub fn table(&self, name: &str) -> Option<&RecordTable> {
        self.tables.get(name)
    }

    /// Looks up a table that must exist.
    pub fn require_table(&self, name: &str) -> Result<&RecordTable> {
        self.table(name).ok_or_else(|| EdmError::missing_table(name))
    }

    /// Table names, sorted.
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// The export's data date (`PROJECT.last_recalc_date`, first row).
    pub fn data_date(&self) -> Result<NaiveDateTime> {
        let project = self.require_table(PROJECT_TABLE)?;
        project.require_columns([DATA_DATE_COLUMN])?;
        let raw = project
            .first()
            .map(|r| r.text(DATA_DATE_COLUMN))
            .unwrap_or_default();
        let invalid = || EdmError::InvalidDate {
            table: PROJECT_TABLE.into(),
            field: DATA_DATE_COLUMN.into(),
            value: raw.to_string(),
        };
        parse_date(raw).map_err(|_| invalid())?.ok_or_else(invalid)
    }
}

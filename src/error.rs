//! Error types.
//!
//! Only table-level problems are errors. Row-level anomalies (a missing
//! date on one activity, a zero-length interval) are recovered locally and
//! recorded as [`Diagnostic`](crate::models::Diagnostic)s instead.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, EdmError>;

/// Fatal errors surfaced to the caller.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EdmError {
    /// A required field is absent from an entire table.
    #[error("table `{table}` is missing required field `{field}`")]
    Schema {
        /// Table (or row type) name.
        table: String,
        /// Missing field name.
        field: String,
    },

    /// A required table is absent from an export.
    #[error("table `{table}` not found")]
    MissingTable {
        /// Table name.
        table: String,
    },

    /// A non-empty date cell could not be parsed.
    #[error("invalid date `{value}` in field `{field}` of table `{table}`")]
    InvalidDate {
        /// Table name.
        table: String,
        /// Column name.
        field: String,
        /// Raw cell text.
        value: String,
    },

    /// A status code outside the known set.
    #[error("unknown activity status `{value}`")]
    UnknownStatus {
        /// Raw status text.
        value: String,
    },

    /// An activity code type name that does not exist.
    #[error("unknown activity code type `{name}`")]
    UnknownCodeType {
        /// Requested code type name.
        name: String,
    },

    /// Structural problem in an XER export.
    #[error("malformed XER: {0}")]
    MalformedXer(String),

    /// Configuration could not be decoded.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl EdmError {
    pub(crate) fn schema(table: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Schema {
            table: table.into(),
            field: field.into(),
        }
    }

    pub(crate) fn missing_table(table: impl Into<String>) -> Self {
        Self::MissingTable {
            table: table.into(),
        }
    }
}

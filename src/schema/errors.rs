//! Schema descriptor error types
//!
//! Error codes:
//! - TD_INVALID_SCHEMA (REJECT)
//! - TD_INDEX_OUT_OF_RANGE (REJECT)
//! - TD_NAME_NOT_FOUND (REJECT)
//!
//! All descriptor errors are contract violations by the caller. They are
//! reported at the offending call and never retried.

use std::fmt;

use thiserror::Error;

/// Severity levels for descriptor and catalog errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Caller request rejected, nothing was produced
    Reject,
    /// The embedding engine cannot continue (unreadable catalog)
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Stable error codes for descriptor operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// Empty schema or mismatched type/name sequences
    InvalidSchema,
    /// Positional access outside `[0, field_count)`
    IndexOutOfRange,
    /// Name lookup with an absent or unmatched name
    NameNotFound,
}

impl SchemaErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::InvalidSchema => "TD_INVALID_SCHEMA",
            SchemaErrorCode::IndexOutOfRange => "TD_INDEX_OUT_OF_RANGE",
            SchemaErrorCode::NameNotFound => "TD_NAME_NOT_FOUND",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        Severity::Reject
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors raised by [`TupleDesc`](super::TupleDesc) construction and lookup
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("invalid schema: {reason}")]
    InvalidSchema { reason: String },

    #[error("field index {index} out of range for descriptor with {field_count} fields")]
    IndexOutOfRange { index: usize, field_count: usize },

    #[error("no field named {}", display_name(.name))]
    NameNotFound { name: Option<String> },
}

fn display_name(name: &Option<String>) -> String {
    match name {
        Some(n) => format!("'{}'", n),
        None => "<absent>".to_string(),
    }
}

impl SchemaError {
    /// Create an invalid schema error
    pub fn invalid_schema(reason: impl Into<String>) -> Self {
        SchemaError::InvalidSchema {
            reason: reason.into(),
        }
    }

    /// Create an index out of range error
    pub fn index_out_of_range(index: usize, field_count: usize) -> Self {
        SchemaError::IndexOutOfRange { index, field_count }
    }

    /// Create a name not found error
    pub fn name_not_found(name: Option<&str>) -> Self {
        SchemaError::NameNotFound {
            name: name.map(str::to_string),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> SchemaErrorCode {
        match self {
            SchemaError::InvalidSchema { .. } => SchemaErrorCode::InvalidSchema,
            SchemaError::IndexOutOfRange { .. } => SchemaErrorCode::IndexOutOfRange,
            SchemaError::NameNotFound { .. } => SchemaErrorCode::NameNotFound,
        }
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code().severity()
    }
}

/// Result type for descriptor operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised by the descriptor catalog and its configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("table '{0}' already has a descriptor")]
    DuplicateTable(String),

    #[error("table '{0}' not found")]
    UnknownTable(String),

    #[error("invalid table name '{0}'")]
    InvalidTableName(String),

    #[error("malformed descriptor file '{path}': {reason}")]
    Malformed { path: String, reason: String },

    #[error("I/O error on '{path}': {reason}")]
    Io { path: String, reason: String },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl CatalogError {
    pub fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        CatalogError::Malformed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<String>, reason: impl Into<String>) -> Self {
        CatalogError::Io {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn config(reason: impl Into<String>) -> Self {
        CatalogError::Config(reason.into())
    }

    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            CatalogError::DuplicateTable(_) => "TD_CATALOG_DUPLICATE_TABLE",
            CatalogError::UnknownTable(_) => "TD_CATALOG_UNKNOWN_TABLE",
            CatalogError::InvalidTableName(_) => "TD_CATALOG_INVALID_TABLE_NAME",
            CatalogError::Malformed { .. } => "TD_CATALOG_MALFORMED",
            CatalogError::Io { .. } => "TD_CATALOG_IO",
            CatalogError::Config(_) => "TD_CONFIG_INVALID",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            CatalogError::Malformed { .. } | CatalogError::Io { .. } | CatalogError::Config(_) => {
                Severity::Fatal
            }
            _ => Severity::Reject,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

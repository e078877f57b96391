//! Error types for WideCell
//!
//! Provides a unified error type for codec, table and scenario operations.

use thiserror::Error;

/// Result type alias using WideCellError
pub type Result<T> = std::result::Result<T, WideCellError>;

/// Unified error type for WideCell operations
#[derive(Debug, Error)]
pub enum WideCellError {
    // -------------------------------------------------------------------------
    // Codec Errors
    // -------------------------------------------------------------------------
    #[error("Invalid {kind} encoding: expected {expected} bytes, got {actual}")]
    InvalidLength {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid boolean encoding: 0x{0:02x}")]
    InvalidBoolean(u8),

    #[error("Integer overflow: {0} does not fit in a signed 64-bit integer")]
    IntegerOverflow(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid UTF-8 in text cell: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid row key: {0}")]
    InvalidRowKey(String),

    // -------------------------------------------------------------------------
    // Table Errors
    // -------------------------------------------------------------------------
    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Table already exists: {0}")]
    TableExists(String),

    #[error("Column family not found: {0}")]
    ColumnFamilyNotFound(String),

    #[error("Duplicate column family: {0}")]
    DuplicateColumnFamily(String),

    #[error("Invalid GC rule: {0}")]
    InvalidGcRule(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // Scenario Errors
    // -------------------------------------------------------------------------
    #[error("Assertion failed: {0}")]
    Assertion(String),
}

impl From<bincode::Error> for WideCellError {
    fn from(err: bincode::Error) -> Self {
        WideCellError::Serialization(err.to_string())
    }
}

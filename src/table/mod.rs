//! Table Module
//!
//! In-process emulator of a wide-column table service.
//!
//! ## Responsibilities
//! - Table lifecycle: create, exists, truncate, delete
//! - Column families with a max-versions GC rule
//! - Atomic per-row mutations through `DirectRow`
//! - Point reads and ordered row-set reads
//!
//! ## Data Layout
//! ```text
//! Instance
//!   └── tables: table_id → TableState (RwLock)
//!         ├── families: name → ColumnFamily
//!         └── rows: row_key → family → qualifier → [Cell] (newest first)
//! ```
//!
//! A row exists only while it holds at least one cell. Everything lives
//! in memory; there is no persistence.

mod instance;
mod row;
mod row_set;
mod table;

use bytes::Bytes;

use crate::error::{Result, WideCellError};

pub use instance::Instance;
pub use row::{DirectRow, Row};
pub use row_set::RowSet;
pub use table::Table;

/// Garbage-collection policy for a column family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GcRule {
    /// Keep at most N versions of each cell
    MaxVersions(usize),
}

impl GcRule {
    pub fn max_versions(self) -> usize {
        match self {
            GcRule::MaxVersions(n) => n,
        }
    }

    pub(crate) fn validate(self) -> Result<()> {
        match self {
            GcRule::MaxVersions(0) => Err(WideCellError::InvalidGcRule(
                "max versions must be at least 1".to_string(),
            )),
            GcRule::MaxVersions(_) => Ok(()),
        }
    }
}

/// A named group of columns sharing one GC rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnFamily {
    name: String,
    gc_rule: GcRule,
}

impl ColumnFamily {
    pub fn new(name: impl Into<String>, gc_rule: GcRule) -> Self {
        Self {
            name: name.into(),
            gc_rule,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn gc_rule(&self) -> GcRule {
        self.gc_rule
    }
}

/// One timestamped version of a cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Commit time in Unix epoch microseconds
    pub timestamp_micros: i64,

    pub value: Bytes,
}

//! Emulated table
//!
//! Each table's state sits behind one RwLock:
//! - Reads (`read_row`, `read_rows`) take the read lock
//! - Commits and lifecycle calls take the write lock
//!
//! Rows are kept in a BTreeMap so row-set reads come back in key order.

use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use parking_lot::RwLock;

use super::row::{DirectRow, Mutation, Row};
use super::row_set::RowSet;
use super::{Cell, ColumnFamily};
use crate::error::{Result, WideCellError};

/// Shared map of table id to table state
pub(crate) type Registry = Arc<RwLock<HashMap<String, Arc<RwLock<TableState>>>>>;

/// family → qualifier → versions (newest first)
pub(crate) type StoredRow = BTreeMap<String, BTreeMap<Bytes, Vec<Cell>>>;

/// State of one existing table
pub(crate) struct TableState {
    families: BTreeMap<String, ColumnFamily>,
    rows: BTreeMap<Vec<u8>, StoredRow>,

    /// Last timestamp handed out; commit timestamps strictly increase
    last_timestamp_micros: i64,
}

impl TableState {
    fn next_timestamp(&mut self) -> i64 {
        let now = Utc::now().timestamp_micros();
        self.last_timestamp_micros = now.max(self.last_timestamp_micros + 1);
        self.last_timestamp_micros
    }
}

/// Handle to a (possibly not yet created) table
#[derive(Clone)]
pub struct Table {
    table_id: String,
    registry: Registry,
}

impl Table {
    pub(crate) fn new(table_id: String, registry: Registry) -> Self {
        Self { table_id, registry }
    }

    pub fn table_id(&self) -> &str {
        &self.table_id
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    pub fn exists(&self) -> bool {
        self.registry.read().contains_key(&self.table_id)
    }

    /// Create the table with the given column families
    ///
    /// Fails if the table already exists, a family name repeats, or a GC
    /// rule is invalid.
    pub fn create(&self, column_families: impl IntoIterator<Item = ColumnFamily>) -> Result<()> {
        let mut families = BTreeMap::new();
        for family in column_families {
            family.gc_rule().validate()?;
            let name = family.name().to_string();
            if families.contains_key(&name) {
                return Err(WideCellError::DuplicateColumnFamily(name));
            }
            families.insert(name, family);
        }

        let mut registry = self.registry.write();
        if registry.contains_key(&self.table_id) {
            return Err(WideCellError::TableExists(self.table_id.clone()));
        }

        tracing::info!(
            "Creating table {} with families {:?}",
            self.table_id,
            families.keys().collect::<Vec<_>>()
        );

        registry.insert(
            self.table_id.clone(),
            Arc::new(RwLock::new(TableState {
                families,
                rows: BTreeMap::new(),
                last_timestamp_micros: 0,
            })),
        );
        Ok(())
    }

    /// Column families of the table, sorted by name
    pub fn column_families(&self) -> Result<Vec<ColumnFamily>> {
        let state = self.state()?;
        let state = state.read();
        Ok(state.families.values().cloned().collect())
    }

    /// Drop every row, keeping the column families
    pub fn truncate(&self) -> Result<()> {
        let state = self.state()?;
        let mut state = state.write();
        tracing::info!("Truncating table {} ({} rows)", self.table_id, state.rows.len());
        state.rows.clear();
        Ok(())
    }

    /// Remove the table from its instance
    pub fn delete(&self) -> Result<()> {
        match self.registry.write().remove(&self.table_id) {
            Some(_) => {
                tracing::info!("Deleted table {}", self.table_id);
                Ok(())
            }
            None => Err(WideCellError::TableNotFound(self.table_id.clone())),
        }
    }

    // =========================================================================
    // Rows
    // =========================================================================

    /// Start a batch of mutations against one row
    pub fn direct_row(&self, row_key: impl AsRef<[u8]>) -> DirectRow {
        DirectRow::new(self.clone(), row_key.as_ref().to_vec())
    }

    /// Read a single row, or `None` if it holds no cells
    pub fn read_row(&self, row_key: impl AsRef<[u8]>) -> Result<Option<Row>> {
        let state = self.state()?;
        let state = state.read();
        let row_key = row_key.as_ref();

        let row = state
            .rows
            .get(row_key)
            .map(|cells| Row::new(row_key.to_vec(), cells.clone()));

        tracing::debug!(
            "read_row {} -> {}",
            String::from_utf8_lossy(row_key),
            if row.is_some() { "hit" } else { "miss" }
        );
        Ok(row)
    }

    /// Read rows in ascending key order
    ///
    /// `None` reads the whole table. An empty row set selects nothing.
    pub fn read_rows(&self, row_set: Option<&RowSet>) -> Result<Vec<Row>> {
        let state = self.state()?;
        let state = state.read();

        let rows: Vec<Row> = match row_set {
            None => state
                .rows
                .iter()
                .map(|(key, cells)| Row::new(key.clone(), cells.clone()))
                .collect(),
            Some(row_set) => {
                let mut selected: BTreeMap<&Vec<u8>, &StoredRow> = BTreeMap::new();

                for key in row_set.row_keys() {
                    if let Some((key, cells)) = state.rows.get_key_value(key.as_slice()) {
                        selected.insert(key, cells);
                    }
                }

                for range in row_set.row_ranges() {
                    if range.is_empty() {
                        continue;
                    }
                    let upper = match range.end() {
                        Some(end) => Bound::Excluded(end),
                        None => Bound::Unbounded,
                    };
                    let bounds = (Bound::Included(range.start()), upper);
                    for (key, cells) in state.rows.range::<[u8], _>(bounds) {
                        selected.insert(key, cells);
                    }
                }

                selected
                    .into_iter()
                    .map(|(key, cells)| Row::new(key.clone(), cells.clone()))
                    .collect()
            }
        };

        tracing::debug!("read_rows on {} -> {} rows", self.table_id, rows.len());
        Ok(rows)
    }

    /// Number of rows currently holding cells
    pub fn row_count(&self) -> Result<usize> {
        let state = self.state()?;
        let count = state.read().rows.len();
        Ok(count)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn state(&self) -> Result<Arc<RwLock<TableState>>> {
        self.registry
            .read()
            .get(&self.table_id)
            .cloned()
            .ok_or_else(|| WideCellError::TableNotFound(self.table_id.clone()))
    }

    /// Apply one row's mutations atomically
    ///
    /// Every family is checked before anything is written, so a bad
    /// family leaves the row untouched.
    pub(crate) fn apply(&self, row_key: &[u8], mutations: &[Mutation]) -> Result<()> {
        let state = self.state()?;
        let mut guard = state.write();

        for mutation in mutations {
            if let Some(family) = mutation.family() {
                if !guard.families.contains_key(family) {
                    return Err(WideCellError::ColumnFamilyNotFound(family.to_string()));
                }
            }
        }

        let timestamp_micros = guard.next_timestamp();
        let state = &mut *guard;
        let families = &state.families;
        let row = state.rows.entry(row_key.to_vec()).or_default();

        for mutation in mutations {
            match mutation {
                Mutation::SetCell {
                    family,
                    qualifier,
                    value,
                } => {
                    let max_versions = families
                        .get(family)
                        .map(|f| f.gc_rule().max_versions())
                        .unwrap_or(1);
                    let versions = row
                        .entry(family.clone())
                        .or_default()
                        .entry(qualifier.clone())
                        .or_default();

                    let cell = Cell {
                        timestamp_micros,
                        value: value.clone(),
                    };
                    // Same commit wrote this cell already; last write wins
                    let same_commit = versions
                        .first()
                        .map_or(false, |newest| newest.timestamp_micros == timestamp_micros);
                    if same_commit {
                        versions[0] = cell;
                    } else {
                        versions.insert(0, cell);
                    }
                    versions.truncate(max_versions);
                }
                Mutation::DeleteCell { family, qualifier } => {
                    if let Some(columns) = row.get_mut(family) {
                        columns.remove(&qualifier[..]);
                    }
                }
                Mutation::DeleteRow => row.clear(),
            }
        }

        row.retain(|_, columns| !columns.is_empty());
        let now_empty = row.is_empty();
        if now_empty {
            state.rows.remove(row_key);
        }

        tracing::debug!(
            "Committed {} mutations to {}/{}",
            mutations.len(),
            self.table_id,
            String::from_utf8_lossy(row_key)
        );
        Ok(())
    }
}

//! Row mutations and row read results

use bytes::Bytes;

use super::table::{StoredRow, Table};
use super::Cell;
use crate::codec::CellValue;
use crate::error::Result;

/// A single buffered change to a row
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Mutation {
    SetCell {
        family: String,
        qualifier: Bytes,
        value: Bytes,
    },
    DeleteCell {
        family: String,
        qualifier: Bytes,
    },
    DeleteRow,
}

impl Mutation {
    /// Column family the mutation touches, if any
    pub(crate) fn family(&self) -> Option<&str> {
        match self {
            Mutation::SetCell { family, .. } | Mutation::DeleteCell { family, .. } => Some(family.as_str()),
            Mutation::DeleteRow => None,
        }
    }
}

// =============================================================================
// DirectRow
// =============================================================================

/// Mutations buffered against one row, applied together on `commit`
pub struct DirectRow {
    table: Table,
    row_key: Vec<u8>,
    mutations: Vec<Mutation>,
}

impl DirectRow {
    pub(crate) fn new(table: Table, row_key: Vec<u8>) -> Self {
        Self {
            table,
            row_key,
            mutations: Vec::new(),
        }
    }

    pub fn row_key(&self) -> &[u8] {
        &self.row_key
    }

    /// Number of mutations waiting for `commit`
    pub fn pending(&self) -> usize {
        self.mutations.len()
    }

    /// Write raw bytes to a cell
    pub fn set_cell(
        &mut self,
        family: &str,
        qualifier: impl AsRef<[u8]>,
        value: impl AsRef<[u8]>,
    ) -> &mut Self {
        self.mutations.push(Mutation::SetCell {
            family: family.to_string(),
            qualifier: Bytes::copy_from_slice(qualifier.as_ref()),
            value: Bytes::copy_from_slice(value.as_ref()),
        });
        self
    }

    /// Encode a typed value and write it to a cell
    pub fn set_value<T: CellValue>(
        &mut self,
        family: &str,
        qualifier: impl AsRef<[u8]>,
        value: &T,
    ) -> Result<&mut Self> {
        let encoded = value.to_cell()?;
        Ok(self.set_cell(family, qualifier, encoded))
    }

    /// Remove every version of a cell
    pub fn delete_cell(&mut self, family: &str, qualifier: impl AsRef<[u8]>) -> &mut Self {
        self.mutations.push(Mutation::DeleteCell {
            family: family.to_string(),
            qualifier: Bytes::copy_from_slice(qualifier.as_ref()),
        });
        self
    }

    /// Remove the whole row
    pub fn delete(&mut self) -> &mut Self {
        self.mutations.push(Mutation::DeleteRow);
        self
    }

    /// Apply all buffered mutations atomically
    ///
    /// On success the buffer is cleared. On failure nothing is written and
    /// the buffer is kept.
    pub fn commit(&mut self) -> Result<()> {
        if self.mutations.is_empty() {
            return Ok(());
        }

        self.table.apply(&self.row_key, &self.mutations)?;
        self.mutations.clear();
        Ok(())
    }
}

// =============================================================================
// Row
// =============================================================================

/// Snapshot of a row returned by a read
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    row_key: Vec<u8>,
    cells: StoredRow,
}

impl Row {
    pub(crate) fn new(row_key: Vec<u8>, cells: StoredRow) -> Self {
        Self { row_key, cells }
    }

    pub fn row_key(&self) -> &[u8] {
        &self.row_key
    }

    /// Row key as text, if it is valid UTF-8
    pub fn row_key_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.row_key).ok()
    }

    /// Names of the families holding cells in this row
    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    /// Retained versions of a cell, newest first
    pub fn cells(&self, family: &str, qualifier: impl AsRef<[u8]>) -> &[Cell] {
        self.cells
            .get(family)
            .and_then(|columns| columns.get(qualifier.as_ref()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Latest value of a cell
    pub fn cell_value(&self, family: &str, qualifier: impl AsRef<[u8]>) -> Option<&[u8]> {
        self.cells(family, qualifier)
            .first()
            .map(|cell| &cell.value[..])
    }

    /// Decode the latest value of a cell
    pub fn decode<T: CellValue>(&self, family: &str, qualifier: impl AsRef<[u8]>) -> Result<Option<T>> {
        self.cell_value(family, qualifier)
            .map(T::from_cell)
            .transpose()
    }

    /// Number of distinct cells (not versions) in the row
    pub fn cell_count(&self) -> usize {
        self.cells.values().map(|columns| columns.len()).sum()
    }
}

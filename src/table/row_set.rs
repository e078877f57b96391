//! Row selection for multi-row reads

use std::collections::BTreeSet;

use crate::codec::{make_prefix_range, KeyRange};

/// Union of explicit row keys and key ranges
#[derive(Debug, Clone, Default)]
pub struct RowSet {
    row_keys: BTreeSet<Vec<u8>>,
    row_ranges: Vec<KeyRange>,
}

impl RowSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Row set covering every `<id>#...` key of one id
    pub fn for_id(id: impl AsRef<[u8]>) -> Self {
        let mut row_set = Self::new();
        row_set.add_row_range(make_prefix_range(id));
        row_set
    }

    pub fn add_row_key(&mut self, row_key: impl AsRef<[u8]>) -> &mut Self {
        self.row_keys.insert(row_key.as_ref().to_vec());
        self
    }

    pub fn add_row_range(&mut self, range: KeyRange) -> &mut Self {
        self.row_ranges.push(range);
        self
    }

    /// Add a range over every key starting with the raw `prefix`
    pub fn add_row_range_with_prefix(&mut self, prefix: impl AsRef<[u8]>) -> &mut Self {
        self.add_row_range(KeyRange::with_prefix(prefix))
    }

    pub fn row_keys(&self) -> impl Iterator<Item = &Vec<u8>> {
        self.row_keys.iter()
    }

    pub fn row_ranges(&self) -> &[KeyRange] {
        &self.row_ranges
    }

    /// True if `key` is selected by any key or range
    pub fn contains(&self, key: &[u8]) -> bool {
        self.row_keys.contains(key) || self.row_ranges.iter().any(|range| range.contains(key))
    }

    pub fn is_empty(&self) -> bool {
        self.row_keys.is_empty() && self.row_ranges.is_empty()
    }
}

//! Row keys and key ranges
//!
//! ## Row Key Layout
//! ```text
//! ┌──────────────┬─────┬──────────────┐
//! │      id      │  #  │   sequence   │
//! └──────────────┴─────┴──────────────┘
//! ```
//!
//! Rows of one id are contiguous in byte order, so they can be selected
//! with the half-open range `[id#, id$)`, where `$` is the byte after `#`.

use std::fmt;

use crate::error::{Result, WideCellError};

/// Separates the id from the sequence in a row key
pub const KEY_SEPARATOR: u8 = b'#';

// =============================================================================
// RowKey
// =============================================================================

/// A structured `<id>#<sequence>` row key
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowKey {
    bytes: Vec<u8>,

    /// Index of the separator within `bytes`
    separator: usize,
}

impl RowKey {
    /// Build a key from an id and a numeric sequence
    ///
    /// The id must be non-empty and must not contain the separator.
    pub fn new(id: impl AsRef<[u8]>, sequence: u64) -> Result<Self> {
        let id = id.as_ref();
        if id.is_empty() {
            return Err(WideCellError::InvalidRowKey("empty id".to_string()));
        }
        if id.contains(&KEY_SEPARATOR) {
            return Err(WideCellError::InvalidRowKey(format!(
                "id {:?} contains the separator",
                String::from_utf8_lossy(id)
            )));
        }

        let sequence = sequence.to_string();
        let mut bytes = Vec::with_capacity(id.len() + 1 + sequence.len());
        bytes.extend_from_slice(id);
        bytes.push(KEY_SEPARATOR);
        bytes.extend_from_slice(sequence.as_bytes());

        Ok(Self {
            bytes,
            separator: id.len(),
        })
    }

    /// Parse a raw key, splitting at the first separator
    ///
    /// Both the id and the sequence must be non-empty.
    pub fn parse(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = bytes.into();
        let separator = bytes
            .iter()
            .position(|&b| b == KEY_SEPARATOR)
            .ok_or_else(|| {
                WideCellError::InvalidRowKey(format!(
                    "{:?} has no separator",
                    String::from_utf8_lossy(&bytes)
                ))
            })?;

        if separator == 0 || separator + 1 == bytes.len() {
            return Err(WideCellError::InvalidRowKey(format!(
                "{:?} has an empty id or sequence",
                String::from_utf8_lossy(&bytes)
            )));
        }

        Ok(Self { bytes, separator })
    }

    /// The id portion, before the separator
    pub fn id(&self) -> &[u8] {
        &self.bytes[..self.separator]
    }

    /// The sequence portion, after the separator
    pub fn sequence(&self) -> &[u8] {
        &self.bytes[self.separator + 1..]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl AsRef<[u8]> for RowKey {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.bytes))
    }
}

// =============================================================================
// KeyRange
// =============================================================================

/// Half-open byte range `[start, end)`; `end == None` means unbounded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRange {
    start: Vec<u8>,
    end: Option<Vec<u8>>,
}

impl KeyRange {
    pub fn new(start: impl Into<Vec<u8>>, end: Option<Vec<u8>>) -> Self {
        Self {
            start: start.into(),
            end,
        }
    }

    /// Range of every key starting with the raw `prefix`
    pub fn with_prefix(prefix: impl AsRef<[u8]>) -> Self {
        let start = prefix.as_ref().to_vec();
        let end = prefix_successor(&start);
        Self { start, end }
    }

    /// Inclusive lower bound
    pub fn start(&self) -> &[u8] {
        &self.start
    }

    /// Exclusive upper bound
    pub fn end(&self) -> Option<&[u8]> {
        self.end.as_deref()
    }

    pub fn contains(&self, key: &[u8]) -> bool {
        key >= self.start.as_slice() && self.end.as_deref().map_or(true, |end| key < end)
    }

    /// True if no key can fall inside the range
    pub fn is_empty(&self) -> bool {
        self.end
            .as_deref()
            .map_or(false, |end| end <= self.start.as_slice())
    }
}

/// Range selecting every row key of the form `<prefix>#...`
pub fn make_prefix_range(prefix: impl AsRef<[u8]>) -> KeyRange {
    let mut start = prefix.as_ref().to_vec();
    start.push(KEY_SEPARATOR);
    KeyRange::with_prefix(start)
}

/// Smallest byte string greater than every string starting with `prefix`
///
/// Trailing 0xFF bytes are dropped and the last remaining byte is
/// incremented. Returns `None` when no such bound exists (empty prefix or
/// all 0xFF), meaning the range is unbounded above.
pub fn prefix_successor(prefix: &[u8]) -> Option<Vec<u8>> {
    let mut end = prefix.to_vec();
    while let Some(last) = end.pop() {
        if last < u8::MAX {
            end.push(last + 1);
            return Some(end);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_range_bounds() {
        let range = make_prefix_range("123");
        assert_eq!(range.start(), b"123#");
        assert_eq!(range.end(), Some(&b"123$"[..]));
    }

    #[test]
    fn test_successor_skips_trailing_ff() {
        assert_eq!(prefix_successor(&[0x01, 0xFF, 0xFF]), Some(vec![0x02]));
        assert_eq!(prefix_successor(&[0xFF, 0xFF]), None);
        assert_eq!(prefix_successor(&[]), None);
    }

    #[test]
    fn test_unbounded_range_contains_everything_above_start() {
        let range = KeyRange::with_prefix([0xFF]);
        assert!(range.contains(&[0xFF, 0x00]));
        assert!(range.contains(&[0xFF, 0xFF, 0xFF]));
        assert!(!range.contains(&[0xFE]));
    }
}

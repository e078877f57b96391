//! Typed cell values
//!
//! `CellValue` ties a Rust type to its cell encoding so that rows can be
//! read back with `row.decode::<T>(family, qualifier)`.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::document::{decode_document, decode_str, encode_document, encode_str};
use super::scalar::{decode_bool, decode_float, decode_int64, encode_bool, encode_float, encode_int64};
use super::timestamp::{
    decode_naive_timestamp, decode_timestamp, encode_naive_timestamp, encode_timestamp,
};
use crate::error::Result;

/// A value that can be stored in, and recovered from, a single cell
pub trait CellValue: Sized {
    /// Encode into the raw cell bytes
    fn to_cell(&self) -> Result<Vec<u8>>;

    /// Decode from raw cell bytes
    fn from_cell(bytes: &[u8]) -> Result<Self>;
}

impl CellValue for f64 {
    fn to_cell(&self) -> Result<Vec<u8>> {
        Ok(encode_float(*self).to_vec())
    }

    fn from_cell(bytes: &[u8]) -> Result<Self> {
        decode_float(bytes)
    }
}

impl CellValue for bool {
    fn to_cell(&self) -> Result<Vec<u8>> {
        Ok(encode_bool(*self).to_vec())
    }

    fn from_cell(bytes: &[u8]) -> Result<Self> {
        decode_bool(bytes)
    }
}

impl CellValue for i64 {
    fn to_cell(&self) -> Result<Vec<u8>> {
        Ok(encode_int64(*self)?.to_vec())
    }

    fn from_cell(bytes: &[u8]) -> Result<Self> {
        decode_int64(bytes)
    }
}

impl CellValue for DateTime<Utc> {
    fn to_cell(&self) -> Result<Vec<u8>> {
        Ok(encode_timestamp(self).to_vec())
    }

    fn from_cell(bytes: &[u8]) -> Result<Self> {
        decode_timestamp(bytes)
    }
}

impl CellValue for NaiveDateTime {
    fn to_cell(&self) -> Result<Vec<u8>> {
        Ok(encode_naive_timestamp(self).to_vec())
    }

    fn from_cell(bytes: &[u8]) -> Result<Self> {
        decode_naive_timestamp(bytes)
    }
}

impl CellValue for String {
    fn to_cell(&self) -> Result<Vec<u8>> {
        Ok(encode_str(self))
    }

    fn from_cell(bytes: &[u8]) -> Result<Self> {
        decode_str(bytes)
    }
}

/// Wrapper storing any serde value as a document cell
#[derive(Debug, Clone, PartialEq)]
pub struct Document<T>(pub T);

impl<T> CellValue for Document<T>
where
    T: Serialize + DeserializeOwned,
{
    fn to_cell(&self) -> Result<Vec<u8>> {
        encode_document(&self.0)
    }

    fn from_cell(bytes: &[u8]) -> Result<Self> {
        decode_document(bytes).map(Document)
    }
}

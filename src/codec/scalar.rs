//! Fixed-width scalar codecs
//!
//! Big-endian encodings for floats, booleans and signed 64-bit integers.

use std::fmt::Display;

use crate::error::{Result, WideCellError};

/// Encoded width of a float cell
pub const FLOAT_WIDTH: usize = 8;

/// Encoded width of a boolean cell
pub const BOOL_WIDTH: usize = 1;

/// Encoded width of an integer cell
pub const INT64_WIDTH: usize = 8;

// =============================================================================
// Float
// =============================================================================

/// Encode a float as 8 big-endian bytes
pub fn encode_float(value: f64) -> [u8; FLOAT_WIDTH] {
    value.to_be_bytes()
}

/// Decode a float from exactly 8 big-endian bytes
pub fn decode_float(bytes: &[u8]) -> Result<f64> {
    Ok(f64::from_be_bytes(fixed_width(bytes, "float")?))
}

// =============================================================================
// Boolean
// =============================================================================

/// Encode a boolean as a single byte
pub fn encode_bool(value: bool) -> [u8; BOOL_WIDTH] {
    [value as u8]
}

/// Decode a boolean from exactly one byte
///
/// Only `0x00` and `0x01` are accepted.
pub fn decode_bool(bytes: &[u8]) -> Result<bool> {
    let [byte] = fixed_width::<BOOL_WIDTH>(bytes, "boolean")?;
    match byte {
        0x00 => Ok(false),
        0x01 => Ok(true),
        other => Err(WideCellError::InvalidBoolean(other)),
    }
}

// =============================================================================
// Integer
// =============================================================================

/// Encode an integer as 8 big-endian bytes
///
/// Accepts any integer type; values outside the signed 64-bit range fail
/// with `IntegerOverflow`.
pub fn encode_int64<T>(value: T) -> Result<[u8; INT64_WIDTH]>
where
    T: TryInto<i64> + Copy + Display,
{
    let narrowed: i64 = value
        .try_into()
        .map_err(|_| WideCellError::IntegerOverflow(value.to_string()))?;
    Ok(narrowed.to_be_bytes())
}

/// Decode a signed integer from exactly 8 big-endian bytes
pub fn decode_int64(bytes: &[u8]) -> Result<i64> {
    Ok(i64::from_be_bytes(fixed_width(bytes, "int64")?))
}

// =============================================================================
// Helpers
// =============================================================================

/// Borrow `bytes` as a fixed-size array, rejecting any other length
pub(crate) fn fixed_width<const N: usize>(bytes: &[u8], kind: &'static str) -> Result<[u8; N]> {
    bytes.try_into().map_err(|_| WideCellError::InvalidLength {
        kind,
        expected: N,
        actual: bytes.len(),
    })
}

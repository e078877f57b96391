//! Timestamp codecs
//!
//! Two encodings are supported:
//! - **Seconds**: Unix epoch seconds as an 8-byte float. Decoding rounds the
//!   fractional second to the nearest microsecond, ties to even, so
//!   sub-microsecond detail is lost. Whole seconds always round-trip.
//! - **Ticks**: Unix epoch microseconds as an 8-byte integer. Lossless at
//!   microsecond granularity.
//!
//! All encoders normalize to UTC first.

use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone, Utc};

use super::scalar::{decode_float, decode_int64, encode_float, INT64_WIDTH};
use crate::error::{Result, WideCellError};

const MICROS_PER_SECOND: f64 = 1_000_000.0;

// =============================================================================
// Seconds (float) encoding
// =============================================================================

/// Encode an instant as float epoch seconds
pub fn encode_timestamp<Tz: TimeZone>(value: &DateTime<Tz>) -> [u8; 8] {
    let utc = value.with_timezone(&Utc);
    let seconds = utc.timestamp() as f64 + f64::from(utc.timestamp_subsec_nanos()) / 1e9;
    encode_float(seconds)
}

/// Decode float epoch seconds into a UTC instant
pub fn decode_timestamp(bytes: &[u8]) -> Result<DateTime<Utc>> {
    let seconds = decode_float(bytes)?;
    if !seconds.is_finite() {
        return Err(WideCellError::InvalidTimestamp(format!(
            "non-finite epoch seconds: {}",
            seconds
        )));
    }

    let out_of_range = || {
        WideCellError::InvalidTimestamp(format!("epoch seconds out of range: {}", seconds))
    };

    let whole = seconds.trunc();
    if whole < i64::MIN as f64 || whole >= i64::MAX as f64 {
        return Err(out_of_range());
    }

    // Fraction is scaled on its own; ties round to even
    let fraction_micros = (seconds.fract() * MICROS_PER_SECOND).round_ties_even() as i64;
    let micros = (whole as i64)
        .checked_mul(1_000_000)
        .and_then(|micros| micros.checked_add(fraction_micros))
        .ok_or_else(out_of_range)?;

    from_micros(micros)
}

/// Encode a naive datetime, interpreting it as UTC
pub fn encode_naive_timestamp(value: &NaiveDateTime) -> [u8; 8] {
    encode_timestamp(&value.and_utc())
}

/// Decode float epoch seconds into a naive UTC datetime
pub fn decode_naive_timestamp(bytes: &[u8]) -> Result<NaiveDateTime> {
    Ok(decode_timestamp(bytes)?.naive_utc())
}

/// Encode a wall-clock time observed in `tz`
///
/// Fails if the local time does not exist in `tz` (skipped by a
/// transition) or maps to more than one instant.
pub fn encode_local_timestamp<Tz: TimeZone>(value: &NaiveDateTime, tz: &Tz) -> Result<[u8; 8]> {
    match tz.from_local_datetime(value) {
        LocalResult::Single(instant) => Ok(encode_timestamp(&instant)),
        LocalResult::Ambiguous(_, _) => Err(WideCellError::InvalidTimestamp(format!(
            "local time {} is ambiguous",
            value
        ))),
        LocalResult::None => Err(WideCellError::InvalidTimestamp(format!(
            "local time {} does not exist",
            value
        ))),
    }
}

// =============================================================================
// Ticks (integer microseconds) encoding
// =============================================================================

/// Encode an instant as integer epoch microseconds
pub fn encode_timestamp_micros<Tz: TimeZone>(value: &DateTime<Tz>) -> [u8; INT64_WIDTH] {
    value.with_timezone(&Utc).timestamp_micros().to_be_bytes()
}

/// Decode integer epoch microseconds into a UTC instant
pub fn decode_timestamp_micros(bytes: &[u8]) -> Result<DateTime<Utc>> {
    from_micros(decode_int64(bytes)?)
}

fn from_micros(micros: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_micros(micros).ok_or_else(|| {
        WideCellError::InvalidTimestamp(format!("{} microseconds is out of range", micros))
    })
}

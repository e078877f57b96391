//! Codec Module
//!
//! Converts native values to and from the raw byte strings stored in
//! wide-column cells and row keys.
//!
//! ## Fixed-Width Scalars (big-endian)
//! ```text
//! ┌────────────┬───────┬──────────────────────────────────────┐
//! │ Type       │ Width │ Layout                               │
//! ├────────────┼───────┼──────────────────────────────────────┤
//! │ Float      │   8   │ IEEE-754 binary64                    │
//! │ Boolean    │   1   │ 0x00 = false, 0x01 = true            │
//! │ Integer    │   8   │ two's complement i64                 │
//! │ Timestamp  │   8   │ Float of Unix epoch seconds (UTC)    │
//! │ Ticks      │   8   │ Integer of Unix epoch microseconds   │
//! └────────────┴───────┴──────────────────────────────────────┘
//! ```
//!
//! ## Variable-Width Cells
//! - Text: raw UTF-8
//! - Document: bincode-serialized serde value
//!
//! ## Row Keys
//! Row keys are `<id>#<sequence>`. [`make_prefix_range`] builds the
//! half-open range selecting every row of one id.
//!
//! Every function here is pure. Decoders never pad or truncate: a buffer
//! of the wrong width is an error.

mod document;
mod key;
mod scalar;
mod timestamp;
mod value;

pub use document::{decode_document, decode_str, encode_document, encode_str};
pub use key::{make_prefix_range, prefix_successor, KeyRange, RowKey, KEY_SEPARATOR};
pub use scalar::{
    decode_bool, decode_float, decode_int64, encode_bool, encode_float, encode_int64,
    BOOL_WIDTH, FLOAT_WIDTH, INT64_WIDTH,
};
pub use timestamp::{
    decode_naive_timestamp, decode_timestamp, decode_timestamp_micros, encode_local_timestamp,
    encode_naive_timestamp, encode_timestamp, encode_timestamp_micros,
};
pub use value::{CellValue, Document};

//! Variable-width cell codecs
//!
//! Text cells hold raw UTF-8. Document cells hold any serde value,
//! serialized with bincode.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;

/// Encode text as UTF-8 bytes
pub fn encode_str(value: &str) -> Vec<u8> {
    value.as_bytes().to_vec()
}

/// Decode UTF-8 bytes into owned text
pub fn decode_str(bytes: &[u8]) -> Result<String> {
    Ok(std::str::from_utf8(bytes)?.to_owned())
}

/// Serialize a structured value into a document cell
pub fn encode_document<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    Ok(bincode::serialize(value)?)
}

/// Deserialize a document cell
pub fn decode_document<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    Ok(bincode::deserialize(bytes)?)
}

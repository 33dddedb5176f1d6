//! Standalone encoding into raw and union blobs
//!
//! A variant is encoded into a buffer of the union's full width, then
//! byte-copied into place by writing it as raw bytes. Bytes past the end of
//! a narrower variant carry no meaning.

use super::types::{RawSchema, Schema, UnionSchema};
use crate::codec::{self, CodecResult, EncodeError, Value};

impl RawSchema {
    /// Encode `value` as `schema` into a new buffer as wide as this blob.
    pub fn encode(&self, schema: &Schema, value: &Value) -> CodecResult<Vec<u8>> {
        let mut buffer = vec![0u8; self.byte_length];
        codec::write(schema, 0, &mut buffer, value)?;
        Ok(buffer)
    }
}

impl UnionSchema {
    /// Encode `value` as the named variant, padded to the union's width.
    pub fn construct(&self, variant: &str, value: &Value) -> CodecResult<Vec<u8>> {
        let schema = self
            .variant(variant)
            .ok_or_else(|| EncodeError::UnknownVariant(variant.to_string()))?;
        self.raw.encode(schema, value)
    }
}

//! Codec: interpret or populate linear memory according to a schema
//!
//! Every entry point works on a (schema, byte offset, memory) triple and
//! dispatches with one exhaustive match over the schema kind. Encoding is
//! little-endian, fixed.
//!
//! # Entry points
//!
//! - [`read`]: decode a value
//! - [`write`]: encode a value, partially for structs
//! - [`deref`]: follow a pointer and decode its referent
//! - [`zero`]: clear the extent of a schema

mod errors;
mod read;
mod value;
mod write;

pub use errors::{CodecError, CodecResult, DecodeError, EncodeError, Severity, Span};
pub use read::{deref, read, read_variant};
pub use value::{Record, Value};
pub use write::{write, zero};

use std::ops::Range;

/// `[offset, offset + byte_length)` if it fits within `capacity`.
pub(crate) fn span(offset: usize, byte_length: usize, capacity: usize) -> Option<Range<usize>> {
    let end = offset.checked_add(byte_length)?;
    (end <= capacity).then_some(offset..end)
}

/// First `N` bytes of an already bounds-checked slice.
pub(crate) fn le_bytes<const N: usize>(data: &[u8]) -> [u8; N] {
    let mut bytes = [0u8; N];
    bytes.copy_from_slice(&data[..N]);
    bytes
}

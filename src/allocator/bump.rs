//! Bump allocator over linear memory
//!
//! Each allocation encodes a value at the cursor and moves the cursor past
//! it, rounded up to 8 bytes so the next allocation is aligned for any
//! schema. Nothing is ever freed; [`Allocator::reset`] rewinds to the start.

use crate::codec::{self, CodecResult, EncodeError, Span, Value};
use crate::memory::{LinearMemory, TransferConfig};
use crate::observability::{Event, Logger, Severity};
use crate::schema::{Alignment, Schema};

/// Alignment of every cursor position after the first allocation
pub const ALLOCATION_ALIGNMENT: Alignment = Alignment::Eight;

/// Bump allocator borrowing a memory.
///
/// Allocations never cross the limit: the end of the transfer region when
/// built with [`Allocator::for_transfer`], the current end of the memory
/// otherwise.
pub struct Allocator<'m, M: LinearMemory + ?Sized> {
    memory: &'m mut M,
    start: usize,
    cursor: usize,
    limit: Option<usize>,
}

impl<'m, M: LinearMemory + ?Sized> Allocator<'m, M> {
    /// Allocator whose first allocation lands at `start`.
    pub fn new(memory: &'m mut M, start: usize) -> Self {
        Self::with_limit(memory, start, None)
    }

    /// Allocator confined to the transfer region.
    pub fn for_transfer(memory: &'m mut M, config: &TransferConfig) -> Self {
        let end = usize::try_from(config.end()).unwrap_or(usize::MAX);
        Self::with_limit(memory, config.base as usize, Some(end))
    }

    fn with_limit(memory: &'m mut M, start: usize, limit: Option<usize>) -> Self {
        if Logger::enabled(Severity::Trace) {
            let rendered_start = start.to_string();
            let rendered_limit = limit.map_or_else(|| "memory".to_string(), |l| l.to_string());
            Logger::trace(
                Event::AllocatorCreated,
                &[
                    ("limit", rendered_limit.as_str()),
                    ("start", rendered_start.as_str()),
                ],
            );
        }
        Self {
            memory,
            start,
            cursor: start,
            limit,
        }
    }

    /// Write `value` as `schema` at the cursor and return its address.
    ///
    /// On error the cursor does not move. A value rejected midway through a
    /// struct may still have written its earlier fields.
    pub fn alloc(&mut self, schema: &Schema, value: &Value) -> CodecResult<u32> {
        let address = self.cursor;
        let byte_length = schema.byte_length();
        let capacity = self.limit();

        let end = match address.checked_add(byte_length) {
            Some(end) if end <= capacity => end,
            _ => return Err(self.reject(address, byte_length, capacity)),
        };
        let Ok(address32) = u32::try_from(address) else {
            return Err(self.reject(address, byte_length, capacity));
        };

        codec::write(schema, address, &mut *self.memory, value)?;
        self.cursor = ALLOCATION_ALIGNMENT.align_up(end);

        if Logger::enabled(Severity::Trace) {
            let rendered_address = address.to_string();
            let rendered_length = byte_length.to_string();
            Logger::trace(
                Event::Allocation,
                &[
                    ("address", rendered_address.as_str()),
                    ("byte_length", rendered_length.as_str()),
                    ("type", schema.type_name()),
                ],
            );
        }

        Ok(address32)
    }

    /// Copy `bytes` verbatim to the cursor, e.g. UTF-8 text later referenced
    /// by a pointer and length pair.
    pub fn alloc_bytes(&mut self, bytes: &[u8]) -> CodecResult<u32> {
        let blob = Schema::raw(bytes.len(), Alignment::One);
        self.alloc(&blob, &Value::Bytes(bytes.to_vec()))
    }

    /// Address the next allocation will receive
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn start(&self) -> usize {
        self.start
    }

    /// Rewind to the start; earlier allocations become free to overwrite.
    pub fn reset(&mut self) {
        self.cursor = self.start;
    }

    pub fn memory(&self) -> &M {
        self.memory
    }

    /// Give the borrow back, e.g. to read results after a call.
    pub fn into_inner(self) -> &'m mut M {
        self.memory
    }

    fn limit(&self) -> usize {
        let end_of_memory = self.memory.byte_len();
        self.limit.map_or(end_of_memory, |limit| limit.min(end_of_memory))
    }

    fn reject(&self, offset: usize, byte_length: usize, capacity: usize) -> codec::CodecError {
        let rendered_offset = offset.to_string();
        let rendered_length = byte_length.to_string();
        Logger::warn(
            Event::AllocationRejected,
            &[
                ("byte_length", rendered_length.as_str()),
                ("offset", rendered_offset.as_str()),
            ],
        );
        EncodeError::OutOfBounds(Span {
            offset,
            byte_length,
            capacity,
        })
        .into()
    }
}

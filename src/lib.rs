//! memlayout - C-compatible struct layout and marshaling over linear memory
//!
//! Describes data shared with a foreign module (typically WebAssembly) as
//! schemas, computes their byte layout the way a C compiler would, and
//! reads or writes values at byte offsets of a linear memory.

pub mod allocator;
pub mod codec;
pub mod memory;
pub mod observability;
pub mod schema;

pub use allocator::Allocator;
pub use codec::{CodecError, CodecResult, Record, Value};
pub use memory::{EngineConfig, LinearMemory, TransferConfig, WasmMemory};
pub use schema::{Alignment, Schema};

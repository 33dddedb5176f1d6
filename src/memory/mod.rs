//! Linear memory boundary
//!
//! What the engine consumes from the bridge: a byte-addressable memory and
//! the address of the transfer region inside it. Growing the memory and
//! instantiating the foreign module stay with the bridge.

mod config;
mod errors;
mod linear;
mod wasm;

pub use config::{EngineConfig, TransferConfig, WASM_PAGE_SIZE};
pub use errors::{MemoryError, MemoryResult};
pub use linear::LinearMemory;
pub use wasm::WasmMemory;

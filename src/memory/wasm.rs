//! wasmtime linear memory adapter
//!
//! Instantiating the foreign module is the bridge's job. This adapter only
//! pairs an already-instantiated `Memory` with its `Store` so the codec can
//! address it like any other buffer.

use wasmtime::{Instance, Memory, Store};

use super::errors::{MemoryError, MemoryResult};
use super::linear::LinearMemory;

/// Linear memory of a wasm instance.
///
/// The view is taken afresh on every access, so growth performed by the
/// module between calls is visible.
pub struct WasmMemory<'s, T: 'static> {
    store: &'s mut Store<T>,
    memory: Memory,
}

impl<'s, T: 'static> WasmMemory<'s, T> {
    pub fn new(store: &'s mut Store<T>, memory: Memory) -> Self {
        Self { store, memory }
    }

    /// Adapter over the memory an instance exports under `name`.
    pub fn exported(
        store: &'s mut Store<T>,
        instance: &Instance,
        name: &str,
    ) -> MemoryResult<Self> {
        let memory = instance
            .get_memory(&mut *store, name)
            .ok_or_else(|| MemoryError::MissingExport(name.to_string()))?;
        Ok(Self { store, memory })
    }

    pub fn memory(&self) -> Memory {
        self.memory
    }

    pub fn store_mut(&mut self) -> &mut Store<T> {
        self.store
    }
}

impl<T: 'static> LinearMemory for WasmMemory<'_, T> {
    fn bytes(&self) -> &[u8] {
        self.memory.data(&*self.store)
    }

    fn bytes_mut(&mut self) -> &mut [u8] {
        self.memory.data_mut(&mut *self.store)
    }

    fn byte_len(&self) -> usize {
        self.memory.data_size(&*self.store)
    }
}

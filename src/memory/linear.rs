//! Byte-addressable linear memory
//!
//! The codec never owns memory. It reads and writes through this trait,
//! which plain byte buffers and wasm instance memories implement.

/// A flat, byte-addressable block of memory shared with a foreign module.
pub trait LinearMemory {
    fn bytes(&self) -> &[u8];

    fn bytes_mut(&mut self) -> &mut [u8];

    /// Current size in bytes
    fn byte_len(&self) -> usize {
        self.bytes().len()
    }
}

impl LinearMemory for [u8] {
    fn bytes(&self) -> &[u8] {
        self
    }

    fn bytes_mut(&mut self) -> &mut [u8] {
        self
    }
}

impl<const N: usize> LinearMemory for [u8; N] {
    fn bytes(&self) -> &[u8] {
        self
    }

    fn bytes_mut(&mut self) -> &mut [u8] {
        self
    }
}

impl LinearMemory for Vec<u8> {
    fn bytes(&self) -> &[u8] {
        self
    }

    fn bytes_mut(&mut self) -> &mut [u8] {
        self
    }
}

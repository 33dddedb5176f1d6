//! Allocation of transfer values in linear memory
//!
//! Arguments and results passed across the module boundary are laid out
//! with a bump allocator, typically over the transfer region and rewound at
//! the start of every call sequence.

mod bump;

pub use bump::{Allocator, ALLOCATION_ALIGNMENT};

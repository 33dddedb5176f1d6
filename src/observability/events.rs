//! Observable events of the layout engine
//!
//! Events are explicit and typed.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Schema construction
    /// Struct layout computed
    StructLayoutComputed,
    /// Union width and alignment computed
    UnionLayoutComputed,

    // Allocation
    /// Bump allocator created over a memory
    AllocatorCreated,
    /// Value written at the allocator cursor
    Allocation,
    /// Allocation would cross the allocator limit
    AllocationRejected,

    // Codec
    /// Pointer referent lies outside memory
    DerefRejected,

    // Configuration
    /// Engine configuration loaded
    ConfigLoaded,
}

impl Event {
    /// Returns the string representation used in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::StructLayoutComputed => "STRUCT_LAYOUT_COMPUTED",
            Event::UnionLayoutComputed => "UNION_LAYOUT_COMPUTED",
            Event::AllocatorCreated => "ALLOCATOR_CREATED",
            Event::Allocation => "ALLOCATION",
            Event::AllocationRejected => "ALLOCATION_REJECTED",
            Event::DerefRejected => "DEREF_REJECTED",
            Event::ConfigLoaded => "CONFIG_LOADED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

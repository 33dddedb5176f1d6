//! Observability for the layout engine
//!
//! Structured JSON logging of schema construction, allocation and rejected
//! operations.
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on codec results
//! 3. No background threads
//! 4. Deterministic output
//!
//! # Usage
//!
//! ```ignore
//! use memlayout::observability::{Event, Logger, Severity};
//!
//! Logger::set_min_severity(Severity::Trace);
//! Logger::trace(Event::Allocation, &[("address", "1024")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

//! Schemas for data exchanged with the foreign module
//!
//! A schema says how to interpret a fixed span of bytes. Struct layouts are
//! computed with the rules a C compiler applies:
//!
//! - Every field starts at a multiple of its own alignment
//! - A struct is aligned to its most-aligned field
//! - A struct's length is a multiple of its alignment
//! - A union is as wide and as aligned as its largest variant
//!
//! Schemas are immutable once built and carry no buffer or address state.

mod descriptors;
mod layout;
mod types;
mod variants;

pub use layout::compute_struct_layout;
pub use types::{
    Alignment, EnumSchema, FieldElement, LayoutElement, PointerSchema, RawSchema, ScalarKind,
    Schema, StructSchema, UnionSchema,
};

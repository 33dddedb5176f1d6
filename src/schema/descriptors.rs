//! Schema constructors
//!
//! Schemas are built once, typically when the bridge starts, and shared by
//! reference afterwards.

use super::layout::compute_struct_layout;
use super::types::{
    Alignment, EnumSchema, PointerSchema, RawSchema, ScalarKind, Schema, UnionSchema,
};
use crate::observability::{Event, Logger, Severity};

impl Schema {
    pub fn bool() -> Self {
        Schema::Scalar(ScalarKind::Bool)
    }

    pub fn i8() -> Self {
        Schema::Scalar(ScalarKind::Int8)
    }

    pub fn u8() -> Self {
        Schema::Scalar(ScalarKind::Uint8)
    }

    pub fn i16() -> Self {
        Schema::Scalar(ScalarKind::Int16)
    }

    pub fn u16() -> Self {
        Schema::Scalar(ScalarKind::Uint16)
    }

    pub fn i32() -> Self {
        Schema::Scalar(ScalarKind::Int32)
    }

    pub fn u32() -> Self {
        Schema::Scalar(ScalarKind::Uint32)
    }

    pub fn f32() -> Self {
        Schema::Scalar(ScalarKind::Float32)
    }

    pub fn f64() -> Self {
        Schema::Scalar(ScalarKind::Float64)
    }

    /// C `char`, an unsigned byte
    pub fn char() -> Self {
        Self::u8()
    }

    /// Struct with C layout; see [`compute_struct_layout`].
    pub fn structure<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = (S, Schema)>,
        S: Into<String>,
    {
        Schema::Struct(compute_struct_layout(fields))
    }

    /// One-byte enum whose ordinals are the label positions.
    pub fn enum_of<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Schema::Enum(EnumSchema {
            labels: labels.into_iter().map(Into::into).collect(),
        })
    }

    /// Opaque blob of `byte_length` bytes.
    ///
    /// An alignment wider than the blob is clamped to the largest natural
    /// alignment that fits in it, so `raw(1, Eight)` is byte-aligned.
    pub fn raw(byte_length: usize, byte_align: Alignment) -> Self {
        Schema::Raw(RawSchema {
            byte_length,
            byte_align: byte_align.min(Alignment::largest_within(byte_length)),
        })
    }

    /// Union of named variants.
    ///
    /// Width and alignment are the largest among the variants, the width
    /// rounded up to the alignment as a C compiler does.
    pub fn union<I, S>(variants: I) -> Self
    where
        I: IntoIterator<Item = (S, Schema)>,
        S: Into<String>,
    {
        let variants: Vec<(String, Schema)> = variants
            .into_iter()
            .map(|(name, schema)| (name.into(), schema))
            .collect();

        let byte_align = variants
            .iter()
            .map(|(_, schema)| schema.byte_align())
            .max()
            .unwrap_or(Alignment::One);
        let widest = variants
            .iter()
            .map(|(_, schema)| schema.byte_length())
            .max()
            .unwrap_or(0);
        let byte_length = byte_align.align_up(widest);

        if Logger::enabled(Severity::Trace) {
            let align = byte_align.to_string();
            let length = byte_length.to_string();
            let count = variants.len().to_string();
            Logger::trace(
                Event::UnionLayoutComputed,
                &[
                    ("align", align.as_str()),
                    ("byte_length", length.as_str()),
                    ("variants", count.as_str()),
                ],
            );
        }

        Schema::Union(UnionSchema {
            raw: RawSchema {
                byte_length,
                byte_align,
            },
            variants,
        })
    }

    /// Pointer to a value of `target`.
    pub fn ptr(target: Schema) -> Self {
        Schema::Pointer(PointerSchema {
            target: Box::new(target),
        })
    }

    /// Untyped pointer, dereferenced as `char`.
    pub fn void_ptr() -> Self {
        Self::ptr(Self::char())
    }
}

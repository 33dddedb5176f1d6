//! Schema type definitions
//!
//! A [`Schema`] describes how to interpret a fixed span of bytes in linear
//! memory. Supported kinds:
//! - scalar: bool, int8/uint8, int16/uint16, int32/uint32, float32/float64
//! - struct: C layout of named fields with explicit padding
//! - enum: ordinal of a label, one byte wide
//! - raw: opaque fixed-size blob
//! - union: raw blob as wide as its widest variant
//! - pointer: 4-byte address carrying the schema of its referent

use serde::Serialize;
use std::fmt;

/// Natural alignments supported by the layout rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "usize")]
pub enum Alignment {
    One = 1,
    Two = 2,
    Four = 4,
    Eight = 8,
}

impl Alignment {
    /// Alignment in bytes
    pub const fn bytes(self) -> usize {
        self as usize
    }

    /// Alignment for a byte count, if it is one of the naturals.
    pub fn from_bytes(bytes: usize) -> Option<Self> {
        match bytes {
            1 => Some(Alignment::One),
            2 => Some(Alignment::Two),
            4 => Some(Alignment::Four),
            8 => Some(Alignment::Eight),
            _ => None,
        }
    }

    /// Largest natural alignment not exceeding `bytes`; `One` for 0.
    pub const fn largest_within(bytes: usize) -> Self {
        if bytes >= 8 {
            Alignment::Eight
        } else if bytes >= 4 {
            Alignment::Four
        } else if bytes >= 2 {
            Alignment::Two
        } else {
            Alignment::One
        }
    }

    /// Round `offset` up to the next multiple of this alignment.
    pub const fn align_up(self, offset: usize) -> usize {
        let align = self.bytes();
        (offset + align - 1) & !(align - 1)
    }

    /// Padding needed before `offset` becomes aligned.
    pub const fn padding_for(self, offset: usize) -> usize {
        self.align_up(offset) - offset
    }
}

impl From<Alignment> for usize {
    fn from(align: Alignment) -> usize {
        align.bytes()
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bytes())
    }
}

/// Primitive kinds. Every scalar is naturally aligned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    Bool,
    Int8,
    Uint8,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Float32,
    Float64,
}

impl ScalarKind {
    pub const fn byte_length(self) -> usize {
        match self {
            ScalarKind::Bool | ScalarKind::Int8 | ScalarKind::Uint8 => 1,
            ScalarKind::Int16 | ScalarKind::Uint16 => 2,
            ScalarKind::Int32 | ScalarKind::Uint32 | ScalarKind::Float32 => 4,
            ScalarKind::Float64 => 8,
        }
    }

    pub const fn byte_align(self) -> Alignment {
        match self.byte_length() {
            1 => Alignment::One,
            2 => Alignment::Two,
            4 => Alignment::Four,
            _ => Alignment::Eight,
        }
    }

    /// Inclusive integer range, `None` for bool and floats.
    pub const fn int_range(self) -> Option<(i64, i64)> {
        match self {
            ScalarKind::Int8 => Some((i8::MIN as i64, i8::MAX as i64)),
            ScalarKind::Uint8 => Some((0, u8::MAX as i64)),
            ScalarKind::Int16 => Some((i16::MIN as i64, i16::MAX as i64)),
            ScalarKind::Uint16 => Some((0, u16::MAX as i64)),
            ScalarKind::Int32 => Some((i32::MIN as i64, i32::MAX as i64)),
            ScalarKind::Uint32 => Some((0, u32::MAX as i64)),
            ScalarKind::Bool | ScalarKind::Float32 | ScalarKind::Float64 => None,
        }
    }

    pub const fn is_float(self) -> bool {
        matches!(self, ScalarKind::Float32 | ScalarKind::Float64)
    }

    /// Returns the type name for error messages
    pub fn type_name(self) -> &'static str {
        match self {
            ScalarKind::Bool => "bool",
            ScalarKind::Int8 => "int8",
            ScalarKind::Uint8 => "uint8",
            ScalarKind::Int16 => "int16",
            ScalarKind::Uint16 => "uint16",
            ScalarKind::Int32 => "int32",
            ScalarKind::Uint32 => "uint32",
            ScalarKind::Float32 => "float32",
            ScalarKind::Float64 => "float64",
        }
    }
}

/// A named member of a struct layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldElement {
    pub name: String,
    /// Offset from the start of the struct
    pub offset: usize,
    pub schema: Schema,
}

/// One entry of a struct layout, in memory order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LayoutElement {
    /// Unnamed alignment gap
    Padding { byte_length: usize },
    Field(FieldElement),
}

impl LayoutElement {
    /// Returns the field, if this element is not padding
    pub fn as_field(&self) -> Option<&FieldElement> {
        match self {
            LayoutElement::Field(field) => Some(field),
            LayoutElement::Padding { .. } => None,
        }
    }
}

/// A struct with computed C layout. Built by
/// [`Schema::structure`](crate::schema::Schema::structure).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructSchema {
    pub(crate) layout: Vec<LayoutElement>,
    pub(crate) byte_length: usize,
    pub(crate) byte_align: Alignment,
}

impl StructSchema {
    /// Layout elements in memory order, padding included
    pub fn layout(&self) -> &[LayoutElement] {
        &self.layout
    }

    /// Named fields in declaration order
    pub fn fields(&self) -> impl Iterator<Item = &FieldElement> {
        self.layout.iter().filter_map(LayoutElement::as_field)
    }

    pub fn field(&self, name: &str) -> Option<&FieldElement> {
        self.fields().find(|field| field.name == name)
    }

    pub fn offset_of(&self, name: &str) -> Option<usize> {
        self.field(name).map(|field| field.offset)
    }

    pub fn byte_length(&self) -> usize {
        self.byte_length
    }

    pub fn byte_align(&self) -> Alignment {
        self.byte_align
    }
}

/// Labels encoded as their position, one byte wide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumSchema {
    pub(crate) labels: Vec<String>,
}

impl EnumSchema {
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Position of `label`; the first occurrence wins.
    pub fn ordinal_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    pub fn label_at(&self, ordinal: usize) -> Option<&str> {
        self.labels.get(ordinal).map(String::as_str)
    }
}

/// Opaque blob of a fixed width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RawSchema {
    pub(crate) byte_length: usize,
    pub(crate) byte_align: Alignment,
}

impl RawSchema {
    pub fn byte_length(&self) -> usize {
        self.byte_length
    }

    pub fn byte_align(&self) -> Alignment {
        self.byte_align
    }
}

/// Overlay of named variants. Stores no discriminant; the active variant is
/// tracked by the surrounding struct.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnionSchema {
    pub(crate) raw: RawSchema,
    pub(crate) variants: Vec<(String, Schema)>,
}

impl UnionSchema {
    /// The blob this union occupies
    pub fn raw(&self) -> &RawSchema {
        &self.raw
    }

    pub fn variants(&self) -> impl Iterator<Item = (&str, &Schema)> {
        self.variants
            .iter()
            .map(|(name, schema)| (name.as_str(), schema))
    }

    pub fn variant(&self, name: &str) -> Option<&Schema> {
        self.variants
            .iter()
            .find(|(variant, _)| variant == name)
            .map(|(_, schema)| schema)
    }
}

/// 4-byte address of a value of `target`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointerSchema {
    pub(crate) target: Box<Schema>,
}

impl PointerSchema {
    pub const BYTE_LENGTH: usize = 4;

    /// Schema of the referent
    pub fn target(&self) -> &Schema {
        &self.target
    }
}

/// Description of a fixed span of bytes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "def", rename_all = "lowercase")]
pub enum Schema {
    Scalar(ScalarKind),
    Struct(StructSchema),
    Enum(EnumSchema),
    Raw(RawSchema),
    Union(UnionSchema),
    Pointer(PointerSchema),
}

impl Schema {
    /// Size in bytes, trailing padding included
    pub fn byte_length(&self) -> usize {
        match self {
            Schema::Scalar(kind) => kind.byte_length(),
            Schema::Struct(def) => def.byte_length,
            Schema::Enum(_) => 1,
            Schema::Raw(raw) => raw.byte_length,
            Schema::Union(def) => def.raw.byte_length,
            Schema::Pointer(_) => PointerSchema::BYTE_LENGTH,
        }
    }

    pub fn byte_align(&self) -> Alignment {
        match self {
            Schema::Scalar(kind) => kind.byte_align(),
            Schema::Struct(def) => def.byte_align,
            Schema::Enum(_) => Alignment::One,
            Schema::Raw(raw) => raw.byte_align,
            Schema::Union(def) => def.raw.byte_align,
            Schema::Pointer(_) => Alignment::Four,
        }
    }

    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Schema::Scalar(kind) => kind.type_name(),
            Schema::Struct(_) => "struct",
            Schema::Enum(_) => "enum",
            Schema::Raw(_) => "raw",
            Schema::Union(_) => "union",
            Schema::Pointer(_) => "pointer",
        }
    }

    pub fn as_struct(&self) -> Option<&StructSchema> {
        match self {
            Schema::Struct(def) => Some(def),
            _ => None,
        }
    }

    pub fn as_union(&self) -> Option<&UnionSchema> {
        match self {
            Schema::Union(def) => Some(def),
            _ => None,
        }
    }

    pub fn as_pointer(&self) -> Option<&PointerSchema> {
        match self {
            Schema::Pointer(def) => Some(def),
            _ => None,
        }
    }

    /// JSON description of the schema and its computed layout.
    pub fn describe(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

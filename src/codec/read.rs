//! Decoding values from linear memory

use super::errors::{CodecResult, DecodeError, Span};
use super::value::{Record, Value};
use super::{le_bytes, span};
use crate::memory::LinearMemory;
use crate::observability::{Event, Logger};
use crate::schema::{ScalarKind, Schema};

/// Read a value of `schema` at `offset`.
///
/// A union cannot be read directly: which variant is live is recorded
/// elsewhere, usually in a sibling enum field. Use [`read_variant`] once the
/// variant is known. As a struct member a union decodes to its raw bytes.
pub fn read<M>(schema: &Schema, offset: usize, memory: &M) -> CodecResult<Value>
where
    M: LinearMemory + ?Sized,
{
    if let Schema::Union(_) = schema {
        return Err(DecodeError::UnsupportedOperation("a union").into());
    }
    read_member(schema, offset, memory.bytes())
}

/// Read the union's `variant` at `offset`.
pub fn read_variant<M>(
    schema: &Schema,
    variant: &str,
    offset: usize,
    memory: &M,
) -> CodecResult<Value>
where
    M: LinearMemory + ?Sized,
{
    let def = schema
        .as_union()
        .ok_or(DecodeError::UnsupportedOperation("variants of a non-union schema"))?;
    let variant_schema = def
        .variant(variant)
        .ok_or_else(|| DecodeError::UnknownVariant(variant.to_string()))?;
    read(variant_schema, offset, memory)
}

/// Follow the pointer at `offset` and read its referent.
///
/// The referent must lie entirely inside the memory. Address 0 is an
/// ordinary address; allocators may place values there.
pub fn deref<M>(schema: &Schema, offset: usize, memory: &M) -> CodecResult<Value>
where
    M: LinearMemory + ?Sized,
{
    let pointer = schema
        .as_pointer()
        .ok_or(DecodeError::UnsupportedOperation("dereferencing a non-pointer"))?;

    let bytes = memory.bytes();
    let range = span(offset, schema.byte_length(), bytes.len()).ok_or(DecodeError::OutOfBounds(
        Span {
            offset,
            byte_length: schema.byte_length(),
            capacity: bytes.len(),
        },
    ))?;
    let address = u32::from_le_bytes(le_bytes(&bytes[range]));

    let target = pointer.target();
    if span(address as usize, target.byte_length(), bytes.len()).is_none() {
        let rendered = format!("{:#x}", address);
        Logger::warn(Event::DerefRejected, &[("address", rendered.as_str())]);
        return Err(DecodeError::NullOrInvalidAddress {
            address,
            capacity: bytes.len(),
        }
        .into());
    }

    read(target, address as usize, memory)
}

fn read_member(schema: &Schema, offset: usize, bytes: &[u8]) -> CodecResult<Value> {
    let byte_length = schema.byte_length();
    let range = span(offset, byte_length, bytes.len()).ok_or(DecodeError::OutOfBounds(Span {
        offset,
        byte_length,
        capacity: bytes.len(),
    }))?;
    let data = &bytes[range];

    match schema {
        Schema::Scalar(kind) => Ok(read_scalar(*kind, data)),
        Schema::Struct(def) => {
            let mut record = Record::new();
            for field in def.fields() {
                let value = read_member(&field.schema, offset + field.offset, bytes)?;
                record.set(field.name.as_str(), value);
            }
            Ok(Value::Struct(record))
        }
        Schema::Enum(def) => {
            let ordinal = data[0];
            match def.label_at(usize::from(ordinal)) {
                Some(label) => Ok(Value::Enum(label.to_string())),
                None => Err(DecodeError::InvalidEnumOrdinal {
                    ordinal,
                    labels: def.labels().to_vec(),
                }
                .into()),
            }
        }
        Schema::Raw(_) | Schema::Union(_) => Ok(Value::Bytes(data.to_vec())),
        Schema::Pointer(_) => Ok(Value::Int(i64::from(u32::from_le_bytes(le_bytes(data))))),
    }
}

fn read_scalar(kind: ScalarKind, data: &[u8]) -> Value {
    match kind {
        ScalarKind::Bool => Value::Bool(data[0] != 0),
        ScalarKind::Int8 => Value::Int(i64::from(data[0] as i8)),
        ScalarKind::Uint8 => Value::Int(i64::from(data[0])),
        ScalarKind::Int16 => Value::Int(i64::from(i16::from_le_bytes(le_bytes(data)))),
        ScalarKind::Uint16 => Value::Int(i64::from(u16::from_le_bytes(le_bytes(data)))),
        ScalarKind::Int32 => Value::Int(i64::from(i32::from_le_bytes(le_bytes(data)))),
        ScalarKind::Uint32 => Value::Int(i64::from(u32::from_le_bytes(le_bytes(data)))),
        ScalarKind::Float32 => Value::Float(f64::from(f32::from_le_bytes(le_bytes(data)))),
        ScalarKind::Float64 => Value::Float(f64::from_le_bytes(le_bytes(data))),
    }
}

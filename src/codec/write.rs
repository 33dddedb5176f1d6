//! Encoding values into linear memory

use super::errors::{CodecResult, EncodeError, Span};
use super::span;
use super::value::Value;
use crate::memory::LinearMemory;
use crate::schema::{ScalarKind, Schema};

/// Write `value` as `schema` at `offset`.
///
/// Struct fields missing from the record are left untouched. The whole
/// extent of the schema is bounds-checked before any byte is written, but
/// a value rejected midway through a struct leaves the earlier fields
/// written.
pub fn write<M>(schema: &Schema, offset: usize, memory: &mut M, value: &Value) -> CodecResult<()>
where
    M: LinearMemory + ?Sized,
{
    let bytes = memory.bytes_mut();
    extent(schema, offset, bytes.len())?;
    write_member(schema, offset, bytes, value)
}

/// Fill the extent of `schema` at `offset` with zero bytes.
pub fn zero<M>(schema: &Schema, offset: usize, memory: &mut M) -> CodecResult<()>
where
    M: LinearMemory + ?Sized,
{
    let bytes = memory.bytes_mut();
    let range = extent(schema, offset, bytes.len())?;
    bytes[range].fill(0);
    Ok(())
}

fn extent(schema: &Schema, offset: usize, capacity: usize) -> CodecResult<std::ops::Range<usize>> {
    let byte_length = schema.byte_length();
    span(offset, byte_length, capacity).ok_or_else(|| {
        EncodeError::OutOfBounds(Span {
            offset,
            byte_length,
            capacity,
        })
        .into()
    })
}

fn mismatch(expected: &'static str, value: &Value) -> EncodeError {
    EncodeError::TypeMismatch {
        expected,
        found: value.kind_name(),
    }
}

fn write_member(schema: &Schema, offset: usize, bytes: &mut [u8], value: &Value) -> CodecResult<()> {
    let end = offset + schema.byte_length();

    match schema {
        Schema::Scalar(kind) => write_scalar(*kind, &mut bytes[offset..end], value),
        Schema::Struct(def) => {
            let record = value.as_record().ok_or_else(|| mismatch("struct", value))?;
            for field in def.fields() {
                if let Some(field_value) = record.get(&field.name) {
                    write_member(&field.schema, offset + field.offset, bytes, field_value)?;
                }
            }
            Ok(())
        }
        Schema::Enum(def) => {
            let label = value.as_label().ok_or_else(|| mismatch("enum", value))?;
            let ordinal = def
                .ordinal_of(label)
                .ok_or_else(|| EncodeError::InvalidEnumValue {
                    value: label.to_string(),
                    labels: def.labels().to_vec(),
                })?;
            bytes[offset] = u8::try_from(ordinal).map_err(|_| EncodeError::ValueOutOfRange {
                kind: "enum",
                value: label.to_string(),
            })?;
            Ok(())
        }
        Schema::Raw(_) => {
            let blob = value.as_bytes().ok_or_else(|| mismatch("bytes", value))?;
            copy_blob(&mut bytes[offset..end], blob);
            Ok(())
        }
        Schema::Union(_) => match value {
            Value::Bytes(blob) => {
                copy_blob(&mut bytes[offset..end], blob);
                Ok(())
            }
            _ => Err(EncodeError::UnsupportedOperation("a union").into()),
        },
        Schema::Pointer(_) => {
            let raw = value.as_int().ok_or_else(|| mismatch("pointer", value))?;
            let address = u32::try_from(raw).map_err(|_| EncodeError::ValueOutOfRange {
                kind: "pointer",
                value: raw.to_string(),
            })?;
            bytes[offset..end].copy_from_slice(&address.to_le_bytes());
            Ok(())
        }
    }
}

/// Copy at most the destination's width; shorter blobs leave the tail as is.
fn copy_blob(dest: &mut [u8], blob: &[u8]) {
    let n = blob.len().min(dest.len());
    dest[..n].copy_from_slice(&blob[..n]);
}

fn write_scalar(kind: ScalarKind, dest: &mut [u8], value: &Value) -> CodecResult<()> {
    match kind {
        ScalarKind::Bool => {
            let b = value.as_bool().ok_or_else(|| mismatch("bool", value))?;
            dest[0] = u8::from(b);
        }
        ScalarKind::Float32 => {
            let f = value.as_float().ok_or_else(|| mismatch("float32", value))?;
            dest.copy_from_slice(&(f as f32).to_le_bytes());
        }
        ScalarKind::Float64 => {
            let f = value.as_float().ok_or_else(|| mismatch("float64", value))?;
            dest.copy_from_slice(&f.to_le_bytes());
        }
        int_kind => {
            let i = value
                .as_int()
                .ok_or_else(|| mismatch(int_kind.type_name(), value))?;
            if let Some((min, max)) = int_kind.int_range() {
                if i < min || i > max {
                    return Err(EncodeError::ValueOutOfRange {
                        kind: int_kind.type_name(),
                        value: i.to_string(),
                    }
                    .into());
                }
            }
            // Two's complement, truncated to the scalar width
            let width = dest.len();
            dest.copy_from_slice(&i.to_le_bytes()[..width]);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::errors::CodecError;
    use crate::codec::Record;

    #[test]
    fn test_writes_little_endian() {
        let mut buffer = vec![0u8; 100];
        write(&Schema::f32(), 0, &mut buffer, &Value::from(6.5f32)).unwrap();
        assert_eq!(f32::from_le_bytes([buffer[0], buffer[1], buffer[2], buffer[3]]), 6.5);

        write(&Schema::i32(), 5, &mut buffer, &Value::from(670)).unwrap();
        assert_eq!(i32::from_le_bytes([buffer[5], buffer[6], buffer[7], buffer[8]]), 670);

        write(&Schema::i16(), 10, &mut buffer, &Value::from(-2i16)).unwrap();
        assert_eq!(&buffer[10..12], &[0xfe, 0xff]);
    }

    #[test]
    fn test_bool_encodes_as_one_or_zero() {
        let mut buffer = [9u8; 2];
        write(&Schema::bool(), 0, &mut buffer, &Value::Bool(true)).unwrap();
        write(&Schema::bool(), 1, &mut buffer, &Value::Bool(false)).unwrap();
        assert_eq!(buffer, [1, 0]);
    }

    #[test]
    fn test_integer_range_checked() {
        let mut buffer = [0u8; 4];
        let err = write(&Schema::u8(), 0, &mut buffer, &Value::Int(256)).unwrap_err();
        assert_eq!(err.code(), "MEMLAYOUT_VALUE_OUT_OF_RANGE");

        let err = write(&Schema::u16(), 0, &mut buffer, &Value::Int(-1)).unwrap_err();
        assert_eq!(err.code(), "MEMLAYOUT_VALUE_OUT_OF_RANGE");

        write(&Schema::u32(), 0, &mut buffer, &Value::from(u32::MAX)).unwrap();
        assert_eq!(buffer, [0xff; 4]);
    }

    #[test]
    fn test_type_mismatch() {
        let mut buffer = [0u8; 8];
        let err = write(&Schema::i32(), 0, &mut buffer, &Value::Float(1.0)).unwrap_err();
        assert_eq!(
            err,
            CodecError::Encode(EncodeError::TypeMismatch {
                expected: "int32",
                found: "float",
            })
        );

        // Integers widen into float fields
        write(&Schema::f64(), 0, &mut buffer, &Value::Int(3)).unwrap();
        assert_eq!(f64::from_le_bytes(buffer), 3.0);
    }

    #[test]
    fn test_unknown_enum_label() {
        let letters = Schema::enum_of(["X", "Y", "Z"]);
        let mut buffer = [0u8; 1];
        let err = write(&letters, 0, &mut buffer, &Value::from("W")).unwrap_err();
        assert!(matches!(
            err,
            CodecError::Encode(EncodeError::InvalidEnumValue { ref value, .. }) if value == "W"
        ));
        assert_eq!(buffer, [0]);
    }

    #[test]
    fn test_enum_beyond_one_byte() {
        let labels: Vec<String> = (0..300).map(|i| format!("L{}", i)).collect();
        let wide = Schema::enum_of(labels);
        let mut buffer = [0u8; 1];

        write(&wide, 0, &mut buffer, &Value::from("L255")).unwrap();
        assert_eq!(buffer, [255]);
        let err = write(&wide, 0, &mut buffer, &Value::from("L256")).unwrap_err();
        assert_eq!(err.code(), "MEMLAYOUT_VALUE_OUT_OF_RANGE");
    }

    #[test]
    fn test_out_of_bounds_writes_nothing() {
        let point = Schema::structure([("x", Schema::f32()), ("y", Schema::f32())]);
        let mut buffer = [0u8; 10];
        let value = Value::from(Record::new().with("x", 1.0f32).with("y", 2.0f32));

        let err = write(&point, 4, &mut buffer, &value).unwrap_err();
        assert_eq!(err.code(), "MEMLAYOUT_OUT_OF_BOUNDS");
        assert_eq!(buffer, [0u8; 10]);
    }

    #[test]
    fn test_failed_struct_write_keeps_earlier_fields() {
        let def = Schema::structure([
            ("a", Schema::u8()),
            ("b", Schema::enum_of(["ON", "OFF"])),
            ("c", Schema::u8()),
        ]);
        let mut buffer = [0u8; 3];
        let value = Value::from(
            Record::new()
                .with("a", 7u8)
                .with("b", "MAYBE")
                .with("c", 9u8),
        );

        assert!(write(&def, 0, &mut buffer, &value).is_err());
        assert_eq!(buffer, [7, 0, 0]);
    }

    #[test]
    fn test_raw_copy_bounded_by_width() {
        let mut buffer = [0u8; 6];
        let blob = Value::from(vec![1u8, 2, 3, 4, 5]);
        write(&Schema::raw(3, crate::schema::Alignment::One), 1, &mut buffer, &blob).unwrap();
        assert_eq!(buffer, [0, 1, 2, 3, 0, 0]);
    }

    #[test]
    fn test_union_accepts_only_bytes() {
        let def = Schema::union([("a", Schema::f32()), ("b", Schema::u16())]);
        let mut buffer = [0u8; 4];

        let err = write(&def, 0, &mut buffer, &Value::Float(1.0)).unwrap_err();
        assert_eq!(err, CodecError::Encode(EncodeError::UnsupportedOperation("a union")));

        write(&def, 0, &mut buffer, &Value::from(vec![1u8, 2, 3, 4])).unwrap();
        assert_eq!(buffer, [1, 2, 3, 4]);
    }

    #[test]
    fn test_pointer_writes_u32_address() {
        let mut buffer = [0u8; 4];
        let ptr = Schema::void_ptr();
        write(&ptr, 0, &mut buffer, &Value::from(0x0102_0304u32)).unwrap();
        assert_eq!(buffer, [4, 3, 2, 1]);

        let err = write(&ptr, 0, &mut buffer, &Value::Int(-5)).unwrap_err();
        assert_eq!(err.code(), "MEMLAYOUT_VALUE_OUT_OF_RANGE");
    }

    #[test]
    fn test_zero() {
        let mut buffer = [0xaau8; 12];
        let def = Schema::structure([("a", Schema::u8()), ("b", Schema::i32())]);
        zero(&def, 2, &mut buffer).unwrap();
        assert_eq!(&buffer[..2], &[0xaa, 0xaa]);
        assert_eq!(&buffer[2..10], &[0u8; 8]);
        assert_eq!(&buffer[10..], &[0xaa, 0xaa]);

        assert!(zero(&def, 6, &mut buffer).is_err());
    }
}

//! Codec Round-Trip Tests
//!
//! Tests for codec invariants:
//! - A written value reads back equal
//! - Partial struct writes leave other fields untouched
//! - Enum ordinals outside the label set are rejected
//! - Union variants are written as raw segments and decoded by choice
//! - Pointers reference layouts elsewhere in the same memory

use memlayout::codec::{self, Record, Value};
use memlayout::schema::{Alignment, Schema};

// =============================================================================
// Helper Functions
// =============================================================================

fn point() -> Schema {
    Schema::structure([("x", Schema::f32()), ("y", Schema::f32())])
}

fn point_value(x: f32, y: f32) -> Value {
    Value::from(Record::new().with("x", x).with("y", y))
}

// =============================================================================
// Scalar and Struct Tests
// =============================================================================

/// Structs of scalars round-trip at an unaligned offset.
#[test]
fn test_struct_roundtrip() {
    let mut buffer = vec![0u8; 50];
    codec::write(&point(), 5, &mut buffer, &point_value(4.5, 1.25)).unwrap();
    assert_eq!(codec::read(&point(), 5, &buffer).unwrap(), point_value(4.5, 1.25));
}

/// Structs of structs round-trip.
#[test]
fn test_nested_struct_roundtrip() {
    let line = Schema::structure([("a", point()), ("b", point())]);
    let value = Value::from(
        Record::new()
            .with("a", point_value(1.0, 2.0))
            .with("b", point_value(6.0, 7.0)),
    );

    let mut buffer = vec![0u8; 50];
    codec::write(&line, 0, &mut buffer, &value).unwrap();
    assert_eq!(codec::read(&line, 0, &buffer).unwrap(), value);
}

/// Every scalar kind survives a round trip at its extremes.
#[test]
fn test_scalar_extremes_roundtrip() {
    let cases = [
        (Schema::i8(), Value::Int(-128)),
        (Schema::u8(), Value::Int(255)),
        (Schema::i16(), Value::Int(i64::from(i16::MIN))),
        (Schema::u16(), Value::Int(i64::from(u16::MAX))),
        (Schema::i32(), Value::Int(i64::from(i32::MIN))),
        (Schema::u32(), Value::Int(i64::from(u32::MAX))),
        (Schema::f64(), Value::Float(f64::MIN_POSITIVE)),
        (Schema::bool(), Value::Bool(true)),
    ];

    let mut buffer = [0u8; 8];
    for (schema, value) in &cases {
        codec::write(schema, 0, &mut buffer, value).unwrap();
        assert_eq!(&codec::read(schema, 0, &buffer).unwrap(), value, "{}", schema.type_name());
    }
}

/// Fields absent from the record keep their bytes.
#[test]
fn test_partial_write_preserves_other_fields() {
    let mut buffer = vec![0u8; 16];
    codec::write(&point(), 0, &mut buffer, &point_value(1.0, 2.0)).unwrap();

    let only_y = Value::from(Record::new().with("y", 9.0f32));
    codec::write(&point(), 0, &mut buffer, &only_y).unwrap();

    assert_eq!(codec::read(&point(), 0, &buffer).unwrap(), point_value(1.0, 9.0));
}

/// An empty record writes nothing.
#[test]
fn test_empty_record_is_noop() {
    let mut buffer = [0xabu8; 8];
    codec::write(&point(), 0, &mut buffer, &Value::from(Record::new())).unwrap();
    assert_eq!(buffer, [0xab; 8]);
}

/// Zeroing clears exactly the extent of the schema.
#[test]
fn test_zero_extent() {
    let mut buffer = [0xffu8; 12];
    codec::zero(&point(), 2, &mut buffer).unwrap();
    assert_eq!(buffer[..2], [0xff, 0xff]);
    assert_eq!(buffer[2..10], [0u8; 8]);
    assert_eq!(buffer[10..], [0xff, 0xff]);
}

/// Access past the end of memory is an error, not a panic.
#[test]
fn test_out_of_bounds() {
    let mut buffer = vec![0u8; 7];
    let write_err = codec::write(&point(), 0, &mut buffer, &point_value(1.0, 2.0)).unwrap_err();
    assert_eq!(write_err.code(), "MEMLAYOUT_OUT_OF_BOUNDS");

    let read_err = codec::read(&Schema::u32(), 4, &buffer).unwrap_err();
    assert_eq!(read_err.code(), "MEMLAYOUT_OUT_OF_BOUNDS");
    assert!(read_err.is_decode());
}

// =============================================================================
// Enum Tests
// =============================================================================

/// Labels encode as their position.
#[test]
fn test_enum_ordinals() {
    let letters = Schema::enum_of(["X", "Y", "Z"]);
    let holder = Schema::structure([("a", letters.clone()), ("b", letters)]);
    let value = Value::from(Record::new().with("a", "Z").with("b", "Y"));

    let mut buffer = vec![0u8; 100];
    codec::write(&holder, 0, &mut buffer, &value).unwrap();

    assert_eq!(buffer[0], 2);
    assert_eq!(buffer[1], 1);
    assert_eq!(codec::read(&holder, 0, &buffer).unwrap(), value);
}

/// Ordinals past the last label and unknown labels are rejected.
#[test]
fn test_enum_boundaries() {
    let letters = Schema::enum_of(["X", "Y", "Z"]);

    let buffer = [3u8, 255u8];
    assert_eq!(codec::read(&letters, 0, &buffer).unwrap_err().code(), "MEMLAYOUT_INVALID_ENUM_ORDINAL");
    assert_eq!(codec::read(&letters, 1, &buffer).unwrap_err().code(), "MEMLAYOUT_INVALID_ENUM_ORDINAL");

    let mut buffer = [0u8; 1];
    let err = codec::write(&letters, 0, &mut buffer, &Value::from("W")).unwrap_err();
    assert_eq!(err.code(), "MEMLAYOUT_INVALID_ENUM_VALUE");
    assert_eq!(buffer, [0]);
}

// =============================================================================
// Raw and Union Tests
// =============================================================================

/// A raw blob embeds another layout.
#[test]
fn test_raw_member() {
    let ten_bytes = Schema::raw(10, Alignment::One);
    let holder = Schema::structure([
        ("before", Schema::u8()),
        ("raw", ten_bytes.clone()),
        ("after", Schema::u8()),
    ]);

    let blob = match &ten_bytes {
        Schema::Raw(raw) => raw.encode(&point(), &point_value(6.0, 7.0)).unwrap(),
        other => panic!("expected raw, got {}", other.type_name()),
    };
    assert_eq!(blob.len(), 10);

    let mut buffer = vec![0u8; 100];
    let value = Value::from(
        Record::new()
            .with("before", 123u8)
            .with("raw", blob)
            .with("after", 255u8),
    );
    codec::write(&holder, 0, &mut buffer, &value).unwrap();

    assert_eq!(buffer[0], 123);
    assert_eq!(codec::read(&point(), 1, &buffer).unwrap(), point_value(6.0, 7.0));
    assert_eq!(buffer[11], 255);

    let readback = codec::read(&holder, 0, &buffer).unwrap();
    let raw = readback.as_record().unwrap().get("raw").unwrap().as_bytes().unwrap();
    assert_eq!(codec::read(&point(), 0, raw).unwrap(), point_value(6.0, 7.0));
}

/// Union members are written from a constructed variant and read by choice.
#[test]
fn test_union_member() {
    let location = Schema::union([("point", point()), ("percent", Schema::f32())]);
    let holder = Schema::structure([
        ("location", location.clone()),
        ("type", Schema::enum_of(["POINT", "LOCATION"])),
    ]);

    let variant = location
        .as_union()
        .unwrap()
        .construct("point", &point_value(6.0, 7.0))
        .unwrap();
    let value = Value::from(Record::new().with("location", variant).with("type", "POINT"));

    let mut buffer = vec![0u8; 100];
    codec::write(&holder, 0, &mut buffer, &value).unwrap();

    let readback = codec::read(&holder, 0, &buffer).unwrap();
    let record = readback.as_record().unwrap();
    assert_eq!(record.get("type"), Some(&Value::from("POINT")));

    let bytes = record.get("location").unwrap().as_bytes().unwrap();
    assert_eq!(codec::read(&point(), 0, bytes).unwrap(), point_value(6.0, 7.0));
    assert_eq!(
        codec::read_variant(&location, "point", 0, &buffer).unwrap(),
        point_value(6.0, 7.0)
    );
}

/// Writing a narrow variant touches only its own bytes.
#[test]
fn test_union_variant_isolation() {
    let size = Schema::union([("point", point()), ("percent", Schema::f32())]);
    let mut buffer = vec![0u8; 8];
    codec::write(&point(), 0, &mut buffer, &point_value(1.0, 2.0)).unwrap();

    codec::write(&Schema::f32(), 0, &mut buffer, &Value::Float(0.5)).unwrap();

    assert_eq!(codec::read_variant(&size, "percent", 0, &buffer).unwrap(), Value::Float(0.5));
    assert_eq!(codec::read(&Schema::f32(), 4, &buffer).unwrap(), Value::Float(2.0));
}

/// A union is not read or written as a value of its own.
#[test]
fn test_union_direct_access_unsupported() {
    let size = Schema::union([("point", point()), ("percent", Schema::f32())]);
    let mut buffer = vec![0u8; 8];

    let err = codec::read(&size, 0, &buffer).unwrap_err();
    assert_eq!(err.code(), "MEMLAYOUT_UNSUPPORTED_OPERATION");

    let err = codec::write(&size, 0, &mut buffer, &point_value(1.0, 2.0)).unwrap_err();
    assert_eq!(err.code(), "MEMLAYOUT_UNSUPPORTED_OPERATION");

    let err = codec::read_variant(&size, "angle", 0, &buffer).unwrap_err();
    assert_eq!(err.code(), "MEMLAYOUT_UNKNOWN_VARIANT");
}

// =============================================================================
// Pointer Tests
// =============================================================================

/// Pointers reference layouts elsewhere in memory.
#[test]
fn test_pointer_deref() {
    let point_ptr = Schema::ptr(point());
    let mut buffer = vec![0u8; 100];

    codec::write(&point(), 50, &mut buffer, &point_value(6.0, 7.0)).unwrap();
    codec::write(&point_ptr, 0, &mut buffer, &Value::from(50u32)).unwrap();

    assert_eq!(codec::read(&point_ptr, 0, &buffer).unwrap(), Value::Int(50));
    assert_eq!(codec::deref(&point_ptr, 0, &buffer).unwrap(), point_value(6.0, 7.0));
}

/// Dangling pointers are rejected on deref; address 0 is a valid location.
#[test]
fn test_pointer_dangling() {
    let point_ptr = Schema::ptr(point());
    let mut buffer = vec![0u8; 100];

    codec::write(&point_ptr, 0, &mut buffer, &Value::from(96u32)).unwrap();
    let err = codec::deref(&point_ptr, 0, &buffer).unwrap_err();
    assert_eq!(err.code(), "MEMLAYOUT_NULL_OR_INVALID_ADDRESS");

    codec::write(&point(), 0, &mut buffer, &point_value(6.0, 7.0)).unwrap();
    codec::write(&point_ptr, 50, &mut buffer, &Value::from(0u32)).unwrap();
    assert_eq!(codec::deref(&point_ptr, 50, &buffer).unwrap(), point_value(6.0, 7.0));

    let err = codec::deref(&point(), 0, &buffer).unwrap_err();
    assert_eq!(err.code(), "MEMLAYOUT_UNSUPPORTED_OPERATION");
}

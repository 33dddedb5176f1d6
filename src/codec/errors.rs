//! Codec error types
//!
//! Error codes:
//! - MEMLAYOUT_INVALID_ENUM_ORDINAL (decode)
//! - MEMLAYOUT_INVALID_ENUM_VALUE (encode)
//! - MEMLAYOUT_UNSUPPORTED_OPERATION (decode/encode)
//! - MEMLAYOUT_NULL_OR_INVALID_ADDRESS (deref)
//! - MEMLAYOUT_OUT_OF_BOUNDS (decode/encode)
//! - MEMLAYOUT_TYPE_MISMATCH (encode)
//! - MEMLAYOUT_VALUE_OUT_OF_RANGE (encode)
//! - MEMLAYOUT_UNKNOWN_VARIANT (decode/encode)
//!
//! All codec errors are local and synchronous. None are retried. A failed
//! struct write may leave fields before the failing one already written.

use std::fmt;

use thiserror::Error;

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Severity levels for codec errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The value or address was rejected, memory is intact
    Reject,
    /// Memory content contradicts its schema
    Corruption,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Corruption => write!(f, "CORRUPTION"),
        }
    }
}

/// A byte span that does not fit inside the memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub offset: usize,
    pub byte_length: usize,
    /// Bytes available
    pub capacity: usize,
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}) exceeds capacity {}",
            self.offset,
            self.offset.saturating_add(self.byte_length),
            self.capacity
        )
    }
}

/// Failures while interpreting bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("enum ordinal {ordinal} outside labels [{}]", .labels.join(","))]
    InvalidEnumOrdinal { ordinal: u8, labels: Vec<String> },

    #[error("cannot read {0}; read the active variant instead")]
    UnsupportedOperation(&'static str),

    #[error("referent at address {address:#x} lies outside memory of {capacity} bytes")]
    NullOrInvalidAddress { address: u32, capacity: usize },

    #[error("read {0}")]
    OutOfBounds(Span),

    #[error("union has no variant '{0}'")]
    UnknownVariant(String),
}

/// Failures while populating bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("'{value}' is not a valid enum value, expected one of [{}]", .labels.join(","))]
    InvalidEnumValue { value: String, labels: Vec<String> },

    #[error("cannot write {0}; write a pre-encoded variant as raw bytes instead")]
    UnsupportedOperation(&'static str),

    #[error("write {0}")]
    OutOfBounds(Span),

    #[error("expected {expected} value, got {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("{value} does not fit in {kind}")]
    ValueOutOfRange { kind: &'static str, value: String },

    #[error("union has no variant '{0}'")]
    UnknownVariant(String),
}

/// Codec error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),
}

impl CodecError {
    /// Stable string code
    pub fn code(&self) -> &'static str {
        match self {
            CodecError::Decode(err) => match err {
                DecodeError::InvalidEnumOrdinal { .. } => "MEMLAYOUT_INVALID_ENUM_ORDINAL",
                DecodeError::UnsupportedOperation(_) => "MEMLAYOUT_UNSUPPORTED_OPERATION",
                DecodeError::NullOrInvalidAddress { .. } => "MEMLAYOUT_NULL_OR_INVALID_ADDRESS",
                DecodeError::OutOfBounds(_) => "MEMLAYOUT_OUT_OF_BOUNDS",
                DecodeError::UnknownVariant(_) => "MEMLAYOUT_UNKNOWN_VARIANT",
            },
            CodecError::Encode(err) => match err {
                EncodeError::InvalidEnumValue { .. } => "MEMLAYOUT_INVALID_ENUM_VALUE",
                EncodeError::UnsupportedOperation(_) => "MEMLAYOUT_UNSUPPORTED_OPERATION",
                EncodeError::OutOfBounds(_) => "MEMLAYOUT_OUT_OF_BOUNDS",
                EncodeError::TypeMismatch { .. } => "MEMLAYOUT_TYPE_MISMATCH",
                EncodeError::ValueOutOfRange { .. } => "MEMLAYOUT_VALUE_OUT_OF_RANGE",
                EncodeError::UnknownVariant(_) => "MEMLAYOUT_UNKNOWN_VARIANT",
            },
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            CodecError::Decode(DecodeError::InvalidEnumOrdinal { .. }) => Severity::Corruption,
            _ => Severity::Reject,
        }
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, CodecError::Decode(_))
    }

    pub fn is_encode(&self) -> bool {
        matches!(self, CodecError::Encode(_))
    }
}

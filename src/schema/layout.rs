//! C struct layout computation
//!
//! Fields are placed in declaration order. Each field starts at the next
//! multiple of its own alignment, the gap becoming a padding element. The
//! struct is aligned to its most-aligned field and its length is padded up
//! to a multiple of that alignment, so arrays of the struct stay aligned.
//! `packed` layouts are not supported.

use super::types::{Alignment, FieldElement, LayoutElement, Schema, StructSchema};
use crate::observability::{Event, Logger, Severity};

/// Compute the layout of a struct from its fields in declaration order.
///
/// A name given more than once keeps the position of its first occurrence
/// and the schema of its last, the way an ordered map treats a repeated key.
pub fn compute_struct_layout<I, S>(fields: I) -> StructSchema
where
    I: IntoIterator<Item = (S, Schema)>,
    S: Into<String>,
{
    let mut entries: Vec<(String, Schema)> = Vec::new();
    for (name, schema) in fields {
        let name = name.into();
        match entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = schema,
            None => entries.push((name, schema)),
        }
    }

    let byte_align = entries
        .iter()
        .map(|(_, schema)| schema.byte_align())
        .max()
        .unwrap_or(Alignment::One);

    let mut layout = Vec::with_capacity(entries.len() * 2 + 1);
    let mut offset = 0usize;

    for (name, schema) in entries {
        let padding = schema.byte_align().padding_for(offset);
        if padding != 0 {
            layout.push(LayoutElement::Padding {
                byte_length: padding,
            });
            offset += padding;
        }

        let byte_length = schema.byte_length();
        layout.push(LayoutElement::Field(FieldElement {
            name,
            offset,
            schema,
        }));
        offset += byte_length;
    }

    let trailing = byte_align.padding_for(offset);
    if trailing != 0 {
        layout.push(LayoutElement::Padding {
            byte_length: trailing,
        });
        offset += trailing;
    }

    if Logger::enabled(Severity::Trace) {
        let align = byte_align.to_string();
        let byte_length = offset.to_string();
        let elements = layout.len().to_string();
        Logger::trace(
            Event::StructLayoutComputed,
            &[
                ("align", align.as_str()),
                ("byte_length", byte_length.as_str()),
                ("elements", elements.as_str()),
            ],
        );
    }

    StructSchema {
        layout,
        byte_length: offset,
        byte_align,
    }
}

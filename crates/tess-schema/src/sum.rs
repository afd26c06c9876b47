//! Schema composition for tagged unions.
//!
//! The synthesizer computes one [`EncodedPayload`] per variant; this module
//! wraps each payload according to the sum encoding and joins the variants
//! with `oneOf`.

use tess_core::{Items, Referenced, Schema, SchemaType, SumEncoding};

use crate::error::SchemaError;

/// Payload schema of one variant, before tagging.
#[derive(Debug, Clone, PartialEq)]
pub enum EncodedPayload {
    /// No fields.
    Nullary,
    /// Inline object whose keys sit next to an injected tag.
    Record(Schema),
    /// Object reached by reference; the tag is composed in with `allOf`.
    RecordRef(Referenced<Schema>),
    /// Anything else, nested under the contents field.
    Value(Referenced<Schema>),
}

/// A variant ready for encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedVariant {
    /// Tag after renaming.
    pub tag: String,
    pub payload: EncodedPayload,
}

impl EncodedVariant {
    #[must_use]
    pub fn new(tag: impl Into<String>, payload: EncodedPayload) -> Self {
        Self {
            tag: tag.into(),
            payload,
        }
    }
}

/// Placeholder for a nullary variant under `ObjectWithSingleField`.
#[must_use]
pub fn empty_array() -> Schema {
    Schema {
        items: Some(Items::Array(Vec::new())),
        max_items: Some(0),
        ..Schema::new(SchemaType::Array)
    }
}

/// `{"<tag_field>": "<tag>"}` with the tag required.
fn tag_object(tag_field: &str, tag: &str) -> Schema {
    Schema::object().with_property(
        tag_field,
        Referenced::Inline(Schema::string_enum([tag])),
        true,
    )
}

/// Encode every variant and join them with `oneOf`.
///
/// # Errors
///
/// Returns `SchemaError::UnsupportedSumEncoding` for `TwoElementArray`.
pub fn encode_sum(
    type_name: &str,
    encoding: &SumEncoding,
    variants: Vec<EncodedVariant>,
) -> Result<Schema, SchemaError> {
    let alternatives = variants
        .into_iter()
        .map(|variant| {
            let tag = variant.tag.clone();
            let mut encoded = encode_variant(encoding, variant).ok_or_else(|| {
                SchemaError::UnsupportedSumEncoding {
                    type_name: type_name.to_string(),
                    encoding: encoding.clone(),
                }
            })?;
            if let Referenced::Inline(schema) = &mut encoded {
                if schema.title.is_none() {
                    schema.title = Some(tag);
                }
            }
            Ok(encoded)
        })
        .collect::<Result<Vec<_>, SchemaError>>()?;

    Ok(Schema {
        one_of: Some(alternatives),
        ..Schema::default()
    })
}

/// `None` when the encoding has no schema form.
fn encode_variant(encoding: &SumEncoding, variant: EncodedVariant) -> Option<Referenced<Schema>> {
    let EncodedVariant { tag, payload } = variant;
    let encoded = match encoding {
        SumEncoding::TaggedObject {
            tag_field,
            contents_field,
        } => Referenced::Inline(match payload {
            EncodedPayload::Nullary => tag_object(tag_field, &tag),
            EncodedPayload::Record(mut record) => {
                record
                    .properties
                    .get_or_insert_with(Default::default)
                    .insert(
                        tag_field.clone(),
                        Referenced::Inline(Schema::string_enum([tag])),
                    );
                record.required.retain(|name| name != tag_field);
                record.required.insert(0, tag_field.clone());
                record
            }
            EncodedPayload::RecordRef(record) => Schema {
                all_of: Some(vec![Referenced::Inline(tag_object(tag_field, &tag)), record]),
                ..Schema::default()
            },
            EncodedPayload::Value(value) => {
                tag_object(tag_field, &tag).with_property(contents_field, value, true)
            }
        }),
        SumEncoding::ObjectWithSingleField => {
            let inner = match payload {
                EncodedPayload::Nullary => Referenced::Inline(empty_array()),
                EncodedPayload::Record(record) => Referenced::Inline(record),
                EncodedPayload::RecordRef(value) | EncodedPayload::Value(value) => value,
            };
            Referenced::Inline(Schema::object().with_property(tag, inner, true))
        }
        SumEncoding::UntaggedValue => match payload {
            EncodedPayload::Nullary => Referenced::Inline(Schema::string_enum([tag])),
            EncodedPayload::Record(record) => Referenced::Inline(record),
            EncodedPayload::RecordRef(value) | EncodedPayload::Value(value) => value,
        },
        SumEncoding::TwoElementArray => return None,
    };
    Some(encoded)
}

//! Schemas inferred from example values.
//!
//! A loose sketch keeps only the structure of the value. A strict sketch
//! pins the value down so it validates nothing else.

use serde::Serialize;
use serde_json::{Map, Number, Value};
use tess_core::{Items, Referenced, Schema, SchemaType};

use crate::error::SchemaError;

/// Structural schema of `value`, with the value attached as `example`.
///
/// # Errors
///
/// Returns `SchemaError::Serialize` if `value` cannot be turned into JSON.
pub fn sketch_schema<T: Serialize + ?Sized>(value: &T) -> Result<Schema, SchemaError> {
    Ok(sketch_value(&serde_json::to_value(value)?))
}

/// [`sketch_schema`] for a JSON value.
#[must_use]
pub fn sketch_value(value: &Value) -> Schema {
    let mut schema = loose(value);
    if !matches!(value, Value::Null | Value::Bool(_)) {
        schema.example = Some(value.clone());
    }
    schema
}

/// Schema accepting `value` and nothing else.
///
/// # Errors
///
/// Returns `SchemaError::Serialize` if `value` cannot be turned into JSON.
pub fn sketch_strict_schema<T: Serialize + ?Sized>(value: &T) -> Result<Schema, SchemaError> {
    Ok(sketch_strict_value(&serde_json::to_value(value)?))
}

/// [`sketch_strict_schema`] for a JSON value.
#[must_use]
pub fn sketch_strict_value(value: &Value) -> Schema {
    match value {
        Value::Null => Schema::null(),
        Value::Bool(_) => pinned(Schema::boolean(), value),
        Value::Number(number) => pinned(
            Schema {
                minimum: Some(number.clone()),
                maximum: Some(number.clone()),
                multiple_of: positive_step(number),
                ..Schema::number()
            },
            value,
        ),
        Value::String(text) => {
            let len = text.chars().count();
            pinned(
                Schema {
                    min_length: Some(len),
                    max_length: Some(len),
                    pattern: Some(format!("^{}$", escape_pattern(text))),
                    ..Schema::string()
                },
                value,
            )
        }
        Value::Array(elements) => pinned(
            Schema {
                items: Some(Items::Array(
                    elements
                        .iter()
                        .map(|element| Referenced::Inline(sketch_strict_value(element)))
                        .collect(),
                )),
                min_items: Some(elements.len()),
                max_items: Some(elements.len()),
                unique_items: Some(all_distinct(elements)),
                ..Schema::new(SchemaType::Array)
            },
            value,
        ),
        Value::Object(fields) => pinned(
            Schema {
                min_properties: Some(fields.len()),
                max_properties: Some(fields.len()),
                ..object(fields, sketch_strict_value)
            },
            value,
        ),
    }
}

fn loose(value: &Value) -> Schema {
    match value {
        Value::Null => Schema::null(),
        Value::Bool(_) => Schema::boolean(),
        Value::Number(_) => Schema::number(),
        Value::String(_) => Schema::string(),
        Value::Array(elements) => {
            let sketches: Vec<Schema> = elements.iter().map(loose).collect();
            let items = match sketches.first() {
                Some(first) if sketches.iter().all(|sketch| sketch == first) => {
                    Items::Object(Box::new(Referenced::Inline(first.clone())))
                }
                _ => Items::Array(sketches.into_iter().map(Referenced::Inline).collect()),
            };
            Schema {
                items: Some(items),
                ..Schema::new(SchemaType::Array)
            }
        }
        Value::Object(fields) => object(fields, loose),
    }
}

/// Object with every key required, in sorted order.
fn object(fields: &Map<String, Value>, sketch: fn(&Value) -> Schema) -> Schema {
    let mut required: Vec<String> = fields.keys().cloned().collect();
    required.sort();
    Schema {
        properties: Some(
            fields
                .iter()
                .map(|(key, value)| (key.clone(), Referenced::Inline(sketch(value))))
                .collect(),
        ),
        required,
        ..Schema::new(SchemaType::Object)
    }
}

fn pinned(schema: Schema, value: &Value) -> Schema {
    Schema {
        enumeration: Some(vec![value.clone()]),
        ..schema
    }
}

/// `multipleOf` must be positive, so the step is the magnitude of `number`.
fn positive_step(number: &Number) -> Option<Number> {
    if let Some(unsigned) = number.as_u64() {
        return (unsigned != 0).then(|| number.clone());
    }
    if let Some(signed) = number.as_i64() {
        return Some(Number::from(signed.unsigned_abs()));
    }
    number
        .as_f64()
        .filter(|float| *float != 0.0)
        .and_then(|float| Number::from_f64(float.abs()))
}

fn escape_pattern(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if "\\^$.|?*+()[]{}/-".contains(ch) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn all_distinct(elements: &[Value]) -> bool {
    elements
        .iter()
        .enumerate()
        .all(|(i, element)| elements[i + 1..].iter().all(|other| other != element))
}

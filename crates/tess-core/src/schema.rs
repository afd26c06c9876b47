//! Schema record and its nested building blocks.
//!
//! [`Schema`] is a flat bag of independent optional constraints. No field is
//! required on its own; meaning comes from combinations such as
//! `type: object` + `properties` + `required`. Absent fields are omitted when
//! serialized, and keys are camelCase as in OpenAPI documents.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::reference::{Component, ReferenceKind, Referenced};

/// JSON value type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    Null,
}

/// Array item constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Items {
    /// Fixed positional list, one schema per index.
    Array(Vec<Referenced<Schema>>),
    /// Homogeneous array, one schema shared by every element.
    Object(Box<Referenced<Schema>>),
}

impl Items {
    /// Every item schema, in positional order.
    #[must_use]
    pub fn schemas(&self) -> Vec<&Referenced<Schema>> {
        match self {
            Self::Array(list) => list.iter().collect(),
            Self::Object(single) => vec![single.as_ref()],
        }
    }
}

/// `additionalProperties`: either a flag or a schema for undeclared keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Allowed(bool),
    Schema(Box<Referenced<Schema>>),
}

/// JSON-Schema-like description of accepted and produced JSON values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,
    /// Format hint (`int32`, `date-time`, `uuid`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Non-binding example value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enumeration: Option<Vec<Value>>,

    // Composition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_of: Option<Vec<Referenced<Self>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub one_of: Option<Vec<Referenced<Self>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub any_of: Option<Vec<Referenced<Self>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not: Option<Box<Referenced<Self>>>,

    // Objects
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, Referenced<Self>>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<AdditionalProperties>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_properties: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_properties: Option<usize>,

    // Arrays
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Items>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_items: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_items: Option<bool>,

    // Numbers. Kept as JSON numbers so 64-bit bounds survive exactly.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_minimum: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_maximum: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiple_of: Option<Number>,

    // Strings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Free-form `x-` extensions.
    #[serde(flatten)]
    pub extensions: BTreeMap<String, Value>,
}

impl Component for Schema {
    const KIND: ReferenceKind = ReferenceKind::Schemas;
}

impl Schema {
    /// Schema with only the type tag set.
    #[must_use]
    pub fn new(schema_type: SchemaType) -> Self {
        Self {
            schema_type: Some(schema_type),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn string() -> Self {
        Self::new(SchemaType::String)
    }

    #[must_use]
    pub fn integer() -> Self {
        Self::new(SchemaType::Integer)
    }

    #[must_use]
    pub fn number() -> Self {
        Self::new(SchemaType::Number)
    }

    #[must_use]
    pub fn boolean() -> Self {
        Self::new(SchemaType::Boolean)
    }

    #[must_use]
    pub fn null() -> Self {
        Self::new(SchemaType::Null)
    }

    /// Object schema with an empty property map.
    #[must_use]
    pub fn object() -> Self {
        Self {
            properties: Some(BTreeMap::new()),
            ..Self::new(SchemaType::Object)
        }
    }

    /// Homogeneous array of `item`.
    #[must_use]
    pub fn array(item: Referenced<Self>) -> Self {
        Self {
            items: Some(Items::Object(Box::new(item))),
            ..Self::new(SchemaType::Array)
        }
    }

    /// Fixed-length array with one schema per position.
    #[must_use]
    pub fn tuple(items: Vec<Referenced<Self>>) -> Self {
        let len = items.len();
        Self {
            items: Some(Items::Array(items)),
            min_items: Some(len),
            max_items: Some(len),
            ..Self::new(SchemaType::Array)
        }
    }

    /// String schema accepting exactly the given literals.
    #[must_use]
    pub fn string_enum<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            enumeration: Some(
                values
                    .into_iter()
                    .map(|value| Value::String(value.into()))
                    .collect(),
            ),
            ..Self::string()
        }
    }

    /// Add a property, optionally listing it in `required`.
    ///
    /// A property that already exists is replaced; `required` never holds
    /// duplicates.
    #[must_use]
    pub fn with_property(
        mut self,
        name: impl Into<String>,
        schema: Referenced<Self>,
        required: bool,
    ) -> Self {
        let name = name.into();
        if required && !self.required.contains(&name) {
            self.required.push(name.clone());
        }
        self.properties
            .get_or_insert_with(BTreeMap::new)
            .insert(name, schema);
        self
    }

    /// Property schema by name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Referenced<Self>> {
        self.properties.as_ref()?.get(name)
    }

    /// `true` when no constraint at all is set (accepts any value).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A schema with an optional canonical name. Named schemas are referenceable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub schema: Schema,
}

impl NamedSchema {
    #[must_use]
    pub const fn new(name: Option<String>, schema: Schema) -> Self {
        Self { name, schema }
    }

    #[must_use]
    pub const fn anonymous(schema: Schema) -> Self {
        Self { name: None, schema }
    }

    #[must_use]
    pub fn named(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: Some(name.into()),
            schema,
        }
    }
}

//! Wire-convention enums shared by configuration and synthesis.
//!
//! Both mirror serde vocabulary: [`SumEncoding`] names the four enum
//! representations and [`RenameRule`] the `rename_all` case conversions. A
//! schema only matches the encoded data when these agree with the codec.

use serde::{Deserialize, Serialize};
use std::fmt;

fn default_tag_field() -> String {
    "tag".to_string()
}

fn default_contents_field() -> String {
    "contents".to_string()
}

// ---------------------------------------------------------------------------
// SumEncoding
// ---------------------------------------------------------------------------

/// JSON encoding convention for a tagged union.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SumEncoding {
    /// `{"<tag_field>": "A", ...fields}` for record variants,
    /// `{"<tag_field>": "A", "<contents_field>": payload}` otherwise.
    TaggedObject {
        #[serde(default = "default_tag_field")]
        tag_field: String,
        #[serde(default = "default_contents_field")]
        contents_field: String,
    },
    /// `{"A": payload}`.
    ObjectWithSingleField,
    /// Bare payload, no tag.
    UntaggedValue,
    /// `["A", payload]`. Not expressible as a schema.
    TwoElementArray,
}

impl SumEncoding {
    #[must_use]
    pub fn tagged_object(tag_field: impl Into<String>, contents_field: impl Into<String>) -> Self {
        Self::TaggedObject {
            tag_field: tag_field.into(),
            contents_field: contents_field.into(),
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TaggedObject { .. } => "tagged_object",
            Self::ObjectWithSingleField => "object_with_single_field",
            Self::UntaggedValue => "untagged_value",
            Self::TwoElementArray => "two_element_array",
        }
    }
}

impl Default for SumEncoding {
    fn default() -> Self {
        Self::tagged_object(default_tag_field(), default_contents_field())
    }
}

impl fmt::Display for SumEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RenameRule
// ---------------------------------------------------------------------------

/// Case conversion applied to variant tags and field names.
///
/// Variant input is expected in `PascalCase` and field input in
/// `snake_case`, as Rust identifiers are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RenameRule {
    #[default]
    #[serde(rename = "none")]
    None,
    #[serde(rename = "lowercase")]
    LowerCase,
    #[serde(rename = "UPPERCASE")]
    UpperCase,
    #[serde(rename = "PascalCase")]
    PascalCase,
    #[serde(rename = "camelCase")]
    CamelCase,
    #[serde(rename = "snake_case")]
    SnakeCase,
    #[serde(rename = "SCREAMING_SNAKE_CASE")]
    ScreamingSnakeCase,
    #[serde(rename = "kebab-case")]
    KebabCase,
    #[serde(rename = "SCREAMING-KEBAB-CASE")]
    ScreamingKebabCase,
}

impl RenameRule {
    /// Rename a `PascalCase` variant tag.
    #[must_use]
    pub fn apply_to_variant(self, variant: &str) -> String {
        match self {
            Self::None | Self::PascalCase => variant.to_string(),
            Self::LowerCase => variant.to_ascii_lowercase(),
            Self::UpperCase => variant.to_ascii_uppercase(),
            Self::CamelCase => {
                let mut chars = variant.chars();
                chars.next().map_or_else(String::new, |first| {
                    first.to_ascii_lowercase().to_string() + chars.as_str()
                })
            }
            Self::SnakeCase => {
                let mut snake = String::with_capacity(variant.len() + 4);
                for (i, ch) in variant.char_indices() {
                    if i > 0 && ch.is_uppercase() {
                        snake.push('_');
                    }
                    snake.push(ch.to_ascii_lowercase());
                }
                snake
            }
            Self::ScreamingSnakeCase => Self::SnakeCase
                .apply_to_variant(variant)
                .to_ascii_uppercase(),
            Self::KebabCase => Self::SnakeCase.apply_to_variant(variant).replace('_', "-"),
            Self::ScreamingKebabCase => Self::ScreamingSnakeCase
                .apply_to_variant(variant)
                .replace('_', "-"),
        }
    }

    /// Rename a `snake_case` field name.
    #[must_use]
    pub fn apply_to_field(self, field: &str) -> String {
        match self {
            Self::None | Self::LowerCase | Self::SnakeCase => field.to_string(),
            Self::UpperCase | Self::ScreamingSnakeCase => field.to_ascii_uppercase(),
            Self::PascalCase => {
                let mut pascal = String::with_capacity(field.len());
                let mut capitalize = true;
                for ch in field.chars() {
                    if ch == '_' {
                        capitalize = true;
                    } else if capitalize {
                        pascal.push(ch.to_ascii_uppercase());
                        capitalize = false;
                    } else {
                        pascal.push(ch);
                    }
                }
                pascal
            }
            Self::CamelCase => {
                let pascal = Self::PascalCase.apply_to_field(field);
                let mut chars = pascal.chars();
                chars.next().map_or_else(String::new, |first| {
                    first.to_ascii_lowercase().to_string() + chars.as_str()
                })
            }
            Self::KebabCase => field.replace('_', "-"),
            Self::ScreamingKebabCase => field.to_ascii_uppercase().replace('_', "-"),
        }
    }
}

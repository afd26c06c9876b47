//! References into a components table.
//!
//! A [`Referenced<T>`] is either a pointer to a named entry of a
//! [`Definitions<T>`](crate::definitions::Definitions) table or the value
//! itself. On the wire a pointer is `{"$ref": "<prefix><name>"}`, where the
//! prefix is fixed by the entity kind of `T`. Decoding a `$ref` with another
//! kind's prefix fails; it is never reinterpreted as an inline value.

use std::fmt;

use serde::de::{DeserializeOwned, Error as _};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::CoreError;

/// Referenceable entity kinds of an API-description document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    Schemas,
    Parameters,
    Responses,
    Examples,
    Headers,
    Links,
    RequestBodies,
    Callbacks,
}

impl ReferenceKind {
    /// Every kind, in document order.
    pub const ALL: [Self; 8] = [
        Self::Schemas,
        Self::Parameters,
        Self::Responses,
        Self::Examples,
        Self::Headers,
        Self::Links,
        Self::RequestBodies,
        Self::Callbacks,
    ];

    /// The fixed path prefix for references of this kind.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Schemas => "#/components/schemas/",
            Self::Parameters => "#/components/parameters/",
            Self::Responses => "#/components/responses/",
            Self::Examples => "#/components/examples/",
            Self::Headers => "#/components/headers/",
            Self::Links => "#/components/links/",
            Self::RequestBodies => "#/components/requestBodies/",
            Self::Callbacks => "#/components/callbacks/",
        }
    }

    /// Render the reference path for `name`.
    #[must_use]
    pub fn render(self, name: &str) -> String {
        format!("{}{name}", self.prefix())
    }

    /// Extract the definition name from a reference path of this kind.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::MalformedReference` if `raw` lacks this kind's
    /// prefix, or `CoreError::EmptyReferenceName` if nothing follows it.
    pub fn parse(self, raw: &str) -> Result<String, CoreError> {
        let prefix = self.prefix();
        let name = raw
            .strip_prefix(prefix)
            .ok_or_else(|| CoreError::MalformedReference {
                expected_prefix: prefix,
                found: raw.to_string(),
            })?;
        if name.is_empty() {
            return Err(CoreError::EmptyReferenceName { prefix });
        }
        Ok(name.to_string())
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// A model type that can live in a components table and be referenced.
pub trait Component {
    /// The entity kind whose prefix references to this type carry.
    const KIND: ReferenceKind;
}

/// Either a named reference or an inline value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Referenced<T> {
    /// Pointer to the definition with this name.
    Ref(String),
    /// The value itself.
    Inline(T),
}

impl<T> Referenced<T> {
    /// Build a reference to the definition `name`.
    pub fn to_name(name: impl Into<String>) -> Self {
        Self::Ref(name.into())
    }

    /// The referenced name, if this is a reference.
    #[must_use]
    pub fn ref_name(&self) -> Option<&str> {
        match self {
            Self::Ref(name) => Some(name),
            Self::Inline(_) => None,
        }
    }

    /// The inline value, if this is not a reference.
    #[must_use]
    pub const fn as_inline(&self) -> Option<&T> {
        match self {
            Self::Ref(_) => None,
            Self::Inline(value) => Some(value),
        }
    }

    /// Mutable access to the inline value.
    pub const fn as_inline_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Ref(_) => None,
            Self::Inline(value) => Some(value),
        }
    }

    #[must_use]
    pub const fn is_ref(&self) -> bool {
        matches!(self, Self::Ref(_))
    }
}

impl<T: Component> Referenced<T> {
    /// The full `$ref` path, if this is a reference.
    #[must_use]
    pub fn ref_path(&self) -> Option<String> {
        self.ref_name().map(|name| T::KIND.render(name))
    }
}

impl<T> From<T> for Referenced<T> {
    fn from(value: T) -> Self {
        Self::Inline(value)
    }
}

impl<T: Component + Serialize> Serialize for Referenced<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Ref(name) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("$ref", &T::KIND.render(name))?;
                map.end()
            }
            Self::Inline(value) => value.serialize(serializer),
        }
    }
}

impl<'de, T: Component + DeserializeOwned> Deserialize<'de> for Referenced<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        if let Some(raw) = value.get("$ref") {
            let raw = raw
                .as_str()
                .ok_or_else(|| D::Error::custom("`$ref` must be a string"))?;
            let name = T::KIND.parse(raw).map_err(D::Error::custom)?;
            return Ok(Self::Ref(name));
        }
        T::deserialize(value)
            .map(Self::Inline)
            .map_err(D::Error::custom)
    }
}

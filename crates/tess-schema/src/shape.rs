//! Structural descriptions of Rust types.
//!
//! A [`TypeShape`] is what the synthesizer walks: leaves, containers,
//! records, tuples, and tagged unions. Types opt in by implementing
//! [`Describe`]; a type that returns a name from [`Describe::type_name`] is
//! registered once in the definitions table and referenced everywhere else.

use std::any::TypeId;
use std::borrow::Cow;
use std::fmt;

use tess_core::{RenameRule, Schema, SumEncoding};

use crate::catalog::Scalar;

/// A type that can describe its own structure.
///
/// ```
/// use tess_schema::{Describe, Field, TypeShape};
///
/// struct Point {
///     x: f64,
///     y: f64,
/// }
///
/// impl Describe for Point {
///     fn type_name() -> Option<std::borrow::Cow<'static, str>> {
///         Some("Point".into())
///     }
///
///     fn describe() -> TypeShape {
///         TypeShape::Record(vec![
///             Field::required::<f64>("x"),
///             Field::required::<f64>("y"),
///         ])
///     }
/// }
/// ```
pub trait Describe: 'static {
    /// Canonical definition name. `None` keeps the type anonymous, so its
    /// schema is always inlined.
    fn type_name() -> Option<Cow<'static, str>> {
        None
    }

    fn describe() -> TypeShape;

    /// Identity used to detect two types claiming the same name.
    ///
    /// Transparent wrappers forward to their inner type.
    fn type_identity() -> TypeId {
        TypeId::of::<Self>()
    }

    /// Rust spelling used in diagnostics.
    fn rust_name() -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Lazily evaluated handle to a [`Describe`] implementation.
///
/// Shapes refer to their children through `TypeRef`s so that recursive
/// types never build an infinite value.
#[derive(Clone, Copy)]
pub struct TypeRef {
    name: fn() -> Option<Cow<'static, str>>,
    shape: fn() -> TypeShape,
    identity: fn() -> TypeId,
    rust_name: fn() -> &'static str,
}

impl TypeRef {
    #[must_use]
    pub fn of<T: Describe + ?Sized>() -> Self {
        Self {
            name: T::type_name,
            shape: T::describe,
            identity: T::type_identity,
            rust_name: T::rust_name,
        }
    }

    #[must_use]
    pub fn name(&self) -> Option<Cow<'static, str>> {
        (self.name)()
    }

    #[must_use]
    pub fn shape(&self) -> TypeShape {
        (self.shape)()
    }

    #[must_use]
    pub fn identity(&self) -> TypeId {
        (self.identity)()
    }

    #[must_use]
    pub fn rust_name(&self) -> &'static str {
        (self.rust_name)()
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for TypeRef {}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeRef").field(&self.rust_name()).finish()
    }
}

/// Structure of one type.
#[derive(Debug, Clone)]
pub enum TypeShape {
    /// Catalog leaf.
    Leaf(Scalar),
    /// Homogeneous sequence.
    Array(TypeRef),
    /// Sequence without duplicates.
    Set(TypeRef),
    /// String-keyed map.
    Map(TypeRef),
    /// Value or null.
    Nullable(TypeRef),
    /// Named fields.
    Record(Vec<Field>),
    /// Positional fields.
    Tuple(Vec<TypeRef>),
    /// Tagged union.
    Sum(SumShape),
    /// Hand-written schema, used as is.
    Custom(Schema),
}

impl TypeShape {
    /// Sum with the configured encoding and tag renaming.
    #[must_use]
    pub fn sum(variants: Vec<Variant>) -> Self {
        Self::Sum(SumShape::new(variants))
    }

    /// `true` for a record that encodes as a JSON object with its own keys.
    #[must_use]
    pub fn is_record_shaped(&self, unwrap_unary_records: bool) -> bool {
        match self {
            Self::Record(fields) => !(unwrap_unary_records && fields.len() == 1),
            _ => false,
        }
    }
}

/// A named record field.
#[derive(Debug, Clone)]
pub struct Field {
    /// Field name before renaming.
    pub name: Cow<'static, str>,
    pub ty: TypeRef,
    /// Listed in the object's `required` array.
    pub required: bool,
}

impl Field {
    #[must_use]
    pub fn required<T: Describe + ?Sized>(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            ty: TypeRef::of::<T>(),
            required: true,
        }
    }

    /// A field that may be absent, e.g. `#[serde(default)]` or
    /// `skip_serializing_if`.
    #[must_use]
    pub fn optional<T: Describe + ?Sized>(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            ty: TypeRef::of::<T>(),
            required: false,
        }
    }
}

/// A tagged union and its per-type encoding overrides.
#[derive(Debug, Clone)]
pub struct SumShape {
    pub variants: Vec<Variant>,
    /// Overrides the configured sum encoding for this type.
    pub encoding: Option<SumEncoding>,
    /// Overrides the configured tag renaming for this type.
    pub tag_rename: Option<RenameRule>,
}

impl SumShape {
    #[must_use]
    pub const fn new(variants: Vec<Variant>) -> Self {
        Self {
            variants,
            encoding: None,
            tag_rename: None,
        }
    }

    #[must_use]
    pub fn encoding(mut self, encoding: SumEncoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    #[must_use]
    pub const fn tag_rename(mut self, rule: RenameRule) -> Self {
        self.tag_rename = Some(rule);
        self
    }

    #[must_use]
    pub fn all_nullary(&self) -> bool {
        self.variants.iter().all(Variant::is_nullary)
    }
}

/// One alternative of a sum.
#[derive(Debug, Clone)]
pub struct Variant {
    /// Tag before renaming.
    pub tag: Cow<'static, str>,
    pub payload: VariantPayload,
}

#[derive(Debug, Clone)]
pub enum VariantPayload {
    /// No payload.
    Unit,
    /// Named fields.
    Record(Vec<Field>),
    /// Positional fields. One element is a newtype variant.
    Tuple(Vec<TypeRef>),
}

impl Variant {
    #[must_use]
    pub fn unit(tag: impl Into<Cow<'static, str>>) -> Self {
        Self {
            tag: tag.into(),
            payload: VariantPayload::Unit,
        }
    }

    #[must_use]
    pub fn record(tag: impl Into<Cow<'static, str>>, fields: Vec<Field>) -> Self {
        Self {
            tag: tag.into(),
            payload: VariantPayload::Record(fields),
        }
    }

    #[must_use]
    pub fn tuple(tag: impl Into<Cow<'static, str>>, items: Vec<TypeRef>) -> Self {
        Self {
            tag: tag.into(),
            payload: VariantPayload::Tuple(items),
        }
    }

    #[must_use]
    pub fn newtype<T: Describe + ?Sized>(tag: impl Into<Cow<'static, str>>) -> Self {
        Self::tuple(tag, vec![TypeRef::of::<T>()])
    }

    /// No fields at all. An empty record or empty tuple counts as nullary.
    #[must_use]
    pub fn is_nullary(&self) -> bool {
        match &self.payload {
            VariantPayload::Unit => true,
            VariantPayload::Record(fields) => fields.is_empty(),
            VariantPayload::Tuple(items) => items.is_empty(),
        }
    }

    /// `true` when the payload encodes as a JSON object a tag can be merged
    /// into: inline fields, or a newtype over a record-shaped type.
    #[must_use]
    pub fn is_record_shaped(
        &self,
        unwrap_unary_records: bool,
        unwrap_unary_payloads: bool,
    ) -> bool {
        match &self.payload {
            VariantPayload::Unit => false,
            VariantPayload::Record(fields) => {
                !fields.is_empty() && !(unwrap_unary_payloads && fields.len() == 1)
            }
            VariantPayload::Tuple(items) => match items.as_slice() {
                [inner] => inner.shape().is_record_shaped(unwrap_unary_records),
                _ => false,
            },
        }
    }
}

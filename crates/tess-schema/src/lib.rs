//! # tess-schema
//!
//! Structural schema synthesis for Tessera.
//!
//! This crate provides:
//! - `Describe`: the trait a type implements to expose its [`TypeShape`]
//! - `Synthesizer` and [`synthesize`]: shape to schema, with every named
//!   type stored once and referenced everywhere else
//! - The leaf catalog (`Scalar`) for std, chrono, uuid, and semver types
//! - Reference inlining over definition tables
//! - Schema sketches inferred from example JSON values
//!
//! ## Recursion
//!
//! A named type is claimed before its schema is computed, so a recursive
//! occurrence becomes a `$ref` to the claimed name. Inlining all references
//! of a recursive table does not terminate; use
//! [`inline_non_recursive_schemas`] or check [`recursive_names`] first.
//!
//! ## Sum types
//!
//! The sum encodings mirror serde's enum representations (internally tagged
//! with content, externally tagged, untagged). A schema only matches the
//! encoded data if the configured encoding agrees with the codec.

mod bundle;
mod catalog;
mod error;
mod impls;
mod resolve;
mod shape;
mod sketch;
mod store;
mod sum;
mod synth;

pub use bundle::SchemaBundle;
pub use catalog::Scalar;
pub use error::SchemaError;
pub use resolve::{
    inline_all_schemas, inline_non_recursive_schemas, inline_schemas, inline_schemas_when,
    reachable_names, recursive_names, referenced_names,
};
pub use shape::{Describe, Field, SumShape, TypeRef, TypeShape, Variant, VariantPayload};
pub use sketch::{sketch_schema, sketch_strict_schema, sketch_strict_value, sketch_value};
pub use store::{DefinitionsStore, NameCollision, merge_definitions};
pub use sum::{EncodedPayload, EncodedVariant, encode_sum};
pub use synth::{Synthesizer, synthesize};

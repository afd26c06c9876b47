//! # tess-core
//!
//! Data model shared by every Tessera crate.
//!
//! This crate provides the collaborator types the synthesis engine works on:
//! - `Schema` and its nested parts (`Items`, `AdditionalProperties`)
//! - `NamedSchema`, a schema with an optional canonical name
//! - `Referenced<T>` and the fixed reference prefix per entity kind
//! - `Definitions<T>`, the insertion-ordered components table
//! - Wire-convention enums (`SumEncoding`, `RenameRule`)
//! - Decode-time error types

pub mod definitions;
pub mod enums;
pub mod errors;
pub mod reference;
pub mod schema;

pub use definitions::Definitions;
pub use enums::{RenameRule, SumEncoding};
pub use errors::CoreError;
pub use reference::{Component, ReferenceKind, Referenced};
pub use schema::{AdditionalProperties, Items, NamedSchema, Schema, SchemaType};

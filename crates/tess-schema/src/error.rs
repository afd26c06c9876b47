//! Schema synthesis error types.

use tess_core::SumEncoding;
use thiserror::Error;

/// Errors from schema synthesis and sketching.
///
/// Synthesis errors abort the whole top-level call; no partial schema is
/// returned.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A leaf type has neither a catalog entry nor a structural description.
    #[error("Type `{type_name}` has no schema representation: {reason}")]
    UnrepresentableType { type_name: String, reason: String },

    /// The sum encoding in force for a type cannot be expressed as a schema.
    #[error("Sum encoding `{encoding}` used by `{type_name}` cannot be expressed as a schema")]
    UnsupportedSumEncoding {
        type_name: String,
        encoding: SumEncoding,
    },

    /// Inlining every reference was requested on definitions that refer to
    /// themselves.
    #[error("Cannot inline all references: definitions are recursive: {names:?}")]
    RecursiveDefinitions { names: Vec<String> },

    /// A value handed to a sketch could not be serialized.
    #[error("Failed to serialize value for sketching: {0}")]
    Serialize(#[from] serde_json::Error),
}

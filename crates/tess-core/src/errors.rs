//! Error types for the Tessera data model.
//!
//! Synthesis errors (`SchemaError`) live in `tess-schema` and configuration
//! errors in `tess-config`. A unified error is deferred to `tess-cli`, where
//! they converge through `anyhow`.

use thiserror::Error;

/// Errors raised while decoding or constructing model values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A `$ref` string did not start with the prefix of the entity kind it
    /// was decoded as.
    #[error("Malformed reference: expected prefix '{expected_prefix}', found '{found}'")]
    MalformedReference {
        expected_prefix: &'static str,
        found: String,
    },

    /// A `$ref` string had the right prefix but named nothing.
    #[error("Empty reference name after prefix '{prefix}'")]
    EmptyReferenceName { prefix: &'static str },
}

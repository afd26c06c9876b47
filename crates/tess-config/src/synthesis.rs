//! Schema synthesis options.

use serde::{Deserialize, Serialize};
use tess_core::{RenameRule, SumEncoding};

use crate::ConfigError;

const fn default_true() -> bool {
    true
}

/// Defaults applied while deriving schemas from type shapes.
///
/// A sum type may override `sum_encoding` and `tag_rename` for itself; every
/// other option is global to one synthesis run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SynthesisConfig {
    /// Encoding used for tagged unions that do not pick their own.
    #[serde(default)]
    pub sum_encoding: SumEncoding,

    /// Case conversion applied to variant tags.
    #[serde(default)]
    pub tag_rename: RenameRule,

    /// Case conversion applied to record field names.
    #[serde(default)]
    pub field_rename: RenameRule,

    /// Replace a one-field record by the schema of its field.
    #[serde(default = "default_true")]
    pub unwrap_unary_records: bool,

    /// Same as `unwrap_unary_records`, for records that are a variant payload.
    #[serde(default)]
    pub unwrap_unary_variant_payloads: bool,

    /// Collapse sums whose variants are all nullary into a string enum.
    #[serde(default = "default_true")]
    pub compact_enums: bool,

    /// Tag sums that have a single variant instead of encoding the payload
    /// directly.
    #[serde(default)]
    pub tag_single_variants: bool,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            sum_encoding: SumEncoding::default(),
            tag_rename: RenameRule::None,
            field_rename: RenameRule::None,
            unwrap_unary_records: true,
            unwrap_unary_variant_payloads: false,
            compact_enums: true,
            tag_single_variants: false,
        }
    }
}

impl SynthesisConfig {
    /// Reject field names a tagged object could not be encoded with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the tag or contents field is
    /// empty, or if both name the same key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let SumEncoding::TaggedObject {
            tag_field,
            contents_field,
        } = &self.sum_encoding
        {
            if tag_field.is_empty() {
                return Err(invalid("sum_encoding.tag_field", "must not be empty"));
            }
            if contents_field.is_empty() {
                return Err(invalid("sum_encoding.contents_field", "must not be empty"));
            }
            if tag_field == contents_field {
                return Err(invalid(
                    "sum_encoding.contents_field",
                    "must differ from tag_field",
                ));
            }
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = SynthesisConfig::default();
        assert_eq!(
            config.sum_encoding,
            SumEncoding::tagged_object("tag", "contents")
        );
        assert_eq!(config.tag_rename, RenameRule::None);
        assert!(config.unwrap_unary_records);
        assert!(!config.unwrap_unary_variant_payloads);
        assert!(config.compact_enums);
        assert!(!config.tag_single_variants);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_clashing_fields() {
        let config = SynthesisConfig {
            sum_encoding: SumEncoding::tagged_object("kind", "kind"),
            ..SynthesisConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "sum_encoding.contents_field"));
    }

    #[test]
    fn validate_rejects_empty_tag() {
        let config = SynthesisConfig {
            sum_encoding: SumEncoding::tagged_object("", "contents"),
            ..SynthesisConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_ignores_other_encodings() {
        let config = SynthesisConfig {
            sum_encoding: SumEncoding::UntaggedValue,
            ..SynthesisConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}

//! Built-in schemas for leaf types.
//!
//! Every scalar that can appear at the bottom of a type shape has a fixed
//! schema here. Integer bounds are exact JSON numbers, so `u64::MAX` and
//! `i64::MIN` survive serialization unchanged.

use serde_json::{Number, Value, json};
use tess_core::Schema;

use crate::error::SchemaError;

/// Semantic versions as accepted by the `semver` crate, without build metadata
/// validation beyond its character set.
const SEMVER_PATTERN: &str = r"^(0|[1-9]\d*)\.(0|[1-9]\d*)\.(0|[1-9]\d*)(?:-[0-9A-Za-z.-]+)?(?:\+[0-9A-Za-z.-]+)?$";

/// Leaf type with a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scalar {
    Bool,
    Char,
    String,
    Unit,
    /// Arbitrary JSON.
    Any,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    /// Calendar date.
    Date,
    /// UTC timestamp.
    DateTime,
    /// Timestamp without offset.
    LocalDateTime,
    TimeOfDay,
    Uuid,
    /// Semantic version.
    Version,
    /// Raw bytes. Has no JSON mapping.
    Binary,
}

impl Scalar {
    pub const ALL: [Self; 24] = [
        Self::Bool,
        Self::Char,
        Self::String,
        Self::Unit,
        Self::Any,
        Self::I8,
        Self::I16,
        Self::I32,
        Self::I64,
        Self::Isize,
        Self::U8,
        Self::U16,
        Self::U32,
        Self::U64,
        Self::Usize,
        Self::F32,
        Self::F64,
        Self::Date,
        Self::DateTime,
        Self::LocalDateTime,
        Self::TimeOfDay,
        Self::Uuid,
        Self::Version,
        Self::Binary,
    ];

    /// The Rust type this entry stands for.
    #[must_use]
    pub const fn rust_name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Char => "char",
            Self::String => "String",
            Self::Unit => "()",
            Self::Any => "serde_json::Value",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::Isize => "isize",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::Usize => "usize",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Date => "chrono::NaiveDate",
            Self::DateTime => "chrono::DateTime<Utc>",
            Self::LocalDateTime => "chrono::NaiveDateTime",
            Self::TimeOfDay => "chrono::NaiveTime",
            Self::Uuid => "uuid::Uuid",
            Self::Version => "semver::Version",
            Self::Binary => "[u8]",
        }
    }

    /// The catalog schema, or `UnrepresentableType` for [`Scalar::Binary`].
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::UnrepresentableType` for leaves without a JSON
    /// mapping.
    pub fn schema(self) -> Result<Schema, SchemaError> {
        let schema = match self {
            Self::Bool => Schema::boolean(),
            Self::Char => Schema {
                min_length: Some(1),
                max_length: Some(1),
                ..Schema::string()
            },
            Self::String => Schema::string(),
            Self::Unit => Schema::null(),
            Self::Any => Schema::default(),
            Self::I8 => bounded(i8::MIN, i8::MAX, None),
            Self::I16 => bounded(i16::MIN, i16::MAX, None),
            Self::I32 => bounded(i32::MIN, i32::MAX, Some("int32")),
            Self::I64 => bounded(i64::MIN, i64::MAX, Some("int64")),
            Self::Isize => bounded(isize::MIN, isize::MAX, None),
            Self::U8 => bounded(u8::MIN, u8::MAX, None),
            Self::U16 => bounded(u16::MIN, u16::MAX, None),
            Self::U32 => bounded(u32::MIN, u32::MAX, None),
            Self::U64 => bounded(u64::MIN, u64::MAX, None),
            Self::Usize => bounded(usize::MIN, usize::MAX, None),
            Self::F32 => formatted(Schema::number(), "float", None),
            Self::F64 => formatted(Schema::number(), "double", None),
            Self::Date => formatted(Schema::string(), "date", Some(json!("2016-07-22"))),
            Self::DateTime => formatted(
                Schema::string(),
                "date-time",
                Some(json!("2016-07-22T00:00:00Z")),
            ),
            Self::LocalDateTime => formatted(
                Schema::string(),
                "yyyy-mm-ddThh:MM:ss",
                Some(json!("2016-07-22T00:00:00")),
            ),
            Self::TimeOfDay => {
                formatted(Schema::string(), "hh:MM:ss", Some(json!("12:00:00")))
            }
            Self::Uuid => formatted(
                Schema::string(),
                "uuid",
                Some(json!("f81d4fae-7dec-11d0-a765-00a0c91e6bf6")),
            ),
            Self::Version => Schema {
                pattern: Some(SEMVER_PATTERN.to_string()),
                ..formatted(Schema::string(), "semver", Some(json!("1.0.0")))
            },
            Self::Binary => {
                return Err(SchemaError::UnrepresentableType {
                    type_name: self.rust_name().to_string(),
                    reason: "raw bytes have no JSON mapping; describe the encoded form instead"
                        .to_string(),
                });
            }
        };
        Ok(schema)
    }
}

fn bounded<N: Into<Number>>(min: N, max: N, format: Option<&str>) -> Schema {
    Schema {
        minimum: Some(min.into()),
        maximum: Some(max.into()),
        format: format.map(str::to_string),
        ..Schema::integer()
    }
}

fn formatted(base: Schema, format: &str, example: Option<Value>) -> Schema {
    Schema {
        format: Some(format.to_string()),
        example,
        ..base
    }
}

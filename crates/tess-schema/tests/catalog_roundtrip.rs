//! Canonical catalog examples decode into their Rust types and validate
//! against their own schemas.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use tess_schema::Scalar;

fn validate(scalar: Scalar, instance: &serde_json::Value) -> Vec<String> {
    let schema = serde_json::to_value(scalar.schema().unwrap()).unwrap();
    let validator = jsonschema::draft7::new(&schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! example_roundtrip {
    ($name:ident, $scalar:expr, $ty:ty) => {
        #[test]
        fn $name() {
            let schema = $scalar.schema().unwrap();
            let example = schema.example.clone().expect("catalog example");

            let decoded: $ty = serde_json::from_value(example.clone()).unwrap();
            let encoded = serde_json::to_value(&decoded).unwrap();
            assert_eq!(
                encoded,
                example,
                "example roundtrip failed for {}",
                stringify!($ty)
            );

            let errors = validate($scalar, &example);
            assert!(
                errors.is_empty(),
                "{} example rejected: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

example_roundtrip!(date_example, Scalar::Date, NaiveDate);
example_roundtrip!(date_time_example, Scalar::DateTime, DateTime<Utc>);
example_roundtrip!(local_date_time_example, Scalar::LocalDateTime, NaiveDateTime);
example_roundtrip!(time_of_day_example, Scalar::TimeOfDay, NaiveTime);
example_roundtrip!(uuid_example, Scalar::Uuid, uuid::Uuid);
example_roundtrip!(version_example, Scalar::Version, semver::Version);

#[test]
fn integer_bounds_accept_extremes_and_reject_overflow() {
    assert!(validate(Scalar::U64, &serde_json::json!(u64::MAX)).is_empty());
    assert!(validate(Scalar::I64, &serde_json::json!(i64::MIN)).is_empty());
    assert!(!validate(Scalar::U8, &serde_json::json!(256)).is_empty());
    assert!(!validate(Scalar::I8, &serde_json::json!(-129)).is_empty());
    assert!(!validate(Scalar::U32, &serde_json::json!(-1)).is_empty());
}

#[test]
fn version_pattern_rejects_partial_versions() {
    assert!(validate(Scalar::Version, &serde_json::json!("1.2.3-beta.1+build.5")).is_empty());
    assert!(!validate(Scalar::Version, &serde_json::json!("1.2")).is_empty());
}

#[test]
fn char_schema_checks_length() {
    assert!(validate(Scalar::Char, &serde_json::json!("x")).is_empty());
    assert!(!validate(Scalar::Char, &serde_json::json!("xy")).is_empty());
}

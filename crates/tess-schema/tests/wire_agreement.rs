//! Synthesized schemas must accept what serde actually emits.
//!
//! Each type here derives `Serialize` with the serde representation that
//! matches one sum encoding, and implements `Describe` by hand. Schemas are
//! fully inlined and checked with a draft 7 validator, which understands
//! positional `items`.

use std::borrow::Cow;

use chrono::{NaiveDate, TimeZone, Utc};
use serde::Serialize;
use tess_config::SynthesisConfig;
use tess_core::SumEncoding;
use tess_schema::{
    Describe, Field, SumShape, TypeRef, TypeShape, Variant, inline_all_schemas, synthesize,
};

fn validation_errors<T: Describe + ?Sized>(
    config: &SynthesisConfig,
    instance: &serde_json::Value,
) -> Vec<String> {
    let (defs, root) = synthesize::<T>(config).expect("synthesis succeeds");
    let schema = serde_json::to_value(inline_all_schemas(&defs, root.schema)).unwrap();
    let validator = jsonschema::draft7::new(&schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! accepts {
    ($name:ident, $ty:ty, $config:expr, [$($value:expr),+ $(,)?]) => {
        #[test]
        fn $name() {
            let config: SynthesisConfig = $config;
            $(
                let instance = serde_json::to_value(&$value).unwrap();
                let errors = validation_errors::<$ty>(&config, &instance);
                assert!(
                    errors.is_empty(),
                    "{} rejected {}: {:?}",
                    stringify!($ty),
                    instance,
                    errors
                );
            )+
        }
    };
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct Point {
    x: f64,
    y: f64,
}

impl Describe for Point {
    fn type_name() -> Option<Cow<'static, str>> {
        Some("Point".into())
    }

    fn describe() -> TypeShape {
        TypeShape::Record(vec![
            Field::required::<f64>("x"),
            Field::required::<f64>("y"),
        ])
    }
}

/// `#[serde(tag = "tag")]`: record fields sit next to the tag.
#[derive(Serialize)]
#[serde(tag = "tag")]
enum Figure {
    Circle { radius: f64 },
    At(Point),
    Blank,
}

impl Describe for Figure {
    fn type_name() -> Option<Cow<'static, str>> {
        Some("Figure".into())
    }

    fn describe() -> TypeShape {
        TypeShape::sum(vec![
            Variant::record("Circle", vec![Field::required::<f64>("radius")]),
            Variant::newtype::<Point>("At"),
            Variant::unit("Blank"),
        ])
    }
}

/// `#[serde(tag = "tag", content = "contents")]`: non-record payloads nest.
#[derive(Serialize)]
#[serde(tag = "tag", content = "contents")]
enum Reading {
    Celsius(f64),
    Label(String),
    Pair(u8, bool),
    Off,
}

impl Describe for Reading {
    fn type_name() -> Option<Cow<'static, str>> {
        Some("Reading".into())
    }

    fn describe() -> TypeShape {
        TypeShape::sum(vec![
            Variant::newtype::<f64>("Celsius"),
            Variant::newtype::<String>("Label"),
            Variant::tuple("Pair", vec![TypeRef::of::<u8>(), TypeRef::of::<bool>()]),
            Variant::unit("Off"),
        ])
    }
}

/// Serde's default, externally tagged representation.
#[derive(Serialize)]
enum Command {
    Move(Point),
    Wait { seconds: u32, reason: String },
    Jump(i32, i32),
}

impl Describe for Command {
    fn type_name() -> Option<Cow<'static, str>> {
        Some("Command".into())
    }

    fn describe() -> TypeShape {
        TypeShape::Sum(
            SumShape::new(vec![
                Variant::newtype::<Point>("Move"),
                Variant::record(
                    "Wait",
                    vec![
                        Field::required::<u32>("seconds"),
                        Field::required::<String>("reason"),
                    ],
                ),
                Variant::tuple("Jump", vec![TypeRef::of::<i32>(), TypeRef::of::<i32>()]),
            ])
            .encoding(SumEncoding::ObjectWithSingleField),
        )
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum Loose {
    Count(u64),
    Text(String),
    Span(u8, u8),
    Located { line: u32, column: u32 },
}

impl Describe for Loose {
    fn describe() -> TypeShape {
        TypeShape::Sum(
            SumShape::new(vec![
                Variant::newtype::<u64>("Count"),
                Variant::newtype::<String>("Text"),
                Variant::tuple("Span", vec![TypeRef::of::<u8>(), TypeRef::of::<u8>()]),
                Variant::record(
                    "Located",
                    vec![
                        Field::required::<u32>("line"),
                        Field::required::<u32>("column"),
                    ],
                ),
            ])
            .encoding(SumEncoding::UntaggedValue),
        )
    }
}

#[derive(Serialize)]
enum Color {
    Red,
    Green,
}

impl Describe for Color {
    fn describe() -> TypeShape {
        TypeShape::sum(vec![Variant::unit("Red"), Variant::unit("Green")])
    }
}

#[derive(Serialize)]
struct Event {
    id: uuid::Uuid,
    on: NaiveDate,
    at: chrono::DateTime<Utc>,
    figure: Figure,
    color: Color,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<String>,
    tags: Vec<String>,
}

impl Describe for Event {
    fn type_name() -> Option<Cow<'static, str>> {
        Some("Event".into())
    }

    fn describe() -> TypeShape {
        TypeShape::Record(vec![
            Field::required::<uuid::Uuid>("id"),
            Field::required::<NaiveDate>("on"),
            Field::required::<chrono::DateTime<Utc>>("at"),
            Field::required::<Figure>("figure"),
            Field::required::<Color>("color"),
            Field::optional::<Option<String>>("note"),
            Field::required::<Vec<String>>("tags"),
        ])
    }
}

#[derive(Serialize)]
struct Annotation {
    note: Option<String>,
    figure: Option<Figure>,
    color: Option<Color>,
}

impl Describe for Annotation {
    fn describe() -> TypeShape {
        TypeShape::Record(vec![
            Field::required::<Option<String>>("note"),
            Field::required::<Option<Figure>>("figure"),
            Field::required::<Option<Color>>("color"),
        ])
    }
}

// ---------------------------------------------------------------------------
// Agreement
// ---------------------------------------------------------------------------

accepts!(
    internally_tagged_figure,
    Figure,
    SynthesisConfig::default(),
    [
        Figure::Circle { radius: 2.5 },
        Figure::At(Point { x: 1.0, y: -1.0 }),
        Figure::Blank,
    ]
);

accepts!(
    adjacently_tagged_reading,
    Reading,
    SynthesisConfig::default(),
    [
        Reading::Celsius(21.5),
        Reading::Label("warm".to_string()),
        Reading::Pair(3, true),
        Reading::Off,
    ]
);

accepts!(
    externally_tagged_command,
    Command,
    SynthesisConfig::default(),
    [
        Command::Move(Point { x: 0.0, y: 0.0 }),
        Command::Wait {
            seconds: 5,
            reason: "cooldown".to_string(),
        },
        Command::Jump(-2, 7),
    ]
);

accepts!(
    untagged_loose,
    Loose,
    SynthesisConfig::default(),
    [
        Loose::Count(u64::MAX),
        Loose::Text("x".to_string()),
        Loose::Span(1, 2),
        Loose::Located { line: 3, column: 9 },
    ]
);

accepts!(
    compact_enum_color,
    Color,
    SynthesisConfig::default(),
    [Color::Red, Color::Green]
);

accepts!(
    nested_record_event,
    Event,
    SynthesisConfig::default(),
    [
        Event {
            id: uuid::Uuid::nil(),
            on: NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
            at: Utc.with_ymd_and_hms(2024, 2, 29, 12, 30, 0).unwrap(),
            figure: Figure::Circle { radius: 1.0 },
            color: Color::Green,
            note: None,
            tags: vec![],
        },
        Event {
            id: uuid::Uuid::nil(),
            on: NaiveDate::from_ymd_opt(1999, 12, 31).unwrap(),
            at: Utc.with_ymd_and_hms(1999, 12, 31, 23, 59, 59).unwrap(),
            figure: Figure::Blank,
            color: Color::Red,
            note: Some("eve".to_string()),
            tags: vec!["a".to_string(), "b".to_string()],
        },
    ]
);

accepts!(
    missing_values_as_null,
    Annotation,
    SynthesisConfig::default(),
    [
        Annotation {
            note: None,
            figure: None,
            color: None,
        },
        Annotation {
            note: Some("edge".to_string()),
            figure: Some(Figure::Blank),
            color: Some(Color::Red),
        },
    ]
);

// ---------------------------------------------------------------------------
// Rejection
// ---------------------------------------------------------------------------

#[test]
fn wrong_tag_is_rejected() {
    let instance = serde_json::json!({"tag": "Square", "radius": 1.0});
    assert!(!validation_errors::<Figure>(&SynthesisConfig::default(), &instance).is_empty());
}

#[test]
fn missing_record_field_is_rejected() {
    let instance = serde_json::json!({"Wait": {"seconds": 5}});
    assert!(!validation_errors::<Command>(&SynthesisConfig::default(), &instance).is_empty());
}

#[test]
fn unknown_enum_literal_is_rejected() {
    let instance = serde_json::json!("Blue");
    assert!(!validation_errors::<Color>(&SynthesisConfig::default(), &instance).is_empty());
}

#[test]
fn out_of_range_integer_is_rejected() {
    let instance = serde_json::json!({"Jump": [1, 4_294_967_296_i64]});
    assert!(!validation_errors::<Command>(&SynthesisConfig::default(), &instance).is_empty());
}

#[test]
fn null_does_not_widen_the_inner_type() {
    let instance = serde_json::json!({"note": 5, "figure": null, "color": null});
    assert!(!validation_errors::<Annotation>(&SynthesisConfig::default(), &instance).is_empty());
}

use serde_json::Value;
use tess_core::Schema;
use tess_schema::{sketch_strict_value, sketch_value};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SketchArgs;
use crate::input::read_json;
use crate::output::output;

/// Handle `tsr sketch`.
pub fn handle(args: &SketchArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let value: Value = read_json(args.file.as_deref())?;
    output(&sketch(&value, args.strict), flags.format)
}

fn sketch(value: &Value, strict: bool) -> Schema {
    tracing::debug!(strict, "sketching schema from example value");
    if strict {
        sketch_strict_value(value)
    } else {
        sketch_value(value)
    }
}

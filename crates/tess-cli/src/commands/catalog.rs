use std::collections::BTreeMap;

use tess_core::Schema;
use tess_schema::Scalar;

use crate::cli::GlobalFlags;
use crate::output::output;

/// Handle `tsr catalog`.
pub fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&catalog(), flags.format)
}

/// Representable leaf schemas keyed by Rust type.
fn catalog() -> BTreeMap<&'static str, Schema> {
    Scalar::ALL
        .into_iter()
        .filter_map(|scalar| match scalar.schema() {
            Ok(schema) => Some((scalar.rust_name(), schema)),
            Err(error) => {
                tracing::debug!(%error, "skipping leaf without schema");
                None
            }
        })
        .collect()
}

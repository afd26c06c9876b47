use tess_config::{InlineMode, TesseraConfig};
use tess_schema::SchemaBundle;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::InlineArgs;
use crate::input::read_json;
use crate::output::output;

/// Handle `tsr inline`.
pub fn handle(args: &InlineArgs, config: &TesseraConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&inline_bundle(args, config)?, flags.format)
}

fn inline_bundle(args: &InlineArgs, config: &TesseraConfig) -> anyhow::Result<SchemaBundle> {
    let bundle: SchemaBundle = read_json(args.file.as_deref())?;
    let mode = args.mode.map_or(config.output.inline, InlineMode::from);
    tracing::debug!(?mode, definitions = bundle.definitions.len(), "inlining bundle");
    Ok(bundle.inline(mode)?)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tess_config::TesseraConfig;

    use super::{InlineArgs, inline_bundle};
    use crate::cli::root_commands::InlineModeArg;

    fn bundle_file(bundle: &serde_json::Value) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "{bundle}").expect("write");
        file
    }

    fn run(
        file: &tempfile::NamedTempFile,
        mode: Option<InlineModeArg>,
    ) -> anyhow::Result<serde_json::Value> {
        let args = InlineArgs {
            file: Some(file.path().to_path_buf()),
            mode,
        };
        let bundle = inline_bundle(&args, &TesseraConfig::default())?;
        Ok(serde_json::to_value(bundle)?)
    }

    #[test]
    fn inlines_acyclic_bundle() {
        let file = bundle_file(&json!({
            "definitions": {
                "Id": {"type": "integer"}
            },
            "schema": {
                "type": "object",
                "properties": {"id": {"$ref": "#/components/schemas/Id"}},
                "required": ["id"]
            }
        }));

        let inlined = run(&file, Some(InlineModeArg::All)).expect("inline succeeds");
        assert_eq!(
            inlined,
            json!({
                "schema": {
                    "type": "object",
                    "properties": {"id": {"type": "integer"}},
                    "required": ["id"]
                }
            })
        );
    }

    #[test]
    fn default_mode_comes_from_config() {
        let bundle = json!({
            "definitions": {"Id": {"type": "integer"}},
            "schema": {"type": "array", "items": {"$ref": "#/components/schemas/Id"}}
        });
        let file = bundle_file(&bundle);
        assert_eq!(run(&file, None).expect("inline succeeds"), bundle);
    }

    #[test]
    fn all_mode_refuses_recursive_bundle() {
        let file = bundle_file(&json!({
            "definitions": {
                "Node": {
                    "type": "object",
                    "properties": {"next": {"$ref": "#/components/schemas/Node"}}
                }
            },
            "schema": {"type": "array", "items": {"$ref": "#/components/schemas/Node"}}
        }));
        let err = run(&file, Some(InlineModeArg::All)).unwrap_err();
        assert!(format!("{err:#}").contains("recursive"));
    }

    #[test]
    fn wrong_reference_prefix_is_a_parse_error() {
        let file = bundle_file(&json!({
            "schema": {"items": {"$ref": "#/components/responses/Id"}, "type": "array"}
        }));
        assert!(run(&file, Some(InlineModeArg::None)).is_err());
    }
}

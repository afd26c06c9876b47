//! A root schema packaged with the definitions it references.

use serde::{Deserialize, Serialize};
use tess_config::InlineMode;
use tess_core::{Definitions, NamedSchema, Schema};

use crate::error::SchemaError;
use crate::resolve::{
    inline_all_schemas, inline_non_recursive_schemas, reachable_names, recursive_names,
};

/// Self-contained output of one synthesis run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaBundle {
    /// Name of the root type, if it has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Definitions::is_empty")]
    pub definitions: Definitions<Schema>,

    pub schema: Schema,
}

impl SchemaBundle {
    #[must_use]
    pub fn new(definitions: Definitions<Schema>, root: NamedSchema) -> Self {
        Self {
            name: root.name,
            definitions,
            schema: root.schema,
        }
    }

    /// Inline references in the root and in every definition, then drop
    /// definitions the root no longer reaches.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::RecursiveDefinitions` for [`InlineMode::All`]
    /// when any definition refers to itself.
    pub fn inline(self, mode: InlineMode) -> Result<Self, SchemaError> {
        let Self {
            name,
            definitions,
            schema,
        } = self;

        let rewrite: fn(&Definitions<Schema>, Schema) -> Schema = match mode {
            InlineMode::None => {
                return Ok(Self {
                    name,
                    definitions,
                    schema,
                });
            }
            InlineMode::NonRecursive => inline_non_recursive_schemas,
            InlineMode::All => {
                let recursive = recursive_names(&definitions);
                if !recursive.is_empty() {
                    return Err(SchemaError::RecursiveDefinitions {
                        names: recursive.into_iter().collect(),
                    });
                }
                inline_all_schemas
            }
        };

        let schema = rewrite(&definitions, schema);
        let rewritten: Definitions<Schema> = definitions
            .iter()
            .map(|(name, definition)| {
                (name.to_string(), rewrite(&definitions, definition.clone()))
            })
            .collect();
        let reachable = reachable_names(&rewritten, &schema);
        let kept = rewritten
            .into_iter()
            .filter(|(name, _)| reachable.contains(name))
            .collect();

        tracing::debug!(?mode, kept = reachable.len(), "inlined bundle references");
        Ok(Self {
            name,
            definitions: kept,
            schema,
        })
    }
}

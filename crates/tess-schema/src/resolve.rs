//! Reference inlining.
//!
//! Replaces `$ref`s by the definitions they name. Inlining a definition that
//! can reach itself never terminates, so [`inline_all_schemas`] must only be
//! used on acyclic tables; [`inline_non_recursive_schemas`] is always safe.

use std::collections::{BTreeSet, HashSet};

use tess_core::{AdditionalProperties, Definitions, Items, Referenced, Schema};

/// Every reference slot directly inside `schema`.
fn slots(schema: &Schema) -> Vec<&Referenced<Schema>> {
    let mut slots = Vec::new();
    if let Some(items) = &schema.items {
        slots.extend(items.schemas());
    }
    if let Some(properties) = &schema.properties {
        slots.extend(properties.values());
    }
    if let Some(AdditionalProperties::Schema(extra)) = &schema.additional_properties {
        slots.push(extra.as_ref());
    }
    for list in [&schema.all_of, &schema.one_of, &schema.any_of]
        .into_iter()
        .flatten()
    {
        slots.extend(list.iter());
    }
    if let Some(not) = &schema.not {
        slots.push(not.as_ref());
    }
    slots
}

fn slots_mut(schema: &mut Schema) -> Vec<&mut Referenced<Schema>> {
    let mut slots = Vec::new();
    match &mut schema.items {
        Some(Items::Object(item)) => slots.push(item.as_mut()),
        Some(Items::Array(items)) => slots.extend(items.iter_mut()),
        None => {}
    }
    if let Some(properties) = &mut schema.properties {
        slots.extend(properties.values_mut());
    }
    if let Some(AdditionalProperties::Schema(extra)) = &mut schema.additional_properties {
        slots.push(extra.as_mut());
    }
    for list in [&mut schema.all_of, &mut schema.one_of, &mut schema.any_of]
        .into_iter()
        .flatten()
    {
        slots.extend(list.iter_mut());
    }
    if let Some(not) = &mut schema.not {
        slots.push(not.as_mut());
    }
    slots
}

/// Names of every definition referenced from `schema`, including through
/// nested inline schemas.
#[must_use]
pub fn referenced_names(schema: &Schema) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    collect_refs(schema, &mut names);
    names
}

fn collect_refs(schema: &Schema, names: &mut BTreeSet<String>) {
    for slot in slots(schema) {
        match slot {
            Referenced::Ref(name) => {
                names.insert(name.clone());
            }
            Referenced::Inline(inner) => collect_refs(inner, names),
        }
    }
}

/// Inline every reference whose name satisfies `inline`.
///
/// References to names missing from `defs` are left as they are. Inlined
/// definitions are themselves rewritten, so a cycle of matching names does
/// not terminate.
#[must_use]
pub fn inline_schemas_when<P>(inline: P, defs: &Definitions<Schema>, schema: Schema) -> Schema
where
    P: Fn(&str) -> bool,
{
    let mut schema = schema;
    rewrite(&inline, defs, &mut schema);
    schema
}

fn rewrite<P: Fn(&str) -> bool>(inline: &P, defs: &Definitions<Schema>, schema: &mut Schema) {
    for slot in slots_mut(schema) {
        let replacement = match &*slot {
            Referenced::Ref(name) if inline(name) => defs.get(name).cloned(),
            _ => None,
        };
        if let Some(definition) = replacement {
            *slot = Referenced::Inline(definition);
        }
        if let Referenced::Inline(inner) = slot {
            rewrite(inline, defs, inner);
        }
    }
}

/// Inline references to the given names.
#[must_use]
pub fn inline_schemas<I, S>(names: I, defs: &Definitions<Schema>, schema: Schema) -> Schema
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let names: HashSet<String> = names.into_iter().map(Into::into).collect();
    inline_schemas_when(|name| names.contains(name), defs, schema)
}

/// Inline every reference. Only terminates when `defs` is acyclic; check
/// with [`recursive_names`] first if unsure.
#[must_use]
pub fn inline_all_schemas(defs: &Definitions<Schema>, schema: Schema) -> Schema {
    inline_schemas_when(|_| true, defs, schema)
}

/// Definitions that can reach themselves through references.
#[must_use]
pub fn recursive_names(defs: &Definitions<Schema>) -> BTreeSet<String> {
    defs.names()
        .filter(|name| reaches_itself(defs, name))
        .map(str::to_string)
        .collect()
}

fn reaches_itself(defs: &Definitions<Schema>, start: &str) -> bool {
    let mut visited: HashSet<String> = HashSet::new();
    let mut pending: Vec<String> = defs
        .get(start)
        .map(|schema| referenced_names(schema).into_iter().collect())
        .unwrap_or_default();

    while let Some(name) = pending.pop() {
        if name == start {
            return true;
        }
        if !visited.insert(name.clone()) {
            continue;
        }
        if let Some(schema) = defs.get(&name) {
            pending.extend(referenced_names(schema));
        }
    }
    false
}

/// Inline every definition that cannot reach itself. Recursive definitions
/// stay referenced. Always terminates.
#[must_use]
pub fn inline_non_recursive_schemas(defs: &Definitions<Schema>, schema: Schema) -> Schema {
    let recursive = recursive_names(defs);
    inline_schemas_when(|name| !recursive.contains(name), defs, schema)
}

/// Names reachable from `schema` through `defs`, in no particular order.
#[must_use]
pub fn reachable_names(defs: &Definitions<Schema>, schema: &Schema) -> BTreeSet<String> {
    let mut reached = BTreeSet::new();
    let mut pending: Vec<String> = referenced_names(schema).into_iter().collect();
    while let Some(name) = pending.pop() {
        if !reached.insert(name.clone()) {
            continue;
        }
        if let Some(definition) = defs.get(&name) {
            pending.extend(referenced_names(definition));
        }
    }
    reached
}

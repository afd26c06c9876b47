//! Definitions table built up during synthesis.
//!
//! A name is claimed before its schema is computed. A recursive occurrence
//! of a claimed name gets a reference instead of a second expansion, which
//! is what makes synthesis of self-referential types terminate.

use std::any::TypeId;
use std::collections::HashMap;

use tess_core::{Definitions, Schema};

use crate::shape::TypeRef;

/// Two distinct types claimed the same definition name.
///
/// The first claimant keeps the name; references emitted for the second one
/// point at the first one's schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameCollision {
    pub name: String,
    /// Rust type that owns the definition.
    pub kept: &'static str,
    /// Rust type whose schema was never stored.
    pub ignored: &'static str,
}

#[derive(Debug, Clone)]
struct Claim {
    identity: TypeId,
    rust_name: &'static str,
    referenced: bool,
}

/// Append-only store of named schemas for one synthesis run.
#[derive(Debug, Clone, Default)]
pub struct DefinitionsStore {
    order: Vec<String>,
    schemas: HashMap<String, Schema>,
    claims: HashMap<String, Claim>,
    collisions: Vec<NameCollision>,
}

impl DefinitionsStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` once a name has been claimed, even if its schema is still
    /// being computed.
    #[must_use]
    pub fn is_claimed(&self, name: &str) -> bool {
        self.claims.contains_key(name)
    }

    /// `true` while the schema for `name` is being computed.
    #[must_use]
    pub fn is_in_progress(&self, name: &str) -> bool {
        self.claims.contains_key(name) && !self.schemas.contains_key(name)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.schemas.get(name)
    }

    /// Committed definitions count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    #[must_use]
    pub fn collisions(&self) -> &[NameCollision] {
        &self.collisions
    }

    /// Reserve `name` for `ty`. Its slot in the output order is taken now, so
    /// an outer type is listed before the types it contains.
    pub fn claim(&mut self, name: &str, ty: &TypeRef) {
        if self.claims.contains_key(name) {
            return;
        }
        self.order.push(name.to_string());
        self.claims.insert(
            name.to_string(),
            Claim {
                identity: ty.identity(),
                rust_name: ty.rust_name(),
                referenced: false,
            },
        );
    }

    /// Record that a reference to `name` was emitted on behalf of `ty`.
    pub fn note_reference(&mut self, name: &str, ty: &TypeRef) {
        let Some(claim) = self.claims.get_mut(name) else {
            return;
        };
        claim.referenced = true;
        if claim.identity == ty.identity() {
            return;
        }
        let collision = NameCollision {
            name: name.to_string(),
            kept: claim.rust_name,
            ignored: ty.rust_name(),
        };
        if !self.collisions.contains(&collision) {
            tracing::warn!(
                name,
                kept = collision.kept,
                ignored = collision.ignored,
                "definition name claimed by two types; keeping the first"
            );
            self.collisions.push(collision);
        }
    }

    /// `true` if a reference to `name` has been emitted since it was claimed.
    #[must_use]
    pub fn is_referenced(&self, name: &str) -> bool {
        self.claims.get(name).is_some_and(|claim| claim.referenced)
    }

    /// Store the schema for a claimed name. An existing schema is never
    /// replaced.
    pub fn commit(&mut self, name: &str, schema: Schema) {
        if self.schemas.contains_key(name) {
            return;
        }
        tracing::trace!(name, "registered schema definition");
        self.schemas.insert(name.to_string(), schema);
    }

    /// Drop a claim that was never committed.
    pub fn release(&mut self, name: &str) {
        if self.schemas.contains_key(name) {
            return;
        }
        if self.claims.remove(name).is_some() {
            self.order.retain(|claimed| claimed != name);
        }
    }

    /// Committed definitions in claim order.
    #[must_use]
    pub fn definitions(&self) -> Definitions<Schema> {
        self.order
            .iter()
            .filter_map(|name| Some((name.clone(), self.schemas.get(name)?.clone())))
            .collect()
    }

    #[must_use]
    pub fn into_definitions(mut self) -> Definitions<Schema> {
        self.order
            .into_iter()
            .filter_map(|name| {
                let schema = self.schemas.remove(&name)?;
                Some((name, schema))
            })
            .collect()
    }
}

/// Copy the entries of `source` missing from `target`.
///
/// Returns names present in both with different schemas; `target` keeps its
/// own version of those.
pub fn merge_definitions(
    target: &mut Definitions<Schema>,
    source: Definitions<Schema>,
) -> Vec<String> {
    let conflicts = target.absorb(source);
    for name in &conflicts {
        tracing::warn!(name = %name, "conflicting definition ignored during merge");
    }
    conflicts
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn claim_reserves_order_before_commit() {
        let mut store = DefinitionsStore::new();
        let outer = TypeRef::of::<String>();
        let inner = TypeRef::of::<bool>();

        store.claim("Outer", &outer);
        store.claim("Inner", &inner);
        assert!(store.is_in_progress("Outer"));

        store.commit("Inner", Schema::boolean());
        store.commit("Outer", Schema::string());

        assert_eq!(store.definitions().len(), 2);
        let defs = store.into_definitions();
        assert_eq!(defs.names().collect::<Vec<_>>(), vec!["Outer", "Inner"]);
    }

    #[test]
    fn commit_never_replaces() {
        let mut store = DefinitionsStore::new();
        store.claim("A", &TypeRef::of::<u8>());
        store.commit("A", Schema::integer());
        store.commit("A", Schema::string());
        assert_eq!(store.get("A"), Some(&Schema::integer()));
    }

    #[test]
    fn distinct_types_under_one_name_are_flagged_once() {
        let mut store = DefinitionsStore::new();
        store.claim("Page", &TypeRef::of::<u8>());
        store.note_reference("Page", &TypeRef::of::<u16>());
        store.note_reference("Page", &TypeRef::of::<u16>());
        store.note_reference("Page", &TypeRef::of::<u8>());

        assert_eq!(
            store.collisions(),
            &[NameCollision {
                name: "Page".to_string(),
                kept: "u8",
                ignored: "u16",
            }]
        );
        assert!(store.is_referenced("Page"));
    }

    #[test]
    fn release_forgets_uncommitted_claims() {
        let mut store = DefinitionsStore::new();
        store.claim("Gone", &TypeRef::of::<u8>());
        store.release("Gone");
        assert!(!store.is_claimed("Gone"));
        assert!(store.into_definitions().is_empty());
    }

    #[test]
    fn merge_reports_conflicts_and_keeps_target() {
        let mut target: Definitions<Schema> =
            [("A".to_string(), Schema::string())].into_iter().collect();
        let source: Definitions<Schema> = [
            ("A".to_string(), Schema::integer()),
            ("B".to_string(), Schema::boolean()),
        ]
        .into_iter()
        .collect();

        let conflicts = merge_definitions(&mut target, source);
        assert_eq!(conflicts, vec!["A".to_string()]);
        assert_eq!(target.get("A"), Some(&Schema::string()));
        assert_eq!(target.get("B"), Some(&Schema::boolean()));
    }
}

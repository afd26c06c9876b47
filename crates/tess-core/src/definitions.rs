//! Insertion-ordered, name-keyed definition tables.
//!
//! Insertion order only affects output layout. Names are unique, and the
//! first value stored under a name is the one that stays.

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Ordered table of named definitions of one entity kind.
#[derive(Debug, Clone)]
pub struct Definitions<T> {
    entries: Vec<(String, T)>,
    index: HashMap<String, usize>,
}

impl<T> Default for Definitions<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T> Definitions<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&T> {
        self.index.get(name).map(|&slot| &self.entries[slot].1)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Store `value` under `name` unless the name is already taken.
    ///
    /// Returns `true` if the value was stored. An existing entry is never
    /// overwritten.
    pub fn insert_if_absent(&mut self, name: impl Into<String>, value: T) -> bool {
        let name = name.into();
        if self.index.contains_key(&name) {
            return false;
        }
        self.index.insert(name.clone(), self.entries.len());
        self.entries.push((name, value));
        true
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }
}

impl<T: PartialEq> Definitions<T> {
    /// Union `other` into `self`, first writer wins.
    ///
    /// Returns the names whose incoming value differed from the one kept.
    /// Identical duplicates are not reported.
    pub fn absorb(&mut self, other: Self) -> Vec<String> {
        let mut collided = Vec::new();
        for (name, value) in other.entries {
            match self.get(&name) {
                Some(kept) if *kept != value => collided.push(name),
                Some(_) => {}
                None => {
                    self.insert_if_absent(name, value);
                }
            }
        }
        collided
    }
}

impl<T: PartialEq> PartialEq for Definitions<T> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<T: Eq> Eq for Definitions<T> {}

impl<T> FromIterator<(String, T)> for Definitions<T> {
    fn from_iter<I: IntoIterator<Item = (String, T)>>(iter: I) -> Self {
        let mut definitions = Self::new();
        for (name, value) in iter {
            definitions.insert_if_absent(name, value);
        }
        definitions
    }
}

impl<T> IntoIterator for Definitions<T> {
    type Item = (String, T);
    type IntoIter = std::vec::IntoIter<(String, T)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<T: Serialize> Serialize for Definitions<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

struct DefinitionsVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for DefinitionsVisitor<T> {
    type Value = Definitions<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of named definitions")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut definitions = Definitions::new();
        while let Some((name, value)) = access.next_entry::<String, T>()? {
            definitions.insert_if_absent(name, value);
        }
        Ok(definitions)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Definitions<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(DefinitionsVisitor(PhantomData))
    }
}

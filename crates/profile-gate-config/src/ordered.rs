// crates/profile-gate-config/src/ordered.rs
// ============================================================================
// Module: Ordered Tables
// Description: Declaration-ordered TOML table decoding.
// Purpose: Keep sections, fields, and rules in the order they were written.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Field order inside a section and rule order inside a field are part of the
//! configuration's meaning, so tables are decoded into a list of entries
//! rather than a sorted map. Duplicate keys are rejected while decoding.

use std::fmt;
use std::marker::PhantomData;

use serde::Deserialize;
use serde::Deserializer;
use serde::de::MapAccess;
use serde::de::Visitor;

/// TOML table decoded in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedTable<V> {
    /// Entries in declaration order.
    entries: Vec<(String, V)>,
}

impl<V> OrderedTable<V> {
    /// Returns the number of entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the table has no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the value stored under a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.iter().find(|(name, _)| name == key).map(|(_, value)| value)
    }

    /// Iterates entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<V> Default for OrderedTable<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V> FromIterator<(String, V)> for OrderedTable<V> {
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedTable<V> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(OrderedTableVisitor(PhantomData))
    }
}

/// Visitor collecting map entries without reordering them.
struct OrderedTableVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedTableVisitor<V> {
    type Value = OrderedTable<V>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a table")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries: Vec<(String, V)> = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, V>()? {
            if entries.iter().any(|(name, _)| *name == key) {
                return Err(serde::de::Error::custom(format!("duplicate key `{key}`")));
            }
            entries.push((key, value));
        }
        Ok(OrderedTable {
            entries,
        })
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

//! Ordered id -> label mappings handed to the dropdown.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::entity::EntityKey;

/// Option list in display order.
///
/// Inserting an existing key replaces its label in place (last write wins),
/// so a formatter returning duplicate keys cannot produce duplicate options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionMap {
    entries: Vec<(EntityKey, String)>,
}

impl OptionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Insert or replace. Returns the previous label.
    pub fn insert(&mut self, key: EntityKey, label: impl Into<String>) -> Option<String> {
        let label = label.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => Some(std::mem::replace(&mut entry.1, label)),
            None => {
                self.entries.push((key, label));
                None
            }
        }
    }

    pub fn get(&self, key: &EntityKey) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, label)| label.as_str())
    }

    pub fn contains_key(&self, key: &EntityKey) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &EntityKey> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, label)| label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EntityKey, &str)> {
        self.entries.iter().map(|(k, label)| (k, label.as_str()))
    }

    /// Merge another map; its entries win on key collisions.
    pub fn extend(&mut self, other: OptionMap) {
        for (key, label) in other {
            self.insert(key, label);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(EntityKey, String)> for OptionMap {
    fn from_iter<I: IntoIterator<Item = (EntityKey, String)>>(iter: I) -> Self {
        let mut map = OptionMap::new();
        for (key, label) in iter {
            map.insert(key, label);
        }
        map
    }
}

impl IntoIterator for OptionMap {
    type Item = (EntityKey, String);
    type IntoIter = std::vec::IntoIter<(EntityKey, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Serializes as a JSON object in display order.
impl Serialize for OptionMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, label) in &self.entries {
            map.serialize_entry(key.as_str(), label)?;
        }
        map.end()
    }
}

//! Insertion-ordered identity map
//!
//! The single deduplication primitive behind every entity kind: a natural key
//! is looked up, and on first sight it is bound to the next synthetic id.

use crate::model::{EntityId, Identified};
use std::collections::HashMap;
use std::hash::Hash;

/// Map from natural key to an identified value, with its own id counter
///
/// Values are kept in insertion order, so ids in `entries` ascend. The counter
/// starts at 1 and only advances when a new key is inserted.
#[derive(Debug, Clone)]
pub struct IdentityMap<K, V = EntityId> {
    index: HashMap<K, usize>,
    entries: Vec<(K, V)>,
    next_id: EntityId,
}

impl<K, V> Default for IdentityMap<K, V> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
            next_id: 1,
        }
    }
}

impl<K, V> IdentityMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Identified,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the id bound to `key`, building and storing a new value if unseen
    ///
    /// `build` receives the freshly assigned id and is only called for new keys.
    pub fn get_or_create_with(&mut self, key: K, build: impl FnOnce(EntityId) -> V) -> EntityId {
        if let Some(&position) = self.index.get(&key) {
            return self.entries[position].1.id();
        }

        let id = self.next_id;
        self.next_id += 1;
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, build(id)));
        id
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume the map, yielding `(key, value)` pairs in insertion order
    pub fn into_entries(self) -> Vec<(K, V)> {
        self.entries
    }
}

impl<K> IdentityMap<K, EntityId>
where
    K: Hash + Eq + Clone,
{
    /// Return the id bound to `key`, assigning the next id if unseen
    pub fn get_or_create_id(&mut self, key: K) -> EntityId {
        self.get_or_create_with(key, |id| id)
    }
}

use std::collections::BTreeMap;
use std::hash::Hash;

use crate::map::{ConditionalMap, EntryStore};
use crate::nullable::Nullable;

// entry store over std::collections::BTreeMap
//
// Iteration order is ascending key order, which makes `for_each` and
// `replace_all` deterministic. Keys carry the Ord bound on top of the trait
// bounds.
#[derive(Debug)]
pub struct TreeStore<K, V> {
    inner: BTreeMap<K, Nullable<V>>,
}

impl<K: Ord + Hash + Clone, V> EntryStore<K, V> for TreeStore<K, V> {
    fn new() -> Self {
        Self {
            inner: BTreeMap::new(),
        }
    }

    fn put(&mut self, key: &K, value: Nullable<V>) -> Option<Nullable<V>> {
        self.inner.insert(key.clone(), value)
    }

    fn get(&self, key: &K) -> Option<&Nullable<V>> {
        self.inner.get(key)
    }

    fn get_mut(&mut self, key: &K) -> Option<&mut Nullable<V>> {
        self.inner.get_mut(key)
    }

    fn remove(&mut self, key: &K) -> Result<Nullable<V>, ()> {
        self.inner.remove(key).ok_or(())
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn for_each<F: FnMut(&K, &Nullable<V>)>(&self, mut f: F) {
        for (key, value) in &self.inner {
            f(key, value);
        }
    }

    fn for_each_mut<F: FnMut(&K, &mut Nullable<V>)>(&mut self, mut f: F) {
        for (key, value) in &mut self.inner {
            f(key, value);
        }
    }
}

impl<K: Ord + Hash + Clone, V> ConditionalMap<K, V> for TreeStore<K, V> {}

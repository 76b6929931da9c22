use std::collections::HashMap;
use std::hash::Hash;

use crate::map::{ConditionalMap, EntryStore};
use crate::nullable::Nullable;

// entry store over std::collections::HashMap, iteration order unspecified
#[derive(Debug)]
pub struct HashStore<K, V> {
    inner: HashMap<K, Nullable<V>>,
}

impl<K: Eq + Hash + Clone, V> EntryStore<K, V> for HashStore<K, V> {
    fn new() -> Self {
        Self {
            inner: HashMap::new(),
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

impl<K: Eq + Hash + Clone, V> ConditionalMap<K, V> for HashStore<K, V> {}

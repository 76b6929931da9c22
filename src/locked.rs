use std::hash::Hash;
use std::marker::PhantomData;

use crossbeam_utils::sync::{ShardedLock, ShardedLockReadGuard, ShardedLockWriteGuard};
use parking_lot::{Mutex, MutexGuard};

use crate::map::{ConditionalMap, EntryStore};
use crate::nullable::Nullable;
use crate::ordering::{self, Entry};
use crate::store::{HashStore, TreeStore};

pub type LockedHashStore<K, V> = Locked<K, V, HashStore<K, V>>;
pub type LockedTreeStore<K, V> = Locked<K, V, TreeStore<K, V>>;

/// an entry store behind one exclusive lock
///
/// Every operation takes the lock for its whole check-then-act sequence, so
/// the decision tables of the conditional operations hold even when the
/// store is shared between threads. Reads that return a slot clone it out
/// of the critical section.
pub struct Locked<K, V, M>
where
    K: Eq + Hash + Clone,
    M: ConditionalMap<K, V>,
{
    inner: Mutex<M>,
    _marker: PhantomData<(K, V)>,
}

impl<K, V, M> Locked<K, V, M>
where
    K: Eq + Hash + Clone,
    M: ConditionalMap<K, V>,
{
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(M::new()),
            _marker: PhantomData,
        }
    }

    /// Get the exclusive guard of the underlying store, for composing
    /// multiple operations into one critical section.
    pub fn lock(&self) -> MutexGuard<'_, M> {
        self.inner.lock()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.lock().contains_key(key)
    }

    pub fn get(&self, key: &K) -> Option<Nullable<V>>
    where
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    pub fn get_or_default(&self, key: &K, default: Nullable<V>) -> Nullable<V>
    where
        V: Clone,
    {
        match self.inner.lock().get(key) {
            Some(slot) => slot.clone(),
            None => default,
        }
    }

    pub fn put(&self, key: &K, value: Nullable<V>) -> Option<Nullable<V>> {
        self.inner.lock().put(key, value)
    }

    pub fn remove(&self, key: &K) -> Result<Nullable<V>, ()> {
        self.inner.lock().remove(key)
    }

    pub fn put_if_absent(&self, key: &K, value: Nullable<V>) -> Result<(), Nullable<V>> {
        self.inner.lock().put_if_absent(key, value)
    }

    pub fn remove_expected(&self, key: &K, expected: &Nullable<V>) -> bool
    where
        V: PartialEq,
    {
        self.inner.lock().remove_expected(key, expected)
    }

    pub fn replace(&self, key: &K, value: Nullable<V>) -> Result<Nullable<V>, Nullable<V>> {
        self.inner.lock().replace(key, value)
    }

    pub fn replace_expected(
        &self,
        key: &K,
        expected: &Nullable<V>,
        value: Nullable<V>,
    ) -> Result<(), Nullable<V>>
    where
        V: PartialEq,
    {
        self.inner.lock().replace_expected(key, expected, value)
    }

    pub fn replace_all<F: FnMut(&K, &Nullable<V>) -> Nullable<V>>(&self, f: F) {
        self.inner.lock().replace_all(f)
    }

    pub fn compute_if_absent<F>(&self, key: &K, f: F) -> Option<Nullable<V>>
    where
        V: Clone,
        F: FnOnce(&K) -> Nullable<V>,
    {
        self.inner.lock().compute_if_absent(key, f).map(|slot| slot.clone())
    }

    pub fn compute_if_present<F>(&self, key: &K, f: F) -> Option<Nullable<V>>
    where
        V: Clone,
        F: FnOnce(&K, &V) -> Nullable<V>,
    {
        self.inner.lock().compute_if_present(key, f).map(|slot| slot.clone())
    }

    pub fn compute<F>(&self, key: &K, f: F) -> Option<Nullable<V>>
    where
        V: Clone,
        F: FnOnce(&K, &Nullable<V>) -> Nullable<V>,
    {
        self.inner.lock().compute(key, f).map(|slot| slot.clone())
    }

    pub fn merge<F>(&self, key: &K, value: V, f: F) -> Option<Nullable<V>>
    where
        V: Clone,
        F: FnOnce(&V, &V) -> Nullable<V>,
    {
        self.inner.lock().merge(key, value, f).map(|slot| slot.clone())
    }

    /// Invoke the visitor once per present entry, holding the lock for the
    /// whole pass.
    pub fn for_each<F: FnMut(&K, &Nullable<V>)>(&self, f: F) {
        self.inner.lock().for_each(f)
    }

    pub fn snapshot(&self) -> Vec<Entry<K, V>>
    where
        V: Clone,
    {
        ordering::snapshot(&*self.inner.lock())
    }
}

/// the read-parallel variant of `Locked`
///
/// Read operations share the lock; mutations take it exclusively. A
/// poisoned lock means a writer crashed mid-operation and the store state
/// is gone with it.
pub struct RwLocked<K, V, M>
where
    K: Eq + Hash + Clone,
    M: ConditionalMap<K, V>,
{
    inner: ShardedLock<M>,
    _marker: PhantomData<(K, V)>,
}

impl<K, V, M> RwLocked<K, V, M>
where
    K: Eq + Hash + Clone,
    M: ConditionalMap<K, V>,
{
    pub fn new() -> Self {
        Self {
            inner: ShardedLock::new(M::new()),
            _marker: PhantomData,
        }
    }

    /// Get the shared read guard of the underlying store.
    pub fn read(&self) -> ShardedLockReadGuard<'_, M> {
        self.inner.read().unwrap()
    }

    /// Get the exclusive write guard of the underlying store.
    pub fn write(&self) -> ShardedLockWriteGuard<'_, M> {
        self.inner.write().unwrap()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.read().contains_key(key)
    }

    pub fn get(&self, key: &K) -> Option<Nullable<V>>
    where
        V: Clone,
    {
        self.read().get(key).cloned()
    }

    pub fn put(&self, key: &K, value: Nullable<V>) -> Option<Nullable<V>> {
        self.write().put(key, value)
    }

    pub fn remove(&self, key: &K) -> Result<Nullable<V>, ()> {
        self.write().remove(key)
    }

    pub fn put_if_absent(&self, key: &K, value: Nullable<V>) -> Result<(), Nullable<V>> {
        self.write().put_if_absent(key, value)
    }

    pub fn merge<F>(&self, key: &K, value: V, f: F) -> Option<Nullable<V>>
    where
        V: Clone,
        F: FnOnce(&V, &V) -> Nullable<V>,
    {
        self.write().merge(key, value, f).map(|slot| slot.clone())
    }
}

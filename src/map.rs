use std::hash::Hash;
use std::mem;

use crate::nullable::Nullable;
use crate::some_or;

/// the base associative primitive: unique keys mapped to nullable slots
///
/// A key is in exactly one of three states: absent (`get` returns None),
/// present with the marker (`Some(Nullable::Null)`), or present with a value
/// (`Some(Nullable::Value(v))`). Every implementation must keep a key mapped
/// to the marker counted as present.
pub trait EntryStore<K: Eq + Hash + Clone, V> {
    fn new() -> Self;

    /// Insert (key, slot) into the store, overwriting unconditionally.
    ///
    /// If the key was present, return Some(slot) which was stored before.
    /// If the key was absent, return None.
    fn put(&mut self, key: &K, value: Nullable<V>) -> Option<Nullable<V>>;

    /// Lookup the slot of the key.
    fn get(&self, key: &K) -> Option<&Nullable<V>>;

    /// Lookup the slot of the key for mutating it in place.
    ///
    /// The returned reference is the stored slot itself, so edits through it
    /// are visible to every later lookup.
    fn get_mut(&mut self, key: &K) -> Option<&mut Nullable<V>>;

    /// Remove the slot of the key.
    ///
    /// If success, return Ok(slot) which was stored before.
    /// If the key is absent, return Err(()).
    fn remove(&mut self, key: &K) -> Result<Nullable<V>, ()>;

    /// the count of present keys, keys mapped to the marker included
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Invoke the visitor once per present entry, in store iteration order.
    fn for_each<F: FnMut(&K, &Nullable<V>)>(&self, f: F);

    /// Invoke the visitor once per present entry with the mutable slot.
    fn for_each_mut<F: FnMut(&K, &mut Nullable<V>)>(&mut self, f: F);
}

/// conditional mutations over an entry store
///
/// Each operation is a decision table over the slot state of one key. The
/// caller-supplied functions run before any write, so a function that panics
/// leaves the targeted slot exactly as it was. Operations that reject an
/// owned value hand it back through Err, like a failed insert does.
pub trait ConditionalMap<K: Eq + Hash + Clone, V>: EntryStore<K, V> {
    /// Insert (key, slot) only if the key is truly absent.
    ///
    /// If the key was absent, store the slot and return Ok(()).
    /// If the key is present, the marker included, return Err(slot) without
    /// touching the store.
    fn put_if_absent(&mut self, key: &K, value: Nullable<V>) -> Result<(), Nullable<V>> {
        if self.contains_key(key) {
            return Err(value);
        }

        let _ = self.put(key, value);
        Ok(())
    }

    /// Remove the entry only if its slot equals the expected one.
    ///
    /// Return true if the entry was removed. A mismatch or an absent key is
    /// not an error: the store is unchanged and the result is false.
    fn remove_expected(&mut self, key: &K, expected: &Nullable<V>) -> bool
    where
        V: PartialEq,
    {
        match self.get(key) {
            Some(current) if current == expected => {}
            _ => return false,
        }

        self.remove(key).is_ok()
    }

    /// Overwrite the slot only if the key is present.
    ///
    /// If the key is present, the marker included, return Ok(slot) which was
    /// stored before. If the key is absent, return Err(slot) that you tried
    /// to store.
    fn replace(&mut self, key: &K, value: Nullable<V>) -> Result<Nullable<V>, Nullable<V>> {
        match self.get_mut(key) {
            Some(current) => Ok(mem::replace(current, value)),
            None => Err(value),
        }
    }

    /// Overwrite the slot only if it equals the expected one.
    ///
    /// The expected slot may be the marker, matching a key mapped to it, and
    /// the new slot may be the marker, which stays a present entry. On
    /// mismatch or an absent key, return Err(slot) that you tried to store.
    fn replace_expected(
        &mut self,
        key: &K,
        expected: &Nullable<V>,
        value: Nullable<V>,
    ) -> Result<(), Nullable<V>>
    where
        V: PartialEq,
    {
        match self.get_mut(key) {
            Some(current) if *current == *expected => {
                *current = value;
                Ok(())
            }
            _ => Err(value),
        }
    }

    /// Rewrite every present slot with the transformer, once per entry, in
    /// store iteration order.
    ///
    /// The result is stored as-is: a marker result keeps the entry present.
    /// No key is added or removed.
    fn replace_all<F: FnMut(&K, &Nullable<V>) -> Nullable<V>>(&mut self, mut f: F) {
        self.for_each_mut(|key, slot| {
            let next = f(key, slot);
            *slot = next;
        });
    }

    /// Compute a slot for an absent key.
    ///
    /// If the key is absent, store the computed slot and return it, unless
    /// the computation yields the marker, which creates no entry. If the key
    /// is present, the marker included, return the stored slot without
    /// invoking the mapping function.
    ///
    /// The returned reference is the stored slot, so repeated calls can
    /// accumulate into the same stored value.
    fn compute_if_absent<F>(&mut self, key: &K, f: F) -> Option<&mut Nullable<V>>
    where
        F: FnOnce(&K) -> Nullable<V>,
    {
        if !self.contains_key(key) {
            match f(key) {
                Nullable::Null => return None,
                value => {
                    let _ = self.put(key, value);
                }
            }
        }

        self.get_mut(key)
    }

    /// Remap the value of a present key.
    ///
    /// The remapping function only ever sees a real value: an absent key and
    /// a key mapped to the marker are both left unchanged without invoking
    /// it. A marker result removes the entry; any other result overwrites
    /// the slot and is returned.
    fn compute_if_present<F>(&mut self, key: &K, f: F) -> Option<&mut Nullable<V>>
    where
        F: FnOnce(&K, &V) -> Nullable<V>,
    {
        let result = match self.get(key) {
            Some(Nullable::Value(current)) => f(key, current),
            _ => return None,
        };

        match result {
            Nullable::Null => {
                let _ = self.remove(key);
                None
            }
            value => {
                let _ = self.put(key, value);
                self.get_mut(key)
            }
        }
    }

    /// Remap the slot of a key regardless of its state.
    ///
    /// The remapping function receives the current slot, the marker when the
    /// key is absent. A function that cannot accept the marker is a caller
    /// error and fails the caller directly. A marker result makes or keeps
    /// the key absent; any other result is stored and returned.
    fn compute<F>(&mut self, key: &K, f: F) -> Option<&mut Nullable<V>>
    where
        F: FnOnce(&K, &Nullable<V>) -> Nullable<V>,
    {
        let result = match self.get(key) {
            Some(current) => f(key, current),
            None => f(key, &Nullable::Null),
        };

        match result {
            Nullable::Null => {
                let _ = self.remove(key);
                None
            }
            value => {
                let _ = self.put(key, value);
                self.get_mut(key)
            }
        }
    }

    /// Store the proposed value, or combine it with the present one.
    ///
    /// If the key is absent or mapped to the marker, store the proposed
    /// value directly without invoking the remapping function. If the key
    /// holds a value, the function combines (current, proposed); a marker
    /// result removes the entry, any other result overwrites the slot.
    fn merge<F>(&mut self, key: &K, value: V, f: F) -> Option<&mut Nullable<V>>
    where
        F: FnOnce(&V, &V) -> Nullable<V>,
    {
        let result = match self.get(key) {
            Some(Nullable::Value(current)) => f(current, &value),
            _ => Nullable::Value(value),
        };

        match result {
            Nullable::Null => {
                let _ = self.remove(key);
                None
            }
            value => {
                let _ = self.put(key, value);
                self.get_mut(key)
            }
        }
    }

    /// Read the slot of the key, falling back to the default only when the
    /// key is absent. A present marker slot is returned as-is.
    fn get_or_default<'a>(&'a self, key: &K, default: &'a Nullable<V>) -> &'a Nullable<V> {
        some_or!(self.get(key), default)
    }
}

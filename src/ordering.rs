use std::cmp::Ordering;
use std::hash::Hash;

use crate::map::EntryStore;
use crate::nullable::Nullable;

/// one snapshotted entry: the key and its slot
pub type Entry<K, V> = (K, Nullable<V>);

/// Copy every present entry of the store into a fresh vector, in store
/// iteration order. The store is not touched.
pub fn snapshot<K, V, M>(map: &M) -> Vec<Entry<K, V>>
where
    K: Eq + Hash + Clone,
    V: Clone,
    M: EntryStore<K, V>,
{
    let mut entries = Vec::with_capacity(map.len());
    map.for_each(|key, value| entries.push((key.clone(), value.clone())));

    entries
}

/// Sort the snapshot by the comparison and return it.
///
/// The sort is stable: entries comparing equal keep their snapshot order.
pub fn sorted_entries<K, V, F>(mut entries: Vec<Entry<K, V>>, mut cmp: F) -> Vec<Entry<K, V>>
where
    F: FnMut(&Entry<K, V>, &Entry<K, V>) -> Ordering,
{
    entries.sort_by(|a, b| cmp(a, b));

    entries
}

/// Sort the snapshot by the comparison and keep only the keys.
pub fn sorted_keys<K, V, F>(entries: Vec<Entry<K, V>>, cmp: F) -> Vec<K>
where
    F: FnMut(&Entry<K, V>, &Entry<K, V>) -> Ordering,
{
    sorted_entries(entries, cmp)
        .into_iter()
        .map(|(key, _)| key)
        .collect()
}

/// natural ascending key order
pub fn by_key<K: Ord, V>(a: &Entry<K, V>, b: &Entry<K, V>) -> Ordering {
    a.0.cmp(&b.0)
}

/// key order under a caller-supplied comparison
pub fn by_key_with<K, V, F>(mut cmp: F) -> impl FnMut(&Entry<K, V>, &Entry<K, V>) -> Ordering
where
    F: FnMut(&K, &K) -> Ordering,
{
    move |a, b| cmp(&a.0, &b.0)
}

/// slot order by a derived property, e.g. the size of an attached collection
pub fn by_value_on<K, V, S, F>(extract: F) -> impl FnMut(&Entry<K, V>, &Entry<K, V>) -> Ordering
where
    S: Ord,
    F: Fn(&Nullable<V>) -> S,
{
    move |a, b| extract(&a.1).cmp(&extract(&b.1))
}

/// the logical inverse of a comparison
///
/// Ties stay ties, so reversing keeps the stability of the sort.
pub fn reversed<K, V, F>(mut cmp: F) -> impl FnMut(&Entry<K, V>, &Entry<K, V>) -> Ordering
where
    F: FnMut(&Entry<K, V>, &Entry<K, V>) -> Ordering,
{
    move |a, b| cmp(b, a)
}

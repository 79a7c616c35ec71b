//! Map helpers.
//!
//! [`MapLookup`] gives the standard, ordered and concurrent maps one "get a cloned value"
//! operation so the `_or` / `_or_else` defaults can be written once.

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use dashmap::DashMap;
use indexmap::IndexMap;
use strum::IntoEnumIterator;

use crate::enums;

/// A map that can be queried by a borrowed key form `Q`, returning an owned value.
pub trait MapLookup<Q: ?Sized> {
    type Value;

    fn lookup(&self, key: &Q) -> Option<Self::Value>;
}

impl<K, V, Q, S> MapLookup<Q> for HashMap<K, V, S>
where
    K: Borrow<Q> + Hash + Eq,
    Q: Hash + Eq + ?Sized,
    V: Clone,
    S: BuildHasher,
{
    type Value = V;

    fn lookup(&self, key: &Q) -> Option<V> {
        self.get(key).cloned()
    }
}

impl<K, V, Q> MapLookup<Q> for BTreeMap<K, V>
where
    K: Borrow<Q> + Ord,
    Q: Ord + ?Sized,
    V: Clone,
{
    type Value = V;

    fn lookup(&self, key: &Q) -> Option<V> {
        self.get(key).cloned()
    }
}

impl<K, V, Q, S> MapLookup<Q> for IndexMap<K, V, S>
where
    K: Borrow<Q> + Hash + Eq,
    Q: Hash + Eq + ?Sized,
    V: Clone,
    S: BuildHasher,
{
    type Value = V;

    fn lookup(&self, key: &Q) -> Option<V> {
        self.get(key).cloned()
    }
}

impl<K, V, Q, S> MapLookup<Q> for DashMap<K, V, S>
where
    K: Borrow<Q> + Hash + Eq,
    Q: Hash + Eq + ?Sized,
    V: Clone,
    S: BuildHasher + Clone,
{
    type Value = V;

    // The shard guard is released before the value is handed back.
    fn lookup(&self, key: &Q) -> Option<V> {
        self.get(key).map(|entry| entry.value().clone())
    }
}

/// The value stored under `key`, cloned.
///
/// ```
/// use std::collections::HashMap;
/// use uwutils::collection::map;
///
/// let ports = HashMap::from([("http".to_string(), 80)]);
/// assert_eq!(map::get(&ports, "http"), Some(80));
/// assert_eq!(map::get_or(&ports, "gopher", 70), 70);
/// ```
pub fn get<M, Q>(map: &M, key: &Q) -> Option<M::Value>
where
    M: MapLookup<Q> + ?Sized,
    Q: ?Sized,
{
    map.lookup(key)
}

pub fn get_or<M, Q>(map: &M, key: &Q, default: M::Value) -> M::Value
where
    M: MapLookup<Q> + ?Sized,
    Q: ?Sized,
{
    map.lookup(key).unwrap_or(default)
}

pub fn get_or_else<M, Q>(map: &M, key: &Q, default: impl FnOnce() -> M::Value) -> M::Value
where
    M: MapLookup<Q> + ?Sized,
    Q: ?Sized,
{
    map.lookup(key).unwrap_or_else(default)
}

/// A map that [`extend_by_field`] can fill.
pub trait FieldMap<K, T>: Default {
    fn has_key(&self, key: &K) -> bool;

    fn put(&mut self, key: K, value: T);
}

impl<K: Hash + Eq, T, S: BuildHasher + Default> FieldMap<K, T> for HashMap<K, T, S> {
    fn has_key(&self, key: &K) -> bool {
        self.contains_key(key)
    }

    fn put(&mut self, key: K, value: T) {
        self.insert(key, value);
    }
}

impl<K: Ord, T> FieldMap<K, T> for BTreeMap<K, T> {
    fn has_key(&self, key: &K) -> bool {
        self.contains_key(key)
    }

    fn put(&mut self, key: K, value: T) {
        self.insert(key, value);
    }
}

impl<K: Hash + Eq, T, S: BuildHasher + Default> FieldMap<K, T> for IndexMap<K, T, S> {
    fn has_key(&self, key: &K) -> bool {
        self.contains_key(key)
    }

    fn put(&mut self, key: K, value: T) {
        self.insert(key, value);
    }
}

impl<K: Hash + Eq, T, S: BuildHasher + Clone + Default> FieldMap<K, T> for DashMap<K, T, S> {
    fn has_key(&self, key: &K) -> bool {
        self.contains_key(key)
    }

    fn put(&mut self, key: K, value: T) {
        self.insert(key, value);
    }
}

/// Add every entry to `map`, keyed by `key(entry)`.
///
/// Keys must be unique: when an entry's key is already in `map`, or repeats one seen
/// earlier in `entries`, the whole extension fails and `None` is returned.
///
/// ```
/// use std::collections::BTreeMap;
/// use uwutils::collection::map;
///
/// let base = BTreeMap::from([(1, "one")]);
/// let map = map::extend_by_field(base.clone(), ["three"], |s| s.len()).unwrap();
/// assert_eq!(map.len(), 2);
/// assert_eq!(map::extend_by_field(base, ["two", "six"], |s| s.len()), None);
/// ```
pub fn extend_by_field<K, T, M>(
    mut map: M,
    entries: impl IntoIterator<Item = T>,
    key: impl Fn(&T) -> K,
) -> Option<M>
where
    M: FieldMap<K, T>,
{
    for entry in entries {
        let key = key(&entry);
        if map.has_key(&key) {
            return None;
        }
        map.put(key, entry);
    }
    Some(map)
}

pub fn extend_by_field_or<K, T, M>(
    map: M,
    entries: impl IntoIterator<Item = T>,
    key: impl Fn(&T) -> K,
    default: M,
) -> M
where
    M: FieldMap<K, T>,
{
    extend_by_field(map, entries, key).unwrap_or(default)
}

pub fn extend_by_field_or_else<K, T, M>(
    map: M,
    entries: impl IntoIterator<Item = T>,
    key: impl Fn(&T) -> K,
    default: impl FnOnce() -> M,
) -> M
where
    M: FieldMap<K, T>,
{
    extend_by_field(map, entries, key).unwrap_or_else(default)
}

/// Build a map of entries keyed by one of their fields, or `None` on a repeated key.
pub fn by_field<K, T>(
    entries: impl IntoIterator<Item = T>,
    key: impl Fn(&T) -> K,
) -> Option<HashMap<K, T>>
where
    K: Hash + Eq,
{
    extend_by_field(HashMap::new(), entries, key)
}

pub fn by_field_or<K, T>(
    entries: impl IntoIterator<Item = T>,
    key: impl Fn(&T) -> K,
    default: HashMap<K, T>,
) -> HashMap<K, T>
where
    K: Hash + Eq,
{
    by_field(entries, key).unwrap_or(default)
}

pub fn by_field_or_else<K, T>(
    entries: impl IntoIterator<Item = T>,
    key: impl Fn(&T) -> K,
    default: impl FnOnce() -> HashMap<K, T>,
) -> HashMap<K, T>
where
    K: Hash + Eq,
{
    by_field(entries, key).unwrap_or_else(default)
}

pub fn by_field_or_empty<K, T>(
    entries: impl IntoIterator<Item = T>,
    key: impl Fn(&T) -> K,
) -> HashMap<K, T>
where
    K: Hash + Eq,
{
    by_field(entries, key).unwrap_or_default()
}

/// Like [`by_field`], but keeps the order in which entries were given.
pub fn by_field_ordered<K, T>(
    entries: impl IntoIterator<Item = T>,
    key: impl Fn(&T) -> K,
) -> Option<IndexMap<K, T>>
where
    K: Hash + Eq,
{
    extend_by_field(IndexMap::new(), entries, key)
}

/// Like [`by_field`], but the result can be shared and updated across threads.
pub fn concurrent_by_field<K, T>(
    entries: impl IntoIterator<Item = T>,
    key: impl Fn(&T) -> K,
) -> Option<DashMap<K, T>>
where
    K: Hash + Eq,
{
    extend_by_field(DashMap::new(), entries, key)
}

/// Map every variant of `E` by one of its fields, or `None` if two variants share a key.
///
/// Variants come from the cached [`enums::values`] table.
pub fn enum_by_field<E, K>(key: impl Fn(&E) -> K) -> Option<HashMap<K, E>>
where
    E: IntoEnumIterator + Clone + Send + Sync + 'static,
    K: Hash + Eq,
{
    by_field(enums::values::<E>().iter().cloned(), key)
}

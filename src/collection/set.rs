//! Set builders.

use std::collections::HashSet;
use std::hash::Hash;

use dashmap::DashSet;

/// Collect `items` into a set.
pub fn create<T: Hash + Eq>(items: impl IntoIterator<Item = T>) -> HashSet<T> {
    items.into_iter().collect()
}

/// Collect `items` into a set, or return `default` when there are no items at all.
///
/// An empty collection is still a collection and yields an empty set.
///
/// ```
/// use std::collections::HashSet;
/// use uwutils::collection::set;
///
/// assert_eq!(set::create_or(None::<Vec<u8>>, HashSet::from([7])), HashSet::from([7]));
/// assert!(set::create_or(Some(Vec::<u8>::new()), HashSet::from([7])).is_empty());
/// ```
pub fn create_or<T: Hash + Eq>(
    items: Option<impl IntoIterator<Item = T>>,
    default: HashSet<T>,
) -> HashSet<T> {
    create_or_else(items, || default)
}

pub fn create_or_else<T: Hash + Eq>(
    items: Option<impl IntoIterator<Item = T>>,
    default: impl FnOnce() -> HashSet<T>,
) -> HashSet<T> {
    items.map(create).unwrap_or_else(default)
}

pub fn create_or_empty<T: Hash + Eq>(items: Option<impl IntoIterator<Item = T>>) -> HashSet<T> {
    create_or_else(items, HashSet::new)
}

/// Collect `items` into a set that can be shared and updated across threads.
pub fn create_concurrent<T: Hash + Eq>(items: impl IntoIterator<Item = T>) -> DashSet<T> {
    items.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_dedups() {
        let set = create([3, 1, 3, 2, 1]);
        assert_eq!(set.len(), 3);
        assert!(set.contains(&2));
    }

    #[test]
    fn test_create_or_uses_default_only_when_missing() {
        let fallback = HashSet::from(["default"]);
        assert_eq!(create_or(None::<Vec<&str>>, fallback.clone()), fallback);
        assert_eq!(create_or(Some(["x"]), fallback.clone()), HashSet::from(["x"]));
        assert!(create_or(Some(Vec::<&str>::new()), fallback).is_empty());
        assert_eq!(create_or_else(None::<[u8; 0]>, || HashSet::from([7])), HashSet::from([7]));
        assert!(create_or_empty(None::<Vec<u8>>).is_empty());
        assert_eq!(create_or_empty(Some([1, 1, 2])).len(), 2);
    }

    #[test]
    fn test_create_concurrent_is_shareable() {
        let set = std::sync::Arc::new(create_concurrent(["a", "b"]));
        let handle = {
            let set = set.clone();
            std::thread::spawn(move || set.insert("c"))
        };
        assert!(handle.join().unwrap());
        assert_eq!(set.len(), 3);
        assert!(!set.insert("a"));
    }
}

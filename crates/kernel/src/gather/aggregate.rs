//! Aggregation and lookup helpers shared by the entity queries.

use std::collections::BTreeMap;

use crate::error::{AppError, AppResult};
use crate::models::Record;

/// Count records per key.
pub fn count_by<T, K: Ord>(items: &[T], key: impl Fn(&T) -> K) -> BTreeMap<K, u64> {
    let mut counts = BTreeMap::new();
    for item in items {
        *counts.entry(key(item)).or_insert(0) += 1;
    }
    counts
}

/// Count records per key when a record carries several keys.
pub fn count_each<T, K: Ord, I>(items: &[T], keys: impl Fn(&T) -> I) -> BTreeMap<K, u64>
where
    I: IntoIterator<Item = K>,
{
    let mut counts = BTreeMap::new();
    for item in items {
        for k in keys(item) {
            *counts.entry(k).or_insert(0) += 1;
        }
    }
    counts
}

/// Count records matching a predicate.
pub fn count_if<T>(items: &[T], pred: impl Fn(&T) -> bool) -> u64 {
    items.iter().filter(|&i| pred(i)).count() as u64
}

/// Look up a record by id.
///
/// This is the only failing operation of the engine.
pub fn find<'a, T: Record>(items: &'a [T], id: &str) -> AppResult<&'a T> {
    items
        .iter()
        .find(|r| r.id() == id)
        .ok_or_else(|| AppError::not_found(T::ENTITY, id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_by_groups_keys() {
        let words = ["a", "bb", "cc", "ddd"];
        let counts = count_by(&words, |w| w.len());
        assert_eq!(counts.get(&2), Some(&2));
        assert_eq!(counts.get(&3), Some(&1));
    }

    #[test]
    fn count_each_flattens() {
        let lists = [vec![1, 2], vec![2], vec![]];
        let counts = count_each(&lists, |l| l.clone());
        assert_eq!(counts.get(&2), Some(&2));
        assert_eq!(counts.get(&1), Some(&1));
    }
}

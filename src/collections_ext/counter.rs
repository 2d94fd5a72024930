use std::{
    cmp::{Ordering, Reverse},
    collections::{hash_map, HashMap},
    fmt::Display,
    hash::Hash,
    io::BufRead,
};

use anyhow::Context;

/// one ranked entry produced by `Counter::most_common`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountItem<K> {
    pub key: K,
    pub count: i64,
}

/// multiset keyed by `K`. absent keys count as 0.
#[derive(Debug, Clone)]
pub struct Counter<K> {
    counts: HashMap<K, i64>,
}

impl<K> Default for Counter<K> {
    fn default() -> Self {
        Self {
            counts: HashMap::new(),
        }
    }
}

impl<K> Counter<K>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// count of `key`, 0 if never seen
    pub fn get(&self, key: &K) -> i64 {
        *self.counts.get(key).unwrap_or(&0)
    }

    pub fn add(&mut self, key: K) {
        self.add_count(key, 1);
    }

    /// `count` may be negative, it is not validated. counts wrap on overflow.
    pub fn add_count(&mut self, key: K, count: i64) {
        let entry = self.counts.entry(key).or_insert(0);
        *entry = entry.wrapping_add(count);
    }

    /// insert at 1 when absent, otherwise bump by 1. same net effect as `add`.
    pub fn increment(&mut self, key: K) {
        match self.counts.entry(key) {
            hash_map::Entry::Occupied(mut e) => {
                let count = e.get_mut();
                *count = count.wrapping_add(1);
            }
            hash_map::Entry::Vacant(e) => {
                e.insert(1);
            }
        }
    }

    /// reset the count of `key` to 0. the key stays present.
    pub fn reset(&mut self, key: K) {
        self.counts.insert(key, 0);
    }

    pub fn remove(&mut self, key: &K) -> Option<i64> {
        self.counts.remove(key)
    }

    pub fn clear(&mut self) {
        self.counts.clear();
    }

    /// sum of all stored counts, wrapping on overflow
    pub fn total(&self) -> i64 {
        self.counts.values().fold(0, |acc, v| acc.wrapping_add(*v))
    }

    /// number of distinct keys
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, i64)> + '_ {
        self.counts.iter().map(|(k, &v)| (k, v))
    }

    /// top `n` entries by count, descending. equal counts are ordered by `tie_break`.
    pub fn most_common_by<F>(&self, n: usize, mut tie_break: F) -> Vec<CountItem<&K>>
    where
        F: FnMut(&K, &K) -> Ordering,
    {
        if n == 0 {
            return vec![];
        }
        let mut items = self
            .iter()
            .map(|(key, count)| CountItem { key, count })
            .collect::<Vec<_>>();
        items.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| tie_break(a.key, b.key))
        });
        items.truncate(n);
        items
    }
}

impl<K> Counter<K>
where
    K: Eq + Hash + Display,
{
    /// top `n` entries by count, descending. equal counts are ordered by the
    /// key's `Display` string, ascending.
    ///
    /// returns all entries when `n` exceeds the number of distinct keys.
    pub fn most_common(&self, n: usize) -> Vec<CountItem<&K>> {
        if n == 0 {
            return vec![];
        }
        let mut items = self
            .iter()
            .map(|(key, count)| CountItem { key, count })
            .collect::<Vec<_>>();
        // keys are rendered once each instead of once per comparison
        items.sort_by_cached_key(|item| (Reverse(item.count), item.key.to_string()));
        items.truncate(n);
        items
    }
}

impl<K> Extend<K> for Counter<K>
where
    K: Eq + Hash,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.add(key);
        }
    }
}

impl<K> FromIterator<K> for Counter<K>
where
    K: Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut counter = Counter::new();
        counter.extend(iter);
        counter
    }
}

/// count whitespace separated tokens of `reader`
pub fn count_tokens<R: BufRead>(reader: R) -> anyhow::Result<Counter<String>> {
    let mut counter = Counter::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("read line {} failed", idx + 1))?;
        counter.extend(line.split_whitespace().map(str::to_string));
    }
    tracing::debug!(
        "count_tokens done. distinct:{}, total:{}",
        counter.len(),
        counter.total()
    );
    Ok(counter)
}

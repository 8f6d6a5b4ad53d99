//! Keyed series of aggregated counts.

use serde::Serialize;
use std::collections::BTreeMap;

/// Mapping from key to an aggregated count for one render pass.
///
/// A series is sparse: a key is present once it has received at least one
/// observation, even if that observation was zero. Observations for the same
/// key are summed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Series<K: Ord> {
    values: BTreeMap<K, u64>,
}

impl<K: Ord> Default for Series<K> {
    fn default() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }
}

impl<K: Ord + Copy> Series<K> {
    /// Creates an empty series.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an observation, summing with earlier observations of `key`.
    pub fn add(&mut self, key: K, amount: u64) {
        let slot = self.values.entry(key).or_insert(0);
        *slot = slot.saturating_add(amount);
    }

    /// Value for `key`, zero when it was never observed.
    pub fn get(&self, key: &K) -> u64 {
        self.values.get(key).copied().unwrap_or(0)
    }

    /// Whether `key` has been observed.
    pub fn contains(&self, key: &K) -> bool {
        self.values.contains_key(key)
    }

    /// Number of observed keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no key has been observed.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Observed keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.values.keys().copied()
    }

    /// `(key, value)` pairs in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (K, u64)> + '_ {
        self.values.iter().map(|(k, v)| (*k, *v))
    }

    /// Sum of all values.
    pub fn total(&self) -> u64 {
        self.values.values().fold(0u64, |acc, v| acc.saturating_add(*v))
    }

    /// Largest value, zero for an empty series.
    pub fn max(&self) -> u64 {
        self.values.values().copied().max().unwrap_or(0)
    }

    /// One entry per domain key in domain order, zero-filled.
    pub fn dense(&self, domain: &[K]) -> Vec<(K, u64)> {
        domain.iter().map(|k| (*k, self.get(k))).collect()
    }
}

impl<K: Ord + Copy> FromIterator<(K, u64)> for Series<K> {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        let mut series = Self::new();
        for (key, value) in iter {
            series.add(key, value);
        }
        series
    }
}

impl<K: Ord + Copy> Extend<(K, u64)> for Series<K> {
    fn extend<I: IntoIterator<Item = (K, u64)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.add(key, value);
        }
    }
}

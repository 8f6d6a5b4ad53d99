//! Key-set diffing between two render passes.

use serde::Serialize;
use std::collections::HashSet;
use std::hash::Hash;

/// Outcome of diffing the keys bound before a render against the keys of
/// the next series.
///
/// The three collections are disjoint. `entering` and `updating` follow the
/// order of the next keys; `exiting` follows the order of the previous keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reconciliation<K> {
    /// Keys present only in the next set.
    pub entering: Vec<K>,
    /// Keys present in both sets.
    pub updating: Vec<K>,
    /// Keys present only in the previous set.
    pub exiting: Vec<K>,
}

impl<K> Default for Reconciliation<K> {
    fn default() -> Self {
        Self {
            entering: Vec::new(),
            updating: Vec::new(),
            exiting: Vec::new(),
        }
    }
}

impl<K> Reconciliation<K> {
    /// Whether nothing enters or exits.
    pub fn is_stable(&self) -> bool {
        self.entering.is_empty() && self.exiting.is_empty()
    }

    /// Number of keys bound after the diff is applied.
    pub fn next_len(&self) -> usize {
        self.entering.len() + self.updating.len()
    }
}

/// Diffs two key sets in linear time. Duplicate keys are reported once.
pub fn reconcile<K, P, N>(previous: P, next: N) -> Reconciliation<K>
where
    K: Copy + Eq + Hash,
    P: IntoIterator<Item = K>,
    N: IntoIterator<Item = K>,
{
    let previous: Vec<K> = previous.into_iter().collect();
    let previous_set: HashSet<K> = previous.iter().copied().collect();

    let mut result = Reconciliation::default();
    let mut seen = HashSet::new();
    for key in next {
        if !seen.insert(key) {
            continue;
        }
        if previous_set.contains(&key) {
            result.updating.push(key);
        } else {
            result.entering.push(key);
        }
    }

    let mut exited = HashSet::new();
    result.exiting = previous
        .into_iter()
        .filter(|key| !seen.contains(key) && exited.insert(*key))
        .collect();

    result
}

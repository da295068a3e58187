//! Insertion-ordered frequency counter.
//!
//! Every analyzer aggregates through [`Counter`] so that top-N
//! selection is reproducible: entries are ranked by descending count
//! and ties resolve in first-seen order, run after run.

use std::collections::HashMap;
use std::hash::Hash;

/// A frequency map that remembers the order keys were first seen.
#[derive(Debug, Clone)]
pub struct Counter<K> {
    index: HashMap<K, usize>,
    entries: Vec<(K, u64)>,
}

impl<K: Hash + Eq + Clone> Counter<K> {
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Add `n` to the count for `key`, inserting it on first sight.
    pub fn add(&mut self, key: K, n: u64) {
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 += n,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, n));
            }
        }
    }

    /// Increment the count for `key` by one.
    pub fn increment(&mut self, key: K) {
        self.add(key, 1);
    }

    /// Count for `key`, 0 when never seen.
    pub fn get(&self, key: &K) -> u64 {
        self.index.get(key).map(|&i| self.entries[i].1).unwrap_or(0)
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in first-seen order.
    pub fn entries(&self) -> &[(K, u64)] {
        &self.entries
    }

    /// The `n` highest-count entries, descending. Ties keep first-seen
    /// order (the sort is stable over the insertion sequence).
    pub fn top(&self, n: usize) -> Vec<(K, u64)> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }
}

impl<K: Hash + Eq + Clone> Default for Counter<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_and_get() {
        let mut c = Counter::new();
        c.increment("a");
        c.increment("b");
        c.increment("a");
        assert_eq!(c.get(&"a"), 2);
        assert_eq!(c.get(&"b"), 1);
        assert_eq!(c.get(&"missing"), 0);
        assert_eq!(c.total(), 3);
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn test_top_orders_by_count() {
        let mut c = Counter::new();
        for _ in 0..3 {
            c.increment("low");
        }
        for _ in 0..10 {
            c.increment("high");
        }
        for _ in 0..5 {
            c.increment("mid");
        }
        assert_eq!(c.top(2), vec![("high", 10), ("mid", 5)]);
    }

    #[test]
    fn test_top_ties_keep_first_seen_order() {
        let mut c = Counter::new();
        c.increment("zeta");
        c.increment("alpha");
        c.increment("beta");
        // All tied at 1; first-seen order must win, not alphabetical
        assert_eq!(c.top(3), vec![("zeta", 1), ("alpha", 1), ("beta", 1)]);
    }

    #[test]
    fn test_top_larger_than_len() {
        let mut c = Counter::new();
        c.increment(7u32);
        assert_eq!(c.top(10), vec![(7, 1)]);
    }
}

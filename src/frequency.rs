//! src/frequency.rs
use crate::mappers::MapEmitter;
use std::collections::BTreeMap;
use std::collections::btree_map;

/// Word occurrence counts, enumerated in lexicographic word order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<String, u64>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `count` to `word`, inserting it if absent.
    pub fn add(&mut self, word: &str, count: u64) {
        match self.counts.get_mut(word) {
            Some(existing) => *existing += count,
            None => {
                self.counts.insert(word.to_owned(), count);
            }
        }
    }

    pub fn get(&self, word: &str) -> Option<u64> {
        self.counts.get(word).copied()
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(word, count)| (word.as_str(), *count))
    }
}

impl MapEmitter for FrequencyTable {
    fn emit(&mut self, key: &str, value: u64) {
        self.add(key, value);
    }
}

impl IntoIterator for FrequencyTable {
    type Item = (String, u64);
    type IntoIter = btree_map::IntoIter<String, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.into_iter()
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut table = FrequencyTable::new();
        for (word, count) in iter {
            *table.counts.entry(word.into()).or_insert(0) += count;
        }
        table
    }
}

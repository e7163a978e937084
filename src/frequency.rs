use std::collections::HashMap;

use crate::Symbol;

/// Occurrence counts, one entry per distinct symbol.
///
/// Iteration yields symbols in the order they were first seen. The tree
/// builder relies on this order to break ties between equal weights, so two
/// maps with the same counts but a different first-appearance order can
/// produce different (equally optimal) codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyMap<S: Symbol> {
    /// `(symbol, count)` pairs, in order of first appearance.
    entries: Vec<(S, u64)>,

    /// Position of each symbol in `entries`.
    index: HashMap<S, usize>,
}

/// Scan `symbols` once, counting each distinct symbol.
///
/// An empty input yields an empty map.
pub fn compute_frequencies<S: Symbol>(symbols: impl IntoIterator<Item = S>) -> FrequencyMap<S> {
    FrequencyMap::from_symbols(symbols)
}

impl<S: Symbol> FrequencyMap<S> {
    pub fn new() -> Self {
        Self {
            entries: vec![],
            index: HashMap::new(),
        }
    }

    pub fn from_symbols(symbols: impl IntoIterator<Item = S>) -> Self {
        let mut map = Self::new();
        for symbol in symbols {
            map.insert(symbol, 1);
        }
        map
    }

    /// Add `count` occurrences of `symbol`.
    ///
    /// A count of zero is ignored, so every key in the map keeps a positive
    /// count.
    pub fn insert(&mut self, symbol: S, count: u64) {
        if count == 0 {
            return;
        }

        match self.index.get(&symbol) {
            Some(&i) => self.entries[i].1 += count,
            None => {
                self.index.insert(symbol, self.entries.len());
                self.entries.push((symbol, count));
            }
        }
    }

    pub fn get(&self, symbol: &S) -> Option<u64> {
        self.index.get(symbol).map(|&i| self.entries[i].1)
    }

    pub fn contains(&self, symbol: &S) -> bool {
        self.index.contains_key(symbol)
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts, i.e. the length of the scanned input.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|&(_, count)| count).sum()
    }

    /// `(symbol, count)` pairs, in order of first appearance.
    pub fn iter(&self) -> impl Iterator<Item = (S, u64)> + '_ {
        self.entries.iter().copied()
    }
}

impl<S: Symbol> Default for FrequencyMap<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Symbol> FromIterator<S> for FrequencyMap<S> {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_symbols(iter)
    }
}

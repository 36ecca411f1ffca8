use std::collections::{btree_map, BTreeMap};

/// occurrences of each byte value in an input
///
/// Only symbols seen at least once have an entry, and iteration is in
/// ascending symbol order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<u8, usize>,
    total: usize,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// count occurrences of each byte in one pass
    pub fn of(bytes: &[u8]) -> Self {
        bytes.iter().copied().collect()
    }

    pub fn add(&mut self, symbol: u8) {
        *self.counts.entry(symbol).or_insert(0) += 1;
        self.total += 1;
    }

    /// fold a partial table, e.g. one counted over another shard of the input
    pub fn merge(&mut self, other: &FrequencyTable) {
        for (symbol, count) in other.iter() {
            *self.counts.entry(symbol).or_insert(0) += count;
        }
        self.total += other.total;
    }

    pub fn get(&self, symbol: u8) -> Option<usize> {
        self.counts.get(&symbol).copied()
    }

    /// number of symbols processed
    pub fn total(&self) -> usize {
        self.total
    }

    /// number of distinct symbols
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter(self.counts.iter())
    }
}

pub struct Iter<'a>(btree_map::Iter<'a, u8, usize>);

impl<'a> Iterator for Iter<'a> {
    type Item = (u8, usize);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(&symbol, &count)| (symbol, count))
    }
}

impl FromIterator<u8> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = u8>>(symbols: I) -> Self {
        let mut table = FrequencyTable::new();
        for symbol in symbols {
            table.add(symbol);
        }
        table
    }
}

impl<'a> IntoIterator for &'a FrequencyTable {
    type Item = (u8, usize);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_abracadabra() {
        let table = FrequencyTable::of(b"abracadabra");
        let counts: Vec<(u8, usize)> = table.iter().collect();
        assert_eq!(
            counts,
            vec![(b'a', 5), (b'b', 2), (b'c', 1), (b'd', 1), (b'r', 2)]
        );
        assert_eq!(table.total(), 11);
        assert_eq!(table.len(), 5);
        assert_eq!(table.get(b'z'), None);
    }

    #[test]
    fn empty_input() {
        let table = FrequencyTable::of(b"");
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
    }

    #[test]
    fn merged_shards_equal_whole() {
        let data = b"the quick brown fox jumps over the lazy dog";
        let (head, tail) = data.split_at(17);
        let mut merged = FrequencyTable::of(head);
        merged.merge(&FrequencyTable::of(tail));
        assert_eq!(merged, FrequencyTable::of(data));
    }
}

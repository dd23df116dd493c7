// Word frequency counting. The table remembers first-seen order so that
// equal counts rank deterministically.
use std::collections::HashMap;

#[derive(Debug, Default, Clone)]
pub struct FrequencyTable {
    counts: HashMap<String, usize>,
    order: Vec<String>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::new();
        for word in words {
            table.add(word.as_ref());
        }
        table
    }

    pub fn add(&mut self, word: &str) {
        let entry = self.counts.entry(word.to_string()).or_insert(0);
        if *entry == 0 {
            self.order.push(word.to_string());
        }
        *entry += 1;
    }

    pub fn get(&self, word: &str) -> usize {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Total number of occurrences across all words.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Top `k` entries by descending count; equal counts keep first-seen
    /// order.
    pub fn most_common(&self, k: usize) -> Vec<(String, usize)> {
        let mut entries: Vec<(String, usize)> = self
            .order
            .iter()
            .map(|w| (w.clone(), self.counts[w]))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries.truncate(k);
        entries
    }

    /// Words that occur exactly once, in first-seen order.
    pub fn hapaxes(&self) -> Vec<String> {
        self.order
            .iter()
            .filter(|w| self.counts[*w] == 1)
            .cloned()
            .collect()
    }

    /// Fold another table into this one. Words new to `self` keep their
    /// relative order from `other`.
    pub fn merge(&mut self, other: &FrequencyTable) {
        for word in &other.order {
            let entry = self.counts.entry(word.clone()).or_insert(0);
            if *entry == 0 {
                self.order.push(word.clone());
            }
            *entry += other.counts[word];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_pass_count() {
        let table = FrequencyTable::from_words(["talk", "piano", "talk", "talk"]);
        assert_eq!(table.get("talk"), 3);
        assert_eq!(table.get("piano"), 1);
        assert_eq!(table.get("absent"), 0);
        assert_eq!(table.len(), 2);
        assert_eq!(table.total(), 4);
    }

    #[test]
    fn test_most_common_orders_by_count() {
        let table = FrequencyTable::from_words(["a", "b", "b", "c", "c", "c"]);
        assert_eq!(
            table.most_common(3),
            vec![
                ("c".to_string(), 3),
                ("b".to_string(), 2),
                ("a".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_most_common_ties_break_by_first_seen() {
        let table = FrequencyTable::from_words(["beta", "alpha", "beta", "alpha", "gamma"]);
        assert_eq!(
            table.most_common(10),
            vec![
                ("beta".to_string(), 2),
                ("alpha".to_string(), 2),
                ("gamma".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_most_common_truncates() {
        let table = FrequencyTable::from_words(["a", "b", "c", "d"]);
        assert_eq!(table.most_common(2).len(), 2);
        assert_eq!(table.most_common(0).len(), 0);
    }

    #[test]
    fn test_hapaxes_in_first_seen_order() {
        let table = FrequencyTable::from_words(["x", "y", "x", "z", "w"]);
        assert_eq!(table.hapaxes(), vec!["y", "z", "w"]);
    }

    #[test]
    fn test_empty_table() {
        let table = FrequencyTable::new();
        assert!(table.is_empty());
        assert!(table.most_common(5).is_empty());
        assert!(table.hapaxes().is_empty());
        assert_eq!(table.total(), 0);
    }

    #[test]
    fn test_merge() {
        let mut left = FrequencyTable::from_words(["a", "b"]);
        let right = FrequencyTable::from_words(["b", "c", "c"]);
        left.merge(&right);
        assert_eq!(left.get("a"), 1);
        assert_eq!(left.get("b"), 2);
        assert_eq!(left.get("c"), 2);
        assert_eq!(left.len(), 3);
        // first-seen order: a, b from left, then c from right
        assert_eq!(left.hapaxes(), vec!["a"]);
    }

    #[test]
    fn test_counts_are_case_sensitive() {
        // Callers decide on normalization; the table itself does not fold
        // case.
        let table = FrequencyTable::from_words(["Gus", "gus"]);
        assert_eq!(table.get("Gus"), 1);
        assert_eq!(table.get("gus"), 1);
    }
}

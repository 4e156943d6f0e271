//! Word frequency table and ranking

use std::{collections::HashMap, fmt};

/// A word and how many times it was counted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry {
  pub word: String,
  pub count: u64,
}

impl RankedEntry {
  pub fn new(word: impl Into<String>, count: u64) -> Self {
    Self {
      word: word.into(),
      count,
    }
  }
}

/// Renders the output line format: `word - count`
impl fmt::Display for RankedEntry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} - {}", self.word, self.count)
  }
}

/// Counts per word. Owned and mutated by a single actor.
#[derive(Debug, Default)]
pub struct FrequencyTable {
  counts: HashMap<String, u64>,
}

impl FrequencyTable {
  pub fn new() -> Self {
    Self::default()
  }

  /// Add one occurrence of `word`, creating the entry at 1 if absent
  pub fn increment(&mut self, word: String) {
    *self.counts.entry(word).or_insert(0) += 1;
  }

  pub fn get(&self, word: &str) -> Option<u64> {
    self.counts.get(word).copied()
  }

  /// Number of distinct words
  pub fn len(&self) -> usize {
    self.counts.len()
  }

  pub fn is_empty(&self) -> bool {
    self.counts.is_empty()
  }

  /// Snapshot every entry, ordered by count descending.
  ///
  /// Equal counts are ordered by word ascending, so the result depends only
  /// on the final counts and never on arrival order.
  pub fn ranked(&self) -> Vec<RankedEntry> {
    let mut entries: Vec<RankedEntry> = self
      .counts
      .iter()
      .map(|(word, &count)| RankedEntry::new(word.clone(), count))
      .collect();
    entries.sort_unstable_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    entries
  }
}

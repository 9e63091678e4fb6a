//! Absolute-frequency table of case-folded words.
//!
//! A [`Histogram`] is built fresh for each batch of texts, fed with
//! [`Histogram::accumulate`], then queried with [`Histogram::most_common`].
//!
//! # Tie-break
//!
//! When several words share the highest count, the one that appeared first
//! across the accumulated texts (in accumulation order) wins. Every word
//! remembers the ordinal of its first occurrence, so the answer does not
//! depend on hash-map iteration order.
//!
//! ```rust
//! use wordstats::Histogram;
//!
//! let mut histogram = Histogram::new();
//! histogram.accumulate("The cat sat");
//! histogram.accumulate("the CAT ran");
//!
//! assert_eq!(histogram.count("the"), 2);
//! assert_eq!(histogram.count("cat"), 2);
//! assert_eq!(histogram.most_common(), "the");
//! ```

use std::cmp::Ordering;

use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::token::{fold_case, words};

/// A word together with how many times it occurred.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    count: usize,
    first_seen: usize,
}

/// Word-frequency histogram.
///
/// Invariant: every stored word has a count of at least 1. Words that were
/// never accumulated are implicitly 0.
#[derive(Debug, Clone, Default)]
pub struct Histogram {
    table: FxHashMap<String, Slot>,
    total: usize,
}

impl Histogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-folds `text`, splits it on whitespace and counts every word.
    ///
    /// Empty or whitespace-only text leaves the histogram unchanged.
    pub fn accumulate(&mut self, text: &str) {
        for word in words(text) {
            let next_ordinal = self.table.len();
            self.table
                .entry(word)
                .and_modify(|slot| slot.count += 1)
                .or_insert(Slot {
                    count: 1,
                    first_seen: next_ordinal,
                });
            self.total += 1;
        }
    }

    /// Returns the word with the highest count, or `""` when nothing was
    /// accumulated.
    pub fn most_common(&self) -> String {
        self.most_common_entry()
            .map(|entry| entry.word)
            .unwrap_or_default()
    }

    /// Same winner as [`most_common`](Self::most_common), with its count.
    pub fn most_common_entry(&self) -> Option<WordCount> {
        self.table
            .iter()
            .min_by(|(_, a), (_, b)| rank(a, b))
            .map(|(word, slot)| WordCount {
                word: word.clone(),
                count: slot.count,
            })
    }

    /// Occurrences of `word`, folded the same way accumulated text is.
    pub fn count(&self, word: &str) -> usize {
        self.table
            .get(&fold_case(word))
            .map_or(0, |slot| slot.count)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Number of words accumulated, duplicates included.
    pub fn total_words(&self) -> usize {
        self.total
    }

    /// All words in the order they were first seen.
    pub fn entries(&self) -> Vec<WordCount> {
        let mut slots: Vec<(&String, &Slot)> = self.table.iter().collect();
        slots.sort_unstable_by_key(|(_, slot)| slot.first_seen);
        slots
            .into_iter()
            .map(|(word, slot)| WordCount {
                word: word.clone(),
                count: slot.count,
            })
            .collect()
    }

    /// The `n` most frequent words, highest count first. Ties are ordered the
    /// same way [`most_common`](Self::most_common) breaks them.
    pub fn top(&self, n: usize) -> Vec<WordCount> {
        let mut slots: Vec<(&String, &Slot)> = self.table.iter().collect();
        slots.sort_unstable_by(|(_, a), (_, b)| rank(a, b));
        slots
            .into_iter()
            .take(n)
            .map(|(word, slot)| WordCount {
                word: word.clone(),
                count: slot.count,
            })
            .collect()
    }
}

// Higher count first, then earlier first occurrence.
fn rank(a: &Slot, b: &Slot) -> Ordering {
    b.count
        .cmp(&a.count)
        .then_with(|| a.first_seen.cmp(&b.first_seen))
}

impl<S: AsRef<str>> Extend<S> for Histogram {
    fn extend<I: IntoIterator<Item = S>>(&mut self, texts: I) {
        for text in texts {
            self.accumulate(text.as_ref());
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for Histogram {
    fn from_iter<I: IntoIterator<Item = S>>(texts: I) -> Self {
        let mut histogram = Histogram::new();
        histogram.extend(texts);
        histogram
    }
}

//! Word statistics for short texts.
//!
//! This crate holds the only non-trivial logic of `twitcheck`: turning a
//! handful of posts into display-ready lines and finding the word used most
//! often across them.
//!
//! ## What we do
//!
//! - Whitespace normalization for display ([`normalize_whitespace`])
//! - Case-folded, whitespace-delimited word splitting ([`words`])
//! - A word-frequency [`Histogram`] with a deterministic most-common query
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock calls, no locale dependence. The same texts accumulated
//! in the same order always produce the same answer.
//!
//! ## What we don't do
//!
//! No stemming, no stop words, no punctuation stripping. `"hello,"` and
//! `"hello"` are different words.

mod histogram;
mod token;
mod whitespace;

pub use crate::histogram::{Histogram, WordCount};
pub use crate::token::{fold_case, words};
pub use crate::whitespace::{collapse_whitespace, normalize_whitespace};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn histogram_sees_raw_text_while_display_is_normalized() {
        let posts = ["Rust  is\tfun", "rust\n\nrust"];
        let mut histogram = Histogram::new();
        let mut lines = Vec::new();
        for post in posts {
            lines.push(normalize_whitespace(post));
            histogram.accumulate(post);
        }

        assert_eq!(lines, vec!["Rust is fun", "rust rust"]);
        assert_eq!(histogram.most_common(), "rust");
        assert_eq!(histogram.count("rust"), 3);
    }

    #[test]
    fn word_count_serializes_as_plain_record() {
        let entry = WordCount {
            word: "rust".into(),
            count: 3,
        };
        let json = serde_json::to_string(&entry).expect("serialize");
        assert_eq!(json, r#"{"word":"rust","count":3}"#);
    }
}

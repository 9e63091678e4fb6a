//! Whitespace normalization utilities.
//!
//! Two flavours live here:
//!
//! - [`normalize_whitespace`] replaces every run of whitespace with a single
//!   ASCII space and leaves the edges alone. This is what the report uses to
//!   print a post on one line.
//! - [`collapse_whitespace`] does the same and also trims the edges.
//!
//! # Whitespace Definition
//!
//! Both functions use Unicode's `White_Space` property, which includes:
//! - ASCII space (U+0020)
//! - ASCII tab (U+0009)
//! - ASCII newline (U+000A)
//! - ASCII carriage return (U+000D)
//! - Non-breaking space (U+00A0) and the other Unicode spaces
//!
//! # Examples
//!
//! ```rust
//! use wordstats::{collapse_whitespace, normalize_whitespace};
//!
//! assert_eq!(normalize_whitespace("  hello \n\n world "), " hello world ");
//! assert_eq!(collapse_whitespace("  hello \n\n world "), "hello world");
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

// Compiled once, read-only for the life of the process.
static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Replaces every maximal run of whitespace with exactly one ASCII space.
///
/// Leading and trailing runs become a single leading or trailing space; the
/// text is never trimmed. Empty input yields empty output and whitespace-only
/// input yields `" "`.
///
/// # Examples
///
/// ```rust
/// use wordstats::normalize_whitespace;
///
/// assert_eq!(normalize_whitespace("a\t\tb"), "a b");
/// assert_eq!(normalize_whitespace("  leading"), " leading");
/// assert_eq!(normalize_whitespace("\r\n"), " ");
/// assert_eq!(normalize_whitespace(""), "");
/// ```
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").into_owned()
}

/// Collapses repeated whitespace and trims the edges.
///
/// Returns an empty string for empty or whitespace-only input.
///
/// ```rust
/// use wordstats::collapse_whitespace;
///
/// assert_eq!(collapse_whitespace("hello\u{00A0}\u{00A0}world"), "hello world");
/// assert_eq!(collapse_whitespace("   \n\t   "), "");
/// ```
pub fn collapse_whitespace(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    for segment in text.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(segment);
    }
    normalized
}

/// Lower-cases `text` without locale rules.
///
/// Uses Unicode's default case mapping, so the result is the same on every
/// machine. Two words are equal when their folded forms are byte-identical.
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

/// Splits `text` into case-folded words.
///
/// A word is a maximal run of non-whitespace characters. Leading and trailing
/// whitespace never yields empty words, so `words("   ")` is empty.
pub fn words(text: &str) -> Vec<String> {
    fold_case(text)
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}

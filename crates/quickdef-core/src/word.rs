use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

pub const MIN_WORD_LEN: usize = 2;
pub const MAX_WORD_LEN: usize = 49;

static WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z]+$").expect("word pattern is a valid regex"));

/// A selection counts as a word when it is 2..=49 ASCII letters
pub fn is_valid_word(word: &str) -> bool {
    (MIN_WORD_LEN..=MAX_WORD_LEN).contains(&word.len()) && WORD_PATTERN.is_match(word)
}

/// Cache-key form of a word: trimmed, NFKC, lowercase
pub fn normalize(word: &str) -> String {
    word.trim().nfkc().collect::<String>().to_lowercase()
}

//! Tokenizer — turns free text into significant lowercase keywords.
//!
//! Only `[a-z0-9+#]` are word characters (so `c++` and `c#` survive). Everything else,
//! including accented and non-Latin letters, is a separator. Lowercasing is ASCII-only so
//! the output never depends on locale.

/// Tokens shorter than this are dropped.
const MIN_TOKEN_LEN: usize = 3;

/// Common English function words that never count as keywords.
pub const STOP_WORDS: &[&str] = &[
    "and", "or", "the", "a", "an", "to", "of", "in", "for", "with", "on", "at", "by", "from",
    "as", "is", "are", "be", "this", "that", "it", "you", "your", "our", "their", "they", "we",
    "i", "will", "can", "able", "about", "over", "into", "per", "performs", "using",
];

fn is_word_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '+' || c == '#'
}

fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

/// Splits `text` into keywords in reading order. Duplicates are kept; callers dedupe.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_ascii_lowercase();

    lowered
        .split(|c: char| !is_word_char(c))
        .filter(|t| t.len() >= MIN_TOKEN_LEN && !is_stop_word(t))
        .map(str::to_string)
        .collect()
}

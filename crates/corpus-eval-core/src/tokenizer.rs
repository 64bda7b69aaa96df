//! Unicode-aware word tokenizer shared by every evaluator.
//!
//! A token is a maximal run of Unicode `Alphabetic` characters in any script.
//! Digits, underscores, zero-width joiners and standalone combining marks
//! split tokens like any other separator.

use std::sync::OnceLock;

use regex::Regex;

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\p{Alphabetic}+").expect("token pattern is valid"))
}

/// Lazily yield the word tokens of `text` in order of appearance.
pub fn tokens(text: &str) -> impl Iterator<Item = &str> + '_ {
    token_pattern().find_iter(text).map(|m| m.as_str())
}

/// Collect the tokens of `text` into owned strings.
pub fn tokenize(text: &str) -> Vec<String> {
    tokens(text).map(str::to_string).collect()
}

/// Whether `token` starts with an uppercase letter or is written entirely in
/// capitals.
pub fn is_capitalized(token: &str) -> bool {
    match token.chars().next() {
        Some(first) => first.is_uppercase() || is_all_caps(token),
        None => false,
    }
}

fn is_all_caps(token: &str) -> bool {
    token.chars().any(char::is_uppercase) && !token.chars().any(char::is_lowercase)
}

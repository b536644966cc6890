//! Query text normalization and tokenization
//!
//! Pure functions over input text; no state, no side effects.
//! `normalize` is idempotent: normalizing an already-normalized string
//! is a no-op.

use once_cell::sync::Lazy;
use regex::Regex;

/// Characters outside `\w`, whitespace and the allowed punctuation set
/// are stripped during normalization.
static DISALLOWED: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s₹$.,!?-]").unwrap());

/// Token boundaries: whitespace and sentence punctuation
static TOKEN_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s.,!?]+").unwrap());

/// Bare numeric literal (longest contiguous digit run, optional decimals)
static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d+(?:\.\d+)?\b").unwrap());

/// Currency symbol immediately followed by digits
static CURRENCY: Lazy<Regex> = Lazy::new(|| Regex::new(r"[₹$]\s*(\d+(?:\.\d+)?)").unwrap());

const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does",
    "did", "will", "would", "shall", "should", "can", "could", "may", "might", "must", "i",
    "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them", "my", "your",
    "his", "its", "our", "their", "mine", "yours", "hers", "ours", "theirs", "this", "that",
    "these", "those",
];

/// Lowercase, strip disallowed punctuation, collapse whitespace
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = DISALLOWED.replace_all(&lowered, "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split on whitespace and sentence punctuation, dropping empty tokens
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_SPLIT
        .split(&lowered)
        .filter(|token| !token.is_empty())
        .map(String::from)
        .collect()
}

/// Keep tokens that are not stop words, longer than two characters and
/// not purely numeric
pub fn extract_keywords(tokens: &[String]) -> Vec<String> {
    tokens
        .iter()
        .filter(|token| {
            !STOP_WORDS.contains(&token.as_str())
                && token.chars().count() > 2
                && !token.chars().all(|c| c.is_ascii_digit())
        })
        .cloned()
        .collect()
}

/// Every embedded numeric literal, in order of appearance
pub fn extract_numbers(text: &str) -> Vec<f32> {
    NUMBER
        .find_iter(text)
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}

/// The first currency-prefixed literal, if any
pub fn extract_currency(text: &str) -> Option<f32> {
    CURRENCY
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Whether the text contains any of the given needles, case-insensitively
pub fn contains_any(text: &str, needles: &[&str]) -> bool {
    let lowered = text.to_lowercase();
    needles.iter().any(|needle| lowered.contains(&needle.to_lowercase()))
}

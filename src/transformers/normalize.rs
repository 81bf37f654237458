//! Edition cleanup applied before any processing.
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("whitespace pattern is valid");
}

/// Fixed-width substitute for the ellipsis.
pub const EXPANDED_ELLIPSIS: &str = "----------";

/// Remove numeral gloss delimiters (`⟨`, `⟩`), keeping their content.
pub fn strip_delimiters(text: &str) -> String {
    text.chars().filter(|c| !matches!(c, '⟨' | '⟩')).collect()
}

/// Count characters that are neither separators nor lost markers.
pub fn valid_chars(text: &str) -> usize {
    text.chars()
        .filter(|c| !matches!(c, ' ' | '…' | '·' | '-'))
        .count()
}

/// Removes empty glosses, collapses whitespace and trims.
/// Optionally expands ellipses and turns full stops into middle dots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Normalizer {
    pub expand_ellipsis: bool,
    pub dots_to_interpuncts: bool,
}

impl Normalizer {
    pub fn normalize(&self, text: &str) -> String {
        let text = text.replace("⟨⟩", "");
        let mut text = WHITESPACE.replace_all(&text, " ").trim().to_string();

        if self.expand_ellipsis {
            text = text.replace('…', EXPANDED_ELLIPSIS);
        }
        if self.dots_to_interpuncts {
            text = text.replace('.', "·");
        }

        text
    }
}

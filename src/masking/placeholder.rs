//! Placeholder annotation rendering and lookup.
use std::ops::Range;

/// Renders as `<prefix><count><suffix>`, `[3 letters missing]` by default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    prefix: String,
    suffix: String,
}

impl Placeholder {
    pub fn new(prefix: &str, suffix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
        }
    }

    pub fn render(&self, count: usize) -> String {
        format!("{}{}{}", self.prefix, count, self.suffix)
    }

    /// Byte ranges of every rendered placeholder in `text`.
    pub fn find_all(&self, text: &str) -> Vec<Range<usize>> {
        let mut found = Vec::new();
        let mut from = 0;

        while from < text.len() {
            let start = match text[from..].find(&self.prefix) {
                Some(idx) => from + idx,
                None => break,
            };
            let digits_start = start + self.prefix.len();
            let digits_len = text[digits_start..]
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(text.len() - digits_start);
            let digits_end = digits_start + digits_len;

            if digits_len > 0 && text[digits_end..].starts_with(&self.suffix) {
                let end = digits_end + self.suffix.len();
                found.push(start..end);
                from = end;
            } else {
                from = start + text[start..].chars().next().map_or(1, char::len_utf8);
            }
        }

        found
    }

    /// Masked count carried by the first placeholder of `text`.
    pub fn count_in(&self, text: &str) -> Option<usize> {
        let range = self.find_all(text).into_iter().next()?;
        let digits = &text[range.start + self.prefix.len()..range.end - self.suffix.len()];
        digits.parse().ok()
    }
}

impl Default for Placeholder {
    fn default() -> Self {
        Self::new("[", " letters missing]")
    }
}

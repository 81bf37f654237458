//! Tokens and their classification.
use serde::{Deserialize, Serialize};
use unic_ucd::GeneralCategory;

/// Characters that denote physically lost content.
///
/// The expanded form of the ellipsis (`----------`) is covered by `-`.
pub const LOST_MARKERS: [char; 2] = ['-', '…'];

/// Classification a [Token] and a [crate::runs::Run] can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Class {
    Lost,
    Preserved,
}

/// Grammar rule a token was matched by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Editorial numeral, `⟨...⟩`.
    Numeral,
    /// One or more lost-run markers.
    Lost,
    /// A single legible character.
    Preserved,
}

/// Minimal lexical unit, carrying its attached trailing separator.
///
/// The text of a token never changes. Masking only sets a flag, so the
/// original content stays available for ground truth and round-trips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    text: String,
    kind: TokenKind,
    masked: bool,
}

impl Token {
    pub fn new(text: impl Into<String>, kind: TokenKind) -> Self {
        Self {
            text: text.into(),
            kind,
            masked: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// A token is lost iff its text contains a lost-run marker.
    pub fn class(&self) -> Class {
        if self.text.contains(&LOST_MARKERS[..]) {
            Class::Lost
        } else {
            Class::Preserved
        }
    }

    pub fn is_masked(&self) -> bool {
        self.masked
    }

    pub(crate) fn set_masked(&mut self) {
        self.masked = true;
    }

    /// Length in unicode codepoints.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// true if at least one character is a letter or a digit.
    pub fn has_letter(&self) -> bool {
        self.text.chars().any(|c| {
            let category = GeneralCategory::of(c);
            category.is_letter() || category.is_number()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify() {
        assert_eq!(Token::new("α ", TokenKind::Preserved).class(), Class::Preserved);
        assert_eq!(Token::new("-· ", TokenKind::Lost).class(), Class::Lost);
        assert_eq!(Token::new("… ", TokenKind::Lost).class(), Class::Lost);
        assert_eq!(Token::new("----------", TokenKind::Lost).class(), Class::Lost);
        assert_eq!(Token::new("⟨ε⟩ ", TokenKind::Numeral).class(), Class::Preserved);
    }

    #[test]
    fn letters() {
        assert!(Token::new("α· ", TokenKind::Preserved).has_letter());
        assert!(!Token::new(" ", TokenKind::Preserved).has_letter());
        assert!(!Token::new("·", TokenKind::Preserved).has_letter());
    }

    #[test]
    fn masking_keeps_text() {
        let mut t = Token::new("β", TokenKind::Preserved);
        t.set_masked();
        assert!(t.is_masked());
        assert_eq!(t.text(), "β");
    }
}

//! Splits edition text into tokens.
use log::error;

use crate::error::Error;

use super::{Grammar, Token};

#[derive(Debug, Clone, Default)]
pub struct Segmenter {
    grammar: Grammar,
}

impl Segmenter {
    pub fn new(grammar: Grammar) -> Self {
        Self { grammar }
    }

    /// Segment `text` into tokens covering the whole input.
    ///
    /// Fails with [Error::Segmentation] on the first character no rule can match.
    pub fn segment(&self, text: &str) -> Result<Vec<Token>, Error> {
        let mut tokens = Vec::new();
        let mut offset = 0;

        while offset < text.len() {
            let rest = &text[offset..];
            let (kind, len) = match self.grammar.match_prefix(rest) {
                Some(m) => m,
                None => {
                    let found = rest.chars().next().unwrap_or_default();
                    error!("grammar does not cover {:?} (offset {})", found, offset);
                    return Err(Error::Segmentation { offset, found });
                }
            };

            tokens.push(Token::new(&rest[..len], kind));
            offset += len;
        }

        Ok(tokens)
    }
}

//! Grouping of tokens into runs of uniform classification.
use itertools::Itertools;

use crate::segment::{Class, Token};

/// Maximal contiguous sequence of tokens sharing one [Class].
///
/// Runs are never split nor merged once grouped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    class: Class,
    tokens: Vec<Token>,
}

impl Run {
    pub fn new(class: Class, tokens: Vec<Token>) -> Self {
        Self { class, tokens }
    }

    pub fn class(&self) -> Class {
        self.class
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub(crate) fn tokens_mut(&mut self) -> &mut [Token] {
        &mut self.tokens
    }

    /// Length in tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Summed character length of `count` tokens starting at `start`.
    pub fn char_len_of(&self, start: usize, count: usize) -> usize {
        self.tokens
            .iter()
            .skip(start)
            .take(count)
            .map(Token::char_len)
            .sum()
    }

    /// Concatenated token text, masked or not.
    pub fn text(&self) -> String {
        self.tokens.iter().map(Token::text).collect()
    }
}

/// Group tokens in a single pass, starting a new [Run] each time the classification changes.
pub fn group(tokens: Vec<Token>) -> Vec<Run> {
    let groups = tokens.into_iter().group_by(Token::class);
    groups
        .into_iter()
        .map(|(class, tokens)| Run::new(class, tokens.collect()))
        .collect()
}

/// Concatenate every token of every run, ignoring masks.
pub fn concat(runs: &[Run]) -> String {
    runs.iter().map(Run::text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::Segmenter;

    #[test]
    fn empty() {
        assert!(group(Vec::new()).is_empty());
    }

    #[test]
    fn runs_in_order() {
        let tokens = Segmenter::default().segment("αβ-γ-δε…ζ").unwrap();
        let runs = group(tokens);

        let summary: Vec<(Class, String)> = runs.iter().map(|r| (r.class(), r.text())).collect();
        assert_eq!(
            summary,
            vec![
                (Class::Preserved, "αβ".to_string()),
                (Class::Lost, "-γ-".to_string()),
                (Class::Preserved, "δε".to_string()),
                (Class::Lost, "…".to_string()),
                (Class::Preserved, "ζ".to_string()),
            ]
        );
    }

    #[test]
    fn adjacent_lost_tokens_share_a_run() {
        let tokens = Segmenter::default().segment("α -- … β").unwrap();
        let runs = group(tokens);
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[1].class(), Class::Lost);
        assert_eq!(runs[1].len(), 2);
    }

    #[test]
    fn grouping_keeps_tokens() {
        let text = "κα· ⟨β⟩ -- ωμ… ν";
        let tokens = Segmenter::default().segment(text).unwrap();
        let expected = tokens.clone();
        let runs = group(tokens);
        let flattened: Vec<Token> = runs.iter().flat_map(|r| r.tokens().to_vec()).collect();
        assert_eq!(flattened, expected);
        assert_eq!(concat(&runs), text);
    }

    #[test]
    fn char_lengths() {
        let tokens = Segmenter::default().segment("α· βγ ").unwrap();
        let run = group(tokens).remove(0);
        assert_eq!(run.len(), 3);
        assert_eq!(run.char_len_of(0, 2), 4);
        assert_eq!(run.char_len_of(1, 5), 3);
    }
}

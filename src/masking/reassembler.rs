//! Reassembly of (masked) runs into flat text.
use lazy_static::lazy_static;
use regex::Regex;

use crate::runs::Run;
use crate::transformers::strip_delimiters;

use super::masker;
use super::Placeholder;

lazy_static! {
    static ref SPACES: Regex = Regex::new(r" {2,}").expect("space pattern is valid");
}

#[derive(Debug, Clone, Default)]
pub struct Reassembler {
    placeholder: Placeholder,
    join_lost_markers: bool,
}

impl Reassembler {
    pub fn new(placeholder: Placeholder) -> Self {
        Self {
            placeholder,
            join_lost_markers: false,
        }
    }

    /// Also remove separators around lost markers when tidying (`"α - β"` -> `"α-β"`).
    pub fn join_lost_markers(mut self, join: bool) -> Self {
        self.join_lost_markers = join;
        self
    }

    pub fn placeholder(&self) -> &Placeholder {
        &self.placeholder
    }

    /// Concatenate tokens, rendering a single placeholder for the first masked stretch.
    ///
    /// Every masked token is suppressed, including those of later stretches.
    pub fn render(&self, runs: &[Run]) -> String {
        let count = masker::reveal(runs).map(|revealed| revealed.chars().count());
        let mut text = String::new();
        let mut placed = false;

        for token in runs.iter().flat_map(Run::tokens) {
            if !token.is_masked() {
                text.push_str(token.text());
            } else if !placed {
                if let Some(count) = count {
                    text.push_str(&self.placeholder.render(count));
                }
                placed = true;
            }
        }

        text
    }

    /// Strip gloss delimiters and collapse the doubled separators it may leave.
    pub fn tidy(&self, text: &str) -> String {
        let text = strip_delimiters(text);
        let text = SPACES.replace_all(&text, " ");

        if self.join_lost_markers {
            text.replace(" -", "-").replace("- ", "-")
        } else {
            text.into_owned()
        }
    }

    /// [Reassembler::render] then [Reassembler::tidy].
    pub fn finish(&self, runs: &[Run]) -> String {
        self.tidy(&self.render(runs))
    }
}

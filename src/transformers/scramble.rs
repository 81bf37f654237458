//! Shuffles sentence-like units.
//!
//! Units end with the terminal marker (inclusive) or at the end of the text.
//! Must run before segmentation, never on masked text.
use rand::seq::SliceRandom;
use rand::Rng;

use super::Transform;

pub struct SentenceScrambler {
    terminal: char,
}

impl SentenceScrambler {
    pub fn new(terminal: char) -> Self {
        Self { terminal }
    }

    /// Non-empty units, in text order.
    pub fn units<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.split_inclusive(self.terminal)
            .filter(|unit| !unit.trim().is_empty())
            .collect()
    }
}

impl Default for SentenceScrambler {
    /// Units end with a middle dot (`·`).
    fn default() -> Self {
        Self { terminal: '·' }
    }
}

impl Transform for SentenceScrambler {
    fn transform<R: Rng + ?Sized>(&self, text: &str, rng: &mut R) -> String {
        let mut units = self.units(text);
        units.shuffle(rng);
        units.concat()
    }
}

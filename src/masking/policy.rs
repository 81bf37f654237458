//! Span selection.
//!
//! A [MaskPolicy] picks one preserved run, weighting each eligible run by the square of its
//! token length, then a contiguous span inside it whose size depends on [SpanSize].
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::runs::Run;
use crate::segment::Class;

/// Half-open token range `[start, start + count)` inside run number `run`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskSpan {
    pub run: usize,
    pub start: usize,
    pub count: usize,
}

impl MaskSpan {
    pub fn new(run: usize, start: usize, count: usize) -> Self {
        Self { run, start, count }
    }

    pub fn end(&self) -> usize {
        self.start + self.count
    }
}

/// How many tokens a span covers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum SpanSize {
    /// Always `count` tokens.
    FixedCount { count: usize },
    /// Uniformly in `[min, min(cap, run_length / 2)]`.
    RandomCount { min: usize, cap: usize },
    /// Uniformly in `[1, min(run_length, max_chars)]` tokens,
    /// then shrunk until the span holds at most `max_chars` characters.
    CharBudget { max_chars: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaskPolicy {
    size: SpanSize,
    min_run_len: usize,
}

impl MaskPolicy {
    pub fn new(size: SpanSize, min_run_len: usize) -> Result<Self, Error> {
        match size {
            SpanSize::FixedCount { count: 0 } => {
                return Err(Error::Config("fixed count must be at least 1".to_string()))
            }
            SpanSize::RandomCount { min, cap } if min == 0 || min > cap => {
                return Err(Error::Config(format!(
                    "random count range [{}, {}] is empty or starts at 0",
                    min, cap
                )))
            }
            SpanSize::CharBudget { max_chars: 0 } => {
                return Err(Error::Config(
                    "character budget must be at least 1".to_string(),
                ))
            }
            _ => (),
        }

        Ok(Self { size, min_run_len })
    }

    pub fn size(&self) -> SpanSize {
        self.size
    }

    pub fn min_run_len(&self) -> usize {
        self.min_run_len
    }

    /// A run is eligible if it is preserved, long enough, and can hold a span of the policy size.
    pub fn is_eligible(&self, run: &Run) -> bool {
        let len = run.len();
        if run.class() != Class::Preserved || len < self.min_run_len || len == 0 {
            return false;
        }

        match self.size {
            SpanSize::FixedCount { count } => len >= count,
            SpanSize::RandomCount { min, cap } => cap.min(len / 2) >= min,
            SpanSize::CharBudget { .. } => true,
        }
    }

    /// Select a span, or [None] if no run is eligible.
    pub fn select<R: Rng + ?Sized>(&self, runs: &[Run], rng: &mut R) -> Option<MaskSpan> {
        let eligible: Vec<(usize, &Run)> = runs
            .iter()
            .enumerate()
            .filter(|(_, run)| self.is_eligible(run))
            .collect();

        let &(run_idx, run) = eligible
            .choose_weighted(rng, |(_, run)| run.len() * run.len())
            .ok()?;
        let len = run.len();

        let (start, count) = match self.size {
            SpanSize::FixedCount { count } => (rng.gen_range(0..=len - count), count),
            SpanSize::RandomCount { min, cap } => {
                let count = rng.gen_range(min..=cap.min(len / 2));
                (rng.gen_range(0..=len - count), count)
            }
            SpanSize::CharBudget { max_chars } => {
                let mut count = rng.gen_range(1..=len.min(max_chars));
                let start = rng.gen_range(0..=len - count);
                while count > 0 && run.char_len_of(start, count) > max_chars {
                    count -= 1;
                }
                if count == 0 {
                    return None;
                }
                (start, count)
            }
        };

        Some(MaskSpan::new(run_idx, start, count))
    }
}

impl Default for MaskPolicy {
    /// Between 1 and 20 tokens, in runs of at least 3 tokens.
    fn default() -> Self {
        Self {
            size: SpanSize::RandomCount { min: 1, cap: 20 },
            min_run_len: 3,
        }
    }
}

//! Masking of a selected span, and ground truth extraction.
use std::borrow::Cow;
use std::ops::Range;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::Error;
use crate::runs::{concat, Run};
use crate::segment::{Class, Token};

use super::MaskSpan;

/// Character replacing numeral glosses in the ground truth.
pub const GLOSS_SENTINEL: &str = "0";

lazy_static! {
    static ref GLOSS: Regex = Regex::new(r"⟨[^⟩]+?⟩").expect("gloss pattern is valid");
}

/// Flag the tokens covered by `span` as masked.
pub fn apply(runs: &mut [Run], span: &MaskSpan) -> Result<(), Error> {
    let run = runs
        .get_mut(span.run)
        .ok_or_else(|| Error::InvalidSpan(format!("no run at index {}", span.run)))?;

    if run.class() != Class::Preserved {
        return Err(Error::InvalidSpan(format!("run {} is not preserved", span.run)));
    }
    if span.count == 0 || span.end() > run.len() {
        return Err(Error::InvalidSpan(format!(
            "tokens {}..{} do not fit in a run of {} tokens",
            span.start,
            span.end(),
            run.len()
        )));
    }

    for token in &mut run.tokens_mut()[span.start..span.end()] {
        token.set_masked();
    }

    Ok(())
}

/// Locate the first contiguous masked stretch: run index and token range.
pub fn first_stretch(runs: &[Run]) -> Option<(usize, Range<usize>)> {
    runs.iter().enumerate().find_map(|(run_idx, run)| {
        let tokens = run.tokens();
        let start = tokens.iter().position(Token::is_masked)?;
        let len = tokens[start..]
            .iter()
            .take_while(|t| t.is_masked())
            .count();
        Some((run_idx, start..start + len))
    })
}

/// Replace numeral glosses by [GLOSS_SENTINEL].
pub fn normalize_glosses(text: &str) -> Cow<'_, str> {
    GLOSS.replace_all(text, GLOSS_SENTINEL)
}

/// Ground truth of the first masked stretch, glosses normalized.
pub fn reveal(runs: &[Run]) -> Option<String> {
    let (run_idx, range) = first_stretch(runs)?;
    let raw: String = runs[run_idx].tokens()[range]
        .iter()
        .map(Token::text)
        .collect();
    Some(normalize_glosses(&raw).into_owned())
}

/// Tokens of the first masked stretch.
pub fn masked_tokens(runs: &[Run]) -> &[Token] {
    match first_stretch(runs) {
        Some((run_idx, range)) => &runs[run_idx].tokens()[range],
        None => &[],
    }
}

/// Byte range of the first masked stretch in the concatenated text of `runs`.
pub fn stretch_range(runs: &[Run]) -> Option<Range<usize>> {
    let (run_idx, range) = first_stretch(runs)?;
    let before: usize = runs[..run_idx]
        .iter()
        .flat_map(Run::tokens)
        .chain(&runs[run_idx].tokens()[..range.start])
        .map(|t| t.text().len())
        .sum();
    let len: usize = runs[run_idx].tokens()[range]
        .iter()
        .map(|t| t.text().len())
        .sum();
    Some(before..before + len)
}

/// Find the span of `runs` whose tokens spell out `needle` inside a single preserved run.
///
/// When the text occurs several times, the occurrence whose relative position
/// is closest to `offset` out of `total` bytes wins.
pub fn locate(runs: &[Run], needle: &str, offset: usize, total: usize) -> Option<MaskSpan> {
    if needle.is_empty() {
        return None;
    }

    // (byte offset, run, token) at each token start, then at each token end
    let mut starts = Vec::new();
    let mut ends = Vec::new();
    let mut at = 0;
    for (run_idx, run) in runs.iter().enumerate() {
        for (tok_idx, token) in run.tokens().iter().enumerate() {
            starts.push((at, run_idx, tok_idx));
            at += token.text().len();
            ends.push((at, run_idx, tok_idx));
        }
    }
    let text = concat(runs);

    let mut candidates = Vec::new();
    let mut from = 0;
    while let Some(found) = text[from..].find(needle) {
        let begin = from + found;
        let start = starts.binary_search_by_key(&begin, |b| b.0).ok();
        let end = ends.binary_search_by_key(&(begin + needle.len()), |b| b.0).ok();
        if let (Some(start), Some(end)) = (start, end) {
            let (_, run_idx, first) = starts[start];
            let (_, end_run, last) = ends[end];
            if run_idx == end_run && runs[run_idx].class() == Class::Preserved {
                candidates.push((begin, MaskSpan::new(run_idx, first, last - first + 1)));
            }
        }
        // overlapping occurrences are candidates too
        from = begin + text[begin..].chars().next().map_or(1, char::len_utf8);
    }

    let target = offset as u128 * at as u128;
    candidates
        .into_iter()
        .min_by_key(|(begin, _)| (*begin as u128 * total as u128).abs_diff(target))
        .map(|(_, span)| span)
}

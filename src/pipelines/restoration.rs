//! Restoration (text infilling) example generation.
//!
//! For each pass, scramble choice and variant of a record:
//! 1. The variant text is normalized, cut to a window, and optionally scrambled.
//! 1. Texts with too few valid characters are skipped.
//! 1. The text is segmented and grouped into runs.
//! 1. For each corruption level, a span is selected and masked (retrying degenerate spans),
//!    the text is reassembled with its placeholder, then corrupted.
use std::str::FromStr;

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::document::{EditionRecord, Variant, VariantSelection};
use crate::error::Error;
use crate::example::{Corpus, Emitter, Task, TrainingExample};
use crate::masking::{masker, MaskPolicy, MaskSpan, Placeholder, Reassembler};
use crate::retry;
use crate::runs::{self, Run};
use crate::segment::{Segmenter, Token};
use crate::transformers::{
    valid_chars, Corruption, Normalizer, SentenceScrambler, Transform, Window,
};

use super::Generator;

/// Whether texts are scrambled before masking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrambleMode {
    Off,
    On,
    /// Once as is, once scrambled.
    Both,
}

impl ScrambleMode {
    pub fn choices(&self) -> &'static [bool] {
        match self {
            ScrambleMode::Off => &[false],
            ScrambleMode::On => &[true],
            ScrambleMode::Both => &[false, true],
        }
    }
}

impl FromStr for ScrambleMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => Ok(ScrambleMode::Off),
            "on" => Ok(ScrambleMode::On),
            "both" => Ok(ScrambleMode::Both),
            other => Err(Error::Config(format!("unknown scramble mode {:?}", other))),
        }
    }
}

/// How spans of the two variants of a record relate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Correspondence {
    /// Each variant gets its own random choices.
    Independent,
    /// The span is chosen on the first variant, and the same text is masked in the others.
    Shared,
}

impl FromStr for Correspondence {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "independent" => Ok(Correspondence::Independent),
            "shared" => Ok(Correspondence::Shared),
            other => Err(Error::Config(format!("unknown correspondence {:?}", other))),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RestorationConfig {
    pub policy: MaskPolicy,
    pub corpus: Corpus,
    /// One example per level and masking.
    pub corruption_levels: Vec<f64>,
    pub scramble: ScrambleMode,
    pub variants: VariantSelection,
    pub correspondence: Correspondence,
    /// Generation passes per record.
    pub passes: usize,
    pub min_valid_chars: usize,
    /// Masking attempts before giving up on a degenerate span.
    pub max_retries: usize,
    /// Characters the ground truth must not contain.
    pub disallowed: Vec<char>,
    pub normalizer: Normalizer,
    pub window: Option<usize>,
    pub join_lost_markers: bool,
}

impl Default for RestorationConfig {
    fn default() -> Self {
        Self {
            policy: MaskPolicy::default(),
            corpus: Corpus::Papyri,
            corruption_levels: vec![0.0],
            scramble: ScrambleMode::Off,
            variants: VariantSelection::Both,
            correspondence: Correspondence::Independent,
            passes: 1,
            min_valid_chars: 50,
            max_retries: 10,
            disallowed: Vec::new(),
            normalizer: Normalizer::default(),
            window: None,
            join_lost_markers: false,
        }
    }
}

/// Masked runs and their ground truth.
#[derive(Debug)]
struct Masked {
    runs: Vec<Run>,
    revealed: String,
}

pub struct Restoration {
    config: RestorationConfig,
    segmenter: Segmenter,
    reassembler: Reassembler,
    corruptions: Vec<Corruption>,
    scrambler: SentenceScrambler,
    window: Option<Window>,
    emitter: Emitter,
}

impl Restoration {
    pub fn new(config: RestorationConfig) -> Result<Self, Error> {
        if config.passes == 0 {
            return Err(Error::Config("at least one pass is needed".to_string()));
        }
        if config.max_retries == 0 {
            return Err(Error::Config("at least one masking attempt is needed".to_string()));
        }
        if config.corruption_levels.is_empty() {
            return Err(Error::Config(
                "at least one corruption level is needed (use 0 for none)".to_string(),
            ));
        }
        if config.window == Some(0) {
            return Err(Error::Config("window size must be at least 1".to_string()));
        }

        let placeholder = Placeholder::default();
        let corruptions = config
            .corruption_levels
            .iter()
            .map(|p| Corruption::new(*p, placeholder.clone()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            segmenter: Segmenter::default(),
            reassembler: Reassembler::new(placeholder).join_lost_markers(config.join_lost_markers),
            corruptions,
            scrambler: SentenceScrambler::default(),
            window: config.window.map(Window::new),
            emitter: Emitter::new(Task::Restoration, config.corpus),
            config,
        })
    }

    pub fn config(&self) -> &RestorationConfig {
        &self.config
    }

    /// Normalize, cut and optionally scramble a variant text.
    fn prepare<R: Rng + ?Sized>(&self, text: &str, scramble: bool, rng: &mut R) -> String {
        let mut text = self.config.normalizer.normalize(text);
        if let Some(window) = &self.window {
            text = window.transform(&text, rng);
        }
        if scramble {
            text = self.scrambler.transform(&text, rng);
        }
        text
    }

    /// Runs of `text`, or [None] if it has too few valid characters.
    fn runs_of(&self, text: &str) -> Result<Option<Vec<Run>>, Error> {
        if valid_chars(text) < self.config.min_valid_chars {
            return Ok(None);
        }
        let tokens = self.segmenter.segment(text)?;
        Ok(Some(runs::group(tokens)))
    }

    /// Mask `span` on a copy of `runs`. [None] if the span is degenerate.
    fn mask_with(&self, runs: &[Run], span: &MaskSpan) -> Result<Option<Masked>, Error> {
        let mut runs = runs.to_vec();
        masker::apply(&mut runs, span)?;

        if !masker::masked_tokens(&runs).iter().any(Token::has_letter) {
            debug!("span {:?} only holds separators", span);
            return Ok(None);
        }

        let revealed = match masker::reveal(&runs) {
            Some(revealed) => revealed,
            None => return Ok(None),
        };
        if revealed.contains(&self.config.disallowed[..]) {
            debug!("span {:?} reveals a disallowed character", span);
            return Ok(None);
        }

        Ok(Some(Masked { runs, revealed }))
    }

    /// Select and mask a span, retrying degenerate ones.
    fn mask<R: Rng + ?Sized>(
        &self,
        runs: &[Run],
        rng: &mut R,
    ) -> Result<Option<Masked>, Error> {
        let policy = &self.config.policy;
        if !runs.iter().any(|run| policy.is_eligible(run)) {
            return Ok(None);
        }

        retry::try_attempt(self.config.max_retries, |_| match policy.select(runs, &mut *rng) {
            Some(span) => self.mask_with(runs, &span),
            None => Ok(None),
        })
    }

    fn example<R: Rng + ?Sized>(
        &self,
        masked: &Masked,
        corruption: &Corruption,
        rng: &mut R,
    ) -> TrainingExample {
        let text = self.reassembler.finish(&masked.runs);
        let text = corruption.transform(&text, rng);
        self.emitter.emit(text, masked.revealed.clone())
    }

    fn independent<R: Rng + ?Sized>(
        &self,
        variants: &[(Variant, &str)],
        scramble: bool,
        rng: &mut R,
        examples: &mut Vec<TrainingExample>,
    ) -> Result<(), Error> {
        for (variant, text) in variants {
            let text = self.prepare(text, scramble, rng);
            let runs = match self.runs_of(&text)? {
                Some(runs) => runs,
                None => {
                    debug!("{:?}: too few valid characters", variant);
                    continue;
                }
            };

            for corruption in &self.corruptions {
                match self.mask(&runs, rng)? {
                    Some(masked) => examples.push(self.example(&masked, corruption, rng)),
                    None => debug!("{:?}: no maskable span", variant),
                }
            }

            if self.config.variants.first_only() {
                break;
            }
        }

        Ok(())
    }

    fn shared<R: Rng + ?Sized>(
        &self,
        variants: &[(Variant, &str)],
        scramble: bool,
        rng: &mut R,
        examples: &mut Vec<TrainingExample>,
    ) -> Result<(), Error> {
        // same seed for every variant, so that windows and shuffles line up.
        let prepare_seed: u64 = rng.gen();
        let mut prepared = Vec::new();

        for (variant, text) in variants {
            let mut prepare_rng = StdRng::seed_from_u64(prepare_seed);
            let text = self.prepare(text, scramble, &mut prepare_rng);
            match self.runs_of(&text)? {
                Some(runs) => prepared.push((*variant, runs)),
                None => debug!("{:?}: too few valid characters", variant),
            }

            if self.config.variants.first_only() && !prepared.is_empty() {
                break;
            }
        }

        let ((lead, lead_runs), others) = match prepared.split_first() {
            Some(split) => split,
            None => return Ok(()),
        };

        let lead_text = runs::concat(lead_runs);
        for corruption in &self.corruptions {
            let masked = match self.mask(lead_runs, rng)? {
                Some(masked) => masked,
                None => {
                    debug!("{:?}: no maskable span", lead);
                    continue;
                }
            };
            examples.push(self.example(&masked, corruption, rng));

            // spans are matched by text, since run indices differ between variants
            let range = match masker::stretch_range(&masked.runs) {
                Some(range) => range,
                None => continue,
            };
            let needle = &lead_text[range.clone()];
            for (variant, runs) in others {
                let span = match masker::locate(runs, needle, range.start, lead_text.len()) {
                    Some(span) => span,
                    None => {
                        debug!("{:?}: {:?} is not preserved", variant, needle);
                        continue;
                    }
                };
                match self.mask_with(runs, &span)? {
                    Some(masked) => examples.push(self.example(&masked, corruption, rng)),
                    None => debug!("{:?}: span {:?} is degenerate", variant, span),
                }
            }
        }

        Ok(())
    }
}

impl Generator for Restoration {
    fn task(&self) -> Task {
        Task::Restoration
    }

    fn generate<R: Rng + ?Sized>(
        &self,
        record: &EditionRecord,
        rng: &mut R,
    ) -> Result<Vec<TrainingExample>, Error> {
        let variants = record.variants(self.config.variants)?;
        let mut examples = Vec::new();

        for _ in 0..self.config.passes {
            for &scramble in self.config.scramble.choices() {
                match self.config.correspondence {
                    Correspondence::Independent => {
                        self.independent(&variants, scramble, rng, &mut examples)?
                    }
                    Correspondence::Shared => {
                        self.shared(&variants, scramble, rng, &mut examples)?
                    }
                }
            }
        }

        Ok(examples)
    }
}

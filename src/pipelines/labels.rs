//! Dating and place attribution example generation.
//!
//! The whole (normalized, delimiter-free) edition is the input,
//! optionally scrambled and corrupted, and the derived label is the target.
//! Records without a usable label produce no example for that task.
use log::debug;
use rand::Rng;
use serde::Serialize;

use crate::document::{EditionRecord, VariantSelection};
use crate::error::Error;
use crate::example::{date_label, place_label, Corpus, Emitter, Task, TrainingExample};
use crate::masking::Placeholder;
use crate::transformers::{
    strip_delimiters, valid_chars, Corruption, Normalizer, SentenceScrambler, Transform,
};

use super::restoration::ScrambleMode;
use super::Generator;

#[derive(Debug, Clone, Serialize)]
pub struct LabelsConfig {
    pub corpus: Corpus,
    pub task: Task,
    pub corruption_levels: Vec<f64>,
    pub scramble: ScrambleMode,
    pub variants: VariantSelection,
    pub normalizer: Normalizer,
    pub min_valid_chars: usize,
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self {
            corpus: Corpus::Papyri,
            task: Task::Dating,
            corruption_levels: vec![0.0],
            scramble: ScrambleMode::Off,
            variants: VariantSelection::WithoutBrackets,
            normalizer: Normalizer::default(),
            min_valid_chars: 50,
        }
    }
}

pub struct Labels {
    config: LabelsConfig,
    corruptions: Vec<Corruption>,
    scrambler: SentenceScrambler,
    emitter: Emitter,
}

impl Labels {
    pub fn new(config: LabelsConfig) -> Result<Self, Error> {
        if config.task == Task::Restoration {
            return Err(Error::Config(
                "restoration examples are not label examples".to_string(),
            ));
        }
        if config.corruption_levels.is_empty() {
            return Err(Error::Config(
                "at least one corruption level is needed (use 0 for none)".to_string(),
            ));
        }

        let corruptions = config
            .corruption_levels
            .iter()
            .map(|p| Corruption::new(*p, Placeholder::default()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            emitter: Emitter::new(config.task, config.corpus),
            corruptions,
            scrambler: SentenceScrambler::default(),
            config,
        })
    }

    pub fn config(&self) -> &LabelsConfig {
        &self.config
    }

    fn label(&self, record: &EditionRecord) -> Option<String> {
        match self.config.task {
            Task::Dating => record.date().and_then(date_label),
            Task::Place => record.place().and_then(place_label),
            Task::Restoration => None,
        }
    }
}

impl Generator for Labels {
    fn task(&self) -> Task {
        self.config.task
    }

    fn generate<R: Rng + ?Sized>(
        &self,
        record: &EditionRecord,
        rng: &mut R,
    ) -> Result<Vec<TrainingExample>, Error> {
        let label = match self.label(record) {
            Some(label) => label,
            None => {
                debug!("record {:?} has no {} label", record.id(), self.config.task.name());
                return Ok(Vec::new());
            }
        };

        let mut examples = Vec::new();
        for (variant, text) in record.variants(self.config.variants)? {
            let text = self.config.normalizer.normalize(&strip_delimiters(text));
            if valid_chars(&text) < self.config.min_valid_chars {
                debug!("{:?}: too few valid characters", variant);
                continue;
            }

            for &scramble in self.config.scramble.choices() {
                let text = if scramble {
                    self.scrambler.transform(&text, rng)
                } else {
                    text.clone()
                };

                for corruption in &self.corruptions {
                    let input = corruption.transform(&text, rng);
                    examples.push(self.emitter.emit(input, label.clone()));
                }
            }

            if self.config.variants.first_only() {
                break;
            }
        }

        Ok(examples)
    }
}

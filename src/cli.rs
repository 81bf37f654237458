//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;

use structopt::StructOpt;

use lacuna::document::VariantSelection;
use lacuna::error::Error;
use lacuna::example::{Corpus, OutputFormat, Task};
use lacuna::masking::{MaskPolicy, SpanSize};
use lacuna::pipelines::{Correspondence, LabelsConfig, RestorationConfig, ScrambleMode};
use lacuna::stratify::{Stratifier, Target};
use lacuna::transformers::Normalizer;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "lacuna",
    about = "Training data generation from ancient text editions."
)]
/// Holds every command that is callable by the `lacuna` command.
pub enum Lacuna {
    #[structopt(about = "Generate text restoration examples")]
    Text(Text),
    #[structopt(about = "Generate dating or place attribution examples")]
    Labels(Labels),
    #[structopt(about = "Length-stratified sampling of generated examples")]
    Sample(Sample),
}

/// Options shared by the generation commands.
#[derive(Debug, StructOpt)]
pub struct Common {
    #[structopt(parse(from_os_str), help = "edition records (JSON Lines)")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "destination folder")]
    pub dst: PathBuf,
    #[structopt(long = "rounds", default_value = "1", help = "number of output files")]
    pub rounds: usize,
    #[structopt(long = "seed", help = "random seed (drawn and logged if absent)")]
    pub seed: Option<u64>,
    #[structopt(
        long = "corpus",
        default_value = "papyri",
        help = "papyri or inscriptions, sets the instruction wording"
    )]
    pub corpus: Corpus,
    #[structopt(
        long = "levels",
        use_delimiter = true,
        default_value = "0",
        help = "comma separated corruption percentages, in [0, 100)"
    )]
    pub levels: Vec<f64>,
    #[structopt(long = "scramble", default_value = "off", help = "off, on or both")]
    pub scramble: ScrambleMode,
    #[structopt(long = "min-valid-chars", default_value = "50")]
    pub min_valid_chars: usize,
    #[structopt(long = "expand-ellipsis", help = "replace … by a fixed run of -")]
    pub expand_ellipsis: bool,
    #[structopt(long = "dots-to-interpuncts", help = "replace . by ·")]
    pub dots_to_interpuncts: bool,
    #[structopt(long = "format", default_value = "flat", help = "flat or chat")]
    pub format: OutputFormat,
}

impl Common {
    pub fn normalizer(&self) -> Normalizer {
        Normalizer {
            expand_ellipsis: self.expand_ellipsis,
            dots_to_interpuncts: self.dots_to_interpuncts,
        }
    }
}

#[derive(Debug, StructOpt)]
pub struct Text {
    #[structopt(flatten)]
    pub common: Common,
    #[structopt(long = "passes", default_value = "1", help = "generation passes per record")]
    pub passes: usize,
    #[structopt(
        long = "variants",
        default_value = "both",
        help = "with, without, both or first"
    )]
    pub variants: VariantSelection,
    #[structopt(
        long = "correspondence",
        default_value = "independent",
        help = "independent or shared masking of variants"
    )]
    pub correspondence: Correspondence,
    #[structopt(
        long = "span",
        default_value = "random",
        help = "span size mode: fixed, random or budget"
    )]
    pub span: String,
    #[structopt(long = "count", default_value = "5", help = "span tokens (fixed)")]
    pub count: usize,
    #[structopt(long = "min", default_value = "1", help = "minimum span tokens (random)")]
    pub min: usize,
    #[structopt(long = "cap", default_value = "20", help = "maximum span tokens (random)")]
    pub cap: usize,
    #[structopt(
        long = "max-chars",
        default_value = "20",
        help = "maximum span characters (budget)"
    )]
    pub max_chars: usize,
    #[structopt(long = "min-run-len", default_value = "3")]
    pub min_run_len: usize,
    #[structopt(long = "max-retries", default_value = "10")]
    pub max_retries: usize,
    #[structopt(
        long = "disallowed",
        default_value = "",
        help = "characters the hidden text may not contain"
    )]
    pub disallowed: String,
    #[structopt(long = "window", help = "cut texts to this many characters")]
    pub window: Option<usize>,
    #[structopt(long = "join-lost-markers", help = "remove spaces around lost markers")]
    pub join_lost_markers: bool,
}

impl Text {
    fn span_size(&self) -> Result<SpanSize, Error> {
        match self.span.as_str() {
            "fixed" => Ok(SpanSize::FixedCount { count: self.count }),
            "random" => Ok(SpanSize::RandomCount {
                min: self.min,
                cap: self.cap,
            }),
            "budget" => Ok(SpanSize::CharBudget {
                max_chars: self.max_chars,
            }),
            other => Err(Error::Config(format!("unknown span mode {:?}", other))),
        }
    }

    pub fn config(&self) -> Result<RestorationConfig, Error> {
        Ok(RestorationConfig {
            policy: MaskPolicy::new(self.span_size()?, self.min_run_len)?,
            corpus: self.common.corpus,
            corruption_levels: self.common.levels.clone(),
            scramble: self.common.scramble,
            variants: self.variants,
            correspondence: self.correspondence,
            passes: self.passes,
            min_valid_chars: self.common.min_valid_chars,
            max_retries: self.max_retries,
            disallowed: self.disallowed.chars().collect(),
            normalizer: self.common.normalizer(),
            window: self.window,
            join_lost_markers: self.join_lost_markers,
        })
    }
}

#[derive(Debug, StructOpt)]
pub struct Labels {
    #[structopt(flatten)]
    pub common: Common,
    #[structopt(long = "task", default_value = "dates", help = "dates or places")]
    pub task: String,
    #[structopt(
        long = "variants",
        default_value = "without",
        help = "with, without, both or first"
    )]
    pub variants: VariantSelection,
}

impl Labels {
    pub fn config(&self) -> Result<LabelsConfig, Error> {
        let task = match self.task.as_str() {
            "dates" => Task::Dating,
            "places" => Task::Place,
            other => return Err(Error::Config(format!("unknown label task {:?}", other))),
        };

        Ok(LabelsConfig {
            corpus: self.common.corpus,
            task,
            corruption_levels: self.common.levels.clone(),
            scramble: self.common.scramble,
            variants: self.variants,
            normalizer: self.common.normalizer(),
            min_valid_chars: self.common.min_valid_chars,
        })
    }
}

#[derive(Debug, StructOpt)]
pub struct Sample {
    #[structopt(parse(from_os_str), help = "generated examples (JSON Lines)")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "destination folder")]
    pub dst: PathBuf,
    #[structopt(long = "name", default_value = "sampled", help = "output file name")]
    pub name: String,
    #[structopt(long = "min-len", default_value = "1")]
    pub min_len: usize,
    #[structopt(long = "max-len", default_value = "20")]
    pub max_len: usize,
    #[structopt(long = "count", help = "examples kept per length")]
    pub count: Option<usize>,
    #[structopt(
        long = "percentage",
        help = "percentage of each length kept (at least one)"
    )]
    pub percentage: Option<f64>,
    #[structopt(long = "seed")]
    pub seed: Option<u64>,
    #[structopt(long = "format", default_value = "flat", help = "flat or chat")]
    pub format: OutputFormat,
}

impl Sample {
    pub fn stratifier(&self) -> Result<Stratifier, Error> {
        let target = match (self.count, self.percentage) {
            (Some(count), None) => Target::Count(count),
            (None, Some(p)) => Target::Percentage(p),
            _ => {
                return Err(Error::Config(
                    "exactly one of --count and --percentage is needed".to_string(),
                ))
            }
        };
        Stratifier::new(self.min_len..=self.max_len, target)
    }
}

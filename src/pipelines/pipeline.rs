//! Pipeline traits and the batch runner.
use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};
use rand::Rng;
use rayon::prelude::*;

use crate::document::EditionRecord;
use crate::error::Error;
use crate::example::{OutputFormat, Task, TrainingExample};
use crate::io::{ExampleWriter, JsonlReader};

use super::seed::document_rng;

pub trait Pipeline<T> {
    fn run(&self) -> Result<T, Error>;
}

/// Turns one record into zero or more training examples.
pub trait Generator: Sync {
    fn task(&self) -> Task;

    fn generate<R: Rng + ?Sized>(
        &self,
        record: &EditionRecord,
        rng: &mut R,
    ) -> Result<Vec<TrainingExample>, Error>;
}

/// Runs a [Generator] over a record file for a number of rounds,
/// writing one `<task>_<round>.jsonl` file per round.
///
/// Rounds whose file already exists are skipped, so that an interrupted run can be resumed.
/// Documents are processed in parallel, but output order and content only depend on the seed.
pub struct Batch<G: Generator> {
    generator: G,
    src: PathBuf,
    dst: PathBuf,
    rounds: usize,
    seed: Option<u64>,
    format: OutputFormat,
}

impl<G: Generator> Batch<G> {
    pub fn new(generator: G, src: PathBuf, dst: PathBuf) -> Self {
        Self {
            generator,
            src,
            dst,
            rounds: 1,
            seed: None,
            format: OutputFormat::Flat,
        }
    }

    pub fn rounds(mut self, rounds: usize) -> Self {
        self.rounds = rounds;
        self
    }

    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// File name (without extension) of round `round`.
    pub fn file_name(&self, round: usize) -> String {
        format!("{}_{}", self.generator.task().name(), round)
    }

    /// Final path of round `round`.
    pub fn round_path(&self, round: usize) -> PathBuf {
        ExampleWriter::final_path(&self.dst, &self.file_name(round))
    }

    /// Read every well-formed record, skipping and logging the others.
    fn records(src: &Path) -> Result<Vec<EditionRecord>, Error> {
        let mut reader = JsonlReader::<EditionRecord>::from_path(src)?;
        let mut records = Vec::new();

        while let Some(record) = reader.next() {
            match record {
                Ok(record) => records.push(record),
                Err(Error::Io(e)) => return Err(Error::Io(e)),
                Err(e) => warn!("{:?} line {}: skipping record: {}", src, reader.line_nb(), e),
            }
        }

        Ok(records)
    }

    fn process_round(
        &self,
        records: &[EditionRecord],
        seed: u64,
        round: usize,
    ) -> Result<Vec<Vec<TrainingExample>>, Error> {
        records
            .par_iter()
            .enumerate()
            .map(|(idx, record)| {
                let mut rng = document_rng(seed, round, idx);
                match self.generator.generate(record, &mut rng) {
                    Err(Error::MissingField(e)) => {
                        warn!("record {}: {}", idx, e);
                        Ok(Vec::new())
                    }
                    Err(e) => {
                        error!("record {}: {}", idx, e);
                        Err(e)
                    }
                    ok => ok,
                }
            })
            .collect()
    }
}

impl<G: Generator> Pipeline<usize> for Batch<G> {
    /// Returns the number of written examples.
    fn run(&self) -> Result<usize, Error> {
        let seed = match self.seed {
            Some(seed) => seed,
            None => {
                let seed = rand::thread_rng().gen();
                info!("no seed provided, using {}", seed);
                seed
            }
        };

        let records = Self::records(&self.src)?;
        info!("{:?}: {} records", self.src, records.len());

        let mut written = 0;
        for round in 1..=self.rounds {
            if self.round_path(round).exists() {
                info!("round {}: {:?} exists, skipping", round, self.round_path(round));
                continue;
            }

            let results = self.process_round(&records, seed, round)?;
            let mut writer = ExampleWriter::new(&self.dst, &self.file_name(round), self.format)?;
            for examples in &results {
                writer.write(examples)?;
            }
            let nb = writer.finish()?;
            debug!("round {}: {} examples from {} records", round, nb, records.len());
            info!("round {}: wrote {} examples to {:?}", round, nb, self.round_path(round));
            written += nb;
        }

        Ok(written)
    }
}

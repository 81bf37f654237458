//! Length-stratified sampling of a generated example file.
use std::path::PathBuf;

use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Error;
use crate::example::{OutputFormat, TrainingExample, WireExample};
use crate::io::{ExampleWriter, JsonlReader};
use crate::stratify::{content_length, Stratifier};

use super::Pipeline;

pub struct Sample {
    stratifier: Stratifier,
    src: PathBuf,
    dst: PathBuf,
    name: String,
    seed: Option<u64>,
    format: OutputFormat,
}

impl Sample {
    pub fn new(stratifier: Stratifier, src: PathBuf, dst: PathBuf, name: &str) -> Self {
        Self {
            stratifier,
            src,
            dst,
            name: name.to_string(),
            seed: None,
            format: OutputFormat::Flat,
        }
    }

    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    fn examples(&self) -> Result<Vec<TrainingExample>, Error> {
        let mut reader = JsonlReader::<WireExample>::from_path(&self.src)?;
        let mut examples = Vec::new();

        while let Some(example) = reader.next() {
            match example.and_then(WireExample::into_example) {
                Ok(example) => examples.push(example),
                Err(Error::Io(e)) => return Err(Error::Io(e)),
                Err(e) => warn!("{:?} line {}: skipping example: {}", self.src, reader.line_nb(), e),
            }
        }

        Ok(examples)
    }
}

impl Pipeline<usize> for Sample {
    fn run(&self) -> Result<usize, Error> {
        let seed = self.seed.unwrap_or_else(|| {
            let seed = rand::thread_rng().gen();
            info!("no seed provided, using {}", seed);
            seed
        });
        let mut rng = StdRng::seed_from_u64(seed);

        let examples = self.examples()?;
        let total = examples.len();
        let buckets = self
            .stratifier
            .sample(examples, |e| content_length(&e.target_text), &mut rng);

        let mut writer = ExampleWriter::new(&self.dst, &self.name, self.format)?;
        for (length, examples) in &buckets {
            info!("length {}: keeping {} examples", length, examples.len());
            writer.write(examples)?;
        }
        let kept = writer.finish()?;
        info!("kept {} out of {} examples", kept, total);

        Ok(kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::example::{ChatRecord, Corpus, Emitter, Task};
    use crate::stratify::Target;

    #[test]
    fn mixed_formats() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("text_1.jsonl");
        let e = Emitter::new(Task::Restoration, Corpus::Papyri);
        let lines = vec![
            serde_json::to_string(&e.emit("a".into(), "αβ".into())).unwrap(),
            serde_json::to_string(&ChatRecord::from(&e.emit("b".into(), "α β".into()))).unwrap(),
            serde_json::to_string(&e.emit("c".into(), "αβγ".into())).unwrap(),
            serde_json::to_string(&e.emit("d".into(), "α".into())).unwrap(),
            "not json".to_string(),
        ];
        std::fs::write(&src, lines.join("\n")).unwrap();

        let stratifier = Stratifier::new(2..=3, Target::Count(1)).unwrap();
        let kept = Sample::new(stratifier, src, dir.path().join("out"), "sampled")
            .seed(Some(0))
            .run()
            .unwrap();
        assert_eq!(kept, 2);

        let content =
            std::fs::read_to_string(dir.path().join("out").join("sampled.jsonl")).unwrap();
        let kept: Vec<TrainingExample> = content
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert!(["a", "b"].contains(&kept[0].input_text.as_str()));
        assert_eq!(kept[1].input_text, "c");
    }
}

/*! Example writer.

Examples are written to `<name>.jsonl.part`, and the file is renamed to `<name>.jsonl`
by [ExampleWriter::finish]. An interrupted run never leaves a truncated `.jsonl` file behind.
!*/
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::Error;
use crate::example::{OutputFormat, TrainingExample};

pub struct ExampleWriter {
    path: PathBuf,
    part_path: PathBuf,
    handle: BufWriter<File>,
    format: OutputFormat,
    count: usize,
}

impl ExampleWriter {
    /// Final path of the file named `name` in `dst`.
    pub fn final_path(dst: &Path, name: &str) -> PathBuf {
        dst.join(format!("{}.jsonl", name))
    }

    /// Create a writer for `dst/<name>.jsonl`. `dst` is created if needed.
    pub fn new(dst: &Path, name: &str, format: OutputFormat) -> Result<Self, Error> {
        std::fs::create_dir_all(dst)?;
        let path = Self::final_path(dst, name);
        let part_path = dst.join(format!("{}.jsonl.part", name));
        let handle = BufWriter::new(File::create(&part_path)?);

        debug!("writing {:?}", part_path);
        Ok(Self {
            path,
            part_path,
            handle,
            format,
            count: 0,
        })
    }

    pub fn write_single(&mut self, example: &TrainingExample) -> Result<(), Error> {
        let json = self.format.to_json(example)?;
        self.handle.write_all(json.as_bytes())?;
        self.handle.write_all(b"\n")?;
        self.count += 1;
        Ok(())
    }

    pub fn write(&mut self, examples: &[TrainingExample]) -> Result<(), Error> {
        for example in examples {
            self.write_single(example)?;
        }
        Ok(())
    }

    /// Flush, then move the file to its final path. Returns the number of written examples.
    pub fn finish(mut self) -> Result<usize, Error> {
        self.handle.flush()?;
        self.handle.get_ref().sync_all()?;
        std::fs::rename(&self.part_path, &self.path)?;
        Ok(self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::example::{Corpus, Emitter, Task};

    fn examples() -> Vec<TrainingExample> {
        let e = Emitter::new(Task::Restoration, Corpus::Papyri);
        vec![
            e.emit("α[1 letters missing]γ".to_string(), "β".to_string()),
            e.emit("[2 letters missing]γ".to_string(), "αβ".to_string()),
        ]
    }

    #[test]
    fn write_and_finish() {
        let dst = tempfile::tempdir().unwrap();
        let mut w = ExampleWriter::new(dst.path(), "train_1", OutputFormat::Flat).unwrap();
        w.write(&examples()).unwrap();
        assert!(dst.path().join("train_1.jsonl.part").exists());
        assert!(!dst.path().join("train_1.jsonl").exists());

        assert_eq!(w.finish().unwrap(), 2);
        assert!(!dst.path().join("train_1.jsonl.part").exists());

        let content = std::fs::read_to_string(dst.path().join("train_1.jsonl")).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: TrainingExample = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first, examples()[0]);
    }

    #[test]
    fn unfinished_leaves_part_only() {
        let dst = tempfile::tempdir().unwrap();
        {
            let mut w = ExampleWriter::new(dst.path(), "train_2", OutputFormat::Chat).unwrap();
            w.write_single(&examples()[0]).unwrap();
        }
        assert!(!ExampleWriter::final_path(dst.path(), "train_2").exists());
    }
}

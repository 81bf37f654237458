/*! JSON Lines reader.

Yields one deserialized item per non-blank line. Errors are per line,
so that callers can skip malformed records and keep going:
lines that are not valid UTF-8 give [Error::Encoding], invalid JSON gives [Error::Serde].
Only [Error::Io] denotes a failure of the underlying reader.
!*/
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Split};
use std::marker::PhantomData;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::Error;

#[derive(Debug)]
pub struct Reader<T, R>
where
    R: Read,
{
    lines: Split<BufReader<R>>,
    line_nb: usize,
    item: PhantomData<T>,
}

pub type JsonlReader<T> = Reader<T, File>;

impl<T> JsonlReader<T> {
    pub fn from_path(src: &Path) -> Result<Self, Error> {
        let handle = File::open(src)?;
        Ok(Self::new(handle))
    }
}

impl<T, R> Reader<T, R>
where
    R: Read,
{
    pub fn new(inner: R) -> Self {
        Self {
            lines: BufReader::new(inner).split(b'\n'),
            line_nb: 0,
            item: PhantomData,
        }
    }

    /// Line number (1-based) of the last yielded item.
    pub fn line_nb(&self) -> usize {
        self.line_nb
    }
}

impl<T, R> Iterator for Reader<T, R>
where
    T: DeserializeOwned,
    R: Read,
{
    type Item = Result<T, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.line_nb += 1;
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(Error::Io(e))),
            };
            let line = match String::from_utf8(line) {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };

            if line.trim().is_empty() {
                continue;
            }

            return Some(serde_json::from_str::<T>(&line).map_err(Error::Serde));
        }
    }
}

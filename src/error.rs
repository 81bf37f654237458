//! Error enum
use std::fmt;
use std::string::FromUtf8Error;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Serde(serde_json::Error),
    /// A line that is not valid UTF-8.
    Encoding(FromUtf8Error),
    Regex(regex::Error),
    /// The grammar could not match the character found at `offset` (byte offset).
    ///
    /// This is a grammar coverage bug, not a data quirk.
    Segmentation {
        offset: usize,
        found: char,
    },
    InvalidSpan(String),
    Config(String),
    MissingField(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "io error: {}", e),
            Error::Serde(e) => write!(f, "serialization error: {}", e),
            Error::Encoding(e) => write!(f, "invalid utf-8: {}", e),
            Error::Regex(e) => write!(f, "invalid grammar pattern: {}", e),
            Error::Segmentation { offset, found } => write!(
                f,
                "no grammar rule matches {:?} at byte offset {}",
                found, offset
            ),
            Error::InvalidSpan(s) => write!(f, "invalid mask span: {}", s),
            Error::Config(s) => write!(f, "invalid configuration: {}", s),
            Error::MissingField(s) => write!(f, "missing field: {}", s),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::Serde(e)
    }
}

impl From<regex::Error> for Error {
    fn from(e: regex::Error) -> Error {
        Error::Regex(e)
    }
}

impl From<FromUtf8Error> for Error {
    fn from(e: FromUtf8Error) -> Error {
        Error::Encoding(e)
    }
}

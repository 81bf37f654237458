//! Task families and their instructions.
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Task {
    Restoration,
    Dating,
    Place,
}

/// Kind of document the instructions refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Corpus {
    Papyri,
    Inscriptions,
}

impl Task {
    pub fn instruction(&self, corpus: Corpus) -> &'static str {
        match (self, corpus) {
            (Task::Restoration, Corpus::Papyri) => {
                "Fill in the missing letters in this papyrus fragment!"
            }
            (Task::Restoration, Corpus::Inscriptions) => {
                "Fill in the missing characters in this inscription!"
            }
            (Task::Dating, Corpus::Papyri) => "Date this papyrus fragment to an exact year!",
            (Task::Dating, Corpus::Inscriptions) => "Date this inscription to an exact year!",
            (Task::Place, Corpus::Papyri) => "Assign this papyrus fragment to an exact place!",
            (Task::Place, Corpus::Inscriptions) => "Assign this inscription to an exact place!",
        }
    }

    /// Short name, used for output file names.
    pub fn name(&self) -> &'static str {
        match self {
            Task::Restoration => "text",
            Task::Dating => "dates",
            Task::Place => "places",
        }
    }
}

impl FromStr for Corpus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "papyri" => Ok(Corpus::Papyri),
            "inscriptions" => Ok(Corpus::Inscriptions),
            other => Err(Error::Config(format!("unknown corpus {:?}", other))),
        }
    }
}

impl Default for Corpus {
    fn default() -> Self {
        Corpus::Papyri
    }
}

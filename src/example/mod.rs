/*! Training examples

A [TrainingExample] is the unit written to output.
It can be serialized flat (`instruction`, `input_text`, `target_text`)
or as a chat transcript ([ChatRecord]) with system/user/assistant messages.
!*/
mod labels;
mod task;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

pub use labels::{date_label, place_label};
pub use task::{Corpus, Task};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub instruction: String,
    pub input_text: String,
    pub target_text: String,
}

/// Packages task instruction, model input and target.
#[derive(Debug, Clone, Copy)]
pub struct Emitter {
    task: Task,
    corpus: Corpus,
}

impl Emitter {
    pub fn new(task: Task, corpus: Corpus) -> Self {
        Self { task, corpus }
    }

    pub fn task(&self) -> Task {
        self.task
    }

    pub fn emit(&self, input_text: String, target_text: String) -> TrainingExample {
        TrainingExample {
            instruction: self.task.instruction(self.corpus).to_string(),
            input_text,
            target_text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRecord {
    pub messages: Vec<Message>,
}

impl From<&TrainingExample> for ChatRecord {
    fn from(example: &TrainingExample) -> Self {
        let message = |role: &str, content: &str| Message {
            role: role.to_string(),
            content: content.to_string(),
        };
        Self {
            messages: vec![
                message("system", &example.instruction),
                message("user", &example.input_text),
                message("assistant", &example.target_text),
            ],
        }
    }
}

impl ChatRecord {
    fn content(&self, role: &str) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.role == role)
            .map(|m| m.content.as_str())
    }

    pub fn into_example(self) -> Result<TrainingExample, Error> {
        let get = |role: &str| {
            self.content(role)
                .map(str::to_string)
                .ok_or_else(|| Error::MissingField(format!("{} message", role)))
        };
        Ok(TrainingExample {
            instruction: get("system")?,
            input_text: get("user")?,
            target_text: get("assistant")?,
        })
    }
}

/// Any accepted on-disk example representation.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WireExample {
    Flat(TrainingExample),
    Chat(ChatRecord),
}

impl WireExample {
    pub fn into_example(self) -> Result<TrainingExample, Error> {
        match self {
            WireExample::Flat(e) => Ok(e),
            WireExample::Chat(c) => c.into_example(),
        }
    }
}

/// Output representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Flat,
    Chat,
}

impl OutputFormat {
    pub fn to_json(&self, example: &TrainingExample) -> Result<String, Error> {
        let json = match self {
            OutputFormat::Flat => serde_json::to_string(example)?,
            OutputFormat::Chat => serde_json::to_string(&ChatRecord::from(example))?,
        };
        Ok(json)
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flat" => Ok(OutputFormat::Flat),
            "chat" => Ok(OutputFormat::Chat),
            other => Err(Error::Config(format!("unknown output format {:?}", other))),
        }
    }
}

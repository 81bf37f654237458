//! Edition records, as read from the combined corpus files.
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// One edition, with up to two textual variants and optional metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditionRecord {
    #[serde(rename = "Edition_with_brackets", default)]
    with_brackets: Option<String>,
    #[serde(rename = "Edition_without_brackets", default)]
    without_brackets: Option<String>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    place: Option<String>,
    #[serde(default, alias = "PHI_ID", alias = "TM")]
    id: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    WithBrackets,
    WithoutBrackets,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::WithBrackets, Variant::WithoutBrackets];
}

/// Which variants of a record are used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VariantSelection {
    WithBrackets,
    WithoutBrackets,
    Both,
    /// The first present variant passing the validity checks.
    FirstAvailable,
}

impl VariantSelection {
    /// Candidate variants, in preference order.
    pub fn candidates(&self) -> &'static [Variant] {
        match self {
            VariantSelection::WithBrackets => &Variant::ALL[..1],
            VariantSelection::WithoutBrackets => &Variant::ALL[1..],
            VariantSelection::Both | VariantSelection::FirstAvailable => &Variant::ALL,
        }
    }

    /// true if processing stops after the first usable variant.
    pub fn first_only(&self) -> bool {
        matches!(self, VariantSelection::FirstAvailable)
    }
}

impl FromStr for VariantSelection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "with" | "with-brackets" => Ok(VariantSelection::WithBrackets),
            "without" | "without-brackets" => Ok(VariantSelection::WithoutBrackets),
            "both" => Ok(VariantSelection::Both),
            "first" | "first-available" => Ok(VariantSelection::FirstAvailable),
            other => Err(Error::Config(format!("unknown variant selection {:?}", other))),
        }
    }
}

impl EditionRecord {
    pub fn new(with_brackets: Option<String>, without_brackets: Option<String>) -> Self {
        Self {
            with_brackets,
            without_brackets,
            ..Default::default()
        }
    }

    pub fn with_date(mut self, date: &str) -> Self {
        self.date = Some(date.to_string());
        self
    }

    pub fn with_place(mut self, place: &str) -> Self {
        self.place = Some(place.to_string());
        self
    }

    pub fn variant(&self, variant: Variant) -> Option<&str> {
        match variant {
            Variant::WithBrackets => self.with_brackets.as_deref(),
            Variant::WithoutBrackets => self.without_brackets.as_deref(),
        }
    }

    /// Present variants among the selection candidates.
    ///
    /// Fails with [Error::MissingField] if none of them is present.
    pub fn variants(&self, selection: VariantSelection) -> Result<Vec<(Variant, &str)>, Error> {
        let present: Vec<(Variant, &str)> = selection
            .candidates()
            .iter()
            .filter_map(|v| self.variant(*v).map(|text| (*v, text)))
            .collect();

        if present.is_empty() {
            return Err(Error::MissingField(format!(
                "record {} has none of the {:?} variants",
                self.id().unwrap_or_else(|| "<no id>".to_string()),
                selection
            )));
        }

        Ok(present)
    }

    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    pub fn place(&self) -> Option<&str> {
        self.place.as_deref()
    }

    /// Identifier rendered as a string, whether stored as a number or a string.
    pub fn id(&self) -> Option<String> {
        match &self.id {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(serde_json::Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        }
    }
}

//! Declarative token grammar.
//!
//! A [Grammar] is an ordered list of [Rule]s. At a given offset, the first rule (in priority order)
//! whose anchored pattern matches a non-empty prefix wins.
//!
//! The default grammar recognizes, by decreasing priority:
//!
//! | rule        | pattern                                   | example         |
//! |-------------|-------------------------------------------|-----------------|
//! | `numeral`   | `⟨[^-…⟩]+⟩` + separator                   | `⟨ιβ⟩ `         |
//! | `lost`      | `[-…]+`, absorbing letters between markers | `-- `, `-γ-`    |
//! | `preserved` | any other single character + separator    | `α`, `ω· `      |
//!
//! where the attached separator is either `"· "` or `" "`.
use lazy_static::lazy_static;
use regex::Regex;

use crate::error::Error;

use super::TokenKind;

/// Separator that may trail any token.
const SEPARATOR: &str = r"(?:· | )?";

lazy_static! {
    static ref PAPYRI: Grammar = Grammar::papyri_rules()
        .expect("default grammar patterns are valid regular expressions");
}

/// Named pattern/classification pair.
#[derive(Debug, Clone)]
pub struct Rule {
    name: String,
    kind: TokenKind,
    pattern: Regex,
}

impl Rule {
    /// Build a rule. `pattern` is anchored at the matching offset.
    pub fn new(name: &str, kind: TokenKind, pattern: &str) -> Result<Self, Error> {
        let pattern = Regex::new(&format!("^(?:{})", pattern))?;
        Ok(Self {
            name: name.to_string(),
            kind,
            pattern,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// byte length of the match at the start of `text`, if any.
    fn match_len(&self, text: &str) -> Option<usize> {
        self.pattern
            .find(text)
            .map(|m| m.end())
            .filter(|len| *len > 0)
    }
}

#[derive(Debug, Clone)]
pub struct Grammar {
    rules: Vec<Rule>,
}

impl Grammar {
    /// Rules are tried in the provided order.
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    fn papyri_rules() -> Result<Self, Error> {
        Ok(Self::new(vec![
            Rule::new(
                "numeral",
                TokenKind::Numeral,
                &format!("⟨[^-…⟩]+⟩{}", SEPARATOR),
            )?,
            Rule::new(
                "lost",
                TokenKind::Lost,
                &format!(r"[-…]+(?:[^-…⟨⟩\s·][-…]+)*{}", SEPARATOR),
            )?,
            Rule::new(
                "preserved",
                TokenKind::Preserved,
                &format!("[^-…⟨⟩]{}", SEPARATOR),
            )?,
        ]))
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Get the winning rule kind and the matched byte length at the start of `text`.
    pub fn match_prefix(&self, text: &str) -> Option<(TokenKind, usize)> {
        self.rules
            .iter()
            .find_map(|rule| rule.match_len(text).map(|len| (rule.kind(), len)))
    }
}

impl Default for Grammar {
    fn default() -> Self {
        PAPYRI.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_priority() {
        let g = Grammar::default();
        let names: Vec<&str> = g.rules().iter().map(Rule::name).collect();
        assert_eq!(names, vec!["numeral", "lost", "preserved"]);
    }

    #[test]
    fn numeral_with_separator() {
        let g = Grammar::default();
        assert_eq!(
            g.match_prefix("⟨ιβ⟩ α"),
            Some((TokenKind::Numeral, "⟨ιβ⟩ ".len()))
        );
    }

    #[test]
    fn lost_absorbs_island() {
        let g = Grammar::default();
        assert_eq!(g.match_prefix("-γ-δ"), Some((TokenKind::Lost, "-γ-".len())));
        assert_eq!(g.match_prefix("-δε"), Some((TokenKind::Lost, 1)));
        assert_eq!(
            g.match_prefix("----------· α"),
            Some((TokenKind::Lost, "----------· ".len()))
        );
    }

    #[test]
    fn preserved_single_char() {
        let g = Grammar::default();
        assert_eq!(
            g.match_prefix("ω· κ"),
            Some((TokenKind::Preserved, "ω· ".len()))
        );
        assert_eq!(g.match_prefix("ωκ"), Some((TokenKind::Preserved, "ω".len())));
    }

    #[test]
    fn unmatched() {
        let g = Grammar::default();
        assert_eq!(g.match_prefix("⟨α"), None);
        assert_eq!(g.match_prefix(""), None);
    }

    #[test]
    fn custom_rules() {
        let g = Grammar::new(vec![
            Rule::new("lost", TokenKind::Lost, r"\[\.+\]").unwrap(),
            Rule::new("preserved", TokenKind::Preserved, r"[^\[]").unwrap(),
        ]);
        assert_eq!(g.match_prefix("[...]a"), Some((TokenKind::Lost, 5)));
        assert_eq!(g.match_prefix("a[.]"), Some((TokenKind::Preserved, 1)));
    }
}

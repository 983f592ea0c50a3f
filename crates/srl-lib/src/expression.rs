//! Compiled expression and match records.
//!
//! The engine is `fancy_regex` rather than `regex`: the builder emits
//! lookaheads (`(?=…)`, `(?!…)`) which the finite-automaton engine rejects.
//! Engine state is per-call, so repeated matching needs no cursor reset.

use indexmap::IndexMap;
use serde::Serialize;

use crate::{Error, SyntaxError};


/// A compiled pattern together with the modifier string and the
/// capture-name table accumulated by the builder.
#[derive(Debug)]
pub struct Expression {
    regex: fancy_regex::Regex,
    pattern: String,
    modifiers: String,
    capture_names: Vec<Option<String>>,
}

/// One match: the full text, every positional group, and the named groups
/// in declaration order. Groups that did not participate are `""`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRecord {
    pub text: String,
    pub groups: Vec<String>,
    pub named: IndexMap<String, String>,
}

impl Expression {
    /// Compiles `pattern` with the given modifier string. The `g` modifier
    /// only selects between first-match and all-match calls, so of the
    /// modifier set only `i` and `m` reach the engine, as inline flags.
    pub(crate) fn compile(
        pattern: &str,
        modifiers: &str,
        capture_names: Vec<Option<String>>,
    ) -> Result<Self, SyntaxError> {
        let inline: String = modifiers.chars().filter(|c| matches!(c, 'i' | 'm')).collect();
        let source = if inline.is_empty() {
            pattern.to_owned()
        } else {
            format!("(?{inline}){pattern}")
        };
        let regex = fancy_regex::Regex::new(&source)
            .map_err(|e| SyntaxError::InvalidExpression(e.to_string()))?;
        Ok(Self {
            regex,
            pattern: pattern.to_owned(),
            modifiers: modifiers.to_owned(),
            capture_names,
        })
    }

    /// The pattern text without inline flags.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn modifiers(&self) -> &str {
        &self.modifiers
    }

    pub fn is_match(&self, text: &str) -> Result<bool, Error> {
        self.regex.is_match(text).map_err(engine)
    }

    /// The first match in `text`, or `None`. Absence of a match is not an
    /// error.
    pub fn first_match(&self, text: &str) -> Result<Option<MatchRecord>, Error> {
        match self.regex.captures(text).map_err(engine)? {
            Some(caps) => Ok(Some(self.record(&caps))),
            None => Ok(None),
        }
    }

    /// Every non-overlapping match in `text`, scanning left to right.
    pub fn all_matches(&self, text: &str) -> Result<Vec<MatchRecord>, Error> {
        let mut records = Vec::new();
        for caps in self.regex.captures_iter(text) {
            records.push(self.record(&caps.map_err(engine)?));
        }
        Ok(records)
    }

    fn record(&self, caps: &fancy_regex::Captures) -> MatchRecord {
        let text = caps.get(0).map(|m| m.as_str()).unwrap_or_default().to_owned();
        let mut groups = Vec::with_capacity(caps.len().saturating_sub(1));
        let mut named = IndexMap::new();
        for i in 1..caps.len() {
            let group = caps.get(i).map(|m| m.as_str()).unwrap_or_default().to_owned();
            if let Some(Some(name)) = self.capture_names.get(i - 1) {
                named.insert(name.clone(), group.clone());
            }
            groups.push(group);
        }
        MatchRecord { text, groups, named }
    }
}

fn engine(e: fancy_regex::Error) -> Error {
    Error::Engine(e.to_string())
}

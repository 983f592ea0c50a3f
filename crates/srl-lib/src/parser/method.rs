//! Method descriptors and parameter policies.
//!
//! A resolved phrase carries its originating text (for error messages),
//! the canonical operation, and the policy deciding how the following
//! tokens are normalized into parameters. Filler words are dropped from
//! plain text only; quoted literals always survive as given.

use crate::SyntaxError;
use crate::parser::phrases::Op;
use crate::parser::tokenizer::Token;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Method {
    /// The phrase text as listed in the table.
    pub origin: &'static str,
    pub op: Op,
    pub policy: Policy,
}

/// Parameter normalization applied before dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// No parameters allowed at all.
    None,
    /// Parameters pass through unfiltered.
    Bare,
    /// Drops "to" (`digit from 0 to 9`).
    To,
    /// Drops "time"/"times", then allows at most one parameter.
    Times,
    /// Drops "and"/"time"/"times" (`between 1 and 3 times`).
    Spanning,
    /// Drops "as" (`capture (...) as name`).
    Naming,
}

/// A normalized parameter: plain text, or a deferred sub-query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    Str(String),
    SubQuery(Vec<Token>),
}

/// Applies the policy to the raw tokens trailing a method: filler words
/// are dropped, arity is checked, groups become deferred sub-queries.
pub fn normalize_parameters(
    method: &Method,
    raw: Vec<Token>,
) -> Result<Vec<Param>, SyntaxError> {
    let filtered: Vec<Token> = raw
        .into_iter()
        .filter(|token| match token {
            Token::Text(word) => !is_filler(method.policy, word),
            _ => true,
        })
        .collect();

    match method.policy {
        Policy::None if !filtered.is_empty() => {
            return Err(SyntaxError::InvalidParameter(method.origin.to_owned()));
        }
        Policy::Times if filtered.len() > 1 => {
            return Err(SyntaxError::InvalidParameter(method.origin.to_owned()));
        }
        _ => {}
    }

    filtered
        .into_iter()
        .map(|token| match token {
            Token::Text(text) => Ok(Param::Str(text)),
            Token::Literal(text) => Ok(Param::Str(text)),
            Token::Group(tokens) => Ok(Param::SubQuery(tokens)),
            Token::Method(m) => Err(SyntaxError::UnexpectedStatement(m.origin.to_owned())),
        })
        .collect()
}

fn is_filler(policy: Policy, word: &str) -> bool {
    let matches_any = |fillers: &[&str]| fillers.iter().any(|f| word.eq_ignore_ascii_case(f));
    match policy {
        Policy::None | Policy::Bare => false,
        Policy::To => matches_any(&["to"]),
        Policy::Times => matches_any(&["time", "times"]),
        Policy::Spanning => matches_any(&["and", "time", "times"]),
        Policy::Naming => matches_any(&["as"]),
    }
}

//! SRL: build regular expressions from readable phrases.
//!
//! # Example
//!
//! ```
//! use srl_lib::srl;
//!
//! let mut builder = srl(r#"begin with literally "srl", must end"#).unwrap();
//! let expr = builder.compile().unwrap();
//! assert!(expr.is_match("srl").unwrap());
//! ```
//!
//! The same expression can be assembled through the fluent [`Builder`]
//! without going through the phrase language at all.

pub mod builder;
pub mod cache;
pub mod expression;
pub mod interpreter;
pub mod parser;

pub use builder::{Builder, Conditions};
pub use cache::ExpressionCache;
pub use expression::{Expression, MatchRecord};
pub use interpreter::Interpreter;

/// Malformed query text: unbalanced parentheses, unterminated strings,
/// unknown phrases, bad parameters, or a pattern the engine rejects.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    #[error("non-matching parenthesis found")]
    UnbalancedParentheses,

    #[error("invalid string ending found")]
    UnterminatedString,

    /// A segment in method position that matches no phrase.
    #[error("unexpected statement: {0}")]
    UnexpectedStatement(String),

    /// Parameters fail the policy of the phrase they follow.
    #[error("invalid parameter given for {0}")]
    InvalidParameter(String),

    #[error("'{0}' does not allow the use of sub-queries")]
    SubQueryNotAllowed(String),

    /// Sequencing failure surfaced through the query executor.
    #[error("{0}")]
    Sequence(String),

    /// The assembled pattern was rejected by the engine.
    #[error("generated expression seems to be invalid: {0}")]
    InvalidExpression(String),
}

/// An operation called in a grammar state that does not permit it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SequenceError {
    #[error("'{op}' is not allowed {context}")]
    NotAllowed {
        op: &'static str,
        context: &'static str,
    },

    #[error("cannot apply laziness at this point, only applicable after a quantifier")]
    LazyNotApplicable,
}

/// Construction rejected for reasons other than grammar sequencing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuilderError {
    #[error("adding raw fragment would invalidate this expression, reverted")]
    RawRejected,
}

/// Any failure the library can produce.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Sequence(#[from] SequenceError),

    #[error(transparent)]
    Builder(#[from] BuilderError),

    /// Runtime failure inside the regex engine (e.g. backtrack limit).
    #[error("regex engine error: {0}")]
    Engine(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Builds a query in one call, without a cache.
pub fn srl(query: &str) -> Result<Builder> {
    Interpreter::new(query).map(Interpreter::into_builder)
}

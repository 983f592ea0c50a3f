//! Query-language front end.
//!
//! A query goes through three passes:
//!
//! 1. [`tokenizer`] splits the raw text into a tree of plain segments,
//!    quoted literals and parenthesized groups.
//! 2. [`resolver`] rewrites the tree in place, turning known phrases into
//!    method descriptors and splitting everything else down to single
//!    words (which usually end up as parameters).
//! 3. [`exec`] walks the resolved sequence and drives the fluent builder.
//!
//! Phrase recognition itself lives in [`phrases`]; parameter policies in
//! [`method`].

pub mod exec;
pub mod method;
pub mod phrases;
pub mod resolver;
pub mod tokenizer;

#[cfg(test)]
mod exec_tests;
#[cfg(test)]
mod phrases_tests;

pub use exec::build_query;
pub use method::{Method, Policy};
pub use phrases::{Op, method_match};
pub use resolver::resolve;
pub use tokenizer::{Token, tokenize};

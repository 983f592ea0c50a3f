//! Query front door: normalization, cache lookup, and the full pipeline.

use crate::builder::Builder;
use crate::cache::ExpressionCache;
use crate::parser::{build_query, resolve, tokenize};
use crate::Result;

#[cfg(test)]
mod interpreter_tests;

/// Runs a phrase query through tokenize, resolve and execute, producing a
/// ready [`Builder`].
#[derive(Debug, Clone)]
pub struct Interpreter {
    raw_query: String,
    builder: Builder,
}

impl Interpreter {
    pub fn new(query: &str) -> Result<Self> {
        let raw_query = normalize(query);
        let builder = build(&raw_query)?;
        Ok(Self { raw_query, builder })
    }

    /// Like [`Interpreter::new`], but consults and populates the cache.
    /// Hits and the stored entry never share state with the returned
    /// builder.
    pub fn with_cache(query: &str, cache: &mut ExpressionCache) -> Result<Self> {
        let raw_query = normalize(query);
        if let Some(builder) = cache.get(&raw_query) {
            return Ok(Self { raw_query, builder });
        }

        let builder = build(&raw_query)?;
        cache.insert(raw_query.clone(), builder.clone());
        Ok(Self { raw_query, builder })
    }

    /// The query text after trimming and `;`-stripping.
    pub fn raw_query(&self) -> &str {
        &self.raw_query
    }

    pub fn builder(&self) -> &Builder {
        &self.builder
    }

    pub fn builder_mut(&mut self) -> &mut Builder {
        &mut self.builder
    }

    pub fn into_builder(self) -> Builder {
        self.builder
    }
}

/// Trims surrounding whitespace and at most one trailing `;`.
fn normalize(query: &str) -> String {
    let trimmed = query.trim();
    match trimmed.strip_suffix(';') {
        Some(stripped) => stripped.trim_end().to_owned(),
        None => trimmed.to_owned(),
    }
}

fn build(raw_query: &str) -> Result<Builder> {
    let tokens = tokenize(raw_query)?;
    let resolved = resolve(tokens);
    let mut builder = Builder::new();
    build_query(resolved, &mut builder)?;
    Ok(builder)
}

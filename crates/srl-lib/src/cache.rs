//! Memoization of built queries, keyed by normalized query text.

use std::collections::HashMap;

use crate::builder::Builder;


/// Stores built builders so repeated queries skip the whole pipeline.
/// Every read returns a clone; neither the cache entry nor earlier
/// returns can be mutated through a later one.
#[derive(Debug, Clone, Default)]
pub struct ExpressionCache {
    entries: HashMap<String, Builder>,
}

impl ExpressionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, query: &str) -> Option<Builder> {
        self.entries.get(query).cloned()
    }

    pub fn insert(&mut self, query: String, builder: Builder) {
        self.entries.insert(query, builder);
    }

    pub fn contains(&self, query: &str) -> bool {
        self.entries.contains_key(query)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

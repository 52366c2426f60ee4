//! Per-run cache of compiled column renaming patterns.

use std::collections::HashMap;

use regex::Regex;

/// Compiled regex patterns keyed by their source text.
///
/// Owned by one introspection run and dropped with it, so nothing compiled
/// for one configuration leaks into the next run.
#[derive(Debug, Default)]
pub struct RegexCache {
    cache: HashMap<String, Regex>,
}

impl RegexCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the compiled pattern, compiling it on first use.
    pub fn get_or_compile(&mut self, pattern: &str) -> Result<&Regex, regex::Error> {
        if !self.cache.contains_key(pattern) {
            let regex = Regex::new(pattern)?;
            tracing::trace!(pattern = pattern, "Compiled column renaming pattern");
            self.cache.insert(pattern.to_string(), regex);
        }
        Ok(&self.cache[pattern])
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

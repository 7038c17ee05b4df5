//! Regular expression matching with a process-wide cache of compiled patterns.

use crate::hint::Hint;
use crate::value::Value;
use dashmap::DashMap;
use regex::Regex;
use std::sync::{Arc, OnceLock};
use tracing::{trace, warn};

/// How many distinct sources the process-wide cache holds. Further sources are compiled on every use.
pub const CACHE_CAPACITY: usize = 1024;

/// Compiled regexes keyed by source. Failures are not cached, and once `capacity` sources are held
/// new ones are compiled without being admitted.
pub struct PatternCache {
    patterns: DashMap<String, Arc<Regex>>,
    capacity: usize,
}

impl PatternCache {
    pub fn new(capacity: usize) -> Self { Self { patterns: DashMap::new(), capacity } }

    pub fn compile(&self, source: &str) -> Result<Arc<Regex>, regex::Error> {
        if let Some(regex) = self.patterns.get(source) {
            return Ok(regex.clone());
        }
        let regex = Arc::new(Regex::new(source)?);
        if self.patterns.len() < self.capacity {
            self.patterns.insert(source.to_string(), regex.clone());
        } else {
            trace!("pattern cache full, not caching {:?}", source);
        }
        Ok(regex)
    }

    pub fn len(&self) -> usize { self.patterns.len() }

    pub fn is_empty(&self) -> bool { self.patterns.is_empty() }
}

static PATTERNS: OnceLock<PatternCache> = OnceLock::new();

/// Compile `source` through the process-wide [`PatternCache`].
pub fn compile(source: &str) -> Result<Arc<Regex>, regex::Error> {
    PATTERNS.get_or_init(|| PatternCache::new(CACHE_CAPACITY)).compile(source)
}

/// Whether `source` matches anywhere in the text of `value`. An empty pattern matches any text;
/// non-text values and uncompilable patterns never match.
pub fn is_match(source: &str, value: &Value) -> bool {
    let Some(text) = value.as_str() else { return false };
    if source.is_empty() {
        return true;
    }
    match compile(source) {
        Ok(regex) => regex.is_match(text),
        Err(_) => false,
    }
}

/// A pattern compiled when the rule is built.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Option<Arc<Regex>>,
}

impl Pattern {
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let regex = if source.is_empty() {
            None
        } else {
            match compile(&source) {
                Ok(regex) => Some(regex),
                Err(err) => {
                    warn!("pattern {:?} does not compile: {}", source, err);
                    None
                }
            }
        };
        Self { source, regex }
    }

    pub fn source(&self) -> &str { &self.source }

    /// Whether the pattern can be used at all. Empty and uncompilable patterns are invalid rules.
    pub fn is_valid(&self) -> bool { self.regex.is_some() }

    pub(crate) fn check(&self, value: &Value) -> Option<Hint> {
        let Some(regex) = &self.regex else { return Some(Hint::InvalidRule) };
        let Some(text) = value.as_str() else { return Some(Hint::refusing(value)) };
        if text.is_empty() {
            return Some(Hint::Empty);
        }
        if regex.is_match(text) {
            None
        } else {
            Some(Hint::NotValid)
        }
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool { self.source == other.source }
}

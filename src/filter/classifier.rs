use regex::Regex;
use std::collections::HashSet;

use crate::common::errors::{Result, ShrinkError};

/// Characters that turn a configured name into a pattern
const PATTERN_CHARS: &[char] = &['*', '?', '[', ']', '\\', '_', '-', '^', '$'];

/// Returns true if the name contains any pattern metacharacter
pub fn is_pattern(name: &str) -> bool {
    name.contains(PATTERN_CHARS)
}

/// Split configured names into (patterns, literal names)
pub fn split_patterns<S: AsRef<str>>(names: &[S]) -> (Vec<String>, Vec<String>) {
    names
        .iter()
        .map(|n| n.as_ref().to_string())
        .partition(|n| is_pattern(n))
}

/// Compile every pattern, failing on the first malformed one
pub fn compile_patterns(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| {
            Regex::new(p).map_err(|source| ShrinkError::InvalidPattern {
                pattern: p.clone(),
                source,
            })
        })
        .collect()
}

/// Answers "is this name in the configured list?" for one list of names.
///
/// Names are split once at construction: plain names go into a hash set,
/// names carrying pattern metacharacters are compiled as regular
/// expressions. A lookup matches if the name is in the set or any
/// pattern matches it.
#[derive(Debug, Clone, Default)]
pub struct NameClassifier {
    literals: HashSet<String>,
    patterns: Vec<Regex>,
}

impl NameClassifier {
    pub fn new<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        let (patterns, literals) = split_patterns(names);
        Ok(Self {
            literals: literals.into_iter().collect(),
            patterns: compile_patterns(&patterns)?,
        })
    }

    /// Exact name lookup
    pub fn contains_literal(&self, name: &str) -> bool {
        self.literals.contains(name)
    }

    /// Any compiled pattern matches
    pub fn matches_pattern(&self, name: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(name))
    }

    pub fn matches(&self, name: &str) -> bool {
        self.contains_literal(name) || self.matches_pattern(name)
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty() && self.patterns.is_empty()
    }
}

/// Extension of a file name: the suffix starting at the rightmost `.`
/// that is not the first character. `.gitignore` has no extension.
pub fn extension(name: &str) -> Option<&str> {
    match name.rfind('.') {
        Some(0) | None => None,
        Some(idx) => Some(&name[idx..]),
    }
}

/// Set of file extensions selected for removal.
///
/// Single extensions (`.js`) are looked up against the rightmost suffix.
/// Compound ones (`.d.ts`) are matched as a name suffix, as long as the
/// name is more than the suffix itself.
#[derive(Debug, Clone, Default)]
pub struct ExtensionSet {
    simple: HashSet<String>,
    compound: Vec<String>,
}

impl ExtensionSet {
    pub fn new<S: AsRef<str>>(extensions: &[S]) -> Self {
        let mut simple = HashSet::new();
        let mut compound = Vec::new();

        for ext in extensions {
            let ext = ext.as_ref().trim();
            if ext.is_empty() || ext == "." {
                continue;
            }
            let normalized = if ext.starts_with('.') {
                ext.to_string()
            } else {
                format!(".{}", ext)
            };
            if normalized.matches('.').count() > 1 {
                compound.push(normalized);
            } else {
                simple.insert(normalized);
            }
        }

        Self { simple, compound }
    }

    pub fn matches(&self, name: &str) -> bool {
        if let Some(ext) = extension(name) {
            if self.simple.contains(ext) {
                return true;
            }
        }
        self.compound
            .iter()
            .any(|ext| name.len() > ext.len() && name.ends_with(ext.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.simple.is_empty() && self.compound.is_empty()
    }
}

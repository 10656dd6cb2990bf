pub mod classifier;

use std::collections::HashSet;

use crate::common::errors::Result;
use crate::walker::EntryInfo;
use classifier::{ExtensionSet, NameClassifier};

/// Filter verdict for one entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Remove the entry
    Remove,
    /// Remove the directory and do not walk into it
    SkipSubtree,
    /// Matched an exclude rule; keep it, but still walk into it
    Excluded,
    /// No rule matched
    NotApplicable,
}

impl Decision {
    pub fn should_remove(self) -> bool {
        matches!(self, Decision::Remove | Decision::SkipSubtree)
    }
}

/// Raw rule lists as they come from config and flags
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    pub include_names: Vec<String>,
    pub exclude_names: Vec<String>,
    pub include_extensions: Vec<String>,
    pub remove_dir_names: Vec<String>,
    pub remove_file_names: Vec<String>,
}

/// Decides what happens to each walked entry.
///
/// Rules are evaluated in a fixed order and the first hit wins:
/// include names, include patterns, directory names, file names and
/// extensions, then excludes. Includes therefore override an exclude of
/// the same name. The filter is immutable once built and shared by
/// reference between all workers.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    include: NameClassifier,
    exclude: NameClassifier,
    extensions: ExtensionSet,
    dir_names: HashSet<String>,
    file_names: HashSet<String>,
}

impl Filter {
    pub fn new(rules: &RuleSet) -> Result<Self> {
        Ok(Self {
            include: NameClassifier::new(&rules.include_names)?,
            exclude: NameClassifier::new(&rules.exclude_names)?,
            extensions: ExtensionSet::new(&rules.include_extensions),
            dir_names: rules.remove_dir_names.iter().cloned().collect(),
            file_names: rules.remove_file_names.iter().cloned().collect(),
        })
    }

    /// Any selected directory, include matches included, is `SkipSubtree`
    /// so its children are never enqueued on their own.
    pub fn check(&self, entry: &EntryInfo) -> Decision {
        if self.is_selected(entry) {
            return if entry.is_dir() {
                Decision::SkipSubtree
            } else {
                Decision::Remove
            };
        }

        if self.is_excluded(&entry.name) {
            return Decision::Excluded;
        }

        Decision::NotApplicable
    }

    fn is_selected(&self, entry: &EntryInfo) -> bool {
        let name = entry.name.as_str();

        if self.include.contains_literal(name) || self.include.matches_pattern(name) {
            return true;
        }
        if entry.is_dir() {
            return self.is_dir_to_remove(name);
        }
        entry.is_regular() && self.is_file_to_remove(name)
    }

    pub fn is_dir_to_remove(&self, name: &str) -> bool {
        self.dir_names.contains(name)
    }

    pub fn is_file_to_remove(&self, name: &str) -> bool {
        self.file_names.contains(name) || self.extensions.matches(name)
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        self.exclude.matches(name)
    }
}

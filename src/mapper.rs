//! Name-rewrite heuristic: guesses the reference-API spelling of a source-API
//! qualified name and classifies it against the reference symbol index.

use serde::{Deserialize, Serialize};

use crate::index::SymbolIndex;

/// One textual substitution. Rules are applied to the whole qualified name,
/// every occurrence, in the order they appear in the rule list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameRule {
    pub find: String,
    pub replace: String,
}

impl RenameRule {
    pub fn new(find: impl Into<String>, replace: impl Into<String>) -> Self {
        Self { find: find.into(), replace: replace.into() }
    }

    pub fn apply(&self, name: &str) -> String {
        name.replace(&self.find, &self.replace)
    }
}

/// Apply every rule in sequence, feeding each rule the previous output.
pub fn rewrite_name(name: &str, rules: &[RenameRule]) -> String {
    rules.iter().fold(name.to_string(), |acc, rule| rule.apply(&acc))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Supported,
    Missing,
}

/// Classifies source-API names by rewriting them and probing the index.
///
/// The heuristic is one-directional: a reference symbol whose real name does
/// not arise from the rule list is unreachable and always reports missing.
pub struct SymbolMapper<'a> {
    index: &'a SymbolIndex,
    rules: &'a [RenameRule],
}

impl<'a> SymbolMapper<'a> {
    pub fn new(index: &'a SymbolIndex, rules: &'a [RenameRule]) -> Self {
        Self { index, rules }
    }

    /// Reference-side candidate name for a source-API qualified name.
    pub fn candidate(&self, name: &str) -> String {
        rewrite_name(name, self.rules)
    }

    pub fn classify(&self, name: &str) -> Classification {
        if self.index.contains(&self.candidate(name)) {
            Classification::Supported
        } else {
            Classification::Missing
        }
    }
}

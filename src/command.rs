//! Command classification: verbatim membership in the reference allow-list.
//!
//! Unlike symbols, command identifiers are runtime strings shared across API
//! surfaces, so no rewriting is applied before the lookup.

use std::collections::BTreeSet;

use crate::mapper::Classification;

pub struct CommandClassifier<'a> {
    allow_list: &'a BTreeSet<String>,
}

impl<'a> CommandClassifier<'a> {
    pub fn new(allow_list: &'a BTreeSet<String>) -> Self {
        Self { allow_list }
    }

    pub fn classify(&self, command: &str) -> Classification {
        if self.allow_list.contains(command) {
            Classification::Supported
        } else {
            Classification::Missing
        }
    }
}

/// Whether a standalone string literal looks like a command identifier.
///
/// Matches any literal starting with one of the fixed prefixes, in or out of
/// a dispatch call. Configuration keys that happen to share a prefix are
/// classified too; callers rely on this breadth.
pub fn is_command_shaped(text: &str, prefixes: &[String]) -> bool {
    prefixes.iter().any(|prefix| text.starts_with(prefix.as_str()))
}

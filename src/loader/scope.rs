//! Per-file resolution state: the use-map built from `use` trees and the
//! lexical scope stack of local bindings.

use std::collections::HashMap;

/// Maps a local alias introduced by a `use` item to the absolute path it
/// names (head segment is the crate).
#[derive(Debug, Clone, Default)]
pub struct UseMap {
    aliases: HashMap<String, Vec<String>>,
}

impl UseMap {
    pub fn record(&mut self, alias: impl Into<String>, absolute: Vec<String>) {
        self.aliases.insert(alias.into(), absolute);
    }

    pub fn resolve(&self, alias: &str) -> Option<&[String]> {
        self.aliases.get(alias).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

/// What the front end could prove about one local name.
#[derive(Debug, Clone, Default)]
pub struct Binding {
    /// Qualified name of the binding's type, when it resolves into an API
    /// namespace.
    pub type_fqn: Option<String>,
    /// Literal string value, when the binding is provably a fixed string.
    pub literal: Option<String>,
}

impl Binding {
    pub fn is_informative(&self) -> bool {
        self.type_fqn.is_some() || self.literal.is_some()
    }
}

/// Stack of lexical scopes; lookups walk from the innermost scope outwards.
#[derive(Debug, Default)]
pub struct ScopeStack {
    scopes: Vec<HashMap<String, Binding>>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self) {
        self.scopes.push(HashMap::new());
    }

    pub fn pop(&mut self) {
        self.scopes.pop();
    }

    pub fn bind(&mut self, name: impl Into<String>, binding: Binding) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.into(), binding);
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&Binding> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inner_scopes_shadow_outer_ones() {
        let mut scopes = ScopeStack::new();
        scopes.push();
        scopes.bind("cmd", Binding { type_fqn: None, literal: Some("outer".into()) });
        scopes.push();
        scopes.bind("cmd", Binding { type_fqn: None, literal: Some("inner".into()) });
        assert_eq!(scopes.lookup("cmd").unwrap().literal.as_deref(), Some("inner"));
        scopes.pop();
        assert_eq!(scopes.lookup("cmd").unwrap().literal.as_deref(), Some("outer"));
    }

    #[test]
    fn lookup_misses_after_scope_exit() {
        let mut scopes = ScopeStack::new();
        scopes.push();
        scopes.push();
        scopes.bind("ctx", Binding { type_fqn: Some("\"vscode\".ExtensionContext".into()), literal: None });
        scopes.pop();
        assert!(scopes.lookup("ctx").is_none());
    }

    #[test]
    fn use_map_resolves_aliases() {
        let mut uses = UseMap::default();
        uses.record("commands", vec!["vscode".into(), "commands".into()]);
        assert_eq!(uses.resolve("commands").unwrap(), ["vscode", "commands"]);
        assert!(uses.resolve("window").is_none());
    }
}

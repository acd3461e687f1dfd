//! Type-resolution seam between the front end and the analysis.
//!
//! The walker never parses anything itself; it asks a [`TypeOracle`] what the
//! front end could prove about a node. Both answers are optional: "no
//! information" is the normal outcome for most nodes and never an error.

use std::collections::HashMap;

use crate::tree::NodeId;

/// Answers the two questions the analysis needs about a node.
pub trait TypeOracle {
    /// Fully qualified name of the symbol carried by the node's static type,
    /// in `"<namespace>".<dotted.path>` form.
    fn symbol_at(&self, node: NodeId) -> Option<String>;

    /// Provable literal string value of the node's static type, e.g. for a
    /// path naming a `const NAME: &str = "..."` binding.
    fn string_literal_type_at(&self, node: NodeId) -> Option<String>;
}

/// Table-backed oracle filled in by the front end while lowering a file.
#[derive(Debug, Clone, Default)]
pub struct TableOracle {
    symbols: HashMap<NodeId, String>,
    literals: HashMap<NodeId, String>,
}

impl TableOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_symbol(&mut self, node: NodeId, qualified_name: impl Into<String>) {
        self.symbols.insert(node, qualified_name.into());
    }

    pub fn record_literal(&mut self, node: NodeId, value: impl Into<String>) {
        self.literals.insert(node, value.into());
    }

    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }
}

impl TypeOracle for TableOracle {
    fn symbol_at(&self, node: NodeId) -> Option<String> {
        self.symbols.get(&node).cloned()
    }

    fn string_literal_type_at(&self, node: NodeId) -> Option<String> {
        self.literals.get(&node).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_nodes_resolve_to_nothing() {
        let oracle = TableOracle::new();
        assert_eq!(oracle.symbol_at(7), None);
        assert_eq!(oracle.string_literal_type_at(7), None);
    }

    #[test]
    fn recorded_entries_are_returned() {
        let mut oracle = TableOracle::new();
        oracle.record_symbol(1, "\"vscode\".ExtensionContext");
        oracle.record_literal(2, "vscode.open");
        assert_eq!(oracle.symbol_at(1).as_deref(), Some("\"vscode\".ExtensionContext"));
        assert_eq!(oracle.string_literal_type_at(2).as_deref(), Some("vscode.open"));
    }
}

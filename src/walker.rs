//! The traversal core: visits every lowered node of every non-declaration
//! file once and accumulates classification outcomes.

use anyhow::Result;

use std::collections::HashSet;

use crate::command::{is_command_shaped, CommandClassifier};
use crate::index::SymbolIndex;
use crate::loader::{LoadedFile, LoadedProgram};
use crate::mapper::{Classification, SymbolMapper};
use crate::oracle::TypeOracle;
use crate::profile::ApiProfile;
use crate::tree::{NodeKind, SourceNode, SourceTree};

/// Accumulators for one analysis run, owned by the top-level call.
///
/// Writes are append-only and memoized: once a qualified name lands in either
/// symbol set it is never reprocessed, so the first classification of a name
/// is the one every later occurrence sees.
pub struct AnalysisContext<'a> {
    profile: &'a ApiProfile,
    mapper: SymbolMapper<'a>,
    source_marker: String,
    pub used_symbols: HashSet<String>,
    pub missing_symbols: HashSet<String>,
    pub used_commands: HashSet<String>,
    pub missing_commands: HashSet<String>,
    pub dynamic_command_calls: HashSet<String>,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(profile: &'a ApiProfile, index: &'a SymbolIndex) -> Self {
        Self {
            profile,
            mapper: SymbolMapper::new(index, &profile.rename_rules),
            source_marker: profile.source_marker(),
            used_symbols: HashSet::new(),
            missing_symbols: HashSet::new(),
            used_commands: HashSet::new(),
            missing_commands: HashSet::new(),
            dynamic_command_calls: HashSet::new(),
        }
    }

    /// True once any source-API-namespaced symbol has been observed.
    pub fn has_symbol_usages(&self) -> bool {
        !self.used_symbols.is_empty() || !self.missing_symbols.is_empty()
    }

    pub fn analyze_program(&mut self, program: &LoadedProgram) {
        for file in &program.files {
            self.analyze_file(file);
        }
    }

    /// Single pass over one file. Declaration files are never analyzed.
    pub fn analyze_file(&mut self, file: &LoadedFile) {
        if file.is_declaration {
            return;
        }
        let tree = &file.tree;
        let oracle = &file.oracle;
        tree.walk(&mut |node| self.visit_node(tree, oracle, node));
    }

    fn visit_node(
        &mut self,
        tree: &SourceTree,
        oracle: &dyn TypeOracle,
        node: &SourceNode,
    ) -> Result<()> {
        // Check 1: command-shaped string literals, regardless of context.
        if let Some(text) = node.literal.as_deref() {
            if is_command_shaped(text, &self.profile.command_prefixes) {
                self.classify_command(text);
            }
        }

        // Check 2: symbol resolution. A literal node can also carry a symbol
        // (e.g. a binding with a provable literal type), so this runs
        // independently of check 1.
        let Some(name) = oracle.symbol_at(node.id) else {
            return Ok(());
        };
        if !name.starts_with(&self.source_marker) {
            return Ok(());
        }

        if name.ends_with(&self.profile.execute_command_suffix) {
            if let Some(parent) = tree.parent(node.id) {
                if parent.kind == NodeKind::Call {
                    self.classify_dispatch_argument(tree, oracle, parent.id);
                }
            }
        }

        // Classification happens for every source-API symbol, whether or not
        // it was a dispatch call, but only the first occurrence decides.
        if !self.used_symbols.contains(&name) && !self.missing_symbols.contains(&name) {
            match self.mapper.classify(&name) {
                Classification::Supported => self.used_symbols.insert(name),
                Classification::Missing => self.missing_symbols.insert(name),
            };
        }
        Ok(())
    }

    /// Resolve the first argument of a dispatch call: literal text first,
    /// then a provable literal type, otherwise record a dynamic call.
    fn classify_dispatch_argument(
        &mut self,
        tree: &SourceTree,
        oracle: &dyn TypeOracle,
        call: crate::tree::NodeId,
    ) {
        let Some(arg_id) = tree.first_argument(call) else {
            return;
        };
        let arg = tree.node(arg_id);
        let command = arg
            .literal
            .clone()
            .or_else(|| oracle.string_literal_type_at(arg_id));
        match command {
            Some(command) => self.classify_command(&command),
            None => {
                self.dynamic_command_calls.insert(format!(
                    "{} ({} {}:{})",
                    arg.snippet,
                    tree.file().display(),
                    arg.span.start.line,
                    arg.span.start.column,
                ));
            }
        }
    }

    fn classify_command(&mut self, command: &str) {
        if self.used_commands.contains(command) || self.missing_commands.contains(command) {
            return;
        }
        let classifier = CommandClassifier::new(&self.profile.command_allow_list);
        match classifier.classify(command) {
            Classification::Supported => self.used_commands.insert(command.to_string()),
            Classification::Missing => self.missing_commands.insert(command.to_string()),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::TableOracle;
    use crate::tree::{LineColumn, NodeId, Span};

    struct Fixture {
        tree: SourceTree,
        oracle: TableOracle,
    }

    impl Fixture {
        fn new() -> Self {
            Self { tree: SourceTree::new("src/lib.rs"), oracle: TableOracle::new() }
        }

        fn node(&mut self, parent: NodeId, kind: NodeKind, snippet: &str) -> NodeId {
            self.tree.push(parent, kind, Span::default(), snippet)
        }

        fn str_lit(&mut self, parent: NodeId, value: &str) -> NodeId {
            let id = self.tree.push(
                parent,
                NodeKind::StrLit,
                Span::default(),
                format!("\"{value}\""),
            );
            self.tree.set_literal(id, value);
            id
        }

        /// A `execute_command(..)` call with the given argument builder.
        fn dispatch_call(&mut self, build_arg: impl FnOnce(&mut Self, NodeId) -> NodeId) -> NodeId {
            let call = self.node(0, NodeKind::Call, "vscode::commands::execute_command(..)");
            let callee = self.node(call, NodeKind::Path, "vscode::commands::execute_command");
            self.oracle
                .record_symbol(callee, "\"vscode\".commands.execute_command");
            build_arg(self, call)
        }

        fn file(self) -> LoadedFile {
            LoadedFile {
                path: self.tree.file().to_path_buf(),
                is_declaration: false,
                tree: self.tree,
                oracle: self.oracle,
            }
        }
    }

    fn index_with(names: &[&str]) -> SymbolIndex {
        let mut index = SymbolIndex::default();
        for name in names {
            index.insert(name.to_string());
        }
        index
    }

    fn dispatch_index() -> SymbolIndex {
        index_with(&["\"theia\".commands.execute_command"])
    }

    #[test]
    fn allow_listed_dispatch_argument_is_a_used_command() {
        let profile = ApiProfile::default();
        let index = dispatch_index();
        let mut fixture = Fixture::new();
        fixture.dispatch_call(|f, call| f.str_lit(call, "vscode.open"));
        let mut ctx = AnalysisContext::new(&profile, &index);
        ctx.analyze_file(&fixture.file());
        assert!(ctx.used_commands.contains("vscode.open"));
        assert!(!ctx.missing_commands.contains("vscode.open"));
    }

    #[test]
    fn unlisted_dispatch_argument_is_missing_regardless_of_prefix() {
        let profile = ApiProfile::default();
        let index = dispatch_index();
        let mut fixture = Fixture::new();
        fixture.dispatch_call(|f, call| f.str_lit(call, "myExt.doThing"));
        let mut ctx = AnalysisContext::new(&profile, &index);
        ctx.analyze_file(&fixture.file());
        assert!(ctx.missing_commands.contains("myExt.doThing"));
    }

    #[test]
    fn dispatch_argument_with_literal_type_is_classified() {
        let profile = ApiProfile::default();
        let index = dispatch_index();
        let mut fixture = Fixture::new();
        fixture.dispatch_call(|f, call| {
            let arg = f.node(call, NodeKind::Path, "OPEN_COMMAND");
            f.oracle.record_literal(arg, "vscode.open");
            arg
        });
        let mut ctx = AnalysisContext::new(&profile, &index);
        ctx.analyze_file(&fixture.file());
        assert!(ctx.used_commands.contains("vscode.open"));
        assert!(ctx.dynamic_command_calls.is_empty());
    }

    #[test]
    fn unresolvable_dispatch_argument_is_recorded_as_dynamic() {
        let profile = ApiProfile::default();
        let index = dispatch_index();
        let mut fixture = Fixture::new();
        fixture.dispatch_call(|f, call| {
            let arg = f.tree.push(
                call,
                NodeKind::Path,
                Span {
                    start: LineColumn { line: 4, column: 31 },
                    end: LineColumn { line: 4, column: 32 },
                },
                "v",
            );
            arg
        });
        let mut ctx = AnalysisContext::new(&profile, &index);
        ctx.analyze_file(&fixture.file());
        assert!(ctx.used_commands.is_empty());
        assert!(ctx.missing_commands.is_empty());
        assert!(ctx.dynamic_command_calls.contains("v (src/lib.rs 4:31)"));
    }

    #[test]
    fn standalone_command_shaped_literal_is_classified_outside_any_call() {
        let profile = ApiProfile::default();
        let index = SymbolIndex::default();
        let mut fixture = Fixture::new();
        fixture.str_lit(0, "workbench.action.reloadWindow");
        fixture.str_lit(0, "not.a.command");
        let mut ctx = AnalysisContext::new(&profile, &index);
        ctx.analyze_file(&fixture.file());
        assert!(ctx.missing_commands.contains("workbench.action.reloadWindow"));
        assert!(!ctx.missing_commands.contains("not.a.command"));
    }

    #[test]
    fn symbol_classification_is_memoized_across_occurrences() {
        let profile = ApiProfile::default();
        let index = index_with(&["\"theia\".PluginContext"]);
        let mut fixture = Fixture::new();
        let a = fixture.node(0, NodeKind::Type, "ExtensionContext");
        let b = fixture.node(0, NodeKind::Type, "ExtensionContext");
        fixture.oracle.record_symbol(a, "\"vscode\".ExtensionContext");
        fixture.oracle.record_symbol(b, "\"vscode\".ExtensionContext");
        let mut ctx = AnalysisContext::new(&profile, &index);
        ctx.analyze_file(&fixture.file());
        assert!(ctx.used_symbols.contains("\"vscode\".ExtensionContext"));
        assert_eq!(ctx.used_symbols.len(), 1);
        assert!(ctx.missing_symbols.is_empty());
    }

    #[test]
    fn used_and_missing_symbol_sets_stay_disjoint() {
        let profile = ApiProfile::default();
        let index = index_with(&["\"theia\".PluginContext"]);
        let mut fixture = Fixture::new();
        let a = fixture.node(0, NodeKind::Type, "ExtensionContext");
        let b = fixture.node(0, NodeKind::Path, "create_webview");
        fixture.oracle.record_symbol(a, "\"vscode\".ExtensionContext");
        fixture.oracle.record_symbol(b, "\"vscode\".window.create_webview_panel");
        let mut ctx = AnalysisContext::new(&profile, &index);
        ctx.analyze_file(&fixture.file());
        let overlap: Vec<_> = ctx.used_symbols.intersection(&ctx.missing_symbols).collect();
        assert!(overlap.is_empty());
        assert!(ctx.missing_symbols.contains("\"vscode\".window.create_webview_panel"));
    }

    #[test]
    fn reference_type_support_follows_the_index() {
        let profile = ApiProfile::default();
        let mut fixture = Fixture::new();
        let a = fixture.node(0, NodeKind::Type, "ExtensionContext");
        fixture.oracle.record_symbol(a, "\"vscode\".ExtensionContext");
        let file = fixture.file();

        let with_entry = index_with(&["\"theia\".PluginContext"]);
        let mut ctx = AnalysisContext::new(&profile, &with_entry);
        ctx.analyze_file(&file);
        assert!(ctx.used_symbols.contains("\"vscode\".ExtensionContext"));

        let without_entry = SymbolIndex::default();
        let mut ctx = AnalysisContext::new(&profile, &without_entry);
        ctx.analyze_file(&file);
        assert!(ctx.missing_symbols.contains("\"vscode\".ExtensionContext"));
    }

    #[test]
    fn foreign_namespace_symbols_are_ignored() {
        let profile = ApiProfile::default();
        let index = SymbolIndex::default();
        let mut fixture = Fixture::new();
        let a = fixture.node(0, NodeKind::Path, "HashMap");
        fixture.oracle.record_symbol(a, "\"std\".collections.HashMap");
        let mut ctx = AnalysisContext::new(&profile, &index);
        ctx.analyze_file(&fixture.file());
        assert!(!ctx.has_symbol_usages());
    }

    #[test]
    fn declaration_files_are_skipped() {
        let profile = ApiProfile::default();
        let index = SymbolIndex::default();
        let mut fixture = Fixture::new();
        let a = fixture.node(0, NodeKind::Type, "ExtensionContext");
        fixture.oracle.record_symbol(a, "\"vscode\".ExtensionContext");
        let mut file = fixture.file();
        file.is_declaration = true;
        let mut ctx = AnalysisContext::new(&profile, &index);
        ctx.analyze_file(&file);
        assert!(!ctx.has_symbol_usages());
    }

    #[test]
    fn a_literal_node_with_a_symbol_runs_both_checks() {
        let profile = ApiProfile::default();
        let index = SymbolIndex::default();
        let mut fixture = Fixture::new();
        let lit = fixture.str_lit(0, "vscode.open");
        fixture.oracle.record_symbol(lit, "\"vscode\".commands");
        let mut ctx = AnalysisContext::new(&profile, &index);
        ctx.analyze_file(&fixture.file());
        assert!(ctx.used_commands.contains("vscode.open"));
        assert!(ctx.missing_symbols.contains("\"vscode\".commands"));
    }
}

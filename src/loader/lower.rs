//! Lowering: turns a parsed file into a [`SourceTree`] and fills a
//! [`TableOracle`] with everything the front end can prove while walking.
//!
//! Resolution is deliberately shallow and per-file: absolute paths rooted at
//! the source crate, `use`-aliases into it, annotated local bindings, and
//! provable literal-string bindings. Anything deeper would need a real type
//! checker, which this front end is not.

use std::path::PathBuf;

use anyhow::Result;
use proc_macro2::TokenTree;
use syn::spanned::Spanned;
use syn::visit::{self, Visit};
use syn::{Expr, ExprField, ExprLit, ExprMethodCall, ExprPath, Lit, Member, Pat, UseTree};

use super::scope::{Binding, ScopeStack, UseMap};
use crate::oracle::TableOracle;
use crate::profile::ApiProfile;
use crate::tree::{LineColumn, NodeId, NodeKind, SourceTree, Span};

/// A lowered file: the node arena plus the oracle for it.
#[derive(Debug, Clone)]
pub struct Lowered {
    pub tree: SourceTree,
    pub oracle: TableOracle,
}

/// Line-indexed view of the original text, for spans and snippets.
pub(crate) struct SourceText<'a> {
    source: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> SourceText<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        let mut line_starts = Vec::new();
        let mut offset = 0usize;
        for line in source.split_inclusive('\n') {
            line_starts.push(offset);
            offset += line.len();
        }
        if line_starts.is_empty() {
            line_starts.push(0);
        }
        Self { source, line_starts }
    }

    /// Byte offset of a parser position (1-based line, 0-based char column).
    fn offset(&self, position: proc_macro2::LineColumn) -> usize {
        let Some(&line_start) = self.line_starts.get(position.line.saturating_sub(1)) else {
            return self.source.len();
        };
        let line_end = self
            .line_starts
            .get(position.line)
            .copied()
            .unwrap_or(self.source.len());
        let line = &self.source[line_start..line_end];
        let mut chars = 0usize;
        for (byte, _) in line.char_indices() {
            if chars == position.column {
                return line_start + byte;
            }
            chars += 1;
        }
        line_end
    }

    pub(crate) fn snippet(&self, span: proc_macro2::Span) -> String {
        let start = self.offset(span.start());
        let end = self.offset(span.end()).max(start);
        self.source[start..end].to_string()
    }

    pub(crate) fn span(&self, span: proc_macro2::Span) -> Span {
        let start = span.start();
        let end = span.end();
        Span {
            start: LineColumn { line: start.line.saturating_sub(1), column: start.column },
            end: LineColumn { line: end.line.saturating_sub(1), column: end.column },
        }
    }
}

/// Parse and lower one program file.
pub fn lower_program_source(
    path: impl Into<PathBuf>,
    source: &str,
    profile: &ApiProfile,
) -> Result<Lowered> {
    let ast = syn::parse_file(source)?;
    let text = SourceText::new(source);
    let mut lowerer = Lowerer {
        tree: SourceTree::new(path),
        oracle: TableOracle::new(),
        parents: vec![0],
        text,
        source_namespace: &profile.source_namespace,
        uses: UseMap::default(),
        scopes: ScopeStack::new(),
    };
    lowerer.scopes.push();
    lowerer.prebind_module_items(&ast.items);
    lowerer.visit_file(&ast);
    Ok(Lowered { tree: lowerer.tree, oracle: lowerer.oracle })
}

struct Lowerer<'a> {
    tree: SourceTree,
    oracle: TableOracle,
    parents: Vec<NodeId>,
    text: SourceText<'a>,
    source_namespace: &'a str,
    uses: UseMap,
    scopes: ScopeStack,
}

struct Resolution {
    symbol: Option<String>,
    literal: Option<String>,
}

impl<'a> Lowerer<'a> {
    fn enter(&mut self, kind: NodeKind, span: proc_macro2::Span) -> NodeId {
        let parent = self.parents.last().copied().unwrap_or(0);
        let id = self.tree.push(parent, kind, self.text.span(span), self.text.snippet(span));
        self.parents.push(id);
        id
    }

    fn leave(&mut self) {
        self.parents.pop();
    }

    /// Module items are visible throughout the file, not just after their
    /// point of declaration, so aliases and literal consts bind up front.
    fn prebind_module_items(&mut self, items: &[syn::Item]) {
        for item in items {
            match item {
                syn::Item::Use(item_use) => {
                    let mut prefix = Vec::new();
                    for (alias, absolute, _) in use_leaves(&item_use.tree, &mut prefix) {
                        self.uses.record(alias, absolute);
                    }
                }
                syn::Item::Const(item_const) => {
                    if let Some(value) = literal_string(&item_const.expr) {
                        self.scopes.bind(
                            item_const.ident.to_string(),
                            Binding { type_fqn: None, literal: Some(value) },
                        );
                    }
                }
                syn::Item::Static(item_static) => {
                    if matches!(item_static.mutability, syn::StaticMutability::None) {
                        if let Some(value) = literal_string(&item_static.expr) {
                            self.scopes.bind(
                                item_static.ident.to_string(),
                                Binding { type_fqn: None, literal: Some(value) },
                            );
                        }
                    }
                }
                _ => {}
            }
        }
    }

    /// Absolute form of a path: rooted at the source crate directly or via a
    /// `use`-alias. `None` for everything else.
    fn resolve_api_path(&self, segments: &[String]) -> Option<String> {
        if segments.is_empty() {
            return None;
        }
        let absolute: Vec<String> = if segments[0] == self.source_namespace {
            segments.to_vec()
        } else if let Some(base) = self.uses.resolve(&segments[0]) {
            let mut joined = base.to_vec();
            joined.extend(segments[1..].iter().cloned());
            joined
        } else {
            return None;
        };
        if absolute[0] != self.source_namespace {
            return None;
        }
        Some(qualify(self.source_namespace, &absolute[1..]))
    }

    fn resolve_value_path(&self, path: &syn::Path) -> Option<Resolution> {
        let segments = path_idents(path);
        if segments.len() == 1 {
            if let Some(binding) = self.scopes.lookup(&segments[0]) {
                if binding.is_informative() {
                    return Some(Resolution {
                        symbol: binding.type_fqn.clone(),
                        literal: binding.literal.clone(),
                    });
                }
            }
        }
        self.resolve_api_path(&segments)
            .map(|symbol| Resolution { symbol: Some(symbol), literal: None })
    }

    fn resolve_type_fqn(&self, ty: &syn::Type) -> Option<String> {
        match ty {
            syn::Type::Path(type_path) if type_path.qself.is_none() => {
                self.resolve_api_path(&path_idents(&type_path.path))
            }
            syn::Type::Reference(reference) => self.resolve_type_fqn(&reference.elem),
            _ => None,
        }
    }

    /// Static type of a receiver expression, as far as bindings can tell.
    fn infer_expr_type(&self, expr: &Expr) -> Option<String> {
        match expr {
            Expr::Path(path) if path.qself.is_none() => {
                let segments = path_idents(&path.path);
                if segments.len() == 1 {
                    self.scopes.lookup(&segments[0])?.type_fqn.clone()
                } else {
                    None
                }
            }
            Expr::Paren(paren) => self.infer_expr_type(&paren.expr),
            Expr::Reference(reference) => self.infer_expr_type(&reference.expr),
            _ => None,
        }
    }

    fn lower_path_expr(&mut self, expr: &ExprPath) {
        let id = self.enter(NodeKind::Path, expr.span());
        if expr.qself.is_none() {
            if let Some(resolution) = self.resolve_value_path(&expr.path) {
                if let Some(symbol) = resolution.symbol {
                    self.oracle.record_symbol(id, symbol);
                }
                if let Some(literal) = resolution.literal {
                    self.oracle.record_literal(id, literal);
                }
            }
        }
        self.leave();
    }

    fn lower_lit(&mut self, expr: &ExprLit) {
        if let Lit::Str(lit) = &expr.lit {
            let id = self.enter(NodeKind::StrLit, expr.span());
            self.tree.set_literal(id, lit.value());
            self.leave();
        } else {
            self.enter(NodeKind::Expr, expr.span());
            self.leave();
        }
    }

    fn lower_method_call(&mut self, call: &'a ExprMethodCall) {
        self.enter(NodeKind::Call, call.span());
        let member = self.enter(NodeKind::Member, call.method.span());
        self.visit_expr(&call.receiver);
        if let Some(receiver_type) = self.infer_expr_type(&call.receiver) {
            self.oracle.record_symbol(member, format!("{receiver_type}.{}", call.method));
        }
        self.leave();
        for arg in &call.args {
            self.visit_expr(arg);
        }
        self.leave();
    }

    fn lower_field(&mut self, field: &'a ExprField) {
        let id = self.enter(NodeKind::Member, field.span());
        self.visit_expr(&field.base);
        if let Member::Named(name) = &field.member {
            if let Some(receiver_type) = self.infer_expr_type(&field.base) {
                self.oracle.record_symbol(id, format!("{receiver_type}.{name}"));
            }
        }
        self.leave();
    }

    fn lower_use_tree(&mut self, tree: &UseTree) {
        let mut prefix = Vec::new();
        for (alias, absolute, span) in use_leaves(tree, &mut prefix) {
            self.uses.record(alias, absolute.clone());
            if absolute.first().map(String::as_str) == Some(self.source_namespace) {
                let id = self.enter(NodeKind::Path, span);
                self.oracle
                    .record_symbol(id, qualify(self.source_namespace, &absolute[1..]));
                self.leave();
            }
        }
    }

    fn bind_fn_inputs(&mut self, inputs: &syn::punctuated::Punctuated<syn::FnArg, syn::Token![,]>) {
        for input in inputs {
            if let syn::FnArg::Typed(pat_type) = input {
                if let Pat::Ident(pat_ident) = &*pat_type.pat {
                    if let Some(type_fqn) = self.resolve_type_fqn(&pat_type.ty) {
                        self.scopes.bind(
                            pat_ident.ident.to_string(),
                            Binding { type_fqn: Some(type_fqn), literal: None },
                        );
                    }
                }
            }
        }
    }

    fn bind_local(&mut self, local: &syn::Local) {
        let (pat_ident, annotation) = match &local.pat {
            Pat::Ident(pat_ident) => (pat_ident, None),
            Pat::Type(pat_type) => match &*pat_type.pat {
                Pat::Ident(pat_ident) => (pat_ident, Some(&*pat_type.ty)),
                _ => return,
            },
            _ => return,
        };
        let mut binding = Binding::default();
        if let Some(ty) = annotation {
            binding.type_fqn = self.resolve_type_fqn(ty);
        }
        if let Some(init) = &local.init {
            match &*init.expr {
                expr @ Expr::Lit(_) => {
                    // A `let mut` can be reassigned, so only an immutable
                    // binding carries a provable literal value.
                    if pat_ident.mutability.is_none() {
                        binding.literal = literal_string(expr);
                    }
                }
                Expr::Path(path) if path.qself.is_none() && path.path.segments.len() == 1 => {
                    let name = path.path.segments[0].ident.to_string();
                    if let Some(previous) = self.scopes.lookup(&name) {
                        if binding.type_fqn.is_none() {
                            binding.type_fqn = previous.type_fqn.clone();
                        }
                        if pat_ident.mutability.is_none() {
                            binding.literal = previous.literal.clone();
                        }
                    }
                }
                _ => {}
            }
        }
        if binding.is_informative() {
            self.scopes.bind(pat_ident.ident.to_string(), binding);
        }
    }

    fn lower_macro_tokens(&mut self, tokens: proc_macro2::TokenStream) {
        for token in tokens {
            match token {
                TokenTree::Group(group) => self.lower_macro_tokens(group.stream()),
                TokenTree::Literal(literal) => {
                    if let Lit::Str(lit) = Lit::new(literal.clone()) {
                        let id = self.enter(NodeKind::StrLit, literal.span());
                        self.tree.set_literal(id, lit.value());
                        self.leave();
                    }
                }
                _ => {}
            }
        }
    }
}

impl<'ast> Visit<'ast> for Lowerer<'ast> {
    fn visit_expr(&mut self, node: &'ast Expr) {
        match node {
            Expr::Call(call) => {
                self.enter(NodeKind::Call, call.span());
                self.visit_expr(&call.func);
                for arg in &call.args {
                    self.visit_expr(arg);
                }
                self.leave();
            }
            Expr::MethodCall(call) => self.lower_method_call(call),
            Expr::Field(field) => self.lower_field(field),
            Expr::Path(path) => self.lower_path_expr(path),
            Expr::Lit(lit) => self.lower_lit(lit),
            Expr::Closure(closure) => {
                self.enter(NodeKind::Expr, closure.span());
                self.scopes.push();
                visit::visit_expr_closure(self, closure);
                self.scopes.pop();
                self.leave();
            }
            _ => {
                self.enter(NodeKind::Expr, node.span());
                visit::visit_expr(self, node);
                self.leave();
            }
        }
    }

    fn visit_type_path(&mut self, node: &'ast syn::TypePath) {
        let id = self.enter(NodeKind::Type, node.span());
        if node.qself.is_none() {
            if let Some(fqn) = self.resolve_api_path(&path_idents(&node.path)) {
                self.oracle.record_symbol(id, fqn);
            }
        }
        visit::visit_type_path(self, node);
        self.leave();
    }

    fn visit_item_use(&mut self, node: &'ast syn::ItemUse) {
        self.enter(NodeKind::Item, node.span());
        self.lower_use_tree(&node.tree);
        self.leave();
    }

    fn visit_item_fn(&mut self, node: &'ast syn::ItemFn) {
        self.enter(NodeKind::Item, node.span());
        self.scopes.push();
        self.bind_fn_inputs(&node.sig.inputs);
        visit::visit_item_fn(self, node);
        self.scopes.pop();
        self.leave();
    }

    fn visit_impl_item_fn(&mut self, node: &'ast syn::ImplItemFn) {
        self.enter(NodeKind::Item, node.span());
        self.scopes.push();
        self.bind_fn_inputs(&node.sig.inputs);
        visit::visit_impl_item_fn(self, node);
        self.scopes.pop();
        self.leave();
    }

    fn visit_item_mod(&mut self, node: &'ast syn::ItemMod) {
        self.enter(NodeKind::Item, node.span());
        self.scopes.push();
        visit::visit_item_mod(self, node);
        self.scopes.pop();
        self.leave();
    }

    fn visit_item_const(&mut self, node: &'ast syn::ItemConst) {
        self.enter(NodeKind::Item, node.span());
        visit::visit_item_const(self, node);
        self.leave();
        if let Some(value) = literal_string(&node.expr) {
            self.scopes
                .bind(node.ident.to_string(), Binding { type_fqn: None, literal: Some(value) });
        }
    }

    fn visit_item_static(&mut self, node: &'ast syn::ItemStatic) {
        self.enter(NodeKind::Item, node.span());
        visit::visit_item_static(self, node);
        self.leave();
        if matches!(node.mutability, syn::StaticMutability::None) {
            if let Some(value) = literal_string(&node.expr) {
                self.scopes
                    .bind(node.ident.to_string(), Binding { type_fqn: None, literal: Some(value) });
            }
        }
    }

    fn visit_block(&mut self, node: &'ast syn::Block) {
        self.scopes.push();
        visit::visit_block(self, node);
        self.scopes.pop();
    }

    fn visit_local(&mut self, node: &'ast syn::Local) {
        self.enter(NodeKind::Stmt, node.span());
        visit::visit_local(self, node);
        self.leave();
        self.bind_local(node);
    }

    fn visit_macro(&mut self, node: &'ast syn::Macro) {
        self.lower_macro_tokens(node.tokens.clone());
        visit::visit_macro(self, node);
    }
}

fn path_idents(path: &syn::Path) -> Vec<String> {
    path.segments.iter().map(|segment| segment.ident.to_string()).collect()
}

fn qualify(namespace: &str, segments: &[String]) -> String {
    let mut name = format!("\"{namespace}\"");
    for segment in segments {
        name.push('.');
        name.push_str(segment);
    }
    name
}

fn literal_string(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Lit(ExprLit { lit: Lit::Str(lit), .. }) => Some(lit.value()),
        _ => None,
    }
}

/// Flatten a use tree into `(alias, absolute path, span)` leaves.
fn use_leaves(
    tree: &UseTree,
    prefix: &mut Vec<String>,
) -> Vec<(String, Vec<String>, proc_macro2::Span)> {
    let mut out = Vec::new();
    match tree {
        UseTree::Path(path) => {
            prefix.push(path.ident.to_string());
            out.extend(use_leaves(&path.tree, prefix));
            prefix.pop();
        }
        UseTree::Name(name) => {
            let mut absolute = prefix.clone();
            absolute.push(name.ident.to_string());
            out.push((name.ident.to_string(), absolute, name.ident.span()));
        }
        UseTree::Rename(rename) => {
            let mut absolute = prefix.clone();
            absolute.push(rename.ident.to_string());
            out.push((rename.rename.to_string(), absolute, rename.rename.span()));
        }
        UseTree::Group(group) => {
            for item in &group.items {
                out.extend(use_leaves(item, prefix));
            }
        }
        UseTree::Glob(_) => {}
    }
    out
}

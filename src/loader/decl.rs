//! Declaration lowering: walks an API surface file and attributes to every
//! declared item its fully qualified name under the surface's namespace.
//!
//! Used for the embedded reference surface; the resulting tree and oracle
//! feed the index builder through the same walk as everything else.

use std::path::PathBuf;

use anyhow::Result;

use super::lower::{Lowered, SourceText};
use crate::oracle::TableOracle;
use crate::tree::{NodeId, NodeKind, SourceTree};

/// Parse a declaration surface and lower every exported name.
pub fn lower_declaration_source(
    path: impl Into<PathBuf>,
    source: &str,
    namespace: &str,
) -> Result<Lowered> {
    let ast = syn::parse_file(source)?;
    let text = SourceText::new(source);
    let mut lowerer = DeclLowerer {
        tree: SourceTree::new(path),
        oracle: TableOracle::new(),
        text,
        namespace,
        module_path: Vec::new(),
    };
    lowerer.lower_items(0, &ast.items);
    Ok(Lowered { tree: lowerer.tree, oracle: lowerer.oracle })
}

struct DeclLowerer<'a> {
    tree: SourceTree,
    oracle: TableOracle,
    text: SourceText<'a>,
    namespace: &'a str,
    module_path: Vec<String>,
}

impl DeclLowerer<'_> {
    fn qualified(&self, trail: &[&str]) -> String {
        let mut name = format!("\"{}\"", self.namespace);
        for segment in &self.module_path {
            name.push('.');
            name.push_str(segment);
        }
        for segment in trail {
            name.push('.');
            name.push_str(segment);
        }
        name
    }

    /// Create a node for a declared name and record its qualified name.
    fn declare(&mut self, parent: NodeId, span: proc_macro2::Span, trail: &[&str]) -> NodeId {
        let id =
            self.tree.push(parent, NodeKind::Item, self.text.span(span), self.text.snippet(span));
        self.oracle.record_symbol(id, self.qualified(trail));
        id
    }

    fn lower_items(&mut self, parent: NodeId, items: &[syn::Item]) {
        for item in items {
            self.lower_item(parent, item);
        }
    }

    fn lower_item(&mut self, parent: NodeId, item: &syn::Item) {
        match item {
            syn::Item::Mod(module) => {
                let name = module.ident.to_string();
                let id = self.declare(parent, module.ident.span(), &[name.as_str()]);
                if let Some((_, items)) = &module.content {
                    self.module_path.push(name);
                    self.lower_items(id, items);
                    self.module_path.pop();
                }
            }
            syn::Item::Struct(item) => {
                let name = item.ident.to_string();
                let id = self.declare(parent, item.ident.span(), &[name.as_str()]);
                for field in &item.fields {
                    if let Some(ident) = &field.ident {
                        let field_name = ident.to_string();
                        self.declare(id, ident.span(), &[name.as_str(), field_name.as_str()]);
                    }
                }
            }
            syn::Item::Enum(item) => {
                let name = item.ident.to_string();
                let id = self.declare(parent, item.ident.span(), &[name.as_str()]);
                for variant in &item.variants {
                    let variant_name = variant.ident.to_string();
                    self.declare(id, variant.ident.span(), &[name.as_str(), variant_name.as_str()]);
                }
            }
            syn::Item::Trait(item) => {
                let name = item.ident.to_string();
                let id = self.declare(parent, item.ident.span(), &[name.as_str()]);
                for member in &item.items {
                    if let syn::TraitItem::Fn(method) = member {
                        let method_name = method.sig.ident.to_string();
                        self.declare(
                            id,
                            method.sig.ident.span(),
                            &[name.as_str(), method_name.as_str()],
                        );
                    }
                }
            }
            syn::Item::Impl(item) => {
                let syn::Type::Path(type_path) = &*item.self_ty else {
                    return;
                };
                let Some(last) = type_path.path.segments.last() else {
                    return;
                };
                let name = last.ident.to_string();
                let id = self.tree.push(
                    parent,
                    NodeKind::Item,
                    self.text.span(last.ident.span()),
                    self.text.snippet(last.ident.span()),
                );
                for member in &item.items {
                    if let syn::ImplItem::Fn(method) = member {
                        let method_name = method.sig.ident.to_string();
                        self.declare(
                            id,
                            method.sig.ident.span(),
                            &[name.as_str(), method_name.as_str()],
                        );
                    }
                }
            }
            syn::Item::Fn(item) => {
                let name = item.sig.ident.to_string();
                self.declare(parent, item.sig.ident.span(), &[name.as_str()]);
            }
            syn::Item::Const(item) => {
                let name = item.ident.to_string();
                self.declare(parent, item.ident.span(), &[name.as_str()]);
            }
            syn::Item::Static(item) => {
                let name = item.ident.to_string();
                self.declare(parent, item.ident.span(), &[name.as_str()]);
            }
            syn::Item::Type(item) => {
                let name = item.ident.to_string();
                self.declare(parent, item.ident.span(), &[name.as_str()]);
            }
            _ => {}
        }
    }
}

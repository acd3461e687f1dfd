//! Lowered source representation: a flat arena of nodes with parent/child
//! links, walked depth-first pre-order.
//!
//! The front end lowers each parsed file into a [`SourceTree`]; the analysis
//! only ever sees this representation, never the parser's own AST.

use std::path::{Path, PathBuf};

use anyhow::Result;

pub type NodeId = usize;

/// Zero-based position within a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineColumn {
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: LineColumn,
    pub end: LineColumn,
}

/// Structural shape of a lowered node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Whole-file node, always id 0.
    Root,
    Item,
    Stmt,
    /// Expression with no more specific shape.
    Expr,
    /// Call expression; children are laid out `[callee, arg0, arg1, ..]`.
    Call,
    /// Member access (`recv.method`, `recv.field`); the receiver is its child.
    Member,
    Path,
    /// String-literal-like node; `literal` holds the unquoted text.
    StrLit,
    Type,
}

#[derive(Debug, Clone)]
pub struct SourceNode {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub kind: NodeKind,
    pub span: Span,
    /// Exact source text of the node.
    pub snippet: String,
    /// Unquoted literal value, present only on string-literal-like nodes.
    pub literal: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SourceTree {
    file: PathBuf,
    nodes: Vec<SourceNode>,
}

impl SourceTree {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        let root = SourceNode {
            id: 0,
            parent: None,
            children: Vec::new(),
            kind: NodeKind::Root,
            span: Span::default(),
            snippet: String::new(),
            literal: None,
        };
        Self { file: file.into(), nodes: vec![root] }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn root(&self) -> NodeId {
        0
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn node(&self, id: NodeId) -> &SourceNode {
        &self.nodes[id]
    }

    pub fn parent(&self, id: NodeId) -> Option<&SourceNode> {
        self.nodes[id].parent.map(|p| &self.nodes[p])
    }

    /// First call argument, assuming the `[callee, arg0, ..]` child layout.
    pub fn first_argument(&self, call: NodeId) -> Option<NodeId> {
        let node = &self.nodes[call];
        if node.kind != NodeKind::Call {
            return None;
        }
        node.children.get(1).copied()
    }

    /// Append a node under `parent` and return its id.
    pub fn push(
        &mut self,
        parent: NodeId,
        kind: NodeKind,
        span: Span,
        snippet: impl Into<String>,
    ) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(SourceNode {
            id,
            parent: Some(parent),
            children: Vec::new(),
            kind,
            span,
            snippet: snippet.into(),
            literal: None,
        });
        self.nodes[parent].children.push(id);
        id
    }

    pub fn set_literal(&mut self, id: NodeId, value: impl Into<String>) {
        self.nodes[id].literal = Some(value.into());
    }

    /// Depth-first pre-order walk over the whole tree, using a heap stack so
    /// deeply nested sources cannot overflow the OS stack.
    ///
    /// A visitor error is confined to its node: the walk discards it and
    /// still descends into the node's children.
    pub fn walk(&self, visit: &mut dyn FnMut(&SourceNode) -> Result<()>) {
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            let _ = visit(node);
            for &child in node.children.iter().rev() {
                stack.push(child);
            }
        }
    }
}

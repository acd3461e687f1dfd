//! Reference symbol index: every qualified name the reference API exports.
//!
//! Built once per process from the embedded declaration surface and read-only
//! afterwards.

use anyhow::Result;

use std::collections::BTreeSet;

use crate::loader::load_declaration;
use crate::oracle::TypeOracle;
use crate::profile::ApiProfile;
use crate::tree::SourceTree;

/// The reference API's declaration surface, shipped with the binary so that
/// a check needs no per-run configuration to know what the target exports.
pub const REFERENCE_SURFACE: &str = include_str!("../assets/theia_surface.rs");

/// Set of reference-API qualified names.
#[derive(Debug, Clone, Default)]
pub struct SymbolIndex {
    names: BTreeSet<String>,
}

impl SymbolIndex {
    pub fn insert(&mut self, name: String) {
        self.names.insert(name);
    }

    pub fn remove(&mut self, name: &str) {
        self.names.remove(name);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// Walk a lowered declaration tree and collect every qualified name under the
/// reference namespace marker.
///
/// Nodes the oracle knows nothing about are skipped; the walk itself never
/// aborts, so the index for a fixed surface is deterministic.
pub fn build_reference_index(
    tree: &SourceTree,
    oracle: &dyn TypeOracle,
    reference_marker: &str,
) -> SymbolIndex {
    let mut index = SymbolIndex::default();
    tree.walk(&mut |node| {
        if let Some(name) = oracle.symbol_at(node.id) {
            if name.starts_with(reference_marker) {
                index.insert(name);
            }
        }
        Ok(())
    });
    index
}

/// Parse the embedded reference surface and build the index for a profile.
pub fn load_reference_index(profile: &ApiProfile) -> Result<SymbolIndex> {
    let surface =
        load_declaration("theia_surface.rs", REFERENCE_SURFACE, &profile.reference_namespace)?;
    Ok(build_reference_index(&surface.tree, &surface.oracle, &profile.reference_marker()))
}

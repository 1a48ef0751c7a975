//! Core types for the reference graph.
//!
//! Defines constant kinds, per-node records, and the discovery-ordered
//! node table produced by the builder.

use indexmap::map::Entry;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::name::Name;

/// Classification of a declaration, assigned once when the node is discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConstantKind {
    Definition,
    Theorem,
    Axiom,
    /// Any other declaration form: inductives, constructors, recursors,
    /// opaque constants, quotients.
    Other,
}

impl fmt::Display for ConstantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstantKind::Definition => write!(f, "Definition"),
            ConstantKind::Theorem => write!(f, "Theorem"),
            ConstantKind::Axiom => write!(f, "Axiom"),
            ConstantKind::Other => write!(f, "Other"),
        }
    }
}

/// A single expanded declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRecord {
    pub name: Name,
    pub kind: ConstantKind,
    /// Direct references in repository order. Empty for opaque symbols.
    pub references: Vec<Name>,
}

impl NodeRecord {
    pub fn new(name: Name, kind: ConstantKind, references: Vec<Name>) -> Self {
        Self {
            name,
            kind,
            references,
        }
    }

    /// True if this node references its own name.
    pub fn is_self_referential(&self) -> bool {
        self.references.contains(&self.name)
    }
}

/// Node table keyed by name, iterated in discovery order (root first).
///
/// Append-only: a name inserted once is never overwritten.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphModel {
    nodes: IndexMap<Name, NodeRecord>,
}

impl GraphModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record unless its name is already present.
    ///
    /// Returns `false` and leaves the existing record untouched on a repeat.
    pub(crate) fn insert(&mut self, record: NodeRecord) -> bool {
        match self.nodes.entry(record.name.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(record);
                true
            }
        }
    }

    pub fn contains(&self, name: &Name) -> bool {
        self.nodes.contains_key(name)
    }

    pub fn get(&self, name: &Name) -> Option<&NodeRecord> {
        self.nodes.get(name)
    }

    /// The first discovered node, i.e. the root of a built graph.
    pub fn root(&self) -> Option<&NodeRecord> {
        self.nodes.first().map(|(_, record)| record)
    }

    /// Records in discovery order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeRecord> {
        self.nodes.values()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total number of reference entries across all nodes.
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|n| n.references.len()).sum()
    }

    /// Referenced names that were never expanded, in first-seen order.
    pub fn dangling(&self) -> Vec<&Name> {
        let mut seen: IndexSet<&Name> = IndexSet::new();
        for record in self.nodes.values() {
            for reference in &record.references {
                if !self.nodes.contains_key(reference) {
                    seen.insert(reference);
                }
            }
        }
        seen.into_iter().collect()
    }
}

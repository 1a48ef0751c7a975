//! Directed-graph view of a serialized reference graph.
//!
//! Mirrors what a renderer does with the JSON output: one vertex per node,
//! one edge per reference. Dangling references get a stub vertex instead of
//! failing the load.

use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;

use super::types::{ConstantKind, GraphModel};
use crate::name::Name;
use crate::serialize::WireNode;

/// Vertex weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vertex {
    pub name: Name,
    /// `None` for frontier stubs that were never expanded.
    pub kind: Option<ConstantKind>,
}

impl Vertex {
    pub fn is_stub(&self) -> bool {
        self.kind.is_none()
    }
}

/// Counts over a [`ReferenceGraph`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ViewStats {
    pub nodes: usize,
    pub stubs: usize,
    pub edges: usize,
    pub self_loops: usize,
}

impl fmt::Display for ViewStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} nodes ({} frontier stubs), {} edges, {} self-loops",
            self.nodes, self.stubs, self.edges, self.self_loops
        )
    }
}

/// A petgraph projection of the node list.
pub struct ReferenceGraph {
    graph: DiGraph<Vertex, ()>,
    index: HashMap<Name, NodeIndex>,
}

impl ReferenceGraph {
    /// Build from wire nodes, in array order then reference order.
    pub fn from_nodes(nodes: Vec<WireNode>) -> Self {
        let mut view = Self {
            graph: DiGraph::new(),
            index: HashMap::with_capacity(nodes.len()),
        };

        // Phase 1: expanded nodes
        for node in &nodes {
            view.vertex(node.name.clone(), Some(node.const_type));
        }

        // Phase 2: references, creating stubs for dangling targets. A
        // repeated name keeps only its first record's edges.
        let mut expanded = HashSet::with_capacity(nodes.len());
        for node in nodes {
            if !expanded.insert(node.name.clone()) {
                continue;
            }
            let from = view.index[&node.name];
            for reference in node.references {
                let to = view.vertex(reference, None);
                view.graph.add_edge(from, to, ());
            }
        }

        view
    }

    /// Build directly from an in-memory model.
    pub fn from_model(model: &GraphModel) -> Self {
        Self::from_nodes(model.nodes().map(WireNode::from).collect())
    }

    fn vertex(&mut self, name: Name, kind: Option<ConstantKind>) -> NodeIndex {
        if let Some(&idx) = self.index.get(&name) {
            return idx;
        }
        let idx = self.graph.add_node(Vertex {
            name: name.clone(),
            kind,
        });
        self.index.insert(name, idx);
        idx
    }

    pub fn inner_graph(&self) -> &DiGraph<Vertex, ()> {
        &self.graph
    }

    pub fn find(&self, name: &Name) -> Option<&Vertex> {
        self.index.get(name).map(|&idx| &self.graph[idx])
    }

    pub fn stats(&self) -> ViewStats {
        let stubs = self.graph.node_weights().filter(|v| v.is_stub()).count();
        let self_loops = self
            .graph
            .raw_edges()
            .iter()
            .filter(|e| e.source() == e.target())
            .count();
        ViewStats {
            nodes: self.graph.node_count(),
            stubs,
            edges: self.graph.edge_count(),
            self_loops,
        }
    }
}

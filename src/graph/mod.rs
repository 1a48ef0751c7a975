//! Reference graph module.
//!
//! Provides the node data model, the bounded BFS builder, and a petgraph
//! view for downstream consumers.

pub mod builder;
pub mod types;
pub mod view;

pub use builder::{BuildStats, GraphBuilder, MAX_ROUNDS};
pub use types::{ConstantKind, GraphModel, NodeRecord};
pub use view::{ReferenceGraph, Vertex, ViewStats};

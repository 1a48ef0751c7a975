//! # refgraph
//!
//! Extracts the reference graph rooted at one declaration of a formal
//! library and writes it as JSON for a graph visualizer.
//!
//! ## Key Features
//!
//! - **Bounded**: breadth-first expansion capped at [`MAX_ROUNDS`] rounds
//! - **Deduplicated**: every declaration appears once, cycles included
//! - **Deterministic**: same root and library, byte-identical output
//! - **Pluggable**: any [`SymbolRepository`] can back the search
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use refgraph::{serialize, FileSink, GraphBuilder, InMemoryRepository, Name, Sink};
//! use std::path::Path;
//!
//! let repo = InMemoryRepository::load(Path::new("env.json"))?;
//! let root = Name::parse("Nat.add_comm")?;
//! let graph = GraphBuilder::new(&repo).build(&root)?;
//! FileSink::new(".").write(&root, &serialize(&graph)?)?;
//! # Ok::<(), refgraph::RefGraphError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod graph;
pub mod name;
pub mod repository;
pub mod serialize;
pub mod sink;

use std::path::PathBuf;

// Re-exports for convenience
pub use config::RefGraphConfig;
pub use error::{RefGraphError, Result};
pub use graph::{
    BuildStats, ConstantKind, GraphBuilder, GraphModel, NodeRecord, ReferenceGraph, ViewStats,
    MAX_ROUNDS,
};
pub use name::{Name, NameComponent};
pub use repository::{DeclarationForm, InMemoryRepository, SymbolRepository};
pub use serialize::{deserialize, serialize, serialize_pretty, WireNode};
pub use sink::{FileSink, Sink};

/// Serialize `graph` and hand it to `sink` under `root`'s name.
///
/// On failure the graph is untouched and can be written to another sink.
pub fn write_graph<S: Sink + ?Sized>(
    graph: &GraphModel,
    root: &Name,
    sink: &mut S,
    pretty: bool,
) -> Result<PathBuf> {
    let bytes = if pretty {
        serialize_pretty(graph)?
    } else {
        serialize(graph)?
    };
    sink.write(root, &bytes)
}

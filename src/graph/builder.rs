//! Graph builder — expands a root declaration into its reference graph.
//!
//! Runs a breadth-first search over the reference relation, capped at
//! [`MAX_ROUNDS`] rounds. Each round resolves the whole frontier against the
//! repository (in parallel by default), then commits the results to the node
//! table and derives the next frontier from the committed state.

use indexmap::IndexSet;
use rayon::prelude::*;
use tracing::{debug, info, trace};

use super::types::{GraphModel, NodeRecord};
use crate::error::{RefGraphError, Result};
use crate::name::Name;
use crate::repository::SymbolRepository;

/// Hard cap on expansion rounds. Names first discovered in the last round
/// stay as dangling references.
pub const MAX_ROUNDS: usize = 10;

/// Summary of a finished build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildStats {
    /// Expansion rounds actually run.
    pub rounds: usize,
    /// True if the cap stopped the search with names still unexpanded.
    pub truncated: bool,
}

/// Bounded BFS over a [`SymbolRepository`].
pub struct GraphBuilder<R> {
    repo: R,
    parallel: bool,
}

impl<R: SymbolRepository> GraphBuilder<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            parallel: true,
        }
    }

    /// Toggle parallel frontier resolution. Output is identical either way.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Build the reference graph rooted at `root`.
    pub fn build(&self, root: &Name) -> Result<GraphModel> {
        self.build_with_stats(root).map(|(graph, _)| graph)
    }

    /// Like [`build`](Self::build), also reporting how the search ended.
    pub fn build_with_stats(&self, root: &Name) -> Result<(GraphModel, BuildStats)> {
        if !self.repo.contains(root) {
            return Err(RefGraphError::UnresolvedRoot { name: root.clone() });
        }

        let mut graph = GraphModel::new();
        let mut frontier: IndexSet<Name> = IndexSet::from([root.clone()]);
        let mut rounds = 0;

        while rounds < MAX_ROUNDS && !frontier.is_empty() {
            rounds += 1;
            debug!(
                round = rounds,
                frontier = frontier.len(),
                nodes = graph.len(),
                "expanding frontier"
            );

            // Lookups only read the repository; nothing touches the graph
            // until every frontier member is resolved.
            let resolved = self.resolve(&frontier);

            for (name, references) in resolved {
                let kind = self.repo.classify(&name);
                graph.insert(NodeRecord::new(name, kind, references));
            }

            // Filter against the committed graph so same-round self and
            // mutual references are never re-enqueued.
            let mut next = IndexSet::new();
            for name in &frontier {
                let Some(record) = graph.get(name) else {
                    continue;
                };
                for reference in &record.references {
                    if !graph.contains(reference) {
                        next.insert(reference.clone());
                    }
                }
            }
            frontier = next;
        }

        let stats = BuildStats {
            rounds,
            truncated: !frontier.is_empty(),
        };
        info!(
            root = %root,
            nodes = graph.len(),
            rounds,
            dangling = frontier.len(),
            truncated = stats.truncated,
            "reference graph built"
        );
        Ok((graph, stats))
    }

    /// Resolve every frontier member, preserving frontier order.
    fn resolve(&self, frontier: &IndexSet<Name>) -> Vec<(Name, Vec<Name>)> {
        let names: Vec<&Name> = frontier.iter().collect();
        if self.parallel {
            names
                .par_iter()
                .map(|name| self.resolve_one(name))
                .collect()
        } else {
            names.iter().map(|name| self.resolve_one(name)).collect()
        }
    }

    fn resolve_one(&self, name: &Name) -> (Name, Vec<Name>) {
        let references = self.repo.lookup_body(name).unwrap_or_else(|| {
            trace!(name = %name, "no body; treating as leaf");
            Vec::new()
        });
        (name.clone(), references)
    }
}

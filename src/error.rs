//! Error types for refgraph.
//!
//! Opaque symbols are not errors: they resolve to an empty reference list.
//! Only an unresolvable root aborts a build.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::name::Name;

/// Errors produced by graph extraction, serialization, and persistence.
#[derive(Debug, Error)]
pub enum RefGraphError {
    /// The root name is unknown to the symbol repository.
    #[error("unresolved root: {name}")]
    UnresolvedRoot { name: Name },

    /// The serialized graph could not be persisted.
    #[error("failed to write {}: {source}", .path.display())]
    SinkWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A serialized graph lists the same node twice.
    #[error("duplicate node in serialized graph: {name}")]
    DuplicateNode { name: Name },

    /// JSON encoding or decoding failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An environment dump could not be loaded.
    #[error("failed to load environment {}: {reason}", .path.display())]
    EnvironmentLoad { path: PathBuf, reason: String },

    /// A string is not a well-formed name.
    #[error("invalid name {input:?}: {reason}")]
    InvalidName { input: String, reason: String },

    /// A configuration file could not be parsed.
    #[error("invalid config {}: {reason}", .path.display())]
    Config { path: PathBuf, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl RefGraphError {
    pub(crate) fn invalid_name(input: &str, reason: impl Into<String>) -> Self {
        RefGraphError::InvalidName {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns true if the build failed because the root could not be resolved.
    pub fn is_unresolved_root(&self) -> bool {
        matches!(self, RefGraphError::UnresolvedRoot { .. })
    }

    /// Returns true if the graph was built but could not be written.
    pub fn is_sink_write(&self) -> bool {
        matches!(self, RefGraphError::SinkWrite { .. })
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, RefGraphError>;

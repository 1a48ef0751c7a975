//! Output sinks for serialized graphs.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{RefGraphError, Result};
use crate::name::Name;

/// Destination for a serialized graph, keyed by its root name.
pub trait Sink {
    /// Persist `bytes`, returning where they went.
    fn write(&mut self, root: &Name, bytes: &[u8]) -> Result<PathBuf>;
}

/// Writes `<root>.json` into a directory.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Output path for a given root. Always a direct child of the sink's
    /// directory.
    pub fn path_for(&self, root: &Name) -> PathBuf {
        self.dir.join(format!("{}.json", file_stem(root)))
    }

    fn write_file(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(bytes)?;
        writer.flush()?;
        Ok(())
    }
}

/// Canonical name with path separators and `%` percent-encoded.
///
/// The mapping is injective, so distinct roots never share an output file.
/// A canonical name never starts with `.`, so the stem is never hidden or
/// a parent reference.
fn file_stem(root: &Name) -> String {
    let canonical = root.to_string();
    let mut stem = String::with_capacity(canonical.len());
    for c in canonical.chars() {
        match c {
            '%' => stem.push_str("%25"),
            '/' => stem.push_str("%2F"),
            '\\' => stem.push_str("%5C"),
            _ => stem.push(c),
        }
    }
    stem
}

impl Sink for FileSink {
    fn write(&mut self, root: &Name, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.path_for(root);
        Self::write_file(&path, bytes).map_err(|source| RefGraphError::SinkWrite {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), bytes = bytes.len(), "graph written");
        Ok(path)
    }
}

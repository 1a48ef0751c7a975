//! In-memory repository backed by an environment dump.
//!
//! The dump is a JSON or YAML array of declarations:
//!
//! ```json
//! [
//!   { "name": "Nat.add_comm", "form": "theorem", "references": ["Nat.add", "Eq"] },
//!   { "name": "propext", "form": "axiom" }
//! ]
//! ```
//!
//! A missing `references` field marks the declaration as opaque.

use indexmap::map::Entry;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

use super::SymbolRepository;
use crate::error::{RefGraphError, Result};
use crate::graph::ConstantKind;
use crate::name::Name;

/// The syntactic form a declaration was introduced with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationForm {
    Definition,
    Theorem,
    Axiom,
    Opaque,
    Inductive,
    Constructor,
    Recursor,
    Quotient,
}

impl DeclarationForm {
    pub fn constant_kind(self) -> ConstantKind {
        match self {
            DeclarationForm::Definition => ConstantKind::Definition,
            DeclarationForm::Theorem => ConstantKind::Theorem,
            DeclarationForm::Axiom => ConstantKind::Axiom,
            DeclarationForm::Opaque
            | DeclarationForm::Inductive
            | DeclarationForm::Constructor
            | DeclarationForm::Recursor
            | DeclarationForm::Quotient => ConstantKind::Other,
        }
    }
}

/// A declaration stored in the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub form: DeclarationForm,
    /// `None` for declarations without an accessible body.
    pub body: Option<Vec<Name>>,
}

/// One entry of an environment dump file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DumpEntry {
    name: Name,
    form: DeclarationForm,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    references: Option<Vec<Name>>,
}

/// A repository holding every declaration in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    decls: IndexMap<Name, Declaration>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a declaration with a body. Duplicate references keep their first
    /// occurrence. Replaces any previous declaration of the same name.
    pub fn define(&mut self, name: Name, form: DeclarationForm, references: Vec<Name>) {
        let body = dedup(references);
        self.decls.insert(
            name,
            Declaration {
                form,
                body: Some(body),
            },
        );
    }

    /// Add a declaration without a body.
    pub fn declare_opaque(&mut self, name: Name, form: DeclarationForm) {
        self.decls.insert(name, Declaration { form, body: None });
    }

    pub fn get(&self, name: &Name) -> Option<&Declaration> {
        self.decls.get(name)
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// Load an environment dump, choosing JSON or YAML by file extension.
    pub fn load(path: &Path) -> Result<Self> {
        let load_err = |reason: String| RefGraphError::EnvironmentLoad {
            path: path.to_path_buf(),
            reason,
        };

        let text = fs::read_to_string(path).map_err(|e| load_err(e.to_string()))?;
        let entries: Vec<DumpEntry> = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => {
                serde_yaml::from_str(&text).map_err(|e| load_err(e.to_string()))?
            }
            _ => serde_json::from_str(&text).map_err(|e| load_err(e.to_string()))?,
        };

        let repo = Self::from_entries(entries).map_err(load_err)?;
        debug!(
            path = %path.display(),
            declarations = repo.len(),
            "loaded environment"
        );
        Ok(repo)
    }

    fn from_entries(entries: Vec<DumpEntry>) -> std::result::Result<Self, String> {
        if entries.is_empty() {
            return Err("environment contains no declarations".to_string());
        }

        let mut decls = IndexMap::with_capacity(entries.len());
        for entry in entries {
            match decls.entry(entry.name) {
                Entry::Occupied(slot) => {
                    return Err(format!("duplicate declaration {}", slot.key()));
                }
                Entry::Vacant(slot) => {
                    slot.insert(Declaration {
                        form: entry.form,
                        body: entry.references.map(dedup),
                    });
                }
            }
        }
        Ok(Self { decls })
    }
}

fn dedup(references: Vec<Name>) -> Vec<Name> {
    references
        .into_iter()
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}

impl SymbolRepository for InMemoryRepository {
    fn contains(&self, name: &Name) -> bool {
        self.decls.contains_key(name)
    }

    fn lookup_body(&self, name: &Name) -> Option<Vec<Name>> {
        self.decls.get(name)?.body.clone()
    }

    fn classify(&self, name: &Name) -> ConstantKind {
        self.decls
            .get(name)
            .map_or(ConstantKind::Other, |d| d.form.constant_kind())
    }
}

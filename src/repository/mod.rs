//! Symbol repository interface.
//!
//! The builder never resolves names itself; it asks a [`SymbolRepository`]
//! handed in by the caller. Implementations must be safe to query from
//! several threads at once, since one BFS round resolves its whole frontier
//! in parallel.

pub mod memory;

pub use memory::{Declaration, DeclarationForm, InMemoryRepository};

use crate::graph::ConstantKind;
use crate::name::Name;

/// Read-only view of a loaded library of declarations.
pub trait SymbolRepository: Sync {
    /// Whether `name` denotes a declaration at all.
    fn contains(&self, name: &Name) -> bool;

    /// Names directly referenced by the declaration's defining expression,
    /// in repository order without duplicates.
    ///
    /// `None` means the declaration has no accessible body (axioms, opaque
    /// constants) or could not be resolved.
    fn lookup_body(&self, name: &Name) -> Option<Vec<Name>>;

    /// Declaration kind. Unknown names classify as [`ConstantKind::Other`].
    fn classify(&self, name: &Name) -> ConstantKind;
}

impl<R: SymbolRepository + ?Sized> SymbolRepository for &R {
    fn contains(&self, name: &Name) -> bool {
        (**self).contains(name)
    }

    fn lookup_body(&self, name: &Name) -> Option<Vec<Name>> {
        (**self).lookup_body(name)
    }

    fn classify(&self, name: &Name) -> ConstantKind {
        (**self).classify(name)
    }
}

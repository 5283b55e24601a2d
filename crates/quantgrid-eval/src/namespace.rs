//! Variable namespace with per-cell ownership tracking.
//!
//! Each name is owned by exactly one cell at a time; redefinition from a
//! different cell moves ownership atomically. The store is plain mutable
//! state owned by the host per open document and passed by reference into
//! `recompute` — there is deliberately no module-level instance, so two
//! open documents can never share names.

use rustc_hash::{FxHashMap, FxHashSet};

use quantgrid_common::Quantity;

/// Identity of the line/cell that defined a name.
pub type CellKey = String;

#[derive(Debug, Clone, PartialEq)]
pub struct NamespaceEntry {
    pub value: Quantity,
    pub cell: CellKey,
}

#[derive(Debug, Default)]
pub struct Namespace {
    entries: FxHashMap<String, NamespaceEntry>,
    owners: FxHashMap<CellKey, FxHashSet<String>>,
}

impl Namespace {
    pub fn new() -> Self {
        Namespace::default()
    }

    /// Upsert a definition. If `name` was previously owned by a different
    /// cell, it is removed from that cell's ownership set first, so each
    /// name always has exactly one owning cell.
    pub fn define(&mut self, name: impl Into<String>, value: Quantity, cell: impl Into<CellKey>) {
        let name = name.into();
        let cell = cell.into();

        if let Some(old) = self.entries.get(&name) {
            if old.cell != cell {
                if let Some(owned) = self.owners.get_mut(&old.cell) {
                    owned.remove(&name);
                    if owned.is_empty() {
                        self.owners.remove(&old.cell);
                    }
                }
            }
        }

        self.owners
            .entry(cell.clone())
            .or_default()
            .insert(name.clone());
        self.entries.insert(name, NamespaceEntry { value, cell });
    }

    pub fn resolve(&self, name: &str) -> Option<&Quantity> {
        self.entries.get(name).map(|e| &e.value)
    }

    pub fn entry(&self, name: &str) -> Option<&NamespaceEntry> {
        self.entries.get(name)
    }

    /// Remove every name currently owned by `cell` from both maps. Called
    /// before a cell's definitions are re-derived so names the new text no
    /// longer defines cannot leak into later passes.
    pub fn clear_cell(&mut self, cell: &str) {
        if let Some(names) = self.owners.remove(cell) {
            for name in names {
                self.entries.remove(&name);
            }
        }
    }

    pub fn names_defined_by<'a>(&'a self, cell: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.owners
            .get(cell)
            .into_iter()
            .flat_map(|names| names.iter().map(String::as_str))
    }

    /// Names that *might* depend on `cell`'s definitions.
    ///
    /// The store tracks ownership, not a reference graph, so this can only
    /// over-approximate: it returns every name not owned by `cell`. Kept as
    /// a documented modeling limitation; full-document top-down recompute
    /// makes a precise answer unnecessary.
    pub fn approx_dependents_of<'a>(&'a self, cell: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |(_, entry)| entry.cell != cell)
            .map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

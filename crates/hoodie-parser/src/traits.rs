//! Trait registry shared by every document of a run.
//!
//! Traits are registered while documents are being tree-built, so a block in
//! one document may reference a trait declared in another. The table is
//! validated once after every document has been built, and is read-only from
//! then on.

use indexmap::IndexMap;
use log::{debug, trace};

use hoodie_core::{BlockId, Document};

use crate::error::{Diagnostic, DiagnosticCollector, ErrorKind, ParseError};

/// Location of a trait block: the document index and the block handle inside
/// that document's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraitRef {
    pub document: usize,
    pub block: BlockId,
}

/// Mapping from trait name to the block declaring it, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct TraitTable {
    entries: IndexMap<String, TraitRef>,
}

impl TraitTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<TraitRef> {
        self.entries.get(name).copied()
    }

    /// Trait names and locations in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, TraitRef)> {
        self.entries.iter().map(|(name, r)| (name.as_str(), *r))
    }

    /// Register `name` at `location`.
    ///
    /// Returns `false` without touching the table when the name is taken.
    pub fn register(&mut self, name: impl Into<String>, location: TraitRef) -> bool {
        let name = name.into();
        if self.entries.contains_key(&name) {
            return false;
        }
        trace!(name = name.as_str(), document = location.document, block:% = location.block; "Registered trait");
        self.entries.insert(name, location);
        true
    }

    /// Drop every trait registered by `document`.
    ///
    /// Used when a document fails tree building, so no entry points into a
    /// tree that will never be resolved.
    pub fn forget_document(&mut self, document: usize) {
        let before = self.entries.len();
        self.entries.retain(|_, r| r.document != document);
        let dropped = before - self.entries.len();
        if dropped > 0 {
            debug!(document, dropped; "Dropped traits of failed document");
        }
    }

    /// Check the structural rules on every registered trait.
    ///
    /// A trait must have no children and its parent must be the head of the
    /// document it was declared in. Each rule is checked on its own, so a
    /// trait breaking both gets two diagnostics. Diagnostics follow
    /// declaration order.
    ///
    /// # Panics
    ///
    /// Panics if an entry refers to a document index outside `documents`.
    pub fn validate(&self, documents: &[Document]) -> Result<(), ParseError> {
        let mut collector = DiagnosticCollector::new();

        for (name, location) in self.iter() {
            let document = &documents[location.document];
            let block = document.block(location.block);

            let nests = !block.children().is_empty();
            let nested = block.parent() != Some(document.head());
            let kinds = [
                (nests, ErrorKind::TraitNests),
                (nested, ErrorKind::TraitNested),
            ];

            for kind in kinds.into_iter().filter_map(|(broken, kind)| broken.then_some(kind)) {
                debug!(name, kind:?; "Invalid trait");
                collector.emit(
                    Diagnostic::new(kind, document.source())
                        .with_path_to(document, location.block),
                );
            }
        }

        debug!(traits = self.len(); "Validated trait table");
        collector.finish()
    }
}

//! Per-source block arenas.
//!
//! A [`Document`] owns every block built from one source unit. Blocks refer to
//! each other through [`BlockId`] handles: each block stores its parent handle
//! and an ordered list of child handles, so the tree needs no owning back
//! pointers. The head is created with the document and is never emitted.

use log::trace;

use crate::block::{Block, BlockId};

/// One source unit and its block tree.
#[derive(Debug, Clone)]
pub struct Document {
    source: String,
    blocks: Vec<Block>,
}

impl Document {
    /// Create a document containing only its head.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            blocks: vec![Block::new_head()],
        }
    }

    /// Source identifier, usually the path of the file it was read from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Handle of the document head.
    pub fn head(&self) -> BlockId {
        BlockId::HEAD
    }

    /// Number of blocks including the head.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Returns `true` when the document holds nothing but its head.
    pub fn is_empty(&self) -> bool {
        self.blocks.len() == 1
    }

    /// # Panics
    ///
    /// Panics if `id` was not issued by this document.
    pub fn block(&self, id: BlockId) -> &Block {
        &self.blocks[id.index()]
    }

    /// # Panics
    ///
    /// Panics if `id` was not issued by this document.
    pub fn block_mut(&mut self, id: BlockId) -> &mut Block {
        &mut self.blocks[id.index()]
    }

    /// Insert `block` below `parent`.
    ///
    /// The block always records `parent` as its parent. It is appended to the
    /// parent's child list only when `attach` is `true`; a detached block is
    /// reachable through its handle but is skipped by tree walks.
    pub fn add_block(&mut self, mut block: Block, parent: BlockId, attach: bool) -> BlockId {
        let id = BlockId::new(self.blocks.len());
        block.set_parent(parent);
        self.blocks.push(block);
        if attach {
            self.blocks[parent.index()].push_child(id);
        }
        trace!(source = self.source, block:% = id, parent:% = parent, attach; "Added block");
        id
    }

    pub fn parent(&self, id: BlockId) -> Option<BlockId> {
        self.block(id).parent()
    }

    pub fn children(&self, id: BlockId) -> &[BlockId] {
        self.block(id).children()
    }

    /// Ancestors of `id`, innermost first, excluding the head.
    pub fn ancestors(&self, id: BlockId) -> Ancestors<'_> {
        Ancestors {
            document: self,
            next: self.parent(id),
        }
    }

    /// Depth of `id` below the head; direct children of the head have depth 0.
    pub fn depth(&self, id: BlockId) -> usize {
        self.ancestors(id).count()
    }

    /// Attached blocks in depth-first pre-order, excluding the head.
    pub fn walk(&self) -> Vec<BlockId> {
        let mut order = Vec::with_capacity(self.blocks.len().saturating_sub(1));
        let mut stack: Vec<BlockId> = self.children(BlockId::HEAD).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        order
    }

    /// Detach direct children of the head for which `predicate` returns `true`.
    pub fn detach_top_level(&mut self, mut predicate: impl FnMut(&Block) -> bool) {
        let doomed: Vec<BlockId> = self
            .children(BlockId::HEAD)
            .iter()
            .copied()
            .filter(|&id| predicate(self.block(id)))
            .collect();
        if doomed.is_empty() {
            return;
        }
        self.blocks[BlockId::HEAD.index()].retain_children(|id| !doomed.contains(id));
    }
}

/// Iterator over the ancestors of a block, see [`Document::ancestors`].
pub struct Ancestors<'a> {
    document: &'a Document,
    next: Option<BlockId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = BlockId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next.filter(|&id| id != BlockId::HEAD)?;
        self.next = self.document.parent(id);
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(name: &str) -> Block {
        Block::new(vec![name.to_string()])
    }

    #[test]
    fn test_new_document_has_only_head() {
        let doc = Document::new("items.hoo");

        assert_eq!(doc.source(), "items.hoo");
        assert_eq!(doc.len(), 1);
        assert!(doc.is_empty());
        assert!(doc.block(doc.head()).is_head());
        assert_eq!(doc.parent(doc.head()), None);
    }

    #[test]
    fn test_add_block_attaches_child() {
        let mut doc = Document::new("items.hoo");
        let item = doc.add_block(block("item"), doc.head(), true);
        let stats = doc.add_block(block("stats"), item, true);

        assert_eq!(doc.children(doc.head()), [item]);
        assert_eq!(doc.children(item), [stats]);
        assert_eq!(doc.parent(stats), Some(item));
        assert_eq!(doc.depth(item), 0);
        assert_eq!(doc.depth(stats), 1);
    }

    #[test]
    fn test_detached_block_keeps_parent() {
        let mut doc = Document::new("items.hoo");
        let item = doc.add_block(block("item"), doc.head(), true);
        let hidden = doc.add_block(Block::new_trait("sharp"), item, false);

        assert!(doc.children(item).is_empty());
        assert_eq!(doc.parent(hidden), Some(item));
        assert_eq!(doc.walk(), [item]);
    }

    #[test]
    fn test_ancestors_innermost_first() {
        let mut doc = Document::new("items.hoo");
        let a = doc.add_block(block("a"), doc.head(), true);
        let b = doc.add_block(block("b"), a, true);
        let c = doc.add_block(block("c"), b, true);

        let ancestors: Vec<_> = doc.ancestors(c).collect();
        assert_eq!(ancestors, [b, a]);
        assert_eq!(doc.ancestors(a).count(), 0);
    }

    #[test]
    fn test_walk_is_preorder() {
        let mut doc = Document::new("items.hoo");
        let a = doc.add_block(block("a"), doc.head(), true);
        let a1 = doc.add_block(block("a1"), a, true);
        let a2 = doc.add_block(block("a2"), a, true);
        let b = doc.add_block(block("b"), doc.head(), true);
        let a1x = doc.add_block(block("a1x"), a1, true);

        assert_eq!(doc.walk(), [a, a1, a1x, a2, b]);
    }

    #[test]
    fn test_detach_top_level() {
        let mut doc = Document::new("items.hoo");
        let sharp = doc.add_block(Block::new_trait("sharp"), doc.head(), true);
        let item = doc.add_block(block("item"), doc.head(), true);

        doc.detach_top_level(Block::is_trait);

        assert_eq!(doc.children(doc.head()), [item]);
        assert_eq!(doc.parent(sharp), Some(doc.head()));
    }
}

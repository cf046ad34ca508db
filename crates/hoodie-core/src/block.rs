//! Block nodes of a document tree.
//!
//! A [`Block`] is created by the tree builder when it meets an opening line.
//! Its header is known immediately; its body accumulates raw pair lines until
//! the matching close. The resolved pair map stays empty until the block is
//! resolved, after which it is never recomputed.

use std::fmt;

use indexmap::IndexMap;

/// Handle of a block inside one [`Document`](crate::Document) arena.
///
/// Handles are only meaningful for the document that issued them. The head of
/// every document is [`BlockId::HEAD`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(usize);

impl BlockId {
    /// Handle of the implicit document head.
    pub const HEAD: BlockId = BlockId(0);

    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the arena index of this handle.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Resolution state of a block.
///
/// `Resolving` marks a block whose trait references are being merged; meeting
/// it again before it finishes means the trait references form a cycle.
/// `Failed` blocks are never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Resolution {
    #[default]
    Unresolved,
    Resolving,
    Resolved,
    Failed,
}

/// A named node of the block tree.
#[derive(Debug, Clone, Default)]
pub struct Block {
    /// Primary name followed by referenced trait names.
    names: Vec<String>,
    /// Tokenized body lines, kept until the block is resolved.
    raw: Vec<Vec<String>>,
    /// Resolved key/value pairs in first-insertion order.
    pairs: IndexMap<String, String>,
    resolution: Resolution,
    children: Vec<BlockId>,
    parent: Option<BlockId>,
    is_trait: bool,
    is_head: bool,
}

impl Block {
    /// Create a block from its header names.
    ///
    /// `names` holds the primary name first and any trait references after
    /// it; callers guarantee it is non-empty.
    pub fn new(names: Vec<String>) -> Self {
        debug_assert!(!names.is_empty(), "a block needs at least one name");
        Self {
            names,
            ..Self::default()
        }
    }

    /// Create a trait block.
    pub fn new_trait(name: impl Into<String>) -> Self {
        Self {
            names: vec![name.into()],
            is_trait: true,
            ..Self::default()
        }
    }

    /// Create the implicit head of a document.
    pub(crate) fn new_head() -> Self {
        Self {
            is_head: true,
            ..Self::default()
        }
    }

    /// Primary name of the block. Empty for the head.
    pub fn name(&self) -> &str {
        self.names.first().map(String::as_str).unwrap_or_default()
    }

    /// All header names: the primary name followed by trait references.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Trait names referenced by this block, in declaration order.
    pub fn trait_refs(&self) -> &[String] {
        self.names.get(1..).unwrap_or_default()
    }

    /// Header names joined by single spaces.
    pub fn header(&self) -> String {
        self.names.join(" ")
    }

    pub fn is_head(&self) -> bool {
        self.is_head
    }

    pub fn is_trait(&self) -> bool {
        self.is_trait
    }

    pub fn parent(&self) -> Option<BlockId> {
        self.parent
    }

    pub fn children(&self) -> &[BlockId] {
        &self.children
    }

    /// Tokenized body lines not yet turned into pairs.
    pub fn raw(&self) -> &[Vec<String>] {
        &self.raw
    }

    /// Append a tokenized body line.
    pub fn push_raw(&mut self, tokens: Vec<String>) {
        self.raw.push(tokens);
    }

    /// Remove and return the last body line.
    pub fn pop_raw(&mut self) -> Option<Vec<String>> {
        self.raw.pop()
    }

    /// Drain the raw body lines, leaving the buffer empty.
    pub fn take_raw(&mut self) -> Vec<Vec<String>> {
        std::mem::take(&mut self.raw)
    }

    /// Resolved pairs in first-insertion order.
    pub fn pairs(&self) -> &IndexMap<String, String> {
        &self.pairs
    }

    /// Look up a resolved value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs.get(key).map(String::as_str)
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn is_resolved(&self) -> bool {
        self.resolution == Resolution::Resolved
    }

    pub fn is_failed(&self) -> bool {
        self.resolution == Resolution::Failed
    }

    /// Move the block into the `Resolving` state.
    pub fn begin_resolution(&mut self) {
        self.resolution = Resolution::Resolving;
    }

    /// Store the resolved pairs and mark the block resolved.
    pub fn finish_resolution(&mut self, pairs: IndexMap<String, String>) {
        self.pairs = pairs;
        self.resolution = Resolution::Resolved;
    }

    /// Mark a block left in `Resolving` by a failure as `Failed`.
    pub fn fail_resolution(&mut self) {
        if self.resolution == Resolution::Resolving {
            self.resolution = Resolution::Failed;
        }
    }

    pub(crate) fn set_parent(&mut self, parent: BlockId) {
        self.parent = Some(parent);
    }

    pub(crate) fn push_child(&mut self, child: BlockId) {
        self.children.push(child);
    }

    pub(crate) fn retain_children(&mut self, keep: impl FnMut(&BlockId) -> bool) {
        self.children.retain(keep);
    }
}

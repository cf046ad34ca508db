//! Block breadcrumbs for diagnostics.
//!
//! Line numbers stop being useful once blocks and pairs interleave, so a
//! failure inside the tree is located by the chain of block names leading to
//! it instead.

use std::fmt::{self, Write as _};

use hoodie_core::{BlockId, Document};

/// Indentation emitted per depth level when rendering ancestors.
const INDENT: &str = "  ";

/// One enclosing block of a failing block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ancestor {
    /// Depth below the document head; top-level blocks have depth 1.
    pub depth: usize,
    /// Header names of the block.
    pub names: Vec<String>,
}

/// The failing block's name and its enclosing blocks, innermost first.
///
/// The document head is never part of a path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorPath {
    block: String,
    ancestors: Vec<Ancestor>,
}

impl ErrorPath {
    /// Path to an existing block of `document`.
    pub fn to_block(document: &Document, id: BlockId) -> Self {
        Self {
            block: document.block(id).name().to_string(),
            ancestors: collect_ancestors(document, document.ancestors(id)),
        }
    }

    /// Path to a block named `name` that would be created under `parent`.
    ///
    /// Used when a header fails before its block exists; `parent` is part of
    /// the ancestors unless it is the head.
    pub fn under(document: &Document, parent: BlockId, name: impl Into<String>) -> Self {
        let chain = std::iter::once(parent)
            .filter(|&id| id != document.head())
            .chain(document.ancestors(parent));
        Self {
            block: name.into(),
            ancestors: collect_ancestors(document, chain),
        }
    }

    /// Name of the failing block.
    pub fn block(&self) -> &str {
        &self.block
    }

    /// Enclosing blocks, innermost first.
    pub fn ancestors(&self) -> &[Ancestor] {
        &self.ancestors
    }

    /// Render one line per ancestor, each indented by its depth and showing
    /// its names in parentheses.
    pub fn render_ancestors(&self) -> String {
        let mut out = String::new();
        for ancestor in &self.ancestors {
            let _ = write!(
                out,
                "\n{}({})",
                INDENT.repeat(ancestor.depth),
                ancestor.names.join(" ")
            );
        }
        out
    }
}

impl fmt::Display for ErrorPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self
            .ancestors
            .iter()
            .rev()
            .filter_map(|a| a.names.first().map(String::as_str))
            .collect();
        names.push(&self.block);
        write!(f, "{}", names.join(" > "))
    }
}

fn collect_ancestors(document: &Document, chain: impl Iterator<Item = BlockId>) -> Vec<Ancestor> {
    chain
        .map(|id| Ancestor {
            depth: document.depth(id) + 1,
            names: document.block(id).names().to_vec(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use hoodie_core::Block;

    use super::*;

    fn nested() -> (Document, BlockId, BlockId, BlockId) {
        let mut doc = Document::new("armory.hoo");
        let armory = doc.add_block(Block::new(vec!["armory".into()]), doc.head(), true);
        let weapon = doc.add_block(
            Block::new(vec!["weapon".into(), "sharp".into()]),
            armory,
            true,
        );
        let stats = doc.add_block(Block::new(vec!["stats".into()]), weapon, true);
        (doc, armory, weapon, stats)
    }

    #[test]
    fn test_path_to_nested_block() {
        let (doc, _, _, stats) = nested();
        let path = ErrorPath::to_block(&doc, stats);

        assert_eq!(path.block(), "stats");
        assert_eq!(path.ancestors().len(), 2);
        assert_eq!(path.ancestors()[0].names, ["weapon", "sharp"]);
        assert_eq!(path.ancestors()[0].depth, 2);
        assert_eq!(path.ancestors()[1].names, ["armory"]);
        assert_eq!(path.ancestors()[1].depth, 1);
        assert_eq!(path.to_string(), "armory > weapon > stats");
    }

    #[test]
    fn test_render_ancestors_indents_by_depth() {
        let (doc, _, _, stats) = nested();
        let path = ErrorPath::to_block(&doc, stats);

        assert_eq!(path.render_ancestors(), "\n    (weapon sharp)\n  (armory)");
    }

    #[test]
    fn test_top_level_block_has_no_ancestors() {
        let (doc, armory, _, _) = nested();
        let path = ErrorPath::to_block(&doc, armory);

        assert!(path.ancestors().is_empty());
        assert_eq!(path.render_ancestors(), "");
    }

    #[test]
    fn test_path_under_parent() {
        let (doc, _, weapon, _) = nested();
        let path = ErrorPath::under(&doc, weapon, "broken");

        assert_eq!(path.block(), "broken");
        assert_eq!(path.to_string(), "armory > weapon > broken");

        let top = ErrorPath::under(&doc, doc.head(), "broken");
        assert!(top.ancestors().is_empty());
    }
}

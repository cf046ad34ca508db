//! Tree builder for one hoodie document.
//!
//! The builder consumes tokenized lines and grows a block tree rooted at the
//! document head. Headers are parsed as soon as their opening line is seen,
//! which registers traits before their bodies are read; body lines are kept
//! raw until the resolver turns them into pairs.

use log::{debug, trace};

use hoodie_core::{Block, BlockId, Document};

use crate::{
    error::{Diagnostic, ErrorKind, ErrorPath, ParseError, Result},
    lexer::{self, Line},
    traits::{TraitRef, TraitTable},
};

const OPEN: &str = "{";
const CLOSE: &str = "}";
const TRAIT_KEYWORD: &str = "trait";

/// A validated block header.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Header {
    names: Vec<String>,
    is_trait: bool,
}

/// Parse the tokens of an opening line.
///
/// A header is one or more names followed by `{`, or `trait <name> {`.
fn parse_header(tokens: &[String]) -> std::result::Result<Header, ErrorKind> {
    if tokens.len() < 2 {
        return Err(ErrorKind::BadHeader);
    }

    let is_trait = tokens[0] == TRAIT_KEYWORD;
    let tokens = if is_trait {
        if tokens.len() != 3 {
            return Err(ErrorKind::BadTraitHeader);
        }
        &tokens[1..]
    } else {
        tokens
    };

    let (last, names) = tokens.split_last().ok_or(ErrorKind::BadHeader)?;
    if last != OPEN || names.iter().any(|t| t == OPEN || t == CLOSE) {
        return Err(ErrorKind::BadHeader);
    }

    Ok(Header {
        names: names.iter().map(|t| lexer::unquote(t).to_string()).collect(),
        is_trait,
    })
}

/// Incremental tree builder for one document.
///
/// Feed every tokenized line with [`TreeBuilder::feed`], then call
/// [`TreeBuilder::finish`] to check brace balance and take the document.
pub struct TreeBuilder<'t> {
    document: Document,
    index: usize,
    traits: &'t mut TraitTable,
    cursor: BlockId,
    opened: usize,
    closed: usize,
    last_line: usize,
    /// Set while the previous line was a single-token body line of the cursor,
    /// which a following lone `{` adopts as its name.
    pending_name: bool,
}

impl<'t> TreeBuilder<'t> {
    /// Start building the document `index` of the run, identified by `source`.
    pub fn new(source: impl Into<String>, index: usize, traits: &'t mut TraitTable) -> Self {
        let document = Document::new(source);
        let cursor = document.head();
        Self {
            document,
            index,
            traits,
            cursor,
            opened: 0,
            closed: 0,
            last_line: 0,
            pending_name: false,
        }
    }

    /// Consume one tokenized line.
    pub fn feed(&mut self, line: &Line) -> Result<()> {
        self.last_line = line.number;
        let pending_name = std::mem::take(&mut self.pending_name);

        if line.tokens.iter().any(|t| t == OPEN) {
            return self.open(line, pending_name);
        }

        if line.tokens.iter().any(|t| t == CLOSE) {
            return self.close(line);
        }

        self.pending_name = line.tokens.len() == 1;
        self.document.block_mut(self.cursor).push_raw(line.tokens.clone());
        Ok(())
    }

    /// Check brace balance and return the finished document.
    pub fn finish(self) -> Result<Document> {
        if self.opened != self.closed {
            let mut diag = Diagnostic::new(ErrorKind::BlockNotEnclosed, self.document.source())
                .with_message(format!(
                    "{}: {} opened, {} closed",
                    ErrorKind::BlockNotEnclosed.description(),
                    self.opened,
                    self.closed
                ))
                .with_line(self.last_line);
            if self.cursor != self.document.head() {
                diag = diag.with_path_to(&self.document, self.cursor);
            }
            return Err(diag);
        }

        debug!(
            source = self.document.source(),
            blocks = self.document.len() - 1;
            "Built document tree"
        );
        Ok(self.document)
    }

    fn open(&mut self, line: &Line, pending_name: bool) -> Result<()> {
        self.opened += 1;

        let tokens = if line.tokens.len() == 1 && pending_name {
            let mut tokens = self
                .document
                .block_mut(self.cursor)
                .pop_raw()
                .expect("pending name was pushed by the previous line");
            tokens.extend(line.tokens.iter().cloned());
            tokens
        } else {
            line.tokens.clone()
        };

        let header = parse_header(&tokens).map_err(|kind| {
            Diagnostic::new(kind, self.document.source())
                .with_path(ErrorPath::under(&self.document, self.cursor, tokens.join(" ")))
                .with_line(line.number)
        })?;

        let at_head = self.cursor == self.document.head();
        if header.is_trait {
            let name = &header.names[0];
            if self.traits.contains(name) {
                return Err(Diagnostic::new(ErrorKind::TraitExists, self.document.source())
                    .with_path(ErrorPath::under(&self.document, self.cursor, name.clone()))
                    .with_line(line.number));
            }
        }

        let block = if header.is_trait {
            Block::new_trait(header.names[0].clone())
        } else {
            Block::new(header.names)
        };
        // Traits are only legal directly under the head; a nested one keeps its
        // parent link for validation but stays out of the child list.
        let attach = !block.is_trait() || at_head;
        let is_trait = block.is_trait();
        let id = self.document.add_block(block, self.cursor, attach);

        if is_trait {
            let name = self.document.block(id).name().to_string();
            self.traits.register(
                name,
                TraitRef {
                    document: self.index,
                    block: id,
                },
            );
        }

        trace!(line = line.number, header = self.document.block(id).header(); "Opened block");
        self.cursor = id;
        Ok(())
    }

    fn close(&mut self, line: &Line) -> Result<()> {
        if line.tokens.len() != 1 {
            let diag = Diagnostic::new(ErrorKind::ClosingBrace, self.document.source())
                .with_line(line.number);
            return Err(if self.cursor == self.document.head() {
                diag
            } else {
                diag.with_path_to(&self.document, self.cursor)
            });
        }

        self.closed += 1;
        // A stray `}` at the head leaves the cursor in place; the count check in
        // `finish` reports it.
        if let Some(parent) = self.document.parent(self.cursor) {
            self.cursor = parent;
        }
        Ok(())
    }
}

/// Tree-build a whole source text as document `index` of a run.
///
/// Traits declared by the document are registered in `traits`. On failure
/// every trait the document registered is removed again, so the table only
/// refers to documents that were built successfully.
pub fn build_document(
    source: &str,
    text: &str,
    index: usize,
    traits: &mut TraitTable,
) -> std::result::Result<Document, ParseError> {
    let lines = lexer::tokenize(text);
    debug!(source, lines = lines.len(); "Building document tree");

    let built = {
        let mut builder = TreeBuilder::new(source, index, traits);
        match lines.iter().try_for_each(|line| builder.feed(line)) {
            Ok(()) => builder.finish(),
            Err(diag) => Err(diag),
        }
    };

    built.map_err(|diag| {
        traits.forget_document(index);
        ParseError::from(diag)
    })
}

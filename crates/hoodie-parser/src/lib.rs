//! # Hoodie Parser
//!
//! Front end of the hoodie configuration language. This crate turns source
//! texts into resolved block trees:
//!
//! 1. **Tree building** - tokenize each source and grow its block tree,
//!    registering traits as their headers are read
//! 2. **Trait validation** - check every trait is a top-level leaf
//! 3. **Resolution** - parse pair lines and merge inherited trait pairs;
//!    traits are resolved first so a broken one is reported once
//!
//! Traits are shared across every document of a run, so all documents are
//! built before any of them is resolved.
//!
//! ## Usage
//!
//! ```
//! # use hoodie_parser::{parse_all, ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let traits = "trait sharp {\n  edge keen\n}\n";
//!     let items = "sword sharp {\n  name blade\n}\n";
//!
//!     let (documents, table) = parse_all(&[("traits.hoo", traits), ("items.hoo", items)])?;
//!
//!     let items = &documents[1];
//!     let sword = items.block(items.children(items.head())[0]);
//!     assert_eq!(sword.get("edge"), Some("keen"));
//!     assert!(table.contains("sharp"));
//!     Ok(())
//! }
//! ```

mod builder;
pub mod error;
pub mod lexer;
mod resolve;
mod traits;

pub use builder::{TreeBuilder, build_document};
pub use error::{Diagnostic, ErrorKind, ErrorPath, ParseError};
pub use resolve::{resolve_block, resolve_document, resolve_traits};
pub use traits::{TraitRef, TraitTable};

use hoodie_core::Document;

/// Build, validate and resolve a set of sources, stopping at the first
/// failing phase.
///
/// Each source is a `(source id, text)` pair; document indexes follow the
/// slice order. Returns the resolved documents together with the trait table
/// they were resolved against.
pub fn parse_all(sources: &[(&str, &str)]) -> Result<(Vec<Document>, TraitTable), ParseError> {
    let mut traits = TraitTable::new();
    let mut documents = Vec::with_capacity(sources.len());

    for (index, (source, text)) in sources.iter().enumerate() {
        documents.push(build_document(source, text, index, &mut traits)?);
    }

    traits.validate(&documents)?;

    if let Some((_, err)) = resolve_traits(&mut documents, &traits).into_iter().next() {
        return Err(err);
    }
    for index in 0..documents.len() {
        resolve_document(&mut documents, index, &traits)?;
    }

    Ok((documents, traits))
}

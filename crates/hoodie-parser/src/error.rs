//! Error and diagnostic system for the hoodie parser.
//!
//! This module provides an error handling system with:
//! - Error kinds with stable codes for documentation and searchability
//! - Block breadcrumbs locating a failure inside the block tree
//! - Diagnostic collector for accumulating multiple errors
//!
//! # Overview
//!
//! The error system is built around the [`Diagnostic`] type, which represents
//! a single failure with its [`ErrorKind`], the source it came from and an
//! [`ErrorPath`] naming the failing block and its ancestors. Line numbers are
//! only attached while the tree is being built; once blocks and pairs
//! interleave, the breadcrumb is the reliable locator. Multiple diagnostics are
//! wrapped in [`ParseError`] for returning from a pipeline phase.
//!
//! # Example
//!
//! ```
//! # use hoodie_core::{Block, Document};
//! # use hoodie_parser::error::{Diagnostic, ErrorKind};
//! let mut doc = Document::new("items.hoo");
//! let item = doc.add_block(Block::new(vec!["item".into()]), doc.head(), true);
//!
//! let diag = Diagnostic::new(ErrorKind::NotPair, doc.source())
//!     .with_path_to(&doc, item);
//!
//! assert_eq!(diag.render(), "items.hoo: not a pair: `item`");
//! ```

mod collector;
mod diagnostic;
mod error_kind;
mod parse_error;
mod path;

pub(crate) use collector::DiagnosticCollector;
pub(crate) use parse_error::Result;

pub use diagnostic::Diagnostic;
pub use error_kind::ErrorKind;
pub use parse_error::ParseError;
pub use path::{Ancestor, ErrorPath};

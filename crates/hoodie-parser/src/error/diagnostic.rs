//! The core diagnostic type for the hoodie error system.
//!
//! A [`Diagnostic`] represents a single failure with its kind, the source it
//! was raised for, an optional line number and a block breadcrumb.

use std::fmt;

use hoodie_core::{BlockId, Document};

use crate::error::{ErrorKind, ErrorPath};

/// A diagnostic message locating a failure in a source document.
///
/// # Example
///
/// ```text
/// armory.hoo: not a pair: `stats`
///     (weapon sharp)
///   (armory)
/// ```
///
/// The first line names the source and the failure; every following line is
/// one enclosing block, innermost first, indented by its depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    kind: ErrorKind,
    source: String,
    message: String,
    line: Option<usize>,
    path: Option<ErrorPath>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create a diagnostic whose message is the kind's description.
    pub fn new(kind: ErrorKind, source: impl Into<String>) -> Self {
        Self {
            kind,
            source: source.into(),
            message: kind.description().to_string(),
            line: None,
            path: None,
            help: None,
        }
    }

    /// Get the kind of this diagnostic.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Get the source identifier the diagnostic was raised for.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the 1-based line number, if known.
    pub fn line(&self) -> Option<usize> {
        self.line
    }

    /// Get the block breadcrumb, if any.
    pub fn path(&self) -> Option<&ErrorPath> {
        self.path.as_ref()
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Replace the primary message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attach a 1-based line number.
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Attach a breadcrumb.
    pub fn with_path(mut self, path: ErrorPath) -> Self {
        self.path = Some(path);
        self
    }

    /// Attach the breadcrumb leading to block `id` of `document`.
    pub fn with_path_to(self, document: &Document, id: BlockId) -> Self {
        self.with_path(ErrorPath::to_block(document, id))
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// First line of the rendered diagnostic: `<source>: <message>`.
    pub fn headline(&self) -> String {
        let mut headline = format!("{}: {}", self.source, self.message);
        if let Some(path) = &self.path {
            headline.push_str(&format!(": `{}`", path.block()));
        }
        if let Some(line) = self.line {
            headline.push_str(&format!(" (line {line})"));
        }
        headline
    }

    /// Full breadcrumb rendering: the headline followed by one indented line
    /// per enclosing block.
    pub fn render(&self) -> String {
        let mut out = self.headline();
        if let Some(path) = &self.path {
            out.push_str(&path.render_ancestors());
        }
        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl std::error::Error for Diagnostic {}

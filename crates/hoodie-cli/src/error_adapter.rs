//! Error adapter for converting HoodieError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! # Multi-Error Support
//!
//! When a [`hoodie_parser::ParseError`] contains multiple diagnostics, each
//! diagnostic is rendered independently.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use hoodie::HoodieError;
use hoodie_parser::Diagnostic;

/// Adapter for a single hoodie diagnostic.
///
/// The headline becomes the miette message; the enclosing blocks and any
/// help text become the help section.
pub struct DiagnosticAdapter<'a> {
    diag: &'a Diagnostic,
}

impl<'a> DiagnosticAdapter<'a> {
    /// Create a new diagnostic adapter.
    pub fn new(diag: &'a Diagnostic) -> Self {
        Self { diag }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diag.headline())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.diag.kind().code()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let mut sections = Vec::new();
        if let Some(path) = self.diag.path() {
            let ancestors = path.render_ancestors();
            if !ancestors.is_empty() {
                sections.push(format!("inside:{ancestors}"));
            }
        }
        if let Some(help) = self.diag.help() {
            sections.push(help.to_string());
        }

        if sections.is_empty() {
            None
        } else {
            Some(Box::new(sections.join("\n")))
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Adapter for non-diagnostic [`HoodieError`] variants.
///
/// This adapter handles errors that don't carry block breadcrumbs, such as
/// I/O, manifest, discovery and configuration errors.
pub struct ErrorAdapter<'a>(pub &'a HoodieError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            HoodieError::Io { .. } => "hoodie::io",
            HoodieError::Parse(_) => return None,
            HoodieError::Manifest(_) => "hoodie::manifest",
            HoodieError::Discovery(_) => "hoodie::discovery",
            HoodieError::Config(_) => "hoodie::config",
            HoodieError::Aborted(_) => "hoodie::aborted",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            HoodieError::Manifest(_) => Some(Box::new(
                "the manifest needs exactly one entry per source file; use \"_\" for sources that are never written",
            )),
            _ => None,
        }
    }
}

/// A reportable error that can be rendered by miette.
///
/// This enum wraps either a single diagnostic or a non-diagnostic error,
/// providing a uniform interface for error rendering.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A diagnostic with a block breadcrumb.
    Diagnostic(DiagnosticAdapter<'a>),
    /// A simple error without block information.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => std::error::Error::source(e),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }
}

/// Convert a [`HoodieError`] into a list of reportable errors.
///
/// For [`HoodieError::Parse`], this returns one [`Reportable`] for
/// each diagnostic in the error. For other error variants, this returns a
/// single [`Reportable`].
pub fn to_reportables(err: &HoodieError) -> Vec<Reportable<'_>> {
    match err {
        HoodieError::Parse(parse_err) => parse_err
            .diagnostics()
            .iter()
            .map(|d| Reportable::Diagnostic(DiagnosticAdapter::new(d)))
            .collect(),
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

#[cfg(test)]
mod tests {
    use hoodie::{block::Block, document::Document};
    use hoodie_parser::{ErrorKind, ParseError};

    use super::*;

    #[test]
    fn test_single_diagnostic() {
        let diag = Diagnostic::new(ErrorKind::ClosingBrace, "items.hoo").with_line(4);
        let err = HoodieError::Parse(ParseError::from(diag));

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);

        match &reportables[0] {
            Reportable::Diagnostic(d) => {
                assert_eq!(
                    d.to_string(),
                    "items.hoo: expected only closing curly brace (line 4)"
                );
                assert_eq!(d.code().map(|c| c.to_string()), Some("E004".to_string()));
                assert!(d.help().is_none());
            }
            Reportable::Error(_) => panic!("Expected Diagnostic"),
        }
    }

    #[test]
    fn test_multiple_diagnostics() {
        let err = HoodieError::Parse(ParseError::from(vec![
            Diagnostic::new(ErrorKind::TraitNests, "a.hoo"),
            Diagnostic::new(ErrorKind::TraitNested, "b.hoo"),
        ]));

        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 2);
        assert_eq!(reportables[0].to_string(), "a.hoo: trait nests other blocks");
        assert_eq!(
            reportables[1].to_string(),
            "b.hoo: trait is nested inside another block"
        );
    }

    #[test]
    fn test_breadcrumb_becomes_help() {
        let mut doc = Document::new("armory.hoo");
        let armory = doc.add_block(Block::new(vec!["armory".into()]), doc.head(), true);
        let weapon = doc.add_block(Block::new(vec!["weapon".into()]), armory, true);
        let diag = Diagnostic::new(ErrorKind::NotPair, doc.source())
            .with_path_to(&doc, weapon)
            .with_help("pairs are exactly two tokens");

        let adapter = DiagnosticAdapter::new(&diag);

        assert_eq!(adapter.to_string(), "armory.hoo: not a pair: `weapon`");
        assert_eq!(
            adapter.help().map(|h| h.to_string()),
            Some("inside:\n  (armory)\npairs are exactly two tokens".to_string())
        );
    }

    #[test]
    fn test_non_parse_error() {
        let err = HoodieError::Discovery("build.json not found".to_string());

        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 1);
        match &reportables[0] {
            Reportable::Error(e) => {
                assert_eq!(
                    e.to_string(),
                    "Project discovery error: build.json not found"
                );
                assert_eq!(
                    e.code().map(|c| c.to_string()),
                    Some("hoodie::discovery".to_string())
                );
            }
            Reportable::Diagnostic(_) => panic!("Expected Error"),
        }
    }
}

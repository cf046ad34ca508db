//! Error types for hoodie runs.
//!
//! This module provides the main error type [`HoodieError`] which wraps the
//! failures a run can meet, from locating the project files to writing the
//! compiled outputs.

use std::{io, path::PathBuf};

use thiserror::Error;

use hoodie_parser::ParseError;

/// The main error type for hoodie operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant carries the structured diagnostics of the failing
/// phase, each with its block breadcrumb. They can be rendered one by one for
/// rich error reporting.
#[derive(Debug, Error)]
pub enum HoodieError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("Build manifest error: {0}")]
    Manifest(String),

    #[error("Project discovery error: {0}")]
    Discovery(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Run aborted after {0} error(s)")]
    Aborted(usize),
}

impl HoodieError {
    /// Create an `Io` error for an operation on `path`.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

//! Error kinds for the hoodie diagnostic system.
//!
//! Kinds are grouped by the phase that raises them:
//! - Tree building: `BadHeader`, `BadTraitHeader`, `TraitExists`,
//!   `ClosingBrace`, `BlockNotEnclosed`
//! - Trait validation: `TraitNests`, `TraitNested`
//! - Resolution: `NotPair`, `UnknownTrait`, `TraitCycle`, `TraitFailed`

use std::fmt;

/// The kind of failure a [`Diagnostic`](super::Diagnostic) reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    // =========================================================================
    // Tree building
    // =========================================================================
    /// Malformed block header.
    ///
    /// A header needs at least one name followed by a trailing `{`.
    BadHeader,

    /// Malformed trait header.
    ///
    /// A trait header is exactly `trait <name> {`.
    BadTraitHeader,

    /// Duplicate trait name.
    ///
    /// Trait names are unique across every document of a run.
    TraitExists,

    /// A `}` shares its line with other tokens.
    ClosingBrace,

    /// The document opens more blocks than it closes, or the other way round.
    BlockNotEnclosed,

    // =========================================================================
    // Trait validation
    // =========================================================================
    /// A trait contains child blocks.
    TraitNests,

    /// A trait is declared inside another block.
    TraitNested,

    // =========================================================================
    // Resolution
    // =========================================================================
    /// A body line is not a key/value pair.
    NotPair,

    /// A block references a trait that was never declared.
    UnknownTrait,

    /// Resolving a block re-entered a block that is still being resolved.
    TraitCycle,

    /// A block references a trait that failed to resolve.
    ///
    /// The trait's own failure is reported separately, once.
    TraitFailed,
}

impl ErrorKind {
    /// Returns the stable code of this kind (e.g. "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::BadHeader => "E001",
            ErrorKind::BadTraitHeader => "E002",
            ErrorKind::TraitExists => "E003",
            ErrorKind::ClosingBrace => "E004",
            ErrorKind::BlockNotEnclosed => "E005",
            ErrorKind::TraitNests => "E006",
            ErrorKind::TraitNested => "E007",
            ErrorKind::NotPair => "E008",
            ErrorKind::UnknownTrait => "E009",
            ErrorKind::TraitCycle => "E010",
            ErrorKind::TraitFailed => "E011",
        }
    }

    /// Returns a short description of what this kind means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorKind::BadHeader => "bad block header",
            ErrorKind::BadTraitHeader => "bad trait header",
            ErrorKind::TraitExists => "trait already exists (name is not unique)",
            ErrorKind::ClosingBrace => "expected only closing curly brace",
            ErrorKind::BlockNotEnclosed => "uneven amount of left and right braces",
            ErrorKind::TraitNests => "trait nests other blocks",
            ErrorKind::TraitNested => "trait is nested inside another block",
            ErrorKind::NotPair => "not a pair",
            ErrorKind::UnknownTrait => "unknown trait",
            ErrorKind::TraitCycle => "trait references form a cycle",
            ErrorKind::TraitFailed => "trait failed to resolve",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_display() {
        assert_eq!(ErrorKind::BadHeader.to_string(), "E001");
        assert_eq!(ErrorKind::TraitNested.to_string(), "E007");
        assert_eq!(ErrorKind::TraitCycle.to_string(), "E010");
        assert_eq!(ErrorKind::TraitFailed.to_string(), "E011");
    }

    #[test]
    fn test_error_kind_description() {
        assert_eq!(ErrorKind::NotPair.description(), "not a pair");
        assert_eq!(
            ErrorKind::BlockNotEnclosed.description(),
            "uneven amount of left and right braces"
        );
    }
}

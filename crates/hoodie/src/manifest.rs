//! Build manifest: which output each source file compiles to.
//!
//! The manifest is a flat JSON object mapping a source file name to its
//! destination path:
//!
//! ```json
//! {
//!     "items.hoo": "out/items.txt",
//!     "traits.hoo": "_"
//! }
//! ```
//!
//! The destination `_` marks a source that only supplies traits and is never
//! written.

use std::{
    fs,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;

use crate::{HoodieError, project::Destination};

/// Parsed build manifest, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct BuildManifest {
    entries: IndexMap<String, String>,
}

impl BuildManifest {
    /// Parse a manifest from JSON text.
    pub fn from_json(text: &str) -> Result<Self, HoodieError> {
        serde_json::from_str(text).map_err(|err| HoodieError::Manifest(err.to_string()))
    }

    /// Read and parse the manifest file at `path`.
    pub fn load(path: &Path) -> Result<Self, HoodieError> {
        let text = fs::read_to_string(path).map_err(|err| HoodieError::io(path, err))?;
        let manifest = Self::from_json(&text)
            .map_err(|err| HoodieError::Manifest(format!("{}: {err}", path.display())))?;
        debug!(path:? = path, entries = manifest.len(); "Loaded build manifest");
        Ok(manifest)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Raw destination recorded for `file_name`.
    pub fn get(&self, file_name: &str) -> Option<&str> {
        self.entries.get(file_name).map(String::as_str)
    }

    /// Destination of `file_name`, resolved against `base`.
    pub fn destination(&self, file_name: &str, base: &Path) -> Option<Destination> {
        self.get(file_name)
            .map(|value| Destination::from_manifest(value, base))
    }

    /// Check the manifest covers exactly the discovered `sources`.
    ///
    /// The entry count must equal the number of sources, and every source
    /// file name must have an entry.
    pub fn check(&self, sources: &[PathBuf]) -> Result<(), HoodieError> {
        if self.len() != sources.len() {
            return Err(HoodieError::Manifest(format!(
                "{} entries, {} source files found",
                self.len(),
                sources.len()
            )));
        }

        for source in sources {
            let name = file_name(source);
            if self.get(&name).is_none() {
                return Err(HoodieError::Manifest(format!(
                    "no entry for source file `{name}`"
                )));
            }
        }
        Ok(())
    }
}

/// File name component of `path` as manifest key.
pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_keeps_file_order() {
        let manifest =
            BuildManifest::from_json(r#"{"b.hoo": "out/b.txt", "a.hoo": "_"}"#).unwrap();

        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest.entries.keys().collect::<Vec<_>>(), ["b.hoo", "a.hoo"]);
        assert_eq!(manifest.get("a.hoo"), Some("_"));
    }

    #[test]
    fn test_from_json_rejects_non_string_values() {
        let err = BuildManifest::from_json(r#"{"a.hoo": 3}"#).unwrap_err();
        assert!(matches!(err, HoodieError::Manifest(_)));
    }

    #[test]
    fn test_destination_resolution() {
        let manifest =
            BuildManifest::from_json(r#"{"a.hoo": "out/a.txt", "t.hoo": "_"}"#).unwrap();
        let base = Path::new("/project");

        assert_eq!(
            manifest.destination("a.hoo", base),
            Some(Destination::Path(PathBuf::from("/project/out/a.txt")))
        );
        assert_eq!(manifest.destination("t.hoo", base), Some(Destination::Discard));
        assert_eq!(manifest.destination("missing.hoo", base), None);
    }

    #[test]
    fn test_check_counts_entries() {
        let manifest = BuildManifest::from_json(r#"{"a.hoo": "a.txt"}"#).unwrap();
        let sources = [PathBuf::from("a.hoo"), PathBuf::from("sub/b.hoo")];

        let err = manifest.check(&sources).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Build manifest error: 1 entries, 2 source files found"
        );
    }

    #[test]
    fn test_check_requires_every_source() {
        let manifest =
            BuildManifest::from_json(r#"{"a.hoo": "a.txt", "c.hoo": "c.txt"}"#).unwrap();
        let sources = [PathBuf::from("a.hoo"), PathBuf::from("sub/b.hoo")];

        let err = manifest.check(&sources).unwrap_err();
        assert!(err.to_string().contains("`b.hoo`"));
        assert!(manifest.check(&[PathBuf::from("x/a.hoo"), PathBuf::from("c.hoo")]).is_ok());
    }
}

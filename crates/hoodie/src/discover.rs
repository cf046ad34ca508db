//! Project file discovery.
//!
//! Walks the project directory to find source files and the one build
//! manifest.

use std::path::{Path, PathBuf};

use log::debug;
use walkdir::WalkDir;

use crate::HoodieError;

/// Files found in a project directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFiles {
    /// Source files, relative to the project root, in walk order.
    pub sources: Vec<PathBuf>,
    /// Build manifest, relative to the project root.
    pub manifest: PathBuf,
}

/// Discover the source files and build manifest under `root`.
///
/// Sources are files whose extension is `extension`; the walk is sorted by
/// file name so runs are reproducible. Exactly one file named
/// `manifest_name` must exist anywhere below `root`.
pub fn discover(
    root: &Path,
    manifest_name: &str,
    extension: &str,
) -> Result<ProjectFiles, HoodieError> {
    let mut sources = Vec::new();
    let mut manifest: Option<PathBuf> = None;

    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = entry.map_err(|err| HoodieError::Discovery(err.to_string()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path).to_path_buf();

        if entry.file_name() == manifest_name {
            if let Some(first) = &manifest {
                return Err(HoodieError::Discovery(format!(
                    "another {manifest_name} found at {} (first at {})",
                    relative.display(),
                    first.display()
                )));
            }
            manifest = Some(relative);
            continue;
        }

        if path.extension().is_some_and(|ext| ext == extension) {
            debug!(path:? = relative; "Discovered source file");
            sources.push(relative);
        }
    }

    let manifest = manifest.ok_or_else(|| {
        HoodieError::Discovery(format!("{manifest_name} not found in {}", root.display()))
    })?;

    debug!(sources = sources.len(), manifest:? = manifest; "Discovered project files");
    Ok(ProjectFiles { sources, manifest })
}

//! Hoodie - a compiler for nested key/value configuration files.
//!
//! Hoodie sources describe nested named blocks of key/value pairs. Blocks
//! reuse each other's pairs through traits, which may be declared in any
//! source of a project. The compiler resolves every block and writes each
//! source as flat, tab-indented key/value text.

pub mod config;

mod compile;
mod discover;
mod error;
mod manifest;
mod policy;
mod project;

pub use hoodie_core::{block, document, pair};
pub use hoodie_parser::{Diagnostic, ErrorKind, ParseError, TraitTable};

pub use compile::{compile_document, render};
pub use discover::{ProjectFiles, discover};
pub use error::HoodieError;
pub use manifest::BuildManifest;
pub use policy::{ErrorPolicy, FailFast, KeepGoing};
pub use project::{DISCARD, Destination, Output, Project};

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::info;

use config::ProjectConfig;

/// Compile the project in `work_dir` using the default source extension.
///
/// See [`run_project`].
pub fn run(
    work_dir: &Path,
    manifest_name: &str,
    policy: &mut impl ErrorPolicy,
) -> Result<Vec<PathBuf>, HoodieError> {
    let config = ProjectConfig::default().with_manifest(manifest_name);
    run_project(work_dir, &config, policy)
}

/// Discover, compile and write every source of the project in `work_dir`.
///
/// The manifest is checked against the discovered sources before anything is
/// parsed; discovery and manifest failures always abort the run. Every other
/// failure goes through `policy`, including a source that cannot be read as
/// UTF-8 text, and the run still fails at the end if the policy recorded
/// anything.
///
/// Returns the paths of the written outputs.
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::Path;
///
/// use hoodie::{KeepGoing, run};
///
/// let written = run(Path::new("game/config"), "build.json", &mut KeepGoing::new())
///     .expect("project compiles");
/// println!("wrote {} files", written.len());
/// ```
pub fn run_project(
    work_dir: &Path,
    config: &ProjectConfig,
    policy: &mut impl ErrorPolicy,
) -> Result<Vec<PathBuf>, HoodieError> {
    let root = fs::canonicalize(work_dir).map_err(|err| HoodieError::io(work_dir, err))?;
    info!(root:? = root, manifest = config.manifest(); "Running project");

    let files = discover(&root, config.manifest(), config.extension())?;
    let manifest = BuildManifest::load(&root.join(&files.manifest))?;
    manifest.check(&files.sources)?;

    let mut project = Project::new();
    for relative in &files.sources {
        let destination = manifest
            .destination(&manifest::file_name(relative), &root)
            .ok_or_else(|| {
                HoodieError::Manifest(format!("no entry for {}", relative.display()))
            })?;
        let path = root.join(relative);
        match fs::read_to_string(&path) {
            Ok(text) => {
                project.add_source(relative.display().to_string(), text, destination);
            }
            Err(err) => policy.report(HoodieError::io(&path, err))?,
        }
    }

    let outputs = project.compile(policy)?;
    let written = Project::write(&outputs, policy)?;
    policy.finish()?;

    info!(written = written.len(); "Project written");
    Ok(written)
}

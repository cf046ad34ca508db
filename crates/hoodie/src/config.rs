//! Configuration types for hoodie runs.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from an
//! external configuration file; every field has a default, so an empty file
//! is a valid configuration.
//!
//! # Example
//!
//! ```
//! # use hoodie::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.project().manifest(), "build.json");
//! assert_eq!(config.project().extension(), "hoo");
//! assert!(!config.project().keep_going());
//! ```

use serde::Deserialize;

/// Default build manifest file name.
pub const DEFAULT_MANIFEST: &str = "build.json";

/// Default source file extension, without the dot.
pub const DEFAULT_EXTENSION: &str = "hoo";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Project section.
    #[serde(default)]
    project: ProjectConfig,
}

impl AppConfig {
    pub fn new(project: ProjectConfig) -> Self {
        Self { project }
    }

    /// Returns the project configuration.
    pub fn project(&self) -> &ProjectConfig {
        &self.project
    }

    /// Returns the project configuration for modification.
    pub fn project_mut(&mut self) -> &mut ProjectConfig {
        &mut self.project
    }
}

/// Where a project's files are found and how failures are handled.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// File name of the build manifest searched for in the project directory.
    manifest: String,

    /// Extension of source files, without the dot.
    extension: String,

    /// Continue with the remaining documents after a failure.
    keep_going: bool,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            manifest: DEFAULT_MANIFEST.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
            keep_going: false,
        }
    }
}

impl ProjectConfig {
    pub fn manifest(&self) -> &str {
        &self.manifest
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn keep_going(&self) -> bool {
        self.keep_going
    }

    /// Replace the manifest file name.
    pub fn with_manifest(mut self, manifest: impl Into<String>) -> Self {
        self.manifest = manifest.into();
        self
    }

    /// Replace the source file extension.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Set whether the run continues after a failure.
    pub fn with_keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }
}

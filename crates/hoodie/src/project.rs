//! Staged compilation of a set of sources.
//!
//! Traits may be declared in one source and used in another, so the phases
//! run as barriers across every document of the project:
//!
//! 1. every source is tokenized and tree-built, filling the trait table
//! 2. the trait table is validated once
//! 3. every trait is resolved, then every tree
//! 4. every resolved tree is rendered
//!
//! A document that fails any phase is reported to the caller's
//! [`ErrorPolicy`] and left out of every later phase.

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use log::{debug, info};

use hoodie_core::Document;
use hoodie_parser::{TraitTable, build_document, resolve_document, resolve_traits};

use crate::{HoodieError, compile, policy::ErrorPolicy};

/// Manifest value marking a source that is never written.
pub const DISCARD: &str = "_";

/// Where a compiled document goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Write the output to this file.
    Path(PathBuf),
    /// Compile the document for its traits only.
    Discard,
}

impl Destination {
    /// Interpret a manifest value, resolving relative paths against `base`.
    pub fn from_manifest(value: &str, base: &Path) -> Self {
        if value == DISCARD {
            Self::Discard
        } else {
            Self::Path(base.join(value))
        }
    }
}

/// A rendered document ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    source: String,
    path: PathBuf,
    text: String,
}

impl Output {
    /// Source identifier the output was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// File the output is written to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rendered text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Write the output, creating missing parent directories.
    ///
    /// The file is closed on every path, including a failed write.
    pub fn write(&self) -> Result<(), HoodieError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| HoodieError::io(parent, err))?;
        }

        let file = File::create(&self.path).map_err(|err| HoodieError::io(&self.path, err))?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(self.text.as_bytes())
            .and_then(|()| writer.flush())
            .map_err(|err| HoodieError::io(&self.path, err))?;

        debug!(source = self.source.as_str(), path:? = self.path; "Wrote output");
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct Source {
    id: String,
    text: String,
    destination: Destination,
}

/// A set of sources compiled together.
///
/// # Examples
///
/// ```
/// use hoodie::{Destination, FailFast, Project};
///
/// let mut project = Project::new();
/// project.add_source("traits.hoo", "trait sharp {\n  edge keen\n}\n", Destination::Discard);
/// project.add_source(
///     "items.hoo",
///     "sword sharp {\n  name blade\n}\n",
///     Destination::Path("items.txt".into()),
/// );
///
/// let outputs = project.compile(&mut FailFast).expect("project compiles");
/// assert_eq!(outputs.len(), 1);
/// assert_eq!(
///     outputs[0].text(),
///     "\"sword\"\n{\n\t\"edge\" \"keen\"\n\t\"name\" \"blade\"\n}\n"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct Project {
    sources: Vec<Source>,
}

impl Project {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a source text identified by `id`, compiled to `destination`.
    pub fn add_source(
        &mut self,
        id: impl Into<String>,
        text: impl Into<String>,
        destination: Destination,
    ) -> &mut Self {
        self.sources.push(Source {
            id: id.into(),
            text: text.into(),
            destination,
        });
        self
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Run every phase and render the documents that have a file destination.
    ///
    /// Failures are handed to `policy`; when it lets the run continue, the
    /// failing document is skipped and the others carry on. Outputs come back
    /// in source order.
    ///
    /// # Errors
    ///
    /// Returns whatever error `policy` chooses to abort with.
    pub fn compile(&self, policy: &mut impl ErrorPolicy) -> Result<Vec<Output>, HoodieError> {
        info!(sources = self.sources.len(); "Compiling project");

        // Document `i` of `documents` was built from `self.sources[origin[i]]`.
        let mut traits = TraitTable::new();
        let mut documents: Vec<Document> = Vec::with_capacity(self.sources.len());
        let mut origin = Vec::with_capacity(self.sources.len());

        for (position, source) in self.sources.iter().enumerate() {
            match build_document(&source.id, &source.text, documents.len(), &mut traits) {
                Ok(document) => {
                    documents.push(document);
                    origin.push(position);
                }
                Err(err) => policy.report(err.into())?,
            }
        }
        debug!(documents = documents.len(), traits = traits.len(); "Built document trees");

        if let Err(err) = traits.validate(&documents) {
            policy.report(err.into())?;
        }

        // A document declaring a broken trait is reported once, here, and
        // skipped below; documents using that trait report their own block.
        let mut failed = vec![false; documents.len()];
        for (index, err) in resolve_traits(&mut documents, &traits) {
            failed[index] = true;
            policy.report(err.into())?;
        }

        let mut resolved = vec![false; documents.len()];
        for (index, done) in resolved.iter_mut().enumerate() {
            if failed[index] {
                continue;
            }
            match resolve_document(&mut documents, index, &traits) {
                Ok(()) => *done = true,
                Err(err) => policy.report(err.into())?,
            }
        }

        let mut outputs = Vec::new();
        for (index, document) in documents.iter_mut().enumerate() {
            if !resolved[index] {
                continue;
            }
            let source = &self.sources[origin[index]];
            match &source.destination {
                Destination::Discard => {
                    debug!(source = source.id.as_str(); "Skipping discarded document");
                }
                Destination::Path(path) => outputs.push(Output {
                    source: source.id.clone(),
                    path: path.clone(),
                    text: compile::render(document, &traits),
                }),
            }
        }

        info!(outputs = outputs.len(); "Project compiled");
        Ok(outputs)
    }

    /// Write `outputs`, reporting each failed write to `policy`.
    ///
    /// Returns the paths that were written.
    pub fn write(
        outputs: &[Output],
        policy: &mut impl ErrorPolicy,
    ) -> Result<Vec<PathBuf>, HoodieError> {
        let mut written = Vec::with_capacity(outputs.len());
        for output in outputs {
            match output.write() {
                Ok(()) => written.push(output.path.clone()),
                Err(err) => policy.report(err)?,
            }
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use hoodie_parser::ErrorKind;
    use tempfile::TempDir;

    use super::*;
    use crate::policy::{FailFast, KeepGoing};

    fn out(path: &str) -> Destination {
        Destination::Path(PathBuf::from(path))
    }

    #[test]
    fn test_destination_from_manifest() {
        let base = Path::new("/work");
        assert_eq!(Destination::from_manifest("_", base), Destination::Discard);
        assert_eq!(Destination::from_manifest("o.txt", base), out("/work/o.txt"));
        assert_eq!(Destination::from_manifest("/abs/o.txt", base), out("/abs/o.txt"));
    }

    #[test]
    fn test_compile_end_to_end_item() {
        let mut project = Project::new();
        project.add_source("item.hoo", "item {\n  \"name\" \"sword\"\n}\n", out("item.txt"));

        let outputs = project.compile(&mut FailFast).unwrap();

        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs[0].source(), "item.hoo");
        assert_eq!(outputs[0].text(), "\"item\"\n{\n\t\"name\" \"sword\"\n}\n");
    }

    #[test]
    fn test_traits_cross_documents_regardless_of_order() {
        let mut project = Project::new();
        project
            .add_source("items.hoo", "sword sharp {\n}\n", out("items.txt"))
            .add_source("traits.hoo", "trait sharp {\n  edge keen\n}\n", Destination::Discard);

        let outputs = project.compile(&mut FailFast).unwrap();

        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs[0].text(), "\"sword\"\n{\n\t\"edge\" \"keen\"\n}\n");
    }

    #[test]
    fn test_fail_fast_stops_at_first_error() {
        let mut project = Project::new();
        project
            .add_source("bad.hoo", "item {\n", out("bad.txt"))
            .add_source("good.hoo", "item {\n}\n", out("good.txt"));

        let err = project.compile(&mut FailFast).unwrap_err();
        match err {
            HoodieError::Parse(err) => assert_eq!(err.kind(), Some(ErrorKind::BlockNotEnclosed)),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_keep_going_skips_failed_documents() {
        let mut project = Project::new();
        project
            .add_source("bad.hoo", "trait t {\n  k v\n}\nitem {\n", out("bad.txt"))
            .add_source("unknown.hoo", "item t {\n}\n", out("unknown.txt"))
            .add_source("good.hoo", "item {\n  k v\n}\n", out("good.txt"));
        let mut policy = KeepGoing::new();

        let outputs = project.compile(&mut policy).unwrap();

        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs[0].source(), "good.hoo");
        assert_eq!(policy.errors().len(), 2);
        assert!(matches!(policy.finish(), Err(HoodieError::Aborted(2))));
    }

    #[test]
    fn test_broken_trait_reported_once_per_fault() {
        let mut project = Project::new();
        project
            .add_source("items.hoo", "item t {\n}\n", out("items.txt"))
            .add_source("traits.hoo", "trait t {\n  a b c\n}\n", Destination::Discard)
            .add_source("good.hoo", "item {\n  k v\n}\n", out("good.txt"));
        let mut policy = KeepGoing::new();

        let outputs = project.compile(&mut policy).unwrap();

        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs[0].source(), "good.hoo");
        let rendered: Vec<String> = policy
            .errors()
            .iter()
            .map(|err| match err {
                HoodieError::Parse(err) => err.diagnostics()[0].render(),
                other => panic!("unexpected error: {other}"),
            })
            .collect();
        assert_eq!(
            rendered,
            [
                "traits.hoo: not a pair: `a b c`: `t`",
                "items.hoo: trait failed to resolve: `t`: `item`",
            ]
        );
        assert!(matches!(policy.finish(), Err(HoodieError::Aborted(2))));
    }

    #[test]
    fn test_write_outputs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/out.txt");
        let mut project = Project::new();
        project.add_source("a.hoo", "item {\n  k v\n}\n", Destination::Path(path.clone()));

        let outputs = project.compile(&mut FailFast).unwrap();
        let written = Project::write(&outputs, &mut FailFast).unwrap();

        assert_eq!(written, [path.clone()]);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "\"item\"\n{\n\t\"k\" \"v\"\n}\n"
        );
    }
}

//! CLI logic for the hoodie compiler.
//!
//! This module resolves the effective configuration from the command line and
//! configuration files, runs the project and renders failures through miette.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::path::{Path, PathBuf};

use log::{error, info};

use hoodie::{ErrorPolicy, FailFast, HoodieError, config::ProjectConfig};

use error_adapter::to_reportables;

/// Error policy of the command line.
///
/// Without keep-going it aborts on the first failure. With keep-going it
/// renders every failure as soon as it is reported and fails the run at the
/// end.
#[derive(Debug, Default)]
pub struct Reporter {
    failures: usize,
}

impl ErrorPolicy for Reporter {
    fn report(&mut self, err: HoodieError) -> Result<(), HoodieError> {
        self.failures += 1;
        report_error(&err);
        Ok(())
    }

    fn finish(&mut self) -> Result<(), HoodieError> {
        match self.failures {
            0 => Ok(()),
            count => Err(HoodieError::Aborted(count)),
        }
    }
}

/// Render `err` through miette and log every resulting report.
pub fn report_error(err: &HoodieError) {
    let reporter = miette::GraphicalReportHandler::new();

    for reportable in to_reportables(err) {
        let mut writer = String::new();
        reporter
            .render_report(&mut writer, &reportable)
            .expect("Writing to String buffer is infallible");

        error!("{writer}");
    }
}

/// Run the hoodie CLI application
///
/// Loads the configuration, applies the command-line overrides and compiles
/// the project in `args.dir`.
///
/// # Errors
///
/// Returns `HoodieError` for:
/// - Configuration loading errors
/// - Missing or inconsistent project files
/// - Parsing and resolution errors
/// - Output I/O errors
pub fn run(args: &Args) -> Result<Vec<PathBuf>, HoodieError> {
    let app_config = config::load_config(args.config.as_ref())?;
    let project = effective_project(app_config.project(), args);

    info!(
        dir = args.dir,
        manifest = project.manifest(),
        keep_going = project.keep_going();
        "Compiling project"
    );

    let dir = Path::new(&args.dir);
    let written = if project.keep_going() {
        hoodie::run_project(dir, &project, &mut Reporter::default())?
    } else {
        hoodie::run_project(dir, &project, &mut FailFast)?
    };

    info!(files = written.len(); "Outputs written");
    Ok(written)
}

/// Apply command-line overrides on top of the loaded configuration.
fn effective_project(base: &ProjectConfig, args: &Args) -> ProjectConfig {
    let mut project = base.clone();
    if let Some(schema) = &args.schema {
        project = project.with_manifest(schema.clone());
    }
    if args.keep_going {
        project = project.with_keep_going(true);
    }
    project
}

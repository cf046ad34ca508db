//! Command-line argument definitions for the hoodie CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the project directory, the build manifest,
//! the error policy, the configuration file and logging verbosity.

use clap::Parser;

/// Command-line arguments for the hoodie compiler
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Project directory containing the sources and the build manifest
    #[arg(short, long, default_value = ".")]
    pub dir: String,

    /// File name of the build manifest (overrides the configuration)
    #[arg(short, long)]
    pub schema: Option<String>,

    /// Continue compiling the remaining sources after an error
    #[arg(short = 'c', long)]
    pub keep_going: bool,

    /// Path to configuration file (TOML)
    #[arg(long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

//! hoodie CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, info};

use hoodie_cli::{Args, report_error};

fn main() {
    // Install miette's pretty panic hook early for better panic reports
    miette::set_panic_hook();

    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting hoodie");
    debug!(args:?; "Parsed arguments");

    // Under keep-going every failure was rendered when it was reported; only
    // the final count is left to show here.
    if let Err(err) = hoodie_cli::run(&args) {
        report_error(&err);
        process::exit(1);
    }

    info!("Completed successfully");
}

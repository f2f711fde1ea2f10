//! Scenic CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, info};

use scenic::ScenicError;
use scenic_cli::{
    Args,
    error_adapter::{render_report, to_reportables},
};

fn main() {
    // Install miette's pretty panic hook early for better panic reports
    miette::set_panic_hook();

    let args = Args::parse();
    init_logger(&args.log_level);

    info!(input = args.input.as_str(); "Starting Scenic");
    debug!(args:?; "Parsed arguments");

    match scenic_cli::run(&args) {
        Ok(()) => info!("Completed successfully"),
        Err(err) => {
            report(&err);
            process::exit(1);
        }
    }
}

/// Initialize `env_logger`, falling back to `warn` for unknown levels.
fn init_logger(level: &str) {
    let filter = LevelFilter::from_str(level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {level}. Using 'warn' instead.");
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(filter)
        .init();
}

/// Print every diagnostic of `err` to stderr, independent of the log level.
fn report(err: &ScenicError) {
    let reportables = to_reportables(err);
    debug!(count = reportables.len(); "Reporting errors");

    for reportable in &reportables {
        eprint!("{}", render_report(reportable));
    }
}

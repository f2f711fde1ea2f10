//! Command-line argument definitions for the Scenic CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, output formatting and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Scenic diagram compiler
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input diagram document (JSON)
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output scene file
    #[arg(short, long, default_value = "out.json")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Write the scene on a single line
    #[arg(long)]
    pub compact: bool,

    /// Freeze the timestamp base (milliseconds since the Unix epoch)
    #[arg(long)]
    pub start_time: Option<i64>,
}

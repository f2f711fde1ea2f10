//! CLI logic for the Scenic diagram compiler.
//!
//! Reads a diagram document, compiles it and writes the scene document.
//! The output file is written last, so a failed run leaves no output.
//! Validation warnings are printed to stderr and never fail the run.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::{debug, info};

use scenic::{
    DiagramBuilder, ScenicError,
    config::{AppConfig, OutputConfig, RenderConfig},
};
use scenic_parser::Diagnostic;

/// Run the Scenic CLI application
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `ScenicError` for:
/// - File I/O and configuration errors
/// - Invalid JSON or invalid documents
/// - Compile errors such as unresolved arrow references
pub fn run(args: &Args) -> Result<(), ScenicError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing diagram"
    );

    let app_config = apply_overrides(config::load_config(args.config.as_ref())?, args);

    let source = fs::read_to_string(&args.input)?;

    let builder = DiagramBuilder::new(app_config);
    let parsed = builder.parse_document(&source)?;
    report_warnings(parsed.warnings(), &source);
    let json = builder.render_json(parsed.diagram())?;

    fs::write(&args.output, json)?;

    info!(output_file = args.output; "Scene exported successfully");

    Ok(())
}

fn report_warnings(warnings: &[Diagnostic], source: &str) {
    let reportables = error_adapter::warnings_to_reportables(warnings, source);
    debug!(count = reportables.len(); "Reporting warnings");

    for reportable in &reportables {
        eprint!("{}", error_adapter::render_report(reportable));
    }
}

/// Command-line flags take precedence over the configuration file.
fn apply_overrides(config: AppConfig, args: &Args) -> AppConfig {
    let mut config = config;
    if let Some(start_time) = args.start_time {
        config = config.with_render(RenderConfig::new(Some(start_time)));
    }
    if args.compact {
        config = config.with_output(OutputConfig::new(false));
    }
    config
}

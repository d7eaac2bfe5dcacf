//! CLI logic for the Bracketry layout tool.
//!
//! This module reads a bracket description, lays it out for the requested
//! first visible column and writes a plain-text report.

pub mod error_adapter;

mod args;
mod config;
mod report;

pub use args::Args;

use std::{fs, path::Path};

use log::info;

use bracketry::{BracketBuilder, BracketError, document::TreeDocument};

/// Run the Bracketry CLI application
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `BracketError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed bracket descriptions
/// - Broken tree references
pub fn run(args: &Args) -> Result<(), BracketError> {
    info!(
        input_path = args.input,
        slide = args.slide;
        "Processing bracket"
    );

    let app_config =
        config::load_config(args.config.as_deref().map(Path::new), Path::new(&args.input))?;

    let source = fs::read_to_string(&args.input)?;
    let document: TreeDocument =
        toml::from_str(&source).map_err(|err| BracketError::Document(err.to_string()))?;

    let builder = BracketBuilder::new(app_config);
    let tree = builder.build_tree(document)?;
    let offsets = builder.offsets(&tree, args.slide);
    let report = report::render(&builder, &tree, &offsets);

    match &args.output {
        Some(output) => {
            fs::write(output, report)?;
            info!(output_file:% = output; "Report written");
        }
        None => print!("{report}"),
    }

    Ok(())
}

//! Command-line argument definitions for the Bracketry CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the bracket file, the first visible
//! column, the report destination, the configuration file and the logging
//! verbosity.

use clap::Parser;

/// Command-line arguments for the Bracketry layout inspector
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the bracket description (TOML)
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Index of the first visible column
    #[arg(short, long, default_value_t = 0)]
    pub slide: usize,

    /// Path to the report file; the report goes to stdout when omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

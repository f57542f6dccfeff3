//! Command-line argument definitions for the UAVPLEX CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the corpus root, the output directory,
//! the configuration file and logging verbosity.

use clap::Parser;

/// Command-line arguments for a UAVPLEX complexity study
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory holding the `design_<n>` folders
    #[arg(help = "Corpus root (defaults to the configured root, then ./data)")]
    pub data_root: Option<String>,

    /// Directory receiving the report and charts
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Write the JSON report only
    #[arg(long)]
    pub no_plots: bool,
}

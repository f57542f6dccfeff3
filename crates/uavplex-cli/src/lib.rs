//! CLI logic for UAVPLEX complexity studies.
//!
//! This module wires argument parsing, configuration discovery and the
//! [`StudyBuilder`] pipeline together.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::path::PathBuf;

use log::{info, warn};

use uavplex::{StudyBuilder, UavplexError};

/// Run a UAVPLEX study
///
/// Loads every design under the corpus root, analyzes it and writes the
/// JSON report and, unless `--no-plots` is given, every chart to the output
/// directory. Designs that fail to load are logged and skipped.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `UavplexError` for:
/// - Configuration loading errors
/// - An unreadable corpus root
/// - Export errors
pub fn run(args: &Args) -> Result<(), UavplexError> {
    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(output) = &args.output {
        app_config = app_config.with_output_dir(output);
    }

    let data_root = args
        .data_root
        .as_ref()
        .map(PathBuf::from)
        .or_else(|| app_config.data().root().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("data"));

    info!(
        data_root = data_root.display().to_string(),
        output_dir = app_config.output().dir().display().to_string(),
        plots = !args.no_plots;
        "Processing design corpus"
    );

    let builder = StudyBuilder::new(app_config);
    let corpus = builder.load(&data_root)?;

    let stats = corpus.stats();
    info!(
        designs = stats.design_count(),
        total_nodes = stats.total_nodes(),
        total_edges = stats.total_edges(),
        avg_nodes = stats.avg_nodes(),
        avg_edges = stats.avg_edges(),
        component_types = stats.component_types().len();
        "Corpus summary"
    );
    if !corpus.failures().is_empty() {
        let skipped: Vec<&str> = corpus.failures().iter().map(|f| f.design()).collect();
        warn!(count = skipped.len(), designs:? = skipped; "Designs skipped");
    }

    let written = builder.export_all(&corpus, !args.no_plots)?;

    info!(
        files = written.len(),
        output_dir = builder.config().output().dir().display().to_string();
        "Study exported successfully"
    );

    Ok(())
}

//! Export of charts and reports.
//!
//! This module provides the [`Exporter`] trait that defines where rendered
//! charts and the JSON report end up. It is the final stage of a study.
//!
//! # Pipeline Position
//!
//! ```text
//! Design directories
//!     ↓ load
//! Corpus
//!     ↓ analyze / position
//! ComplexityResult, Positions
//!     ↓ render (svg)
//! SVG documents, Report
//!     ↓ export (this module)
//! Output files
//! ```
//!
//! # Available Backends
//!
//! - [`svg`] - chart rendering via [`svg::SvgBuilder`] and [`svg::Svg`]
//! - [`OutputDir`] - date-stamped files in an output directory
//! - [`Rasterizer`] - PNG rendering of chart documents
//!
//! # Error Handling
//!
//! Export operations return [`Error`], covering rendering failures and I/O
//! errors. [`Error`] converts into [`UavplexError::Export`] at the crate
//! boundary.
//!
//! [`UavplexError::Export`]: crate::UavplexError::Export

mod output;
mod raster;
pub mod report;
/// SVG chart rendering.
pub mod svg;

use std::path::PathBuf;

pub use output::OutputDir;
pub use raster::Rasterizer;

use report::Report;

/// Abstraction for output destinations.
pub trait Exporter {
    /// Writes a rendered chart under `name`, returning every file written
    /// for it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if rasterizing fails, or [`Error::Io`] if
    /// writing the output fails.
    fn export_chart(
        &mut self,
        name: &str,
        document: &::svg::Document,
    ) -> Result<Vec<PathBuf>, Error>;

    /// Writes the analysis report.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the report cannot be serialized, or
    /// [`Error::Io`] if writing the output fails.
    fn export_report(&mut self, name: &str, report: &Report<'_>) -> Result<PathBuf, Error>;
}

/// Errors that can occur during export.
///
/// This type is converted into [`UavplexError::Export`] at the crate
/// boundary via the [`From`] implementation in [`crate::error`].
///
/// [`UavplexError::Export`]: crate::UavplexError::Export
#[derive(Debug)]
pub enum Error {
    /// A rendering or serialization failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}

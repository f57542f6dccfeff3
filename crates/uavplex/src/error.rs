//! Error types for UAVPLEX operations.
//!
//! This module provides the main error type [`UavplexError`] which wraps the
//! error conditions that can occur while loading, analyzing and exporting a
//! design corpus.

use std::{io, path::PathBuf};

use thiserror::Error;

use uavplex_core::design::ValidationError;
use uavplex_parser::error::ParseError;

/// The main error type for UAVPLEX operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the source text and its path next to the parse
/// diagnostics, so callers can render spans against the original file.
#[derive(Debug, Error)]
pub enum UavplexError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse {
        err: ParseError,
        src: String,
        path: PathBuf,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for UavplexError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl UavplexError {
    /// Create a new `Parse` error with the associated source code and path.
    pub fn new_parse_error(
        err: ParseError,
        src: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self::Parse {
            err,
            src: src.into(),
            path: path.into(),
        }
    }
}

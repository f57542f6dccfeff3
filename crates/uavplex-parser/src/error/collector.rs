//! Accumulates diagnostics so a parser can report every problem in a source.

use log::warn;

use crate::error::{Diagnostic, ParseError};

/// Collects diagnostics during one parse.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a diagnostic; an error marks the parse as failed.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Returns `Err` with every diagnostic if any error was emitted.
    ///
    /// On success the warnings are logged and dropped.
    pub fn finish(self) -> Result<(), ParseError> {
        if self.has_errors {
            return Err(ParseError::new(self.diagnostics));
        }
        for warning in &self.diagnostics {
            warn!(code:? = warning.code().map(|c| c.as_str()); "{}", warning.message());
        }
        Ok(())
    }
}

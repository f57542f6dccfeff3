//! Error and diagnostic system for the UAVPLEX parsers.
//!
//! Parsers report every problem they find in a source before giving up.
//! Each problem is a [`Diagnostic`] with a severity, an optional
//! [`ErrorCode`], labeled source spans and help text; a failed parse returns
//! all of them wrapped in a [`ParseError`].
//!
//! # Example
//!
//! ```
//! # use uavplex_parser::error::{Diagnostic, ErrorCode};
//! # use uavplex_parser::Span;
//!
//! let diag = Diagnostic::error("connection references unknown component `X`")
//!     .with_code(ErrorCode::E200)
//!     .with_label(Span::new(40..41), "not defined in `components`")
//!     .with_help("add the component or fix the connection endpoint");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;
pub(crate) use parse_error::Result;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;

//! # UAVPLEX Parser
//!
//! Parsers for the three per-design input files:
//!
//! - `design_low_level.json` → [`Design`](uavplex_core::design::Design) via [`parse_design`]
//! - `design_tree.json` → [`Airframe`](uavplex_core::design::Airframe) via [`parse_airframe`]
//! - `cadfile.stl` → [`Mesh`](uavplex_core::mesh::Mesh) via [`parse_stl`]
//!
//! Every parser returns a [`ParseError`](error::ParseError) carrying all the
//! diagnostics it found, each with a code, labeled source spans and help.
//!
//! ## Usage
//!
//! ```
//! # use uavplex_parser::{parse_design, error::ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"{
//!         "components": [
//!             { "component_instance": "Hub", "component_type": "MainHub" },
//!             { "component_instance": "Arm_1", "component_type": "Arm" }
//!         ],
//!         "connections": [{ "from_ci": "Hub", "to_ci": "Arm_1" }]
//!     }"#;
//!
//!     let design = parse_design("design_1", source)?;
//!     assert_eq!(design.connections().len(), 1);
//!     Ok(())
//! }
//! ```

mod descriptor;
mod design_tree;
pub mod error;
mod json;
mod span;
mod stl;

pub use descriptor::parse_design;
pub use design_tree::{UNKNOWN_HUB_TYPE, parse_airframe};
pub use span::Span;
pub use stl::parse_stl;

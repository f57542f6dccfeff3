//! Layered SVG output for charts.

mod layer;

pub use layer::{LayeredOutput, RenderLayer, SvgNode};

//! Z-ordered grouping of SVG nodes.
//!
//! Chart builders push elements into a [`LayeredOutput`] tagged with a
//! [`RenderLayer`]; rendering emits one `<g data-layer="...">` per non-empty
//! layer, bottom to top, so a node added late can still sit underneath.
//!
//! ```
//! # use uavplex_core::draw::{LayeredOutput, RenderLayer};
//! # use svg::node::element::{Circle, Line};
//! let mut output = LayeredOutput::new();
//! output.add_to_layer(RenderLayer::Node, Box::new(Circle::new()));
//! output.add_to_layer(RenderLayer::Edge, Box::new(Line::new()));
//!
//! // edges render before nodes
//! assert_eq!(output.render().len(), 2);
//! ```

use svg::node::element as svg_element;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Rendering layers, bottom first in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Panel backgrounds and frames
    Background,
    /// Grid lines and radar rings
    Grid,
    /// Mesh triangles and filled areas
    Mesh,
    /// Graph edges
    Edge,
    /// Graph nodes, bars, boxes and violins
    Node,
    /// Axis lines and ticks
    Axis,
    /// Labels and titles
    Text,
    /// Legends, drawn last
    Legend,
}

impl RenderLayer {
    /// Returns the `data-layer` name of this layer.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Grid => "grid",
            Self::Mesh => "mesh",
            Self::Edge => "edge",
            Self::Node => "node",
            Self::Axis => "axis",
            Self::Text => "text",
            Self::Legend => "legend",
        }
    }
}

/// SVG nodes collected per rendering layer.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, SvgNode)>,
}

impl LayeredOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a node to a layer. Insertion order is kept within a layer.
    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.items.push((layer, node));
    }

    /// Moves every node of `other` into this output.
    pub fn merge(&mut self, other: LayeredOutput) {
        self.items.extend(other.items);
    }

    /// Translates every node of `other` by `(dx, dy)` and merges it in.
    ///
    /// Used to place a panel inside a grid of panels.
    pub fn merge_translated(&mut self, other: LayeredOutput, dx: f32, dy: f32) {
        let transform = format!("translate({dx},{dy})");
        for (layer, node) in other.items {
            let group = svg_element::Group::new()
                .set("transform", transform.as_str())
                .add(node);
            self.items.push((layer, Box::new(group)));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of nodes in one layer.
    pub fn count(&self, layer: RenderLayer) -> usize {
        self.items.iter().filter(|(l, _)| *l == layer).count()
    }

    /// Renders the layers to SVG groups, consuming the output.
    pub fn render(mut self) -> Vec<SvgNode> {
        // Stable sort keeps insertion order within a layer
        self.items.sort_by_key(|(layer, _)| *layer);

        let mut result: Vec<SvgNode> = Vec::new();
        let mut current: Option<(RenderLayer, svg_element::Group)> = None;

        for (layer, node) in self.items {
            current = match current {
                Some((current_layer, group)) if current_layer == layer => {
                    Some((current_layer, group.add(node)))
                }
                previous => {
                    if let Some((_, group)) = previous {
                        result.push(Box::new(group));
                    }
                    let group = svg_element::Group::new().set("data-layer", layer.name());
                    Some((layer, group.add(node)))
                }
            };
        }

        if let Some((_, group)) = current {
            result.push(Box::new(group));
        }
        result
    }
}

//! 3D network charts.

use std::collections::BTreeSet;

use svg::{Document, node::element as svg_element};

use uavplex_core::{
    design::{ComponentType, Design},
    draw::{LayeredOutput, RenderLayer},
    geometry::{Bounds, Insets, Point, Size, Viewport},
    identifier::Id,
};

use super::{
    Svg,
    chart::{Anchor, LEGEND_WIDTH, Marker},
};
use crate::{analysis::ComplexityResult, positions::Positions};

/// One design of a network grid.
#[derive(Debug, Clone, Copy)]
pub struct NetworkPanel<'a> {
    pub design: &'a Design,
    pub positions: &'a Positions,
    pub result: &'a ComplexityResult,
}

impl NetworkPanel<'_> {
    fn title(&self) -> String {
        format!(
            "{}\nSystem Complexity: {:.3}\n{} nodes, {} edges",
            self.design.name(),
            self.result.total_complexity(),
            self.result.node_count(),
            self.result.edge_count()
        )
    }
}

impl Svg {
    /// Renders the network of one design, projected with the configured
    /// camera.
    pub fn render_network(&self, design: &Design, positions: &Positions, title: &str) -> Document {
        let size = self.canvas();
        let mut output = LayeredOutput::new();

        let header = self.title_font_size * 3.0;
        let frame = Bounds::new_from_top_left(Point::default(), size).inset(Insets::new(
            header,
            LEGEND_WIDTH,
            20.0,
            20.0,
        ));
        output.merge(self.network_panel(design, positions, frame, self.show_labels));

        self.add_title(&mut output, Point::new(size.width() / 2.0, header / 2.0), title);
        self.add_type_legend(
            &mut output,
            Point::new(size.width() - LEGEND_WIDTH, header),
            [design],
        );

        self.finish(size, output)
    }

    /// Renders every design as a panel of a grid, each titled with its
    /// system complexity.
    pub fn render_network_grid(&self, panels: &[NetworkPanel<'_>]) -> Document {
        let columns = self.grid_columns.min(panels.len()).max(1);
        let rows = panels.len().div_ceil(columns).max(1);
        let header = self.title_font_size * 3.0;
        let size = Size::new(
            columns as f32 * self.panel_size + LEGEND_WIDTH,
            rows as f32 * self.panel_size + header,
        );

        let mut output = LayeredOutput::new();
        self.add_title(
            &mut output,
            Point::new(size.width() / 2.0, header / 2.0),
            &format!("3D Network Graphs - All {} Designs", panels.len()),
        );

        if panels.is_empty() {
            let frame = Bounds::new_from_top_left(
                Point::new(0.0, header),
                Size::new(self.panel_size, self.panel_size),
            );
            self.add_placeholder(&mut output, frame, "No designs");
            return self.finish(size, output);
        }

        let panel_title = self.font_size * 4.0;
        for (i, panel) in panels.iter().enumerate() {
            let mut layers = LayeredOutput::new();
            let frame = Bounds::new_from_top_left(
                Point::new(0.0, panel_title),
                Size::new(self.panel_size, self.panel_size - panel_title),
            )
            .inset(Insets::uniform(10.0));
            layers.merge(self.network_panel(panel.design, panel.positions, frame, false));

            let title = self
                .text(
                    Point::new(self.panel_size / 2.0, self.font_size),
                    &panel.title(),
                    self.font_size * 0.85,
                    Anchor::Middle,
                )
                .set("font-weight", "bold");
            layers.add_to_layer(RenderLayer::Text, Box::new(title));

            let dx = (i % columns) as f32 * self.panel_size;
            let dy = (i / columns) as f32 * self.panel_size + header;
            output.merge_translated(layers, dx, dy);
        }

        self.add_type_legend(
            &mut output,
            Point::new(size.width() - LEGEND_WIDTH, header),
            panels.iter().map(|panel| panel.design),
        );

        self.finish(size, output)
    }

    /// Draws one network inside `frame`: edges first, then nodes from the
    /// farthest to the nearest.
    fn network_panel(
        &self,
        design: &Design,
        positions: &Positions,
        frame: Bounds,
        labels: bool,
    ) -> LayeredOutput {
        let mut output = LayeredOutput::new();

        let projected: Vec<_> = positions
            .iter()
            .map(|(id, point)| {
                let (screen, depth) = self.camera.project(point);
                (id, screen, depth)
            })
            .collect();
        let Some(content) = Bounds::from_points(projected.iter().map(|(_, p, _)| *p)) else {
            self.add_placeholder(&mut output, frame, "No components");
            return output;
        };
        let viewport = Viewport::fit(content, frame.inset(Insets::uniform(self.node_radius * 2.0)));
        let screen_of = |id: Id| {
            projected
                .iter()
                .find(|(candidate, _, _)| *candidate == id)
                .map(|(_, point, depth)| (viewport.apply(*point), *depth))
        };

        for connection in design.connections() {
            let (Some((from, _)), Some((to, _))) =
                (screen_of(connection.from()), screen_of(connection.to()))
            else {
                continue;
            };
            let line = svg_element::Line::new()
                .set("x1", from.x())
                .set("y1", from.y())
                .set("x2", to.x())
                .set("y2", to.y())
                .set("stroke", self.edge_color)
                .set("stroke-width", self.edge_width)
                .set("stroke-opacity", self.edge_opacity);
            output.add_to_layer(RenderLayer::Edge, Box::new(line));
        }

        let mut nodes: Vec<_> = design
            .components()
            .iter()
            .filter_map(|component| {
                screen_of(component.id()).map(|(point, depth)| (component, point, depth))
            })
            .collect();
        nodes.sort_by(|a, b| a.2.total_cmp(&b.2));

        for (component, point, _) in nodes {
            let circle = svg_element::Circle::new()
                .set("cx", point.x())
                .set("cy", point.y())
                .set("r", self.node_radius)
                .set("fill", self.palette.color_for(component.kind()))
                .set("fill-opacity", self.node_opacity)
                .set("stroke", "black")
                .set("stroke-width", 0.5);
            output.add_to_layer(RenderLayer::Node, Box::new(circle));

            if labels {
                let text = self.text(
                    Point::new(point.x(), point.y() - self.node_radius - 6.0),
                    &component.id().to_string(),
                    self.font_size * 0.75,
                    Anchor::Middle,
                );
                output.add_to_layer(RenderLayer::Text, Box::new(text));
            }
        }

        output
    }

    /// Legend of the component types present in `designs`.
    fn add_type_legend<'a>(
        &self,
        output: &mut LayeredOutput,
        top_left: Point,
        designs: impl IntoIterator<Item = &'a Design>,
    ) {
        let kinds: BTreeSet<&ComponentType> = designs
            .into_iter()
            .flat_map(|design| design.components().iter().map(|c| c.kind()))
            .collect();
        let entries: Vec<_> = kinds
            .into_iter()
            .map(|kind| (kind.to_string(), self.palette.color_for(kind)))
            .collect();
        self.add_legend(
            output,
            top_left,
            Some("Component Types"),
            &entries,
            Marker::Circle,
        );
    }
}

//! Box and violin plots of per-node local complexity.

use svg::{Document, node::element as svg_element};

use uavplex_core::{
    color::Color,
    draw::{LayeredOutput, RenderLayer},
    geometry::{Bounds, Insets, Point},
};

use super::{
    Svg,
    chart::{ValueAxis, series_color},
};
use crate::analysis::{BoxStats, gaussian_kde};

const AXIS_LABEL: &str = "Local Complexity (bits)";

/// Plot area and value axis shared by all boxes or violins.
struct Frame {
    plot: Bounds,
    axis: ValueAxis,
    slot: f32,
}

impl Frame {
    fn center(&self, index: usize) -> f32 {
        self.plot.min_x() + self.slot * (index as f32 + 0.5)
    }
}

impl Svg {
    /// Renders one box per sample: quartile box, median, whiskers at
    /// 1.5·IQR, outliers and a mean marker.
    pub fn render_box_plot(&self, stats: &[BoxStats]) -> Document {
        let mut output = LayeredOutput::new();
        let Some(frame) = self.distribution_frame(
            &mut output,
            stats,
            "Node Complexity Distribution: Box Plot",
        ) else {
            return self.finish(self.canvas(), output);
        };

        let half = frame.slot * 0.25;
        for (i, stat) in stats.iter().enumerate() {
            let x = frame.center(i);
            let color = series_color(i);
            let y = |value: f64| frame.axis.to_y(value, frame.plot);

            for (from, to) in [
                (stat.q1(), stat.lower_whisker()),
                (stat.q3(), stat.upper_whisker()),
            ] {
                output.add_to_layer(RenderLayer::Edge, Box::new(line(x, y(from), x, y(to))));
                output.add_to_layer(
                    RenderLayer::Edge,
                    Box::new(line(x - half / 2.0, y(to), x + half / 2.0, y(to))),
                );
            }

            let top = y(stat.q3());
            let rect = svg_element::Rectangle::new()
                .set("x", x - half)
                .set("y", top)
                .set("width", half * 2.0)
                .set("height", (y(stat.q1()) - top).max(1.0))
                .set("fill", color)
                .set("fill-opacity", 0.6)
                .set("stroke", "black")
                .set("stroke-width", 1.2);
            output.add_to_layer(RenderLayer::Node, Box::new(rect));

            let median = line(x - half, y(stat.median()), x + half, y(stat.median()))
                .set("stroke", "darkred")
                .set("stroke-width", 2.5);
            output.add_to_layer(RenderLayer::Axis, Box::new(median));
            output.add_to_layer(RenderLayer::Axis, Box::new(mean_marker(x, y(stat.mean()))));

            for &outlier in stat.outliers() {
                let circle = svg_element::Circle::new()
                    .set("cx", x)
                    .set("cy", y(outlier))
                    .set("r", 3.5)
                    .set("fill", "none")
                    .set("stroke", "black");
                output.add_to_layer(RenderLayer::Node, Box::new(circle));
            }
        }

        self.finish(self.canvas(), output)
    }

    /// Renders one violin per sample from a Gaussian kernel density
    /// estimate, with median and mean markers.
    pub fn render_violin_plot(&self, stats: &[BoxStats]) -> Document {
        let mut output = LayeredOutput::new();
        let Some(frame) = self.distribution_frame(
            &mut output,
            stats,
            "Node Complexity Distribution: Violin Plot",
        ) else {
            return self.finish(self.canvas(), output);
        };

        let half = frame.slot * 0.4;
        for (i, stat) in stats.iter().enumerate() {
            let x = frame.center(i);
            let color = series_color(i);
            let y = |value: f64| frame.axis.to_y(value, frame.plot);

            let curve = gaussian_kde(stat.values(), self.density_points);
            let peak = curve.iter().map(|&(_, d)| d).fold(0.0, f64::max);
            if curve.is_empty() || peak <= 0.0 {
                // No spread to estimate: a flat bar at the common value
                let flat = line(x - half, y(stat.median()), x + half, y(stat.median()))
                    .set("stroke", color)
                    .set("stroke-width", 3.0);
                output.add_to_layer(RenderLayer::Node, Box::new(flat));
            } else {
                output.add_to_layer(
                    RenderLayer::Node,
                    Box::new(violin_outline(&curve, peak, x, half, &y, color)),
                );
            }

            let median = line(x - half * 0.5, y(stat.median()), x + half * 0.5, y(stat.median()))
                .set("stroke", "darkred")
                .set("stroke-width", 2.5);
            output.add_to_layer(RenderLayer::Axis, Box::new(median));
            output.add_to_layer(RenderLayer::Axis, Box::new(mean_marker(x, y(stat.mean()))));
        }

        self.finish(self.canvas(), output)
    }

    /// Adds title, axis and labels; returns `None` after drawing a
    /// placeholder when there is nothing to plot.
    fn distribution_frame(
        &self,
        output: &mut LayeredOutput,
        stats: &[BoxStats],
        title: &str,
    ) -> Option<Frame> {
        let size = self.canvas();
        let header = self.title_font_size * 3.0;
        self.add_title(output, Point::new(size.width() / 2.0, header / 2.0), title);

        let plot = Bounds::new_from_top_left(Point::default(), size).inset(Insets::new(
            header, 40.0, 90.0, 90.0,
        ));
        if stats.is_empty() {
            self.add_placeholder(output, plot, "No node data");
            return None;
        }

        let min = stats.iter().map(BoxStats::min).fold(0.0, f64::min);
        let max = stats.iter().map(BoxStats::max).fold(0.0, f64::max);
        let axis = ValueAxis::new(min, max, 6);
        self.add_value_axis(output, plot, &axis, AXIS_LABEL);

        let slot = plot.width() / stats.len() as f32;
        let frame = Frame { plot, axis, slot };
        for (i, stat) in stats.iter().enumerate() {
            self.add_category_label(output, frame.center(i), plot, stat.label(), false);
        }
        Some(frame)
    }
}

fn line(x1: f32, y1: f32, x2: f32, y2: f32) -> svg_element::Line {
    svg_element::Line::new()
        .set("x1", x1)
        .set("y1", y1)
        .set("x2", x2)
        .set("y2", y2)
        .set("stroke", "black")
        .set("stroke-width", 1.2)
}

fn mean_marker(x: f32, y: f32) -> svg_element::Polygon {
    let r = 5.0;
    svg_element::Polygon::new()
        .set(
            "points",
            format!("{},{} {},{} {},{} {},{}", x, y - r, x + r, y, x, y + r, x - r, y),
        )
        .set("fill", "white")
        .set("stroke", "black")
        .set("data-mark", "mean")
}

/// Closed path mirroring the density curve around `x`.
fn violin_outline(
    curve: &[(f64, f64)],
    peak: f64,
    x: f32,
    half: f32,
    y: &impl Fn(f64) -> f32,
    color: Color,
) -> svg_element::Path {
    let width = |density: f64| (density / peak) as f32 * half;

    let mut data = svg::node::element::path::Data::new();
    for (i, &(value, density)) in curve.iter().enumerate() {
        let point = (x + width(density), y(value));
        data = if i == 0 {
            data.move_to(point)
        } else {
            data.line_to(point)
        };
    }
    for &(value, density) in curve.iter().rev() {
        data = data.line_to((x - width(density), y(value)));
    }

    svg_element::Path::new()
        .set("d", data.close())
        .set("fill", color)
        .set("fill-opacity", 0.6)
        .set("stroke", "black")
        .set("stroke-width", 1.0)
}

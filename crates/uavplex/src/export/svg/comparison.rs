//! Grouped bar chart of system metrics.

use svg::{Document, node::element as svg_element};

use uavplex_core::{
    draw::{LayeredOutput, RenderLayer},
    geometry::{Bounds, Insets, Point},
};

use super::{
    Svg,
    chart::{LEGEND_WIDTH, Marker, ValueAxis, series_color},
};
use crate::analysis::ComplexityResult;

const METRICS: [(&str, fn(&ComplexityResult) -> f64); 4] = [
    ("Diversity", ComplexityResult::diversity),
    ("Flexibility", ComplexityResult::flexibility),
    ("Combinability", ComplexityResult::combinability),
    ("Total Complexity", ComplexityResult::total_complexity),
];

impl Svg {
    /// Renders diversity, flexibility, combinability and total complexity
    /// side by side for every design.
    pub fn render_comparison(&self, results: &[ComplexityResult]) -> Document {
        let size = self.canvas();
        let header = self.title_font_size * 3.0;
        let mut output = LayeredOutput::new();

        self.add_title(
            &mut output,
            Point::new(size.width() / 2.0, header / 2.0),
            "Complexity Comparison Across Designs",
        );

        let plot = Bounds::new_from_top_left(Point::default(), size).inset(Insets::new(
            header,
            LEGEND_WIDTH,
            110.0,
            90.0,
        ));
        if results.is_empty() {
            self.add_placeholder(&mut output, plot, "No designs");
            return self.finish(size, output);
        }

        let max = results
            .iter()
            .map(|result| {
                METRICS
                    .iter()
                    .map(|(_, metric)| metric(result))
                    .fold(0.0, f64::max)
            })
            .fold(0.0, f64::max);
        let axis = ValueAxis::new(0.0, max, 6);
        self.add_value_axis(&mut output, plot, &axis, "Complexity (bits)");

        let slot = plot.width() / results.len() as f32;
        let bar = slot * 0.8 / METRICS.len() as f32;
        let rotate = results.len() > 6;
        let baseline = axis.to_y(0.0, plot);

        for (i, result) in results.iter().enumerate() {
            let left = plot.min_x() + slot * i as f32 + slot * 0.1;
            for (j, (_, metric)) in METRICS.iter().enumerate() {
                let top = axis.to_y(metric(result), plot);
                let rect = svg_element::Rectangle::new()
                    .set("x", left + bar * j as f32)
                    .set("y", top)
                    .set("width", bar)
                    .set("height", (baseline - top).max(0.0))
                    .set("fill", series_color(j))
                    .set("fill-opacity", 0.8)
                    .set("stroke", "black")
                    .set("stroke-width", 0.5);
                output.add_to_layer(RenderLayer::Node, Box::new(rect));
            }

            let center = plot.min_x() + slot * (i as f32 + 0.5);
            self.add_category_label(&mut output, center, plot, result.design(), rotate);
        }

        let entries: Vec<_> = METRICS
            .iter()
            .enumerate()
            .map(|(j, (name, _))| (name.to_string(), series_color(j)))
            .collect();
        self.add_legend(
            &mut output,
            Point::new(plot.max_x() + 20.0, plot.min_y()),
            Some("Metric"),
            &entries,
            Marker::Square,
        );

        self.finish(size, output)
    }
}

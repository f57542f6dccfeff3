//! Shared chart furniture: document frame, text, value axes and legends.

use svg::{Document, node::Text as SvgText, node::element as svg_element};

use uavplex_core::{
    color::Color,
    draw::{LayeredOutput, RenderLayer},
    geometry::{Bounds, Point, Size},
};

use super::Svg;

/// Width reserved right of the plot area for the legend.
pub(super) const LEGEND_WIDTH: f32 = 190.0;

const SERIES_COLORS: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Color of the `index`-th data series, cycling through ten colors.
pub(super) fn series_color(index: usize) -> Color {
    Color::new(SERIES_COLORS[index % SERIES_COLORS.len()]).unwrap_or_default()
}

/// Horizontal anchor of a text element.
#[derive(Debug, Clone, Copy)]
pub(super) enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// How a legend entry is marked.
#[derive(Debug, Clone, Copy)]
pub(super) enum Marker {
    Circle,
    Square,
    Line,
}

/// Vertical value axis with rounded tick positions.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct ValueAxis {
    min: f64,
    max: f64,
    ticks: Vec<f64>,
}

impl ValueAxis {
    /// Axis covering `min..=max`, widened to the nearest ticks.
    pub(super) fn new(min: f64, max: f64, tick_count: usize) -> Self {
        let (min, max) = if max - min > f64::EPSILON {
            (min, max)
        } else {
            (min - 0.5, max + 0.5)
        };

        let step = nice_step((max - min) / tick_count.max(1) as f64);
        let first = (min / step).floor() as i64;
        let last = (max / step).ceil() as i64;
        let ticks: Vec<f64> = (first..=last).map(|i| i as f64 * step).collect();

        Self {
            min: first as f64 * step,
            max: last as f64 * step,
            ticks,
        }
    }

    pub(super) fn ticks(&self) -> &[f64] {
        &self.ticks
    }

    /// Y coordinate of `value` inside `plot`, growing upward.
    pub(super) fn to_y(&self, value: f64, plot: Bounds) -> f32 {
        let t = (value - self.min) / (self.max - self.min);
        plot.max_y() - (t as f32) * plot.height()
    }
}

/// Rounds a raw tick step to 1, 2 or 5 times a power of ten.
fn nice_step(raw: f64) -> f64 {
    if raw <= 0.0 || !raw.is_finite() {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let fraction = raw / magnitude;
    let nice = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Tick label text, trimmed of trailing zeros.
fn format_tick(value: f64) -> String {
    let text = format!("{value:.3}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

impl Svg {
    /// Full-size chart canvas.
    pub(super) fn canvas(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Wraps rendered layers in a document of `size` over the background.
    pub(super) fn finish(&self, size: Size, output: LayeredOutput) -> Document {
        let background = svg_element::Rectangle::new()
            .set("x", 0)
            .set("y", 0)
            .set("width", size.width())
            .set("height", size.height())
            .set("fill", self.background)
            .set("fill-opacity", self.background.alpha());

        let mut doc = Document::new()
            .set(
                "viewBox",
                format!("0 0 {} {}", size.width(), size.height()),
            )
            .set("width", size.width())
            .set("height", size.height())
            .add(background);

        for node in output.render() {
            doc = doc.add(node);
        }
        doc
    }

    /// Text element at `position`; each line of `content` becomes a
    /// `<tspan>` below the previous one.
    pub(super) fn text(
        &self,
        position: Point,
        content: &str,
        font_size: f32,
        anchor: Anchor,
    ) -> svg_element::Text {
        let line_height = font_size * 1.2;
        let mut text = svg_element::Text::new("")
            .set("x", position.x())
            .set("y", position.y())
            .set("text-anchor", anchor.as_str())
            .set("dominant-baseline", "central")
            .set("font-family", self.font_family.as_str())
            .set("font-size", font_size);

        for (i, line) in content.lines().enumerate() {
            let dy = if i == 0 { 0.0 } else { line_height };
            let tspan = svg_element::TSpan::new("")
                .set("x", position.x())
                .set("dy", dy)
                .add(SvgText::new(line));
            text = text.add(tspan);
        }
        text
    }

    /// Bold title centered at `position`.
    pub(super) fn add_title(&self, output: &mut LayeredOutput, position: Point, content: &str) {
        let title = self
            .text(position, content, self.title_font_size, Anchor::Middle)
            .set("font-weight", "bold");
        output.add_to_layer(RenderLayer::Text, Box::new(title));
    }

    /// Centered message in an otherwise empty frame.
    pub(super) fn add_placeholder(&self, output: &mut LayeredOutput, frame: Bounds, message: &str) {
        let border = svg_element::Rectangle::new()
            .set("x", frame.min_x())
            .set("y", frame.min_y())
            .set("width", frame.width())
            .set("height", frame.height())
            .set("fill", "none")
            .set("stroke", "lightgray")
            .set("stroke-dasharray", "6,4");
        output.add_to_layer(RenderLayer::Background, Box::new(border));

        let text = self
            .text(frame.center(), message, self.font_size, Anchor::Middle)
            .set("fill", "gray");
        output.add_to_layer(RenderLayer::Text, Box::new(text));
    }

    /// Left value axis with ticks, horizontal grid lines and a label.
    pub(super) fn add_value_axis(
        &self,
        output: &mut LayeredOutput,
        plot: Bounds,
        axis: &ValueAxis,
        label: &str,
    ) {
        let line = svg_element::Line::new()
            .set("x1", plot.min_x())
            .set("y1", plot.min_y())
            .set("x2", plot.min_x())
            .set("y2", plot.max_y())
            .set("stroke", "black");
        output.add_to_layer(RenderLayer::Axis, Box::new(line));

        let baseline = svg_element::Line::new()
            .set("x1", plot.min_x())
            .set("y1", plot.max_y())
            .set("x2", plot.max_x())
            .set("y2", plot.max_y())
            .set("stroke", "black");
        output.add_to_layer(RenderLayer::Axis, Box::new(baseline));

        for &tick in axis.ticks() {
            let y = axis.to_y(tick, plot);
            let grid = svg_element::Line::new()
                .set("x1", plot.min_x())
                .set("y1", y)
                .set("x2", plot.max_x())
                .set("y2", y)
                .set("stroke", "lightgray")
                .set("stroke-dasharray", "4,4");
            output.add_to_layer(RenderLayer::Grid, Box::new(grid));

            let mark = svg_element::Line::new()
                .set("x1", plot.min_x() - 5.0)
                .set("y1", y)
                .set("x2", plot.min_x())
                .set("y2", y)
                .set("stroke", "black");
            output.add_to_layer(RenderLayer::Axis, Box::new(mark));

            let text = self.text(
                Point::new(plot.min_x() - 8.0, y),
                &format_tick(tick),
                self.font_size,
                Anchor::End,
            );
            output.add_to_layer(RenderLayer::Text, Box::new(text));
        }

        let center = Point::new(plot.min_x() - 55.0, plot.center().y());
        let text = self
            .text(center, label, self.font_size, Anchor::Middle)
            .set(
                "transform",
                format!("rotate(-90 {} {})", center.x(), center.y()),
            );
        output.add_to_layer(RenderLayer::Text, Box::new(text));
    }

    /// Category label below the plot, rotated when `rotate` is set.
    pub(super) fn add_category_label(
        &self,
        output: &mut LayeredOutput,
        x: f32,
        plot: Bounds,
        label: &str,
        rotate: bool,
    ) {
        let position = Point::new(x, plot.max_y() + 14.0);
        let text = if rotate {
            self.text(position, label, self.font_size, Anchor::End).set(
                "transform",
                format!("rotate(-35 {} {})", position.x(), position.y()),
            )
        } else {
            self.text(position, label, self.font_size, Anchor::Middle)
        };
        output.add_to_layer(RenderLayer::Text, Box::new(text));
    }

    /// Legend box whose top-left corner is `top_left`.
    pub(super) fn add_legend(
        &self,
        output: &mut LayeredOutput,
        top_left: Point,
        title: Option<&str>,
        entries: &[(String, Color)],
        marker: Marker,
    ) {
        if entries.is_empty() {
            return;
        }

        let row = self.font_size * 1.6;
        let header = if title.is_some() { row } else { 0.0 };
        let height = header + row * entries.len() as f32 + 8.0;
        let frame = svg_element::Rectangle::new()
            .set("x", top_left.x())
            .set("y", top_left.y())
            .set("width", LEGEND_WIDTH - 20.0)
            .set("height", height)
            .set("fill", "white")
            .set("fill-opacity", 0.95)
            .set("stroke", "lightgray")
            .set("rx", 3.0);
        output.add_to_layer(RenderLayer::Legend, Box::new(frame));

        if let Some(title) = title {
            let text = self
                .text(
                    Point::new(top_left.x() + 8.0, top_left.y() + row * 0.6),
                    title,
                    self.font_size + 1.0,
                    Anchor::Start,
                )
                .set("font-weight", "bold");
            output.add_to_layer(RenderLayer::Legend, Box::new(text));
        }

        for (i, (label, color)) in entries.iter().enumerate() {
            let y = top_left.y() + header + row * (i as f32 + 0.6) + 4.0;
            let x = top_left.x() + 16.0;
            let swatch: Box<dyn svg::Node> = match marker {
                Marker::Circle => Box::new(
                    svg_element::Circle::new()
                        .set("cx", x)
                        .set("cy", y)
                        .set("r", self.font_size * 0.45)
                        .set("fill", *color),
                ),
                Marker::Square => Box::new(
                    svg_element::Rectangle::new()
                        .set("x", x - self.font_size * 0.45)
                        .set("y", y - self.font_size * 0.45)
                        .set("width", self.font_size * 0.9)
                        .set("height", self.font_size * 0.9)
                        .set("fill", *color),
                ),
                Marker::Line => Box::new(
                    svg_element::Line::new()
                        .set("x1", x - 8.0)
                        .set("y1", y)
                        .set("x2", x + 8.0)
                        .set("y2", y)
                        .set("stroke", *color)
                        .set("stroke-width", 2.5),
                ),
            };
            output.add_to_layer(RenderLayer::Legend, swatch);

            let text = self.text(
                Point::new(x + 14.0, y),
                label,
                self.font_size,
                Anchor::Start,
            );
            output.add_to_layer(RenderLayer::Legend, Box::new(text));
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_nice_step() {
        assert_approx_eq!(f64, nice_step(0.37), 0.5);
        assert_approx_eq!(f64, nice_step(1.4), 2.0);
        assert_approx_eq!(f64, nice_step(7.0), 10.0);
        assert_approx_eq!(f64, nice_step(0.0), 1.0);
    }

    #[test]
    fn test_value_axis_covers_range() {
        let axis = ValueAxis::new(0.0, 4.3, 5);
        assert_approx_eq!(f64, axis.ticks()[0], 0.0);
        assert!(*axis.ticks().last().unwrap() >= 4.3);

        let plot = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(100.0, 200.0));
        assert_approx_eq!(f32, axis.to_y(0.0, plot), 200.0);
        assert!(axis.to_y(4.3, plot) >= 0.0);
    }

    #[test]
    fn test_flat_axis_is_widened() {
        let axis = ValueAxis::new(2.0, 2.0, 4);
        assert!(axis.ticks().len() >= 2);
        assert!(axis.ticks()[0] <= 1.5);
    }

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(0.5), "0.5");
        assert_eq!(format_tick(2.0), "2");
        assert_eq!(format_tick(-0.0), "0");
    }

    #[test]
    fn test_series_colors_cycle() {
        assert_eq!(series_color(0), series_color(10));
        assert_ne!(series_color(0), series_color(1));
    }
}

//! Radar chart of per-type node metrics.

use std::f32::consts::PI;

use svg::{Document, node::element as svg_element};

use uavplex_core::{
    design::ComponentType,
    draw::{LayeredOutput, RenderLayer},
    geometry::{Bounds, Insets, Point},
};

use super::{
    Svg,
    chart::{Anchor, LEGEND_WIDTH, Marker, series_color},
};
use crate::analysis::RadarPoint;

const AXES: [&str; 3] = ["Flexibility", "Combinability", "Diversity"];

const RINGS: [f32; 4] = [0.25, 0.5, 0.75, 1.0];

/// Divides every axis by its maximum over `points`.
///
/// An axis whose maximum is zero stays at zero.
fn normalize(points: &[&RadarPoint]) -> Vec<[f64; 3]> {
    let mut max = [0.0f64; 3];
    for point in points {
        for (m, value) in max.iter_mut().zip(point.axes()) {
            *m = m.max(value);
        }
    }

    points
        .iter()
        .map(|point| {
            let mut axes = point.axes();
            for (value, m) in axes.iter_mut().zip(max) {
                *value = if m > 0.0 { *value / m } else { 0.0 };
            }
            axes
        })
        .collect()
}

/// Axis `k` starts at three o'clock and turns counterclockwise.
fn axis_direction(k: usize) -> Point {
    let angle = 2.0 * PI * k as f32 / AXES.len() as f32;
    Point::new(angle.cos(), -angle.sin())
}

impl Svg {
    /// Renders an overlay radar chart, one polygon per design that has
    /// components of `kind`.
    pub fn render_radar(&self, points: &[RadarPoint], kind: &ComponentType) -> Document {
        let size = self.canvas();
        let header = self.title_font_size * 4.0;
        let mut output = LayeredOutput::new();

        self.add_title(
            &mut output,
            Point::new(size.width() / 2.0, header / 2.0),
            &format!(
                "{kind} Complexity Radar Plot: All Designs\n(Flexibility, Combinability, Diversity)"
            ),
        );

        let area = Bounds::new_from_top_left(Point::default(), size).inset(Insets::new(
            header,
            LEGEND_WIDTH,
            40.0,
            40.0,
        ));
        let present: Vec<&RadarPoint> = points.iter().filter(|p| p.count() > 0).collect();
        if present.is_empty() {
            self.add_placeholder(&mut output, area, &format!("No {kind} components"));
            return self.finish(size, output);
        }

        let center = area.center();
        let radius = area.width().min(area.height()) / 2.0 - self.font_size * 4.0;
        let at = |k: usize, r: f32| center.add_point(axis_direction(k).scale(r * radius));

        for ring in RINGS {
            let circle = svg_element::Circle::new()
                .set("cx", center.x())
                .set("cy", center.y())
                .set("r", ring * radius)
                .set("fill", "none")
                .set("stroke", "lightgray")
                .set("stroke-dasharray", "4,4");
            output.add_to_layer(RenderLayer::Grid, Box::new(circle));

            let label = self
                .text(
                    at(0, ring).add_point(Point::new(4.0, -8.0)),
                    &format!("{ring:.2}"),
                    self.font_size * 0.8,
                    Anchor::Start,
                )
                .set("fill", "gray");
            output.add_to_layer(RenderLayer::Text, Box::new(label));
        }

        for (k, name) in AXES.iter().enumerate() {
            let end = at(k, 1.0);
            let spoke = svg_element::Line::new()
                .set("x1", center.x())
                .set("y1", center.y())
                .set("x2", end.x())
                .set("y2", end.y())
                .set("stroke", "gray");
            output.add_to_layer(RenderLayer::Axis, Box::new(spoke));

            let direction = axis_direction(k);
            let anchor = if direction.x() > 0.1 {
                Anchor::Start
            } else if direction.x() < -0.1 {
                Anchor::End
            } else {
                Anchor::Middle
            };
            let label = self
                .text(at(k, 1.08), name, self.font_size * 1.1, anchor)
                .set("font-weight", "bold");
            output.add_to_layer(RenderLayer::Text, Box::new(label));
        }

        let mut entries = Vec::with_capacity(present.len());
        for (i, (point, axes)) in present.iter().zip(normalize(&present)).enumerate() {
            let color = series_color(i);
            let vertices: Vec<Point> = axes
                .iter()
                .enumerate()
                .map(|(k, value)| at(k, *value as f32))
                .collect();
            let coords: Vec<String> = vertices
                .iter()
                .map(|v| format!("{:.2},{:.2}", v.x(), v.y()))
                .collect();

            let polygon = svg_element::Polygon::new()
                .set("points", coords.join(" "))
                .set("fill", color)
                .set("fill-opacity", 0.1)
                .set("stroke", color)
                .set("stroke-width", 2.0);
            output.add_to_layer(RenderLayer::Node, Box::new(polygon));

            for vertex in vertices {
                let marker = svg_element::Circle::new()
                    .set("cx", vertex.x())
                    .set("cy", vertex.y())
                    .set("r", 3.5)
                    .set("fill", color);
                output.add_to_layer(RenderLayer::Node, Box::new(marker));
            }

            entries.push((point.design().to_string(), color));
        }

        self.add_legend(
            &mut output,
            Point::new(area.max_x() + 20.0, area.min_y()),
            Some("Designs"),
            &entries,
            Marker::Line,
        );

        self.finish(size, output)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use uavplex_core::design::{Component, Connection, Design};

    use super::*;
    use crate::{analysis::analyze, config::AppConfig, export::svg::SvgBuilder};

    fn radar_points() -> Vec<RadarPoint> {
        let motor = ComponentType::from("Motor");
        let quad = Design::new(
            "design_1",
            vec![
                Component::new("Hub", "MainHub"),
                Component::new("M1", "Motor"),
                Component::new("M2", "Motor"),
                Component::new("P1", "Propeller"),
            ],
            vec![
                Connection::new("Hub", "M1").with_connectors("Side_1", "Base"),
                Connection::new("Hub", "M2").with_connectors("Side_2", "Base"),
                Connection::new("M1", "P1").with_connectors("Prop", "Hub"),
            ],
        );
        let bare = Design::new("design_2", vec![Component::new("Hub", "MainHub")], vec![]);

        [quad, bare]
            .iter()
            .map(|design| RadarPoint::from_result(&analyze(design).unwrap(), &motor))
            .collect()
    }

    #[test]
    fn test_normalize_scales_by_axis_maximum() {
        let points = radar_points();
        let present: Vec<_> = points.iter().collect();
        let normalized = normalize(&present);

        for value in normalized[0] {
            assert!(value == 0.0 || (value - 1.0).abs() < 1e-12);
        }
        assert_eq!(normalized[1], [0.0; 3]);
    }

    #[test]
    fn test_axis_directions() {
        let east = axis_direction(0);
        assert_approx_eq!(f32, east.x(), 1.0);
        assert_approx_eq!(f32, east.y(), 0.0);
        // second axis points up and to the left on screen
        let second = axis_direction(1);
        assert!(second.x() < 0.0 && second.y() < 0.0);
    }

    #[test]
    fn test_designs_without_kind_are_skipped() {
        let svg = SvgBuilder::new(&AppConfig::default()).build().unwrap();
        let text = svg
            .render_radar(&radar_points(), &ComponentType::from("Motor"))
            .to_string();

        assert_eq!(text.matches("<polygon").count(), 1);
        assert!(text.contains("design_1"));
        assert!(!text.contains("design_2"));
        assert!(text.contains("Motor Complexity Radar Plot"));
    }

    #[test]
    fn test_no_points() {
        let svg = SvgBuilder::new(&AppConfig::default()).build().unwrap();
        let text = svg
            .render_radar(&[], &ComponentType::from("Sensor"))
            .to_string();
        assert!(text.contains("No Sensor components"));
    }
}

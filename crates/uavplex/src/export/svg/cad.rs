//! CAD model charts.

use svg::{Document, node::element as svg_element};

use uavplex_core::{
    draw::{LayeredOutput, RenderLayer},
    geometry::{Bounds, Insets, Point, Size, Viewport},
    mesh::Mesh,
};

use super::{Svg, chart::Anchor};

/// The CAD geometry of one design, as far as it could be read.
#[derive(Debug, Clone)]
pub enum CadModel {
    Mesh(Mesh),
    /// No STL file in the design directory.
    Missing,
    /// The STL file exists but could not be read or parsed.
    Invalid(String),
}

impl CadModel {
    fn title(&self, name: &str) -> String {
        match self {
            Self::Mesh(_) => name.to_string(),
            Self::Missing => format!("{name}\n(No STL)"),
            Self::Invalid(_) => format!("{name}\n(Error)"),
        }
    }
}

impl Svg {
    /// Renders the CAD model of one design.
    pub fn render_cad(&self, name: &str, model: &CadModel) -> Document {
        let size = self.canvas();
        let header = self.title_font_size * 3.0;
        let mut output = LayeredOutput::new();

        let frame = Bounds::new_from_top_left(Point::default(), size).inset(Insets::new(
            header, 20.0, 20.0, 20.0,
        ));
        self.cad_panel(&mut output, model, frame);
        self.add_title(
            &mut output,
            Point::new(size.width() / 2.0, header / 2.0),
            &model.title(name),
        );

        self.finish(size, output)
    }

    /// Renders the CAD models of several designs as a grid.
    pub fn render_cad_grid(&self, models: &[(&str, CadModel)]) -> Document {
        let columns = self.grid_columns.min(models.len()).max(1);
        let rows = models.len().div_ceil(columns).max(1);
        let header = self.title_font_size * 3.0;
        let size = Size::new(
            columns as f32 * self.panel_size,
            rows as f32 * self.panel_size + header,
        );

        let mut output = LayeredOutput::new();
        self.add_title(
            &mut output,
            Point::new(size.width() / 2.0, header / 2.0),
            &format!("CAD Models - All {} Designs", models.len()),
        );

        let panel_title = self.font_size * 3.0;
        for (i, (name, model)) in models.iter().enumerate() {
            let mut layers = LayeredOutput::new();
            let frame = Bounds::new_from_top_left(
                Point::new(0.0, panel_title),
                Size::new(self.panel_size, self.panel_size - panel_title),
            )
            .inset(Insets::uniform(10.0));
            self.cad_panel(&mut layers, model, frame);

            let title = self
                .text(
                    Point::new(self.panel_size / 2.0, self.font_size),
                    &model.title(name),
                    self.font_size,
                    Anchor::Middle,
                )
                .set("font-weight", "bold");
            layers.add_to_layer(RenderLayer::Text, Box::new(title));

            let dx = (i % columns) as f32 * self.panel_size;
            let dy = (i / columns) as f32 * self.panel_size + header;
            output.merge_translated(layers, dx, dy);
        }

        self.finish(size, output)
    }

    /// Draws the mesh with its Z axis flipped, back to front, or a
    /// placeholder when there is no usable mesh.
    fn cad_panel(&self, output: &mut LayeredOutput, model: &CadModel, frame: Bounds) {
        let mesh = match model {
            CadModel::Mesh(mesh) if !mesh.is_empty() => mesh,
            CadModel::Mesh(_) => return self.add_placeholder(output, frame, "Empty STL"),
            CadModel::Missing => return self.add_placeholder(output, frame, "No STL"),
            CadModel::Invalid(message) => {
                let short: String = message.chars().take(30).collect();
                return self.add_placeholder(output, frame, &format!("Error:\n{short}"));
            }
        };

        let mut faces: Vec<([Point; 3], f32)> = mesh
            .triangles()
            .iter()
            .map(|triangle| {
                let flipped = triangle.flip_z();
                let [a, b, c] = *flipped.vertices();
                let (_, depth) = self.camera.project(flipped.centroid());
                let project = |v| self.camera.project(v).0;
                ([project(a), project(b), project(c)], depth)
            })
            .collect();
        faces.sort_by(|a, b| a.1.total_cmp(&b.1));

        let Some(content) = Bounds::from_points(faces.iter().flat_map(|(points, _)| *points))
        else {
            return self.add_placeholder(output, frame, "Empty STL");
        };
        let viewport = Viewport::fit(content, frame);

        for (points, _) in faces {
            let points: Vec<String> = points
                .iter()
                .map(|p| {
                    let p = viewport.apply(*p);
                    format!("{:.2},{:.2}", p.x(), p.y())
                })
                .collect();
            let polygon = svg_element::Polygon::new()
                .set("points", points.join(" "))
                .set("fill", "lightgray")
                .set("fill-opacity", 0.3)
                .set("stroke", "gray")
                .set("stroke-width", 0.3);
            output.add_to_layer(RenderLayer::Mesh, Box::new(polygon));
        }
    }
}

#[cfg(test)]
mod tests {
    use uavplex_core::{geometry::Point3, mesh::Triangle};

    use super::*;
    use crate::{config::AppConfig, export::svg::SvgBuilder};

    fn svg() -> Svg {
        SvgBuilder::new(&AppConfig::default()).build().unwrap()
    }

    fn tetrahedron() -> Mesh {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(10.0, 0.0, 0.0);
        let c = Point3::new(0.0, 10.0, 0.0);
        let d = Point3::new(0.0, 0.0, 10.0);
        Mesh::new(vec![
            Triangle::new(a, b, c),
            Triangle::new(a, b, d),
            Triangle::new(a, c, d),
            Triangle::new(b, c, d),
        ])
    }

    #[test]
    fn test_mesh_renders_every_triangle() {
        let text = svg()
            .render_cad("design_1", &CadModel::Mesh(tetrahedron()))
            .to_string();
        assert_eq!(text.matches("<polygon").count(), 4);
        assert!(!text.contains("No STL"));
    }

    #[test]
    fn test_missing_and_invalid_placeholders() {
        let svg = svg();
        let missing = svg.render_cad("design_2", &CadModel::Missing).to_string();
        assert!(missing.contains("No STL"));
        assert!(missing.contains("(No STL)"));

        let invalid = svg
            .render_cad("design_3", &CadModel::Invalid("truncated facet".into()))
            .to_string();
        assert!(invalid.contains("truncated facet"));
        assert!(invalid.contains("(Error)"));
    }

    #[test]
    fn test_grid_mixes_panels() {
        let models = vec![
            ("design_1", CadModel::Mesh(tetrahedron())),
            ("design_2", CadModel::Missing),
        ];
        let text = svg().render_cad_grid(&models).to_string();
        assert!(text.contains("CAD Models - All 2 Designs"));
        assert_eq!(text.matches("<polygon").count(), 4);
        assert!(text.contains("No STL"));
    }
}

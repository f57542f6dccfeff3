//! PNG rendering of chart documents.

use std::fmt;

use log::debug;
use resvg::{tiny_skia, usvg};

use super::Error;

/// Rasterizes SVG chart documents at a fixed scale.
///
/// System fonts are loaded once, on construction.
pub struct Rasterizer {
    options: usvg::Options<'static>,
    scale: f32,
}

impl Rasterizer {
    pub fn new(scale: f32) -> Self {
        let mut options = usvg::Options::default();
        options.fontdb_mut().load_system_fonts();
        debug!(faces = options.fontdb.len(), scale = scale; "Raster fonts loaded");
        Self { options, scale }
    }

    /// Renders `document` to PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the document cannot be parsed back, the
    /// scaled size is empty or PNG encoding fails.
    pub fn render_png(&self, document: &::svg::Document) -> Result<Vec<u8>, Error> {
        let tree = usvg::Tree::from_str(&document.to_string(), &self.options)
            .map_err(|err| Error::Render(format!("failed to parse chart: {err}")))?;

        let size = tree
            .size()
            .to_int_size()
            .scale_by(self.scale)
            .ok_or_else(|| Error::Render(format!("invalid raster scale {}", self.scale)))?;
        let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
            .ok_or_else(|| Error::Render("chart has an empty raster size".to_string()))?;

        resvg::render(
            &tree,
            tiny_skia::Transform::from_scale(self.scale, self.scale),
            &mut pixmap.as_mut(),
        );

        pixmap
            .encode_png()
            .map_err(|err| Error::Render(format!("failed to encode PNG: {err}")))
    }
}

impl fmt::Debug for Rasterizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rasterizer")
            .field("scale", &self.scale)
            .finish_non_exhaustive()
    }
}

use log::debug;

use uavplex_core::{
    color::{Color, Palette},
    geometry::Camera,
};

use crate::{config::AppConfig, export};

mod cad;
mod chart;
mod comparison;
mod distribution;
mod network;
mod radar;

pub use cad::CadModel;
pub use network::NetworkPanel;

/// Chart renderer holding the resolved plot style.
///
/// Every `render_*` method returns a complete [`svg::Document`]; writing it
/// is left to an [`Exporter`](crate::export::Exporter).
#[derive(Debug, Clone)]
pub struct Svg {
    width: f32,
    height: f32,
    background: Color,
    font_family: String,
    font_size: f32,
    title_font_size: f32,
    camera: Camera,
    grid_columns: usize,
    panel_size: f32,
    node_radius: f32,
    node_opacity: f32,
    edge_color: Color,
    edge_width: f32,
    edge_opacity: f32,
    show_labels: bool,
    palette: Palette,
    density_points: usize,
}

/// Resolves an [`AppConfig`] into an [`Svg`] renderer.
pub struct SvgBuilder<'a> {
    config: &'a AppConfig,
}

impl<'a> SvgBuilder<'a> {
    pub fn new(config: &'a AppConfig) -> Self {
        Self { config }
    }

    /// Parses the configured colors and builds the renderer.
    ///
    /// # Errors
    ///
    /// Returns [`export::Error::Render`] if a configured color is not a CSS
    /// color.
    pub fn build(self) -> Result<Svg, export::Error> {
        let plot = self.config.plot();
        let network = self.config.network();

        let background = plot.background_color().map_err(export::Error::Render)?;
        let edge_color = network.edge_color().map_err(export::Error::Render)?;
        let palette = self
            .config
            .colors()
            .palette()
            .map_err(export::Error::Render)?;

        debug!(
            width = plot.width(),
            height = plot.height(),
            background:% = background;
            "SVG renderer configured"
        );

        Ok(Svg {
            width: plot.width(),
            height: plot.height(),
            background,
            font_family: plot.font_family().to_string(),
            font_size: plot.font_size(),
            title_font_size: plot.title_font_size(),
            camera: plot.camera(),
            grid_columns: plot.grid_columns(),
            panel_size: plot.panel_size(),
            node_radius: network.node_radius(),
            node_opacity: network.node_opacity(),
            edge_color,
            edge_width: network.edge_width(),
            edge_opacity: network.edge_opacity(),
            show_labels: network.show_labels(),
            palette,
            density_points: self.config.analysis().density_points(),
        })
    }
}

impl Svg {
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn camera(&self) -> Camera {
        self.camera
    }
}

//! Configuration types for UAVPLEX studies.
//!
//! Every section implements [`serde::Deserialize`] and falls back to its
//! defaults field by field, so a configuration file only needs the values it
//! changes.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining all sections.
//! - [`DataConfig`] - Corpus layout: directory prefix and per-design file names.
//! - [`OutputConfig`] - Output directory, date stamping, chart formats and
//!   report name.
//! - [`PlotConfig`] - Chart size, fonts, camera and grid layout.
//! - [`NetworkConfig`] - Network plot styling and the fallback layout.
//! - [`ColorsConfig`] - Component type colors.
//! - [`AnalysisConfig`] - Radar component type and density sampling.
//! - [`SelectionConfig`] - Labelled representative designs.
//!
//! # Example
//!
//! ```
//! # use uavplex::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.data().design_prefix(), "design_");
//! assert!(config.colors().palette().is_ok());
//! ```

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use uavplex_core::{
    color::{Color, Palette},
    design::ComponentType,
    geometry::Camera,
};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    data: DataConfig,
    output: OutputConfig,
    plot: PlotConfig,
    network: NetworkConfig,
    colors: ColorsConfig,
    analysis: AnalysisConfig,
    selection: SelectionConfig,
}

impl AppConfig {
    pub fn data(&self) -> &DataConfig {
        &self.data
    }

    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    pub fn plot(&self) -> &PlotConfig {
        &self.plot
    }

    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }

    pub fn colors(&self) -> &ColorsConfig {
        &self.colors
    }

    pub fn analysis(&self) -> &AnalysisConfig {
        &self.analysis
    }

    pub fn selection(&self) -> &SelectionConfig {
        &self.selection
    }

    /// Overrides the corpus root.
    pub fn with_data_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.data.root = Some(root.into());
        self
    }

    /// Overrides the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output.dir = dir.into();
        self
    }

    /// Turns date-stamped output names on or off.
    pub fn with_date_stamp(mut self, date_stamp: bool) -> Self {
        self.output.date_stamp = date_stamp;
        self
    }
}

/// Corpus layout.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    root: Option<PathBuf>,
    design_prefix: String,
    descriptor_file: String,
    tree_file: String,
    cad_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            root: None,
            design_prefix: "design_".to_string(),
            descriptor_file: "design_low_level.json".to_string(),
            tree_file: "design_tree.json".to_string(),
            cad_file: "cadfile.stl".to_string(),
        }
    }
}

impl DataConfig {
    /// Corpus root, if configured.
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Prefix of design directory names, followed by the design number.
    pub fn design_prefix(&self) -> &str {
        &self.design_prefix
    }

    pub fn descriptor_file(&self) -> &str {
        &self.descriptor_file
    }

    pub fn tree_file(&self) -> &str {
        &self.tree_file
    }

    pub fn cad_file(&self) -> &str {
        &self.cad_file
    }
}

/// Where and how output files are written.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    dir: PathBuf,
    date_stamp: bool,
    report_name: String,
    formats: Vec<ImageFormat>,
    raster_scale: f32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("plots"),
            date_stamp: true,
            report_name: "complexity_report".to_string(),
            formats: vec![ImageFormat::Svg, ImageFormat::Png],
            raster_scale: 2.0,
        }
    }
}

/// File format a chart is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Svg,
    Png,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }
}

impl OutputConfig {
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Whether file names get a `YYYY-MM-DD_` prefix.
    pub fn date_stamp(&self) -> bool {
        self.date_stamp
    }

    /// Base name of the JSON report.
    pub fn report_name(&self) -> &str {
        &self.report_name
    }

    /// Formats every chart is written in, in write order.
    pub fn formats(&self) -> &[ImageFormat] {
        &self.formats
    }

    /// Pixels per chart unit in raster output.
    pub fn raster_scale(&self) -> f32 {
        self.raster_scale
    }
}

/// Chart geometry and typography.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    width: f32,
    height: f32,
    background_color: String,
    font_family: String,
    font_size: f32,
    title_font_size: f32,
    azimuth: f32,
    elevation: f32,
    grid_columns: usize,
    panel_size: f32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            background_color: "white".to_string(),
            font_family: "sans-serif".to_string(),
            font_size: 12.0,
            title_font_size: 16.0,
            azimuth: -60.0,
            elevation: 30.0,
            grid_columns: 5,
            panel_size: 360.0,
        }
    }
}

impl PlotConfig {
    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Parsed background color.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a CSS color.
    pub fn background_color(&self) -> Result<Color, String> {
        Color::new(&self.background_color)
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn title_font_size(&self) -> f32 {
        self.title_font_size
    }

    /// Camera used for network and CAD projections.
    pub fn camera(&self) -> Camera {
        Camera::new(self.azimuth, self.elevation)
    }

    /// Number of panel columns in grid charts; at least one.
    pub fn grid_columns(&self) -> usize {
        self.grid_columns.max(1)
    }

    /// Edge length of one grid panel.
    pub fn panel_size(&self) -> f32 {
        self.panel_size
    }
}

/// Network plot styling and the force-directed fallback layout.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    node_radius: f32,
    node_opacity: f32,
    edge_color: String,
    edge_width: f32,
    edge_opacity: f32,
    show_labels: bool,
    force_iterations: usize,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            node_radius: 7.0,
            node_opacity: 0.95,
            edge_color: "gray".to_string(),
            edge_width: 1.2,
            edge_opacity: 0.5,
            show_labels: false,
            force_iterations: 100,
        }
    }
}

impl NetworkConfig {
    pub fn node_radius(&self) -> f32 {
        self.node_radius
    }

    pub fn node_opacity(&self) -> f32 {
        self.node_opacity
    }

    /// Parsed edge color.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a CSS color.
    pub fn edge_color(&self) -> Result<Color, String> {
        Color::new(&self.edge_color).map_err(|err| format!("Invalid edge color in config: {err}"))
    }

    pub fn edge_width(&self) -> f32 {
        self.edge_width
    }

    pub fn edge_opacity(&self) -> f32 {
        self.edge_opacity
    }

    /// Whether single-design network plots label each node.
    pub fn show_labels(&self) -> bool {
        self.show_labels
    }

    /// Iterations of the fallback force simulation.
    pub fn force_iterations(&self) -> usize {
        self.force_iterations
    }
}

/// Component type colors, merged over the built-in palette.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    components: BTreeMap<String, String>,
    fallback: Option<String>,
}

impl ColorsConfig {
    /// Builds the palette: built-in colors overridden by configured ones.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first entry that is not a CSS color.
    pub fn palette(&self) -> Result<Palette, String> {
        let base = Palette::default();
        let fallback = match &self.fallback {
            Some(fallback) => Color::new(fallback)
                .map_err(|err| format!("Invalid fallback color in config: {err}"))?,
            None => base.fallback(),
        };

        let mut palette = Palette::new(BTreeMap::new(), fallback);
        for kind in KNOWN_TYPES {
            let kind = ComponentType::from(kind);
            palette = palette.with_color(kind.as_str(), base.color_for(&kind));
        }
        for (type_name, color) in &self.components {
            let color = Color::new(color)
                .map_err(|err| format!("Invalid color for `{type_name}` in config: {err}"))?;
            palette = palette.with_color(type_name.as_str(), color);
        }
        Ok(palette)
    }
}

const KNOWN_TYPES: [&str; 11] = [
    "MainHub",
    "Arm",
    "Motor",
    "Propeller",
    "Flange",
    "Tube",
    "Sensor",
    "Battery",
    "Fuselage",
    "BatteryController",
    "LandingGear",
];

/// Analysis options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    radar_component_type: String,
    density_points: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            radar_component_type: "Motor".to_string(),
            density_points: 100,
        }
    }
}

impl AnalysisConfig {
    /// Component type whose nodes feed the radar chart.
    pub fn radar_component_type(&self) -> ComponentType {
        ComponentType::from(self.radar_component_type.as_str())
    }

    /// Number of samples of each violin density curve; at least two.
    pub fn density_points(&self) -> usize {
        self.density_points.max(2)
    }
}

/// A labelled representative design.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SelectionEntry {
    label: String,
    number: u32,
}

impl SelectionEntry {
    pub fn new(label: impl Into<String>, number: u32) -> Self {
        Self {
            label: label.into(),
            number,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn number(&self) -> u32 {
        self.number
    }
}

/// Representative designs, in display order.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    designs: Vec<SelectionEntry>,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            designs: vec![
                SelectionEntry::new("Least Complexity", 1),
                SelectionEntry::new("Medium Complexity", 14),
                SelectionEntry::new("Highest Complexity", 5),
                SelectionEntry::new("Most Uncertain/Non-Classical", 12),
            ],
        }
    }
}

impl SelectionConfig {
    pub fn new(designs: Vec<SelectionEntry>) -> Self {
        Self { designs }
    }

    pub fn designs(&self) -> &[SelectionEntry] {
        &self.designs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.output().dir(), Path::new("plots"));
        assert!(config.output().date_stamp());
        assert_eq!(
            config.output().formats(),
            &[ImageFormat::Svg, ImageFormat::Png]
        );
        assert_eq!(config.plot().grid_columns(), 5);
        assert_eq!(config.analysis().radar_component_type(), ComponentType::Motor);
        assert_eq!(config.selection().designs().len(), 4);
        assert_eq!(config.selection().designs()[2].number(), 5);
    }

    #[test]
    fn test_palette_override_and_fallback() {
        let colors = ColorsConfig {
            components: BTreeMap::from([("Wing".to_string(), "navy".to_string())]),
            fallback: Some("black".to_string()),
        };
        let palette = colors.palette().unwrap();

        assert_eq!(
            palette.color_for(&ComponentType::from("Wing")),
            Color::new("navy").unwrap()
        );
        assert_eq!(
            palette.color_for(&ComponentType::Motor),
            Color::new("#45B7D1").unwrap()
        );
        assert_eq!(
            palette.color_for(&ComponentType::from("Rotor")),
            Color::new("black").unwrap()
        );
    }

    #[test]
    fn test_invalid_color_is_reported() {
        let colors = ColorsConfig {
            components: BTreeMap::from([("Arm".to_string(), "not-a-color".to_string())]),
            fallback: None,
        };
        let err = colors.palette().unwrap_err();
        assert!(err.contains("`Arm`"));
    }

    #[test]
    fn test_builder_overrides() {
        let config = AppConfig::default()
            .with_data_root("/data")
            .with_output_dir("/out")
            .with_date_stamp(false);

        assert_eq!(config.data().root(), Some(Path::new("/data")));
        assert_eq!(config.output().dir(), Path::new("/out"));
        assert!(!config.output().date_stamp());
    }
}

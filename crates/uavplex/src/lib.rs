//! UAVPLEX - structural complexity of UAV designs.
//!
//! Loading, entropy-based complexity analysis and chart rendering for a
//! corpus of UAV design descriptors. Each design is a graph of components
//! joined by connector-to-connector connections; its complexity combines the
//! entropies of component types, connectors and neighbor types.

pub mod analysis;
pub mod config;
pub mod corpus;
pub mod export;
pub mod geometry_summary;
pub mod positions;
pub mod selection;
pub mod structure;

mod error;

pub use uavplex_core::{color, design, geometry, identifier, mesh};

pub use error::UavplexError;

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info, warn};

use uavplex_core::design::Design;

use analysis::{BoxStats, ComplexityResult, RadarPoint};
use config::AppConfig;
use corpus::Corpus;
use export::{
    Exporter, OutputDir,
    report::Report,
    svg::{CadModel, NetworkPanel, Svg, SvgBuilder},
};
use positions::{ForceLayout, PositionCalculator, Positions};
use selection::SelectedDesign;

/// Builder for loading, analyzing and charting a design corpus.
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::Path;
///
/// use uavplex::{StudyBuilder, config::AppConfig};
///
/// let builder = StudyBuilder::new(AppConfig::default());
///
/// // Load every design directory below the data root
/// let corpus = builder.load(Path::new("data")).expect("Failed to load");
///
/// // Analyze and render
/// let results = builder.analyze_corpus(&corpus);
/// let svg = builder
///     .render_comparison_svg(&results)
///     .expect("Failed to render");
///
/// // Or use default config
/// let builder = StudyBuilder::default();
/// ```
#[derive(Default)]
pub struct StudyBuilder {
    config: AppConfig,
}

impl StudyBuilder {
    /// Create a new study builder with the given configuration.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use uavplex::{StudyBuilder, config::AppConfig};
    ///
    /// let builder = StudyBuilder::new(AppConfig::default());
    /// ```
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Load the design corpus under `root`.
    ///
    /// Designs that fail to load are kept as failures of the corpus; the
    /// batch continues.
    ///
    /// # Errors
    ///
    /// Returns `UavplexError::Io` if `root` cannot be listed.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use std::path::Path;
    ///
    /// use uavplex::StudyBuilder;
    ///
    /// let corpus = StudyBuilder::default()
    ///     .load(Path::new("data"))
    ///     .expect("Failed to load");
    /// for failure in corpus.failures() {
    ///     eprintln!("{}: {}", failure.design(), failure.error());
    /// }
    /// ```
    pub fn load(&self, root: &Path) -> Result<Corpus, UavplexError> {
        Corpus::load(root, self.config.data())
    }

    /// Compute the complexity metrics of one design.
    ///
    /// # Errors
    ///
    /// Returns `UavplexError::Validation` for duplicate components or
    /// connections to unknown components.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uavplex::{
    ///     StudyBuilder,
    ///     design::{Component, Connection, Design},
    /// };
    ///
    /// let design = Design::new(
    ///     "design_1",
    ///     vec![Component::new("Hub", "MainHub"), Component::new("M1", "Motor")],
    ///     vec![Connection::new("Hub", "M1")],
    /// );
    /// let result = StudyBuilder::default().analyze(&design).unwrap();
    /// assert_eq!(result.diversity(), 1.0);
    /// ```
    pub fn analyze(&self, design: &Design) -> Result<ComplexityResult, UavplexError> {
        debug!(design = design.name(); "Analyzing design");
        let result = analysis::analyze(design)?;
        info!(
            design = design.name(),
            total = result.total_complexity(),
            energy = result.graph_energy();
            "Design analyzed"
        );
        Ok(result)
    }

    /// Analyze every design of the corpus, in corpus order.
    ///
    /// Designs that fail validation are logged and left out.
    pub fn analyze_corpus(&self, corpus: &Corpus) -> Vec<ComplexityResult> {
        corpus
            .designs()
            .iter()
            .filter_map(|design| match self.analyze(design) {
                Ok(result) => Some(result),
                Err(err) => {
                    warn!(design = design.name(), err:% = err; "Skipping design");
                    None
                }
            })
            .collect()
    }

    /// Compute the 3D component positions of one design.
    ///
    /// # Errors
    ///
    /// Returns `UavplexError::Validation` if the design is malformed.
    pub fn positions(&self, design: &Design) -> Result<Positions, UavplexError> {
        let force =
            ForceLayout::new().with_iterations(self.config.network().force_iterations());
        let positions = PositionCalculator::new(force).calculate(design)?;
        debug!(
            design = design.name(),
            placement:? = positions.placement();
            "Positions calculated"
        );
        Ok(positions)
    }

    /// Resolve the configured representative designs.
    pub fn select(&self, corpus: &Corpus) -> Vec<SelectedDesign> {
        selection::select(corpus, self.config.selection().designs())
    }

    /// Radar data of the configured component type, one point per result.
    pub fn radar_points(&self, results: &[ComplexityResult]) -> Vec<RadarPoint> {
        let kind = self.config.analysis().radar_component_type();
        results
            .iter()
            .map(|result| RadarPoint::from_result(result, &kind))
            .collect()
    }

    /// Box statistics of node local complexity.
    ///
    /// Uses the selected designs, labelled by their selection, when any
    /// resolved; otherwise every result under its design name.
    pub fn box_stats(
        &self,
        results: &[ComplexityResult],
        selection: &[SelectedDesign],
    ) -> Vec<BoxStats> {
        if selection.is_empty() {
            return results
                .iter()
                .filter_map(|result| BoxStats::from_result(result.design(), result))
                .collect();
        }

        selection
            .iter()
            .filter_map(|selected| {
                let result = results.iter().find(|r| r.design() == selected.design())?;
                BoxStats::from_result(selected.display_label(), result)
            })
            .collect()
    }

    /// Read the CAD model of a design.
    ///
    /// Missing or unreadable STL files yield a placeholder model and a
    /// warning.
    pub fn cad_model(&self, design: &Design) -> CadModel {
        let Some(path) = design.cad_path() else {
            return CadModel::Missing;
        };

        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(design = design.name(), path:? = path, err:err; "Failed to read STL file");
                return CadModel::Invalid(err.to_string());
            }
        };
        match uavplex_parser::parse_stl(&bytes) {
            Ok(mesh) => {
                debug!(design = design.name(), triangles = mesh.len(); "STL loaded");
                CadModel::Mesh(mesh)
            }
            Err(err) => {
                warn!(design = design.name(), path:? = path, err:% = err; "Invalid STL file");
                CadModel::Invalid(err.to_string())
            }
        }
    }

    /// Render the 3D network of one design to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns `UavplexError` for malformed designs or invalid plot colors.
    pub fn render_network_svg(&self, design: &Design) -> Result<String, UavplexError> {
        let positions = self.positions(design)?;
        let doc = self.svg()?.render_network(design, &positions, design.name());
        Ok(doc.to_string())
    }

    /// Render the CAD model of one design to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns `UavplexError` for invalid plot colors.
    pub fn render_cad_svg(&self, design: &Design) -> Result<String, UavplexError> {
        let doc = self
            .svg()?
            .render_cad(design.name(), &self.cad_model(design));
        Ok(doc.to_string())
    }

    /// Render the grouped metric comparison to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns `UavplexError` for invalid plot colors.
    pub fn render_comparison_svg(
        &self,
        results: &[ComplexityResult],
    ) -> Result<String, UavplexError> {
        Ok(self.svg()?.render_comparison(results).to_string())
    }

    /// Render the radar chart of the configured component type to an SVG
    /// string.
    ///
    /// # Errors
    ///
    /// Returns `UavplexError` for invalid plot colors.
    pub fn render_radar_svg(&self, results: &[ComplexityResult]) -> Result<String, UavplexError> {
        let kind = self.config.analysis().radar_component_type();
        let doc = self
            .svg()?
            .render_radar(&self.radar_points(results), &kind);
        Ok(doc.to_string())
    }

    /// Analyze the corpus and write the report and, with `plots`, every
    /// chart to `exporter`.
    ///
    /// Returns the written paths in write order.
    ///
    /// # Errors
    ///
    /// Returns `UavplexError` if the plot style is invalid, a design is
    /// malformed or writing fails.
    pub fn export_to(
        &self,
        corpus: &Corpus,
        exporter: &mut impl Exporter,
        plots: bool,
    ) -> Result<Vec<PathBuf>, UavplexError> {
        let results = self.analyze_corpus(corpus);
        let selection = self.select(corpus);
        let mut written = Vec::new();

        let report = Report::new(corpus, &results, &selection, self.radar_points(&results));
        let summary = report.summary();
        info!(
            designs = summary.design_count(),
            mean_total = summary.total_complexity().mean(),
            max_total = summary.total_complexity().max();
            "Complexity summary"
        );
        written.push(exporter.export_report(self.config.output().report_name(), &report)?);

        if !plots {
            return Ok(written);
        }

        let svg = self.svg()?;
        for (name, doc) in self.render_charts(&svg, corpus, &results, &selection)? {
            written.extend(exporter.export_chart(&name, &doc)?);
        }

        info!(files = written.len(); "Export finished");
        Ok(written)
    }

    /// Analyze the corpus and write everything to the configured output
    /// directory, which is created when missing.
    ///
    /// # Errors
    ///
    /// See [`StudyBuilder::export_to`].
    pub fn export_all(&self, corpus: &Corpus, plots: bool) -> Result<Vec<PathBuf>, UavplexError> {
        let output = self.config.output();
        let mut dir = OutputDir::new(output.dir(), output.date_stamp())
            .with_formats(output.formats(), output.raster_scale());
        self.export_to(corpus, &mut dir, plots)
    }

    fn svg(&self) -> Result<Svg, UavplexError> {
        Ok(SvgBuilder::new(&self.config).build()?)
    }

    fn render_charts(
        &self,
        svg: &Svg,
        corpus: &Corpus,
        results: &[ComplexityResult],
        selection: &[SelectedDesign],
    ) -> Result<Vec<(String, ::svg::Document)>, UavplexError> {
        let mut charts = Vec::new();

        let analyzed: Vec<&Design> = corpus
            .designs()
            .iter()
            .filter(|design| results.iter().any(|r| r.design() == design.name()))
            .collect();
        let positions = analyzed
            .iter()
            .map(|design| self.positions(design))
            .collect::<Result<Vec<_>, _>>()?;

        let panels: Vec<NetworkPanel<'_>> = analyzed
            .iter()
            .copied()
            .zip(&positions)
            .zip(results)
            .map(|((design, positions), result)| NetworkPanel {
                design,
                positions,
                result,
            })
            .collect();
        charts.push((
            "3D_Network_Graphs_All".to_string(),
            svg.render_network_grid(&panels),
        ));

        for selected in selection {
            let Some(panel) = panels.iter().find(|p| p.design.name() == selected.design()) else {
                continue;
            };
            let title = format!("{}\n{}", selected.label(), selected.design());
            charts.push((
                format!("Network_{}", selected.design()),
                svg.render_network(panel.design, panel.positions, &title),
            ));
        }

        let models: Vec<(&str, CadModel)> = corpus
            .designs()
            .iter()
            .map(|design| (design.name(), self.cad_model(design)))
            .collect();
        charts.push(("CAD_Models_All".to_string(), svg.render_cad_grid(&models)));

        charts.push((
            "Complexity_Comparison".to_string(),
            svg.render_comparison(results),
        ));

        let stats = self.box_stats(results, selection);
        charts.push((
            "Node_Complexity_Box_Plot".to_string(),
            svg.render_box_plot(&stats),
        ));
        charts.push((
            "Node_Complexity_Violin_Plot".to_string(),
            svg.render_violin_plot(&stats),
        ));

        let kind = self.config.analysis().radar_component_type();
        charts.push((
            format!("{kind}_Complexity_Radar_Plot_All_Designs"),
            svg.render_radar(&self.radar_points(results), &kind),
        ));

        debug!(charts = charts.len(); "Charts rendered");
        Ok(charts)
    }
}

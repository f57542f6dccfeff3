//! Design corpus discovery and loading.
//!
//! A corpus root holds one directory per design, named `<prefix><number>`
//! with an optional `_suffix`. Each directory carries a required descriptor,
//! an optional design tree and an optional STL mesh. A design that fails to
//! load is recorded as a [`LoadFailure`] and the rest of the batch continues.

use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info, warn};
use serde::Serialize;

use uavplex_core::design::Design;

use crate::{config::DataConfig, error::UavplexError};

/// Sort key of designs whose name carries no number.
pub const UNNUMBERED: u32 = 999;

/// A design directory that could not be loaded.
#[derive(Debug)]
pub struct LoadFailure {
    design: String,
    error: UavplexError,
}

impl LoadFailure {
    pub fn design(&self) -> &str {
        &self.design
    }

    pub fn error(&self) -> &UavplexError {
        &self.error
    }
}

/// Aggregate counts over a corpus.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CorpusStats {
    design_count: usize,
    total_nodes: usize,
    total_edges: usize,
    avg_nodes: f64,
    avg_edges: f64,
    component_types: BTreeSet<String>,
}

impl CorpusStats {
    pub fn design_count(&self) -> usize {
        self.design_count
    }

    pub fn total_nodes(&self) -> usize {
        self.total_nodes
    }

    pub fn total_edges(&self) -> usize {
        self.total_edges
    }

    pub fn avg_nodes(&self) -> f64 {
        self.avg_nodes
    }

    pub fn avg_edges(&self) -> f64 {
        self.avg_edges
    }

    /// Distinct component type names, sorted.
    pub fn component_types(&self) -> &BTreeSet<String> {
        &self.component_types
    }
}

/// The loaded designs of a corpus, in design-number order.
#[derive(Debug, Default)]
pub struct Corpus {
    designs: Vec<Design>,
    failures: Vec<LoadFailure>,
    prefix: String,
}

impl Corpus {
    /// Loads every design directory under `root`.
    ///
    /// # Errors
    ///
    /// Fails only when `root` itself cannot be listed. Per-design problems
    /// end up in [`Corpus::failures`].
    pub fn load(root: &Path, data: &DataConfig) -> Result<Self, UavplexError> {
        info!(root:? = root; "Loading design corpus");
        let dirs = discover_designs(root, data.design_prefix())?;

        let mut designs = Vec::with_capacity(dirs.len());
        let mut failures = Vec::new();
        for dir in dirs {
            let name = dir_name(&dir);
            match load_design(&dir, &name, data) {
                Ok(design) => {
                    info!(
                        design = name,
                        nodes = design.components().len(),
                        edges = design.connections().len();
                        "Design loaded"
                    );
                    designs.push(design);
                }
                Err(error) => {
                    warn!(design = name, err:% = error; "Failed to load design");
                    failures.push(LoadFailure {
                        design: name,
                        error,
                    });
                }
            }
        }

        info!(
            loaded = designs.len(),
            failed = failures.len();
            "Corpus loaded"
        );
        Ok(Self {
            designs,
            failures,
            prefix: data.design_prefix().to_string(),
        })
    }

    /// Wraps already built designs, keeping their order.
    pub fn from_designs(designs: Vec<Design>, prefix: impl Into<String>) -> Self {
        Self {
            designs,
            failures: Vec::new(),
            prefix: prefix.into(),
        }
    }

    pub fn designs(&self) -> &[Design] {
        &self.designs
    }

    pub fn failures(&self) -> &[LoadFailure] {
        &self.failures
    }

    pub fn len(&self) -> usize {
        self.designs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.designs.is_empty()
    }

    /// Number parsed from a design's name, if any.
    pub fn design_number(&self, design: &Design) -> Option<u32> {
        Design::number_from_name(design.name(), &self.prefix)
    }

    /// Design whose name carries `number`.
    ///
    /// When several directories share a number the last one in discovery
    /// order wins, so `design_5_alt` shadows `design_5`.
    pub fn design_by_number(&self, number: u32) -> Option<&Design> {
        self.designs
            .iter()
            .rev()
            .find(|design| self.design_number(design) == Some(number))
    }

    pub fn stats(&self) -> CorpusStats {
        let design_count = self.designs.len();
        let total_nodes: usize = self.designs.iter().map(|d| d.components().len()).sum();
        let total_edges: usize = self.designs.iter().map(|d| d.connections().len()).sum();
        let component_types = self
            .designs
            .iter()
            .flat_map(|d| d.components())
            .map(|c| c.kind().as_str().to_string())
            .collect();

        let average = |total: usize| {
            if design_count == 0 {
                0.0
            } else {
                total as f64 / design_count as f64
            }
        };

        CorpusStats {
            design_count,
            total_nodes,
            total_edges,
            avg_nodes: average(total_nodes),
            avg_edges: average(total_edges),
            component_types,
        }
    }
}

/// Lists design directories under `root`, sorted by design number and then
/// by name. Names without a number sort last.
///
/// # Errors
///
/// Returns the I/O error of listing `root`.
pub fn discover_designs(root: &Path, prefix: &str) -> Result<Vec<PathBuf>, UavplexError> {
    let mut dirs: Vec<PathBuf> = fs::read_dir(root)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir() && dir_name(path).starts_with(prefix))
        .collect();

    dirs.sort_by_key(|path| {
        let name = dir_name(path);
        let number = Design::number_from_name(&name, prefix).unwrap_or(UNNUMBERED);
        (number, name)
    });

    debug!(count = dirs.len(), root:? = root; "Design directories discovered");
    Ok(dirs)
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn load_design(dir: &Path, name: &str, data: &DataConfig) -> Result<Design, UavplexError> {
    let descriptor_path = dir.join(data.descriptor_file());
    let source = fs::read_to_string(&descriptor_path)?;
    let mut design = uavplex_parser::parse_design(name, &source)
        .map_err(|err| UavplexError::new_parse_error(err, source.as_str(), &descriptor_path))?;

    let tree_path = dir.join(data.tree_file());
    if tree_path.is_file() {
        let source = fs::read_to_string(&tree_path)?;
        let airframe = uavplex_parser::parse_airframe(&source)
            .map_err(|err| UavplexError::new_parse_error(err, source.as_str(), &tree_path))?;
        design = design.with_airframe(airframe);
    } else {
        debug!(design = name; "No design tree, geometry unavailable");
    }

    let cad_path = dir.join(data.cad_file());
    if cad_path.is_file() {
        design = design.with_cad_path(cad_path);
    }

    design.validate()?;
    Ok(design)
}

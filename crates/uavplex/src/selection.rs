//! Labelled representative designs.

use std::collections::HashSet;

use log::{debug, warn};
use serde::Serialize;

use uavplex_core::{design::Design, identifier::Id};

use crate::{config::SelectionEntry, corpus::Corpus};

/// Connection statistics of a selected design.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedDesign {
    label: String,
    design: String,
    number: u32,
    node_count: usize,
    edge_count: usize,
    type_count: usize,
    conn_type_count: usize,
    reciprocal: usize,
    one_way: usize,
    uncertainty: f64,
}

impl SelectedDesign {
    /// Computes the statistics of `design` under `label`.
    pub fn new(label: impl Into<String>, number: u32, design: &Design) -> Self {
        let connections = design.connections();
        let pairs: HashSet<(Id, Id)> = connections.iter().map(|c| (c.from(), c.to())).collect();

        let bidirectional = connections
            .iter()
            .filter(|c| pairs.contains(&(c.to(), c.from())))
            .count();
        let one_way = connections.len() - bidirectional;
        let reciprocal = bidirectional / 2;

        let type_count = design
            .components()
            .iter()
            .map(|c| c.kind())
            .collect::<HashSet<_>>()
            .len();
        let conn_type_count = connections
            .iter()
            .map(|c| format!("{}→{}", c.from_connector(), c.to_connector()))
            .collect::<HashSet<_>>()
            .len();

        let uncertainty = type_count as f64
            + conn_type_count as f64
            + reciprocal as f64 / connections.len().max(1) as f64;

        Self {
            label: label.into(),
            design: design.name().to_string(),
            number,
            node_count: design.components().len(),
            edge_count: connections.len(),
            type_count,
            conn_type_count,
            reciprocal,
            one_way,
            uncertainty,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn design(&self) -> &str {
        &self.design
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Distinct component types.
    pub fn type_count(&self) -> usize {
        self.type_count
    }

    /// Distinct `from_conn→to_conn` pairs.
    pub fn conn_type_count(&self) -> usize {
        self.conn_type_count
    }

    /// Pairs of components connected in both directions.
    pub fn reciprocal(&self) -> usize {
        self.reciprocal
    }

    /// Connections without a reverse counterpart.
    pub fn one_way(&self) -> usize {
        self.one_way
    }

    /// `type_count + conn_type_count + reciprocal / max(edges, 1)`.
    pub fn uncertainty(&self) -> f64 {
        self.uncertainty
    }

    /// Box and violin label: the selection label over the design name.
    pub fn display_label(&self) -> String {
        format!("{}\n({})", self.label, self.design)
    }
}

/// Resolves each entry to a design of the corpus by number.
///
/// Entries whose number matches no design are logged and skipped.
pub fn select(corpus: &Corpus, entries: &[SelectionEntry]) -> Vec<SelectedDesign> {
    entries
        .iter()
        .filter_map(|entry| match corpus.design_by_number(entry.number()) {
            Some(design) => {
                let selected = SelectedDesign::new(entry.label(), entry.number(), design);
                debug!(
                    label = entry.label(),
                    design = design.name(),
                    uncertainty = selected.uncertainty();
                    "Design selected"
                );
                Some(selected)
            }
            None => {
                warn!(
                    label = entry.label(),
                    number = entry.number();
                    "Selected design not found"
                );
                None
            }
        })
        .collect()
}

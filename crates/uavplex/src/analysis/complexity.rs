//! Per-design structural complexity.

use log::debug;
use serde::Serialize;

use uavplex_core::{
    design::{ComponentType, Design, ValidationError},
    identifier::Id,
};

use super::{
    energy::graph_energy,
    entropy::{entropy, entropy_of_counts, frequencies, surprisal},
};
use crate::structure::DesignGraph;

/// Complexity metrics of a single component.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeMetrics {
    id: Id,
    component_type: ComponentType,
    degree: usize,
    in_degree: usize,
    out_degree: usize,
    neighbor_diversity: f64,
    connection_diversity: f64,
    local_complexity: f64,
    type_surprisal: f64,
    contribution: f64,
}

impl NodeMetrics {
    pub fn id(&self) -> Id {
        self.id
    }

    pub fn component_type(&self) -> &ComponentType {
        &self.component_type
    }

    /// Undirected degree; a self-loop counts twice.
    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn in_degree(&self) -> usize {
        self.in_degree
    }

    pub fn out_degree(&self) -> usize {
        self.out_degree
    }

    /// Entropy of the types of distinct successors followed by distinct
    /// predecessors.
    pub fn neighbor_diversity(&self) -> f64 {
        self.neighbor_diversity
    }

    /// Entropy of the connector names on this component's side of its
    /// connections.
    pub fn connection_diversity(&self) -> f64 {
        self.connection_diversity
    }

    /// `neighbor_diversity + connection_diversity`.
    pub fn local_complexity(&self) -> f64 {
        self.local_complexity
    }

    /// `log2(1/p)` of this component's type.
    pub fn type_surprisal(&self) -> f64 {
        self.type_surprisal
    }

    /// Share of the design's `total_complexity` attributed to this component.
    pub fn contribution(&self) -> f64 {
        self.contribution
    }
}

/// Complexity metrics of a design.
///
/// Field names are stable; the JSON report serializes them verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplexityResult {
    design: String,
    node_count: usize,
    edge_count: usize,
    type_count: usize,
    diversity: f64,
    flexibility: f64,
    combinability: f64,
    in_degree_entropy: f64,
    out_degree_entropy: f64,
    total_complexity: f64,
    graph_energy: f64,
    structural_complexity: f64,
    nodes: Vec<NodeMetrics>,
}

impl ComplexityResult {
    fn empty(design: &str) -> Self {
        Self {
            design: design.to_string(),
            node_count: 0,
            edge_count: 0,
            type_count: 0,
            diversity: 0.0,
            flexibility: 0.0,
            combinability: 0.0,
            in_degree_entropy: 0.0,
            out_degree_entropy: 0.0,
            total_complexity: 0.0,
            graph_energy: 0.0,
            structural_complexity: 0.0,
            nodes: Vec::new(),
        }
    }

    pub fn design(&self) -> &str {
        &self.design
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Number of distinct component types.
    pub fn type_count(&self) -> usize {
        self.type_count
    }

    /// Entropy of component types.
    pub fn diversity(&self) -> f64 {
        self.diversity
    }

    /// Entropy of connector names over all connection endpoints.
    pub fn flexibility(&self) -> f64 {
        self.flexibility
    }

    /// Entropy of the degree distribution.
    pub fn combinability(&self) -> f64 {
        self.combinability
    }

    pub fn in_degree_entropy(&self) -> f64 {
        self.in_degree_entropy
    }

    pub fn out_degree_entropy(&self) -> f64 {
        self.out_degree_entropy
    }

    /// System score: `diversity + flexibility + combinability`.
    pub fn total_complexity(&self) -> f64 {
        self.total_complexity
    }

    /// Sum of absolute adjacency eigenvalues.
    pub fn graph_energy(&self) -> f64 {
        self.graph_energy
    }

    /// `N + pairs · energy / N` with unit weights.
    pub fn structural_complexity(&self) -> f64 {
        self.structural_complexity
    }

    /// Per-component metrics in design order.
    pub fn nodes(&self) -> &[NodeMetrics] {
        &self.nodes
    }

    /// Per-component metrics of one component type.
    pub fn nodes_of_type<'a>(
        &'a self,
        kind: &'a ComponentType,
    ) -> impl Iterator<Item = &'a NodeMetrics> + 'a {
        self.nodes
            .iter()
            .filter(move |node| node.component_type() == kind)
    }
}

/// Computes the complexity metrics of a design.
///
/// # Errors
///
/// Returns a [`ValidationError`] when a connection references a component
/// that does not exist or a component identifier is repeated.
///
/// # Examples
///
/// ```
/// use uavplex::analysis::analyze;
/// use uavplex_core::design::{Component, Connection, Design};
///
/// let design = Design::new(
///     "quad",
///     vec![
///         Component::new("Hub", "MainHub"),
///         Component::new("M1", "Motor"),
///         Component::new("M2", "Motor"),
///         Component::new("S1", "Sensor"),
///     ],
///     vec![
///         Connection::new("Hub", "M1"),
///         Connection::new("Hub", "M2"),
///         Connection::new("Hub", "S1"),
///     ],
/// );
///
/// let result = analyze(&design).unwrap();
/// assert!((result.diversity() - 1.5).abs() < 1e-12);
/// ```
pub fn analyze(design: &Design) -> Result<ComplexityResult, ValidationError> {
    let graph = DesignGraph::from_design(design)?;
    let n = graph.node_count();
    if n == 0 {
        debug!(design = design.name(); "Empty design, all metrics are zero");
        return Ok(ComplexityResult::empty(design.name()));
    }
    let e = graph.edge_count();
    let endpoints = 2 * e;

    let type_counts = frequencies(design.components().iter().map(|c| c.kind()));
    let connector_counts = frequencies(
        design
            .connections()
            .iter()
            .map(|c| c.from_connector())
            .chain(design.connections().iter().map(|c| c.to_connector())),
    );

    let degrees: Vec<usize> = graph.node_indices().map(|idx| graph.degree(idx)).collect();
    let degree_counts = frequencies(degrees.iter().copied());
    let in_degrees = graph.node_indices().map(|idx| graph.in_degree(idx));
    let out_degrees = graph.node_indices().map(|idx| graph.out_degree(idx));

    let diversity = entropy_of_counts(type_counts.values());
    let flexibility = entropy_of_counts(connector_counts.values());
    let combinability = entropy_of_counts(degree_counts.values());
    let total_complexity = diversity + flexibility + combinability;

    let nodes = graph
        .node_indices()
        .map(|idx| {
            let component = graph.component(idx);
            let kind = component.kind();

            let neighbor_types = graph
                .successors(idx)
                .into_iter()
                .chain(graph.predecessors(idx))
                .map(|neighbor| graph.component(neighbor).kind());
            let neighbor_diversity = entropy(neighbor_types);

            let own = graph.own_connectors(idx);
            let connection_diversity = entropy(own.iter().copied());

            let type_surprisal = surprisal(type_counts.get(kind).copied().unwrap_or(0), n);
            let degree = graph.degree(idx);
            let degree_surprisal =
                surprisal(degree_counts.get(&degree).copied().unwrap_or(0), n);
            let endpoint_surprisal = own
                .iter()
                .map(|name| {
                    let count = connector_counts.get(name).copied().unwrap_or(0);
                    surprisal(count, endpoints)
                })
                .fold(0.0, |acc, value| acc + value);
            let endpoint_share = if endpoints == 0 {
                0.0
            } else {
                endpoint_surprisal / endpoints as f64
            };

            NodeMetrics {
                id: component.id(),
                component_type: kind.clone(),
                degree,
                in_degree: graph.in_degree(idx),
                out_degree: graph.out_degree(idx),
                neighbor_diversity,
                connection_diversity,
                local_complexity: neighbor_diversity + connection_diversity,
                type_surprisal,
                contribution: (type_surprisal + degree_surprisal) / n as f64 + endpoint_share,
            }
        })
        .collect();

    let energy = graph_energy(&graph.adjacency_matrix());
    let pairs = graph.adjacent_pairs();
    let structural_complexity = n as f64 + pairs as f64 * energy / n as f64;

    let result = ComplexityResult {
        design: design.name().to_string(),
        node_count: n,
        edge_count: e,
        type_count: type_counts.len(),
        diversity,
        flexibility,
        combinability,
        in_degree_entropy: entropy(in_degrees),
        out_degree_entropy: entropy(out_degrees),
        total_complexity,
        graph_energy: energy,
        structural_complexity,
        nodes,
    };

    debug!(
        design = design.name(),
        total = result.total_complexity,
        diversity = result.diversity,
        flexibility = result.flexibility,
        combinability = result.combinability;
        "Design analyzed"
    );
    Ok(result)
}

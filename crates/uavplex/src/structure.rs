//! Graph view of a design.
//!
//! [`DesignGraph`] wraps a [`Design`] in a `petgraph` directed multigraph.
//! Node indices follow the design's component order and edge indices follow
//! its connection order, so every query that walks edges can report results
//! in descriptor order.

use std::collections::HashMap;

use log::trace;
use nalgebra::DMatrix;
use petgraph::{
    Direction,
    graph::{DiGraph, EdgeIndex, NodeIndex},
    visit::EdgeRef,
};

use uavplex_core::{
    design::{Component, Connection, Design, ValidationError},
    identifier::Id,
};

/// Directed multigraph over the components of one design.
///
/// Parallel connections and self-loops are kept. Structural metrics treat
/// the graph as undirected; in- and out-degree use the recorded direction.
#[derive(Debug)]
pub struct DesignGraph<'a> {
    design: &'a Design,
    graph: DiGraph<&'a Component, &'a Connection>,
    node_id_map: HashMap<Id, NodeIndex>,
}

impl<'a> DesignGraph<'a> {
    /// Builds the graph of a design.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for duplicate component identifiers or
    /// connections that reference unknown components.
    pub fn from_design(design: &'a Design) -> Result<Self, ValidationError> {
        design.validate()?;

        let mut graph =
            DiGraph::with_capacity(design.components().len(), design.connections().len());
        let mut node_id_map = HashMap::with_capacity(design.components().len());
        for component in design.components() {
            let idx = graph.add_node(component);
            node_id_map.insert(component.id(), idx);
        }

        for (index, connection) in design.connections().iter().enumerate() {
            let lookup = |id: Id| {
                node_id_map
                    .get(&id)
                    .copied()
                    .ok_or_else(|| ValidationError::DanglingConnection {
                        design: design.name().to_string(),
                        index,
                        component: id.to_string(),
                    })
            };
            let source = lookup(connection.from())?;
            let target = lookup(connection.to())?;
            graph.add_edge(source, target, connection);
        }

        trace!(
            design = design.name(),
            nodes = graph.node_count(),
            edges = graph.edge_count();
            "Design graph built"
        );

        Ok(Self {
            design,
            graph,
            node_id_map,
        })
    }

    pub fn design(&self) -> &'a Design {
        self.design
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Node indices in component order.
    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> {
        self.graph.node_indices()
    }

    pub fn component(&self, idx: NodeIndex) -> &'a Component {
        self.graph[idx]
    }

    pub fn index_of(&self, id: Id) -> Option<NodeIndex> {
        self.node_id_map.get(&id).copied()
    }

    /// Connections in descriptor order with their endpoints.
    pub fn connections(
        &self,
    ) -> impl Iterator<Item = (NodeIndex, NodeIndex, &'a Connection)> + '_ {
        self.graph
            .edge_indices()
            .filter_map(|edge| self.edge_with_endpoints(edge))
    }

    fn edge_with_endpoints(
        &self,
        edge: EdgeIndex,
    ) -> Option<(NodeIndex, NodeIndex, &'a Connection)> {
        let (source, target) = self.graph.edge_endpoints(edge)?;
        let connection = *self.graph.edge_weight(edge)?;
        Some((source, target, connection))
    }

    /// Undirected degree. A self-loop counts twice.
    pub fn degree(&self, idx: NodeIndex) -> usize {
        self.in_degree(idx) + self.out_degree(idx)
    }

    pub fn in_degree(&self, idx: NodeIndex) -> usize {
        self.graph.edges_directed(idx, Direction::Incoming).count()
    }

    pub fn out_degree(&self, idx: NodeIndex) -> usize {
        self.graph.edges_directed(idx, Direction::Outgoing).count()
    }

    /// Distinct successors, in the order their first connection appears.
    pub fn successors(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        self.distinct_neighbors(idx, Direction::Outgoing)
    }

    /// Distinct predecessors, in the order their first connection appears.
    pub fn predecessors(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        self.distinct_neighbors(idx, Direction::Incoming)
    }

    fn distinct_neighbors(&self, idx: NodeIndex, direction: Direction) -> Vec<NodeIndex> {
        let mut edges: Vec<_> = self.graph.edges_directed(idx, direction).collect();
        edges.sort_by_key(|edge| edge.id());

        let mut neighbors: Vec<NodeIndex> = Vec::with_capacity(edges.len());
        for edge in edges {
            let other = match direction {
                Direction::Outgoing => edge.target(),
                Direction::Incoming => edge.source(),
            };
            if !neighbors.contains(&other) {
                neighbors.push(other);
            }
        }
        neighbors
    }

    /// Connector names on this node's side of each incident connection:
    /// `from_conn` where it is the source, `to_conn` where it is the target.
    ///
    /// A self-loop contributes both of its connectors.
    pub fn own_connectors(&self, idx: NodeIndex) -> Vec<&'a str> {
        let mut connectors = Vec::new();
        for (source, target, connection) in self.connections() {
            if source == idx {
                connectors.push(connection.from_connector());
            }
            if target == idx {
                connectors.push(connection.to_connector());
            }
        }
        connectors
    }

    /// The other endpoint of every incident connection, in connection order.
    ///
    /// Used by chain walks, which take the first unvisited neighbor.
    pub fn incident_neighbors(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        self.connections()
            .filter_map(|(source, target, _)| {
                if source == idx {
                    Some(target)
                } else if target == idx {
                    Some(source)
                } else {
                    None
                }
            })
            .collect()
    }

    /// Whether any connection joins `a` and `b`, in either direction.
    pub fn is_adjacent(&self, a: NodeIndex, b: NodeIndex) -> bool {
        self.graph.contains_edge(a, b) || self.graph.contains_edge(b, a)
    }

    /// Symmetric binary adjacency matrix in component order.
    ///
    /// Parallel connections collapse to a single `1`; a self-loop puts `1`
    /// on the diagonal.
    pub fn adjacency_matrix(&self) -> DMatrix<f64> {
        let n = self.node_count();
        let mut matrix = DMatrix::zeros(n, n);
        for (source, target, _) in self.connections() {
            matrix[(source.index(), target.index())] = 1.0;
            matrix[(target.index(), source.index())] = 1.0;
        }
        matrix
    }

    /// Number of distinct unordered pairs of different components joined by
    /// at least one connection.
    pub fn adjacent_pairs(&self) -> usize {
        let indices: Vec<_> = self.node_indices().collect();
        let mut pairs = 0;
        for (i, &a) in indices.iter().enumerate() {
            for &b in &indices[i + 1..] {
                if self.is_adjacent(a, b) {
                    pairs += 1;
                }
            }
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn design() -> Design {
        Design::new(
            "graph",
            vec![
                Component::new("Hub", "MainHub"),
                Component::new("M1", "Motor"),
                Component::new("M2", "Motor"),
                Component::new("S1", "Sensor"),
            ],
            vec![
                Connection::new("Hub", "M1").with_connectors("Side_Connector_1", "Base"),
                Connection::new("Hub", "M1").with_connectors("Side_Connector_2", "Base"),
                Connection::new("M2", "Hub").with_connectors("Base", "Side_Connector_3"),
                Connection::new("S1", "S1").with_connectors("A", "B"),
            ],
        )
    }

    #[test]
    fn test_degrees_count_parallel_edges_and_loops() {
        let design = design();
        let graph = DesignGraph::from_design(&design).unwrap();
        let hub = graph.index_of(Id::new("Hub")).unwrap();
        let m1 = graph.index_of(Id::new("M1")).unwrap();
        let s1 = graph.index_of(Id::new("S1")).unwrap();

        assert_eq!(graph.degree(hub), 3);
        assert_eq!(graph.out_degree(hub), 2);
        assert_eq!(graph.in_degree(hub), 1);
        assert_eq!(graph.degree(m1), 2);
        assert_eq!(graph.degree(s1), 2);
    }

    #[test]
    fn test_distinct_neighbors() {
        let design = design();
        let graph = DesignGraph::from_design(&design).unwrap();
        let hub = graph.index_of(Id::new("Hub")).unwrap();

        assert_eq!(graph.successors(hub).len(), 1);
        assert_eq!(graph.predecessors(hub).len(), 1);
        assert_eq!(graph.incident_neighbors(hub).len(), 3);
    }

    #[test]
    fn test_own_connectors() {
        let design = design();
        let graph = DesignGraph::from_design(&design).unwrap();
        let hub = graph.index_of(Id::new("Hub")).unwrap();
        let s1 = graph.index_of(Id::new("S1")).unwrap();

        assert_eq!(
            graph.own_connectors(hub),
            vec!["Side_Connector_1", "Side_Connector_2", "Side_Connector_3"]
        );
        assert_eq!(graph.own_connectors(s1), vec!["A", "B"]);
    }

    #[test]
    fn test_adjacency() {
        let design = design();
        let graph = DesignGraph::from_design(&design).unwrap();
        let matrix = graph.adjacency_matrix();

        assert_eq!(matrix[(0, 1)], 1.0);
        assert_eq!(matrix[(1, 0)], 1.0);
        assert_eq!(matrix[(3, 3)], 1.0);
        assert_eq!(matrix[(1, 2)], 0.0);
        assert_eq!(graph.adjacent_pairs(), 2);
    }

    #[test]
    fn test_dangling_connection_rejected() {
        let design = Design::new(
            "dangling",
            vec![Component::new("Hub", "MainHub")],
            vec![Connection::new("Hub", "X")],
        );
        let err = DesignGraph::from_design(&design).unwrap_err();
        assert!(matches!(err, ValidationError::DanglingConnection { .. }));
    }
}

//! Radar chart data for one component type.

use serde::Serialize;

use uavplex_core::design::ComponentType;

use super::complexity::{ComplexityResult, NodeMetrics};

/// Mean node metrics of one component type within a design.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarPoint {
    design: String,
    flexibility: f64,
    combinability: f64,
    diversity: f64,
    count: usize,
}

impl RadarPoint {
    /// Averages the nodes of `kind` in `result`.
    ///
    /// A design without such nodes yields zeros and a count of zero.
    pub fn from_result(result: &ComplexityResult, kind: &ComponentType) -> Self {
        let nodes: Vec<&NodeMetrics> = result.nodes_of_type(kind).collect();
        let mean = |metric: fn(&NodeMetrics) -> f64| {
            if nodes.is_empty() {
                0.0
            } else {
                nodes.iter().map(|node| metric(node)).sum::<f64>() / nodes.len() as f64
            }
        };

        Self {
            design: result.design().to_string(),
            flexibility: mean(NodeMetrics::connection_diversity),
            combinability: mean(NodeMetrics::neighbor_diversity),
            diversity: mean(NodeMetrics::type_surprisal),
            count: nodes.len(),
        }
    }

    pub fn design(&self) -> &str {
        &self.design
    }

    /// Mean connection diversity.
    pub fn flexibility(&self) -> f64 {
        self.flexibility
    }

    /// Mean neighbor diversity.
    pub fn combinability(&self) -> f64 {
        self.combinability
    }

    /// Mean type surprisal.
    pub fn diversity(&self) -> f64 {
        self.diversity
    }

    /// Number of nodes averaged.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Axis values in chart order: flexibility, combinability, diversity.
    pub fn axes(&self) -> [f64; 3] {
        [self.flexibility, self.combinability, self.diversity]
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use uavplex_core::design::{Component, Connection, Design};

    use super::*;
    use crate::analysis::analyze;

    #[test]
    fn test_motor_averages() {
        let design = Design::new(
            "radar",
            vec![
                Component::new("Hub", "MainHub"),
                Component::new("Arm", "Arm"),
                Component::new("M1", "Motor"),
                Component::new("M2", "Motor"),
            ],
            vec![
                Connection::new("Hub", "M1").with_connectors("S1", "Base"),
                Connection::new("Arm", "M1").with_connectors("End", "Top"),
                Connection::new("Hub", "M2").with_connectors("S2", "Base"),
            ],
        );
        let result = analyze(&design).unwrap();
        let point = RadarPoint::from_result(&result, &ComponentType::Motor);

        assert_eq!(point.count(), 2);
        // M1 sees Hub and Arm with connectors Base and Top, M2 sees only Hub
        assert_approx_eq!(f64, point.flexibility(), 0.5);
        assert_approx_eq!(f64, point.combinability(), 0.5);
        assert_approx_eq!(f64, point.diversity(), 1.0);
    }

    #[test]
    fn test_missing_type_is_zero() {
        let design = Design::new("lonely", vec![Component::new("Hub", "MainHub")], vec![]);
        let result = analyze(&design).unwrap();
        let point = RadarPoint::from_result(&result, &ComponentType::Motor);

        assert_eq!(point.count(), 0);
        assert_eq!(point.axes(), [0.0, 0.0, 0.0]);
    }
}

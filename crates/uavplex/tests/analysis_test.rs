//! Properties of the complexity analysis over arbitrary designs.

use float_cmp::assert_approx_eq;
use proptest::prelude::*;

use uavplex::{
    StudyBuilder, UavplexError,
    analysis::{ComplexityResult, NodeMetrics, analyze},
    design::{Component, Connection, Design, ValidationError},
};

const TYPES: [&str; 5] = ["MainHub", "Motor", "Propeller", "Battery", "Sensor"];

fn design_strategy() -> impl Strategy<Value = Design> {
    prop::collection::vec(0..TYPES.len(), 1..12).prop_flat_map(|kinds| {
        let n = kinds.len();
        let edges = prop::collection::vec((0..n, 0..n, 0..3usize, 0..3usize), 0..20);
        (Just(kinds), edges).prop_map(|(kinds, edges)| {
            let components = kinds
                .iter()
                .enumerate()
                .map(|(i, &kind)| Component::new(format!("C{i}").as_str(), TYPES[kind]))
                .collect();
            let connections = edges
                .iter()
                .map(|&(from, to, a, b)| {
                    Connection::new(format!("C{from}").as_str(), format!("C{to}").as_str())
                        .with_connectors(format!("Conn_{a}"), format!("Conn_{b}"))
                })
                .collect();
            Design::new("generated", components, connections)
        })
    })
}

fn contribution_sum(result: &ComplexityResult) -> f64 {
    result.nodes().iter().map(NodeMetrics::contribution).sum()
}

proptest! {
    #[test]
    fn check_diversity_zero_iff_single_type(design in design_strategy()) {
        let result = analyze(&design).unwrap();
        prop_assert!(result.diversity() >= 0.0);
        prop_assert_eq!(result.diversity() == 0.0, result.type_count() == 1);
    }

    #[test]
    fn check_contributions_sum_to_total(design in design_strategy()) {
        let result = analyze(&design).unwrap();
        prop_assert!((contribution_sum(&result) - result.total_complexity()).abs() < 1e-9);
    }

    #[test]
    fn check_analysis_is_idempotent(design in design_strategy()) {
        prop_assert_eq!(analyze(&design).unwrap(), analyze(&design).unwrap());
    }
}

#[test]
fn test_hub_motor_sensor_diversity() {
    let design = Design::new(
        "scenario",
        vec![
            Component::new("Hub", "MainHub"),
            Component::new("M1", "Motor"),
            Component::new("M2", "Motor"),
            Component::new("S1", "Sensor"),
        ],
        vec![
            Connection::new("Hub", "M1"),
            Connection::new("Hub", "M2"),
            Connection::new("Hub", "S1"),
        ],
    );

    let result = analyze(&design).unwrap();
    assert_approx_eq!(f64, result.diversity(), 1.5, epsilon = 1e-12);
    assert_eq!(result.node_count(), 4);
    assert_eq!(result.edge_count(), 3);
}

#[test]
fn test_empty_design_is_all_zero() {
    let design = Design::new("empty", Vec::new(), Vec::new());
    let result = analyze(&design).unwrap();

    assert_eq!(result.node_count(), 0);
    assert_eq!(result.diversity(), 0.0);
    assert_eq!(result.flexibility(), 0.0);
    assert_eq!(result.combinability(), 0.0);
    assert_eq!(result.total_complexity(), 0.0);
    assert_eq!(result.graph_energy(), 0.0);
    assert!(result.nodes().is_empty());
}

#[test]
fn test_connection_to_absent_component_fails() {
    let design = Design::new(
        "dangling",
        vec![Component::new("Hub", "MainHub")],
        vec![Connection::new("Hub", "X")],
    );

    let err = analyze(&design).unwrap_err();
    assert!(matches!(
        err,
        ValidationError::DanglingConnection { ref component, .. } if component == "X"
    ));

    let err = StudyBuilder::default().analyze(&design).unwrap_err();
    assert!(matches!(err, UavplexError::Validation(_)));
}

#[test]
fn test_distinct_types_reach_log2_n() {
    for n in 1..=TYPES.len() {
        let components = TYPES[..n]
            .iter()
            .enumerate()
            .map(|(i, kind)| Component::new(format!("C{i}").as_str(), *kind))
            .collect();
        let design = Design::new("distinct", components, Vec::new());

        let result = analyze(&design).unwrap();
        assert_approx_eq!(f64, result.diversity(), (n as f64).log2(), epsilon = 1e-12);
    }
}

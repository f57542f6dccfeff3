//! Airframe statistics across a corpus.

use std::collections::BTreeMap;

use serde::Serialize;

use uavplex_core::design::Design;

/// Hub types, arm counts and arm lengths of the designs that carry geometry.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GeometrySummary {
    with_geometry: usize,
    hub_types: BTreeMap<String, usize>,
    arm_counts: BTreeMap<u32, usize>,
    arm_length_range: (f32, f32),
    arm_length_avg: f32,
}

impl GeometrySummary {
    /// Summarizes every design with a parsed airframe.
    pub fn from_designs<'a>(designs: impl IntoIterator<Item = &'a Design>) -> Self {
        let mut summary = Self::default();
        let mut lengths = Vec::new();

        for airframe in designs.into_iter().filter_map(Design::airframe) {
            summary.with_geometry += 1;
            *summary
                .hub_types
                .entry(airframe.hub_type().to_string())
                .or_insert(0) += 1;
            *summary.arm_counts.entry(airframe.num_arms()).or_insert(0) += 1;
            if airframe.arm_length() > 0.0 {
                lengths.push(airframe.arm_length());
            }
        }

        if !lengths.is_empty() {
            let min = lengths.iter().copied().fold(f32::INFINITY, f32::min);
            let max = lengths.iter().copied().fold(f32::NEG_INFINITY, f32::max);
            summary.arm_length_range = (min, max);
            summary.arm_length_avg = lengths.iter().sum::<f32>() / lengths.len() as f32;
        }
        summary
    }

    /// Number of designs that contributed.
    pub fn with_geometry(&self) -> usize {
        self.with_geometry
    }

    /// Designs per hub type.
    pub fn hub_types(&self) -> &BTreeMap<String, usize> {
        &self.hub_types
    }

    /// Designs per arm count.
    pub fn arm_counts(&self) -> &BTreeMap<u32, usize> {
        &self.arm_counts
    }

    /// Shortest and longest arm; `(0, 0)` without geometry.
    pub fn arm_length_range(&self) -> (f32, f32) {
        self.arm_length_range
    }

    pub fn arm_length_avg(&self) -> f32 {
        self.arm_length_avg
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use uavplex_core::design::Airframe;

    use super::*;

    fn design(name: &str, airframe: Option<Airframe>) -> Design {
        let design = Design::new(name, Vec::new(), Vec::new());
        match airframe {
            Some(airframe) => design.with_airframe(airframe),
            None => design,
        }
    }

    #[test]
    fn test_summary() {
        let designs = [
            design("design_1", Some(Airframe::new("Hub4", Some(300.0)))),
            design("design_2", Some(Airframe::new("Hub6", Some(500.0)))),
            design("design_3", Some(Airframe::new("Hub4", None))),
            design("design_4", None),
        ];
        let summary = GeometrySummary::from_designs(&designs);

        assert_eq!(summary.with_geometry(), 3);
        assert_eq!(summary.hub_types()["Hub4"], 2);
        assert_eq!(summary.arm_counts()[&6], 1);
        assert_eq!(summary.arm_length_range(), (300.0, 500.0));
        assert_approx_eq!(f32, summary.arm_length_avg(), 400.0);
    }

    #[test]
    fn test_empty() {
        let summary = GeometrySummary::from_designs(&[]);
        assert_eq!(summary.arm_length_range(), (0.0, 0.0));
        assert!(summary.hub_types().is_empty());
    }
}

//! Descriptive statistics over analysis results.

use serde::Serialize;

use super::complexity::{ComplexityResult, NodeMetrics};

/// Mean, population standard deviation and range of a sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MetricStats {
    mean: f64,
    std: f64,
    min: f64,
    max: f64,
}

impl MetricStats {
    /// Statistics of `values`; all zero for an empty sample.
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }
        let mean = mean(values);
        Self {
            mean,
            std: std_dev(values, mean),
            min: values.iter().copied().fold(f64::INFINITY, f64::min),
            max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        }
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn std(&self) -> f64 {
        self.std
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}

/// Corpus-wide statistics of the system metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComplexitySummary {
    design_count: usize,
    total_complexity: MetricStats,
    diversity: MetricStats,
    flexibility: MetricStats,
    combinability: MetricStats,
}

impl ComplexitySummary {
    pub fn from_results(results: &[ComplexityResult]) -> Self {
        let stats = |metric: fn(&ComplexityResult) -> f64| {
            let values: Vec<f64> = results.iter().map(metric).collect();
            MetricStats::from_values(&values)
        };
        Self {
            design_count: results.len(),
            total_complexity: stats(ComplexityResult::total_complexity),
            diversity: stats(ComplexityResult::diversity),
            flexibility: stats(ComplexityResult::flexibility),
            combinability: stats(ComplexityResult::combinability),
        }
    }

    pub fn design_count(&self) -> usize {
        self.design_count
    }

    pub fn total_complexity(&self) -> MetricStats {
        self.total_complexity
    }

    pub fn diversity(&self) -> MetricStats {
        self.diversity
    }

    pub fn flexibility(&self) -> MetricStats {
        self.flexibility
    }

    pub fn combinability(&self) -> MetricStats {
        self.combinability
    }
}

/// Five-number summary of per-node local complexity, with whiskers at
/// 1.5·IQR.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxStats {
    label: String,
    design: String,
    values: Vec<f64>,
    mean: f64,
    median: f64,
    std: f64,
    min: f64,
    max: f64,
    q1: f64,
    q3: f64,
    iqr: f64,
    lower_whisker: f64,
    upper_whisker: f64,
    outliers: Vec<f64>,
}

impl BoxStats {
    /// Box statistics of a design's node local complexities.
    ///
    /// Returns `None` for a design without components.
    pub fn from_result(label: impl Into<String>, result: &ComplexityResult) -> Option<Self> {
        let values: Vec<f64> = result
            .nodes()
            .iter()
            .map(NodeMetrics::local_complexity)
            .collect();
        Self::from_values(label, result.design(), values)
    }

    /// Box statistics of an arbitrary sample; `None` when it is empty.
    pub fn from_values(
        label: impl Into<String>,
        design: impl Into<String>,
        values: Vec<f64>,
    ) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.clone();
        sorted.sort_by(f64::total_cmp);

        let mean = mean(&sorted);
        let q1 = percentile(&sorted, 25.0);
        let median = percentile(&sorted, 50.0);
        let q3 = percentile(&sorted, 75.0);
        let iqr = q3 - q1;
        let low_fence = q1 - 1.5 * iqr;
        let high_fence = q3 + 1.5 * iqr;

        let inside = sorted
            .iter()
            .copied()
            .filter(|v| (low_fence..=high_fence).contains(v));
        let lower_whisker = inside.clone().fold(f64::INFINITY, f64::min);
        let upper_whisker = inside.fold(f64::NEG_INFINITY, f64::max);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|v| !(low_fence..=high_fence).contains(v))
            .collect();

        Some(Self {
            label: label.into(),
            design: design.into(),
            mean,
            median,
            std: std_dev(&sorted, mean),
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            q1,
            q3,
            iqr,
            lower_whisker,
            upper_whisker,
            outliers,
            values,
        })
    }

    /// Display label of the box.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn design(&self) -> &str {
        &self.design
    }

    /// The sample in its original order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn median(&self) -> f64 {
        self.median
    }

    pub fn std(&self) -> f64 {
        self.std
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn q1(&self) -> f64 {
        self.q1
    }

    pub fn q3(&self) -> f64 {
        self.q3
    }

    pub fn iqr(&self) -> f64 {
        self.iqr
    }

    /// Smallest value no further than 1.5·IQR below Q1.
    pub fn lower_whisker(&self) -> f64 {
        self.lower_whisker
    }

    /// Largest value no further than 1.5·IQR above Q3.
    pub fn upper_whisker(&self) -> f64 {
        self.upper_whisker
    }

    pub fn outliers(&self) -> &[f64] {
        &self.outliers
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn std_dev(values: &[f64], mean: f64) -> f64 {
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Percentile of a sorted, non-empty sample with linear interpolation
/// between closest ranks.
pub fn percentile(sorted: &[f64], pct: f64) -> f64 {
    let rank = pct / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_metric_stats() {
        let stats = MetricStats::from_values(&[1.0, 2.0, 3.0, 4.0]);
        assert_approx_eq!(f64, stats.mean(), 2.5);
        assert_approx_eq!(f64, stats.std(), 1.25f64.sqrt());
        assert_eq!(stats.min(), 1.0);
        assert_eq!(stats.max(), 4.0);
    }

    #[test]
    fn test_metric_stats_empty() {
        assert_eq!(MetricStats::from_values(&[]), MetricStats::default());
        assert_eq!(ComplexitySummary::from_results(&[]).design_count(), 0);
    }

    #[test]
    fn test_percentile_interpolates() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_approx_eq!(f64, percentile(&sorted, 25.0), 1.75);
        assert_approx_eq!(f64, percentile(&sorted, 50.0), 2.5);
        assert_approx_eq!(f64, percentile(&sorted, 75.0), 3.25);
        assert_eq!(percentile(&[7.0], 90.0), 7.0);
    }

    #[test]
    fn test_box_stats_with_outlier() {
        let stats = BoxStats::from_values("Least", "design_1", vec![1.0, 2.0, 2.0, 3.0, 20.0])
            .unwrap();

        assert_eq!(stats.median(), 2.0);
        assert_eq!(stats.q1(), 2.0);
        assert_eq!(stats.q3(), 3.0);
        assert_eq!(stats.lower_whisker(), 1.0);
        assert_eq!(stats.upper_whisker(), 3.0);
        assert_eq!(stats.outliers(), &[20.0]);
        assert_eq!(stats.values()[4], 20.0);
    }

    #[test]
    fn test_box_stats_empty() {
        assert!(BoxStats::from_values("x", "design_1", Vec::new()).is_none());
    }
}

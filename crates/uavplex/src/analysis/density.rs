//! Gaussian kernel density estimate for violin outlines.

use std::f64::consts::PI;

/// Density of `values` sampled at `points` evenly spaced positions from the
/// sample minimum to its maximum.
///
/// The kernel bandwidth follows Scott's rule, `n^(-1/5)` times the sample
/// standard deviation. Returns an empty curve when fewer than two values are
/// given or all values are equal, since no bandwidth exists then.
///
/// ```
/// # use uavplex::analysis::gaussian_kde;
/// let curve = gaussian_kde(&[1.0, 2.0, 2.5, 4.0], 50);
/// assert_eq!(curve.len(), 50);
/// assert!(curve.iter().all(|&(_, density)| density > 0.0));
/// ```
pub fn gaussian_kde(values: &[f64], points: usize) -> Vec<(f64, f64)> {
    let n = values.len();
    if n < 2 || points == 0 {
        return Vec::new();
    }

    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    let bandwidth = (n as f64).powf(-0.2) * variance.sqrt();
    if bandwidth <= f64::EPSILON {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let step = if points > 1 {
        (max - min) / (points - 1) as f64
    } else {
        0.0
    };
    let norm = 1.0 / (n as f64 * bandwidth * (2.0 * PI).sqrt());

    (0..points)
        .map(|i| {
            let x = min + step * i as f64;
            let density = values
                .iter()
                .map(|v| (-0.5 * ((x - v) / bandwidth).powi(2)).exp())
                .fold(0.0, |acc, k| acc + k);
            (x, density * norm)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_degenerate_samples() {
        assert!(gaussian_kde(&[], 10).is_empty());
        assert!(gaussian_kde(&[3.0], 10).is_empty());
        assert!(gaussian_kde(&[2.0, 2.0, 2.0], 10).is_empty());
    }

    #[test]
    fn test_grid_spans_sample_range() {
        let curve = gaussian_kde(&[0.0, 1.0, 3.0], 7);
        assert_eq!(curve.len(), 7);
        assert_approx_eq!(f64, curve[0].0, 0.0);
        assert_approx_eq!(f64, curve[6].0, 3.0);
        assert_approx_eq!(f64, curve[2].0, 1.0);
    }

    #[test]
    fn test_symmetric_sample_has_symmetric_density() {
        let curve = gaussian_kde(&[-1.0, 0.0, 1.0], 5);
        assert_approx_eq!(f64, curve[0].1, curve[4].1, epsilon = 1e-12);
        assert_approx_eq!(f64, curve[1].1, curve[3].1, epsilon = 1e-12);
        assert!(curve[2].1 > curve[0].1);
    }

    #[test]
    fn test_two_point_density() {
        // n = 2: std = 1/sqrt(2), bandwidth = 2^-0.2 / sqrt(2)
        let curve = gaussian_kde(&[0.0, 1.0], 2);
        let h = 2f64.powf(-0.2) / 2f64.sqrt();
        let expected = (1.0 + (-0.5 / (h * h)).exp()) / (2.0 * h * (2.0 * PI).sqrt());
        assert_approx_eq!(f64, curve[0].1, expected, epsilon = 1e-12);
    }
}

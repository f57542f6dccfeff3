//! Graph energy from the adjacency spectrum.

use nalgebra::DMatrix;

/// Eigenvalues of a symmetric matrix, unsorted.
///
/// Only the lower triangle is read, so the input is assumed symmetric.
pub fn symmetric_eigenvalues(matrix: &DMatrix<f64>) -> Vec<f64> {
    if matrix.is_empty() {
        return Vec::new();
    }
    matrix.symmetric_eigenvalues().iter().copied().collect()
}

/// Sum of absolute eigenvalues of an adjacency matrix.
pub fn graph_energy(adjacency: &DMatrix<f64>) -> f64 {
    symmetric_eigenvalues(adjacency)
        .into_iter()
        .map(f64::abs)
        .sum()
}

//! Entropy-based structural complexity analysis.
//!
//! [`analyze`] turns a [`Design`](uavplex_core::design::Design) into a
//! [`ComplexityResult`]: system entropies, graph energy and a per-component
//! breakdown whose contributions add up to the system score.
//!
//! The remaining types aggregate results for charts and reports:
//!
//! - [`ComplexitySummary`] - corpus-wide mean, spread and range
//! - [`BoxStats`] - quartiles and whiskers of node local complexity
//! - [`RadarPoint`] - averaged node metrics of one component type
//! - [`gaussian_kde`] - violin outlines of node local complexity

mod complexity;
mod density;
mod energy;
mod entropy;
mod radar;
mod summary;

pub use complexity::{ComplexityResult, NodeMetrics, analyze};
pub use density::gaussian_kde;
pub use energy::{graph_energy, symmetric_eigenvalues};
pub use entropy::{entropy, surprisal};
pub use radar::RadarPoint;
pub use summary::{BoxStats, ComplexitySummary, MetricStats, percentile};

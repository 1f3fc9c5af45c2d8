//! Bin-edge construction, validation and lookup.
//!
//! Cells are closed on the right, `(e_k, e_{k+1}]`, and the first cell
//! also includes its left edge, so a value on an interior edge belongs
//! to the inner cell. Equal adjacent edges are accepted and give
//! zero-width cells; decreasing edges are rejected.

use ndarray::Array1;
use spiral_types::error::{SpiralError, SpiralResult};

/// `n_cells + 1` evenly spaced edges from `lo` to `hi` inclusive.
///
/// Endpoints are exactly `lo` and `hi`.
pub fn linear_edges(lo: f64, hi: f64, n_cells: usize) -> Array1<f64> {
    pin_endpoints(Array1::linspace(lo, hi, n_cells + 1), lo, hi)
}

/// `n_cells + 1` logarithmically spaced edges from `lo` to `hi` inclusive.
///
/// Both limits must be > 0. Endpoints are exactly `lo` and `hi`.
pub fn log_edges(lo: f64, hi: f64, n_cells: usize) -> Array1<f64> {
    let edges = Array1::linspace(lo.ln(), hi.ln(), n_cells + 1).mapv(f64::exp);
    pin_endpoints(edges, lo, hi)
}

fn pin_endpoints(mut edges: Array1<f64>, lo: f64, hi: f64) -> Array1<f64> {
    if let Some(first) = edges.first_mut() {
        *first = lo;
    }
    if let Some(last) = edges.last_mut() {
        *last = hi;
    }
    edges
}

/// Check that `edges` can bound histogram cells.
pub fn validate_edges(edges: &[f64], label: &str) -> SpiralResult<()> {
    if edges.len() < 2 {
        return Err(SpiralError::InvalidArgument(format!(
            "{label} edges need at least 2 values, got {}",
            edges.len()
        )));
    }
    if let Some(idx) = edges.iter().position(|e| !e.is_finite()) {
        return Err(SpiralError::InvalidArgument(format!(
            "{label} edge {idx} is not finite: {}",
            edges[idx]
        )));
    }
    if let Some(k) = edges.windows(2).position(|w| w[1] < w[0]) {
        return Err(SpiralError::InvalidArgument(format!(
            "{label} edges must be non-decreasing: edge {} = {} < edge {} = {}",
            k + 1,
            edges[k + 1],
            k,
            edges[k]
        )));
    }
    Ok(())
}

/// Number of zero-width cells (duplicated adjacent edges).
pub fn zero_width_cells(edges: &[f64]) -> usize {
    edges.windows(2).filter(|w| w[1] == w[0]).count()
}

/// Index of the cell containing `value`, or `None` when outside all cells.
///
/// NaN is never inside a cell.
pub fn locate_bin(edges: &[f64], value: f64) -> Option<usize> {
    let n = edges.len();
    if n < 2 || !(value >= edges[0] && value <= edges[n - 1]) {
        return None;
    }
    if value == edges[0] {
        return Some(0);
    }
    Some(edges.partition_point(|&e| e < value) - 1)
}

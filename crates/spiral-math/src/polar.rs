//! Area elements of annulus sectors.

use ndarray::Array2;

/// Area of each polar cell bounded by `r_edges` × `theta_edges`.
///
/// `area[i, j] = ½ (r_{i+1}² − r_i²)(θ_{j+1} − θ_j)`, shape
/// `[r_edges.len() - 1, theta_edges.len() - 1]`.
pub fn cell_area(r_edges: &[f64], theta_edges: &[f64]) -> Array2<f64> {
    let nr = r_edges.len().saturating_sub(1);
    let nt = theta_edges.len().saturating_sub(1);
    Array2::from_shape_fn((nr, nt), |(i, j)| {
        let annulus = r_edges[i + 1] * r_edges[i + 1] - r_edges[i] * r_edges[i];
        0.5 * annulus * (theta_edges[j + 1] - theta_edges[j])
    })
}

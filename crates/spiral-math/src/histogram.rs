//! Weighted 2-D histogram over explicit edges.

use crate::edges::{locate_bin, validate_edges};
use ndarray::{Array1, Array2, ArrayView1};
use spiral_types::error::{SpiralError, SpiralResult};

/// Summed weights per cell plus the edges that bound them.
#[derive(Debug, Clone)]
pub struct WeightedHistogram2D {
    /// `[nx, ny]` cell sums, indexed `[x cell, y cell]`.
    pub sums: Array2<f64>,
    pub x_edges: Array1<f64>,
    pub y_edges: Array1<f64>,
    /// Samples that fell outside every cell.
    pub dropped: usize,
}

/// Accumulate `weight[k]` into the cell bracketing `(x[k], y[k])`.
///
/// Samples outside the grid (or with NaN coordinates) are dropped and
/// counted in [`WeightedHistogram2D::dropped`].
pub fn weighted_histogram_2d(
    x: ArrayView1<f64>,
    y: ArrayView1<f64>,
    weight: ArrayView1<f64>,
    x_edges: &[f64],
    y_edges: &[f64],
) -> SpiralResult<WeightedHistogram2D> {
    if x.len() != y.len() || x.len() != weight.len() {
        return Err(SpiralError::InvalidArgument(format!(
            "histogram inputs differ in length: x={}, y={}, weight={}",
            x.len(),
            y.len(),
            weight.len()
        )));
    }
    validate_edges(x_edges, "x")?;
    validate_edges(y_edges, "y")?;

    let mut sums = Array2::zeros((x_edges.len() - 1, y_edges.len() - 1));
    let mut dropped = 0usize;

    for ((&xv, &yv), &w) in x.iter().zip(y.iter()).zip(weight.iter()) {
        match (locate_bin(x_edges, xv), locate_bin(y_edges, yv)) {
            (Some(i), Some(j)) => sums[[i, j]] += w,
            _ => dropped += 1,
        }
    }

    Ok(WeightedHistogram2D {
        sums,
        x_edges: Array1::from(x_edges.to_vec()),
        y_edges: Array1::from(y_edges.to_vec()),
        dropped,
    })
}

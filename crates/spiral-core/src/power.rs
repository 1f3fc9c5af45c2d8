//! Radius-resolved spiral power.
//!
//! The power at radius r_i is the population standard deviation of the
//! surface density around the ring. An axisymmetric disk has zero power
//! at every radius.

use crate::binning::{CylindricalBinner, DensityGrid};
use ndarray::{Array1, Axis};
use spiral_types::error::SpiralResult;
use spiral_types::state::{BinSpec, Snapshot};
use spiral_types::units::Quantity;

/// Non-axisymmetric power per radial cell.
#[derive(Debug, Clone)]
pub struct SpiralPower {
    /// `[nr]` angular standard deviation of Σ, in Σ's unit.
    pub power: Quantity<Array1<f64>>,
    /// `nr + 1` radial edges the power was measured on.
    pub radial_edges: Array1<f64>,
}

/// Angular standard deviation of each density row.
pub fn spiral_power(grid: &DensityGrid) -> SpiralPower {
    let power = grid.sigma.value.std_axis(Axis(1), 0.0);
    SpiralPower {
        power: Quantity::new(power, grid.sigma.unit.clone()),
        radial_edges: grid.radial_edges.clone(),
    }
}

/// Bin the gas of `snapshot` and measure its spiral power.
///
/// A radial count spans the gas radii linearly.
pub fn snapshot_spiral_power(
    snapshot: &Snapshot,
    rbins: impl Into<BinSpec>,
    thetabins: impl Into<BinSpec>,
) -> SpiralResult<SpiralPower> {
    let grid = CylindricalBinner::new(rbins, thetabins).bin_snapshot(snapshot)?;
    Ok(spiral_power(&grid))
}

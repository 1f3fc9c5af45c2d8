// ─────────────────────────────────────────────────────────────────────
// SCPN Disk Spirals — Cylindrical Binning
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Surface density of a particle disk on a polar (r, θ) grid.
//!
//! Particle masses are summed into annulus sectors and divided by the
//! sector area:
//!
//!   Σ[i, j] = M[i, j] / (½ (r_{i+1}² − r_i²)(θ_{j+1} − θ_j))
//!
//! All returned arrays are indexed `[radial cell i, angular cell j]`.

use ndarray::{Array1, Array2, ArrayView1, Axis};
use spiral_math::edges::{linear_edges, log_edges, validate_edges, zero_width_cells};
use spiral_math::histogram::weighted_histogram_2d;
use spiral_math::polar::cell_area;
use spiral_types::config::BinSpacing;
use spiral_types::constants::TWO_PI;
use spiral_types::error::{SpiralError, SpiralResult};
use spiral_types::state::{BinSpec, ParticleSet, Snapshot};
use spiral_types::units::{Quantity, Unit};
use tracing::{debug, warn};

/// Finite (min, max) of `values`, or `None` when there is none.
pub fn data_extent(values: ArrayView1<f64>) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// How radial edges are derived from a bin count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialBinPolicy {
    pub spacing: BinSpacing,
    /// Explicit (rmin, rmax). When absent the data extent is used.
    pub rlim: Option<(f64, f64)>,
}

impl Default for RadialBinPolicy {
    /// Linear spacing over the data extent.
    fn default() -> Self {
        RadialBinPolicy {
            spacing: BinSpacing::Linear,
            rlim: None,
        }
    }
}

impl RadialBinPolicy {
    pub fn new(spacing: BinSpacing, rlim: Option<(f64, f64)>) -> Self {
        RadialBinPolicy { spacing, rlim }
    }

    /// Resolve `rbins` to edges.
    ///
    /// Explicit edges are validated and returned unchanged. A count uses
    /// `rlim` when set, otherwise the extent of `radii`.
    pub fn edges(&self, rbins: &BinSpec, radii: ArrayView1<f64>) -> SpiralResult<Array1<f64>> {
        match rbins {
            BinSpec::Edges(edges) => {
                validate_edges(edges, "radial")?;
                Ok(Array1::from(edges.clone()))
            }
            BinSpec::Count(count) => {
                let (rmin, rmax) = match self.rlim {
                    Some(lim) => lim,
                    None => data_extent(radii).ok_or_else(|| {
                        SpiralError::InvalidArgument(
                            "cannot derive radial limits: no particle has a finite radius"
                                .to_string(),
                        )
                    })?,
                };
                self.edges_between(*count, rmin, rmax)
            }
        }
    }

    /// `count + 1` edges spanning [rmin, rmax] with this policy's spacing.
    pub fn edges_between(&self, count: usize, rmin: f64, rmax: f64) -> SpiralResult<Array1<f64>> {
        if count == 0 {
            return Err(SpiralError::InvalidArgument(
                "radial bin count must be >= 1".to_string(),
            ));
        }
        if !rmin.is_finite() || !rmax.is_finite() {
            return Err(SpiralError::InvalidArgument(format!(
                "radial limits must be finite, got ({rmin}, {rmax})"
            )));
        }
        if rmax < rmin {
            return Err(SpiralError::InvalidArgument(format!(
                "radial limits out of order: rmin={rmin} > rmax={rmax}"
            )));
        }

        let edges = match self.spacing {
            BinSpacing::Linear => linear_edges(rmin, rmax, count),
            BinSpacing::Log => {
                if rmin <= 0.0 {
                    return Err(SpiralError::InvalidArgument(format!(
                        "log bin spacing requires rmin > 0, got {rmin}"
                    )));
                }
                log_edges(rmin, rmax, count)
            }
        };

        debug!(count, rmin, rmax, spacing = %self.spacing, "resolved radial bin edges");
        Ok(edges)
    }
}

/// Azimuthal edges: `count + 1` evenly spaced over [0, 2π], or the given edges.
pub fn angular_edges(thetabins: &BinSpec) -> SpiralResult<Array1<f64>> {
    match thetabins {
        BinSpec::Count(0) => Err(SpiralError::InvalidArgument(
            "angular bin count must be >= 1".to_string(),
        )),
        BinSpec::Count(count) => Ok(linear_edges(0.0, TWO_PI, *count)),
        BinSpec::Edges(edges) => {
            validate_edges(edges, "angular")?;
            Ok(Array1::from(edges.clone()))
        }
    }
}

/// Mass, area and surface density on a polar grid.
#[derive(Debug, Clone)]
pub struct DensityGrid {
    /// `nr + 1` radial edges.
    pub radial_edges: Array1<f64>,
    /// `nθ + 1` angular edges.
    pub angular_edges: Array1<f64>,
    /// Summed particle mass per cell `[nr, nθ]`.
    pub mass: Array2<f64>,
    /// Cell area `[nr, nθ]`.
    pub area: Array2<f64>,
    /// Surface density `mass / area`. Zero-area cells hold NaN or ±inf.
    pub sigma: Quantity<Array2<f64>>,
}

impl DensityGrid {
    /// Build from per-cell mass sums over the given edges.
    pub fn from_mass(
        radial_edges: Array1<f64>,
        angular_edges: Array1<f64>,
        mass: Array2<f64>,
        unit: Option<Unit>,
    ) -> SpiralResult<Self> {
        let r = radial_edges.to_vec();
        let t = angular_edges.to_vec();
        let area = cell_area(&r, &t);
        if area.dim() != mass.dim() {
            return Err(SpiralError::InvalidArgument(format!(
                "mass grid shape {:?} does not match edges ({}, {})",
                mass.dim(),
                area.nrows(),
                area.ncols()
            )));
        }
        let sigma = &mass / &area;
        Ok(DensityGrid {
            radial_edges,
            angular_edges,
            mass,
            area,
            sigma: Quantity::new(sigma, unit),
        })
    }

    pub fn n_radial(&self) -> usize {
        self.mass.nrows()
    }

    pub fn n_angular(&self) -> usize {
        self.mass.ncols()
    }

    /// Edge meshes `(rmesh, thetamesh)`, both `[nr + 1, nθ + 1]`.
    /// `rmesh[i, j] = r_i`, `thetamesh[i, j] = θ_j`.
    pub fn meshgrid(&self) -> (Array2<f64>, Array2<f64>) {
        let shape = (self.radial_edges.len(), self.angular_edges.len());
        let rmesh = Array2::from_shape_fn(shape, |(i, _)| self.radial_edges[i]);
        let thetamesh = Array2::from_shape_fn(shape, |(_, j)| self.angular_edges[j]);
        (rmesh, thetamesh)
    }

    /// Σ_j sigma[i, j] · area[i, j] per radial cell.
    pub fn radial_mass(&self) -> Array1<f64> {
        (&self.sigma.value * &self.area).sum_axis(Axis(1))
    }

    /// Cells whose density is NaN or infinite.
    pub fn degenerate_cells(&self) -> usize {
        self.sigma.value.iter().filter(|v| !v.is_finite()).count()
    }
}

/// Bins particles on a polar grid and converts mass to surface density.
#[derive(Debug, Clone, PartialEq)]
pub struct CylindricalBinner {
    pub rbins: BinSpec,
    pub thetabins: BinSpec,
    pub policy: RadialBinPolicy,
}

impl CylindricalBinner {
    /// Radial counts resolve linearly over the data extent unless a
    /// policy is set with [`CylindricalBinner::with_policy`].
    pub fn new(rbins: impl Into<BinSpec>, thetabins: impl Into<BinSpec>) -> Self {
        CylindricalBinner {
            rbins: rbins.into(),
            thetabins: thetabins.into(),
            policy: RadialBinPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: RadialBinPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Surface density of `particles`, tagged with `unit`.
    pub fn bin(&self, particles: &ParticleSet, unit: Option<Unit>) -> SpiralResult<DensityGrid> {
        let r = particles.radius();
        let theta = particles.azimuth();

        let theta_edges = angular_edges(&self.thetabins)?;
        let r_edges = self.policy.edges(&self.rbins, r.view())?;

        let r_slice = r_edges.to_vec();
        let t_slice = theta_edges.to_vec();
        let degenerate = zero_width_cells(&r_slice) + zero_width_cells(&t_slice);
        if degenerate > 0 {
            warn!(
                zero_width_edges = degenerate,
                "bin edges contain zero-width cells; their densities are not finite"
            );
        }

        let hist =
            weighted_histogram_2d(r.view(), theta.view(), particles.mass.view(), &r_slice, &t_slice)?;
        if hist.dropped > 0 {
            debug!(
                dropped = hist.dropped,
                total = particles.len(),
                "particles outside the polar grid were not binned"
            );
        }

        DensityGrid::from_mass(hist.x_edges, hist.y_edges, hist.sums, unit)
    }

    /// Surface density of the gas in `snapshot`.
    pub fn bin_snapshot(&self, snapshot: &Snapshot) -> SpiralResult<DensityGrid> {
        self.bin(&snapshot.gas, snapshot.surface_density_unit())
    }
}

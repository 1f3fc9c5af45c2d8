// ─────────────────────────────────────────────────────────────────────
// SCPN Disk Spirals — Angular Spectrum
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Angular Fourier decomposition of the surface density.
//!
//! Each radial row of Σ is transformed with a real FFT along θ, giving
//! modes m = 0..⌊nθ/2⌋. Coefficients are divided by (n_modes − 1); this
//! normalization is part of the output convention and is not 1/nθ.

use crate::binning::{CylindricalBinner, DensityGrid, RadialBinPolicy};
use ndarray::{Array1, Array2, Axis};
use num_complex::Complex64;
use spiral_math::fft::rfft_rows;
use spiral_types::config::SpiralConfig;
use spiral_types::error::{SpiralError, SpiralResult};
use spiral_types::state::{BinSpec, Snapshot};
use spiral_types::units::Quantity;
use tracing::debug;

/// Fourier coefficients of Σ along θ, indexed `[radial cell, mode]`.
#[derive(Debug, Clone)]
pub struct AngularSpectrum {
    /// `nr + 1` radial edges.
    pub radial_edges: Array1<f64>,
    /// Mode numbers `0..n_modes`.
    pub modes: Array1<usize>,
    /// `[nr, n_modes]` normalized coefficients, in Σ's unit.
    pub coefficients: Quantity<Array2<Complex64>>,
}

impl AngularSpectrum {
    pub fn n_modes(&self) -> usize {
        self.modes.len()
    }

    /// `(rmesh, mmesh)`, both `[nr + 1, n_modes]`.
    pub fn meshgrid(&self) -> (Array2<f64>, Array2<usize>) {
        let shape = (self.radial_edges.len(), self.modes.len());
        let rmesh = Array2::from_shape_fn(shape, |(i, _)| self.radial_edges[i]);
        let mmesh = Array2::from_shape_fn(shape, |(_, m)| self.modes[m]);
        (rmesh, mmesh)
    }
}

/// Real FFT of every density row, divided by (n_modes − 1).
///
/// Needs at least 2 angular cells so that the divisor is non-zero.
pub fn angular_spectrum(grid: &DensityGrid) -> SpiralResult<AngularSpectrum> {
    let n_theta = grid.n_angular();
    if n_theta < 2 {
        return Err(SpiralError::InvalidArgument(format!(
            "angular transform needs at least 2 angular cells, got {n_theta}"
        )));
    }

    let mut coefficients = rfft_rows(&grid.sigma.value);
    let n_modes = coefficients.ncols();
    let norm = (n_modes - 1) as f64;
    coefficients.mapv_inplace(|c| c / norm);

    debug!(
        n_radial = grid.n_radial(),
        n_theta, n_modes, "angular spectrum computed"
    );

    Ok(AngularSpectrum {
        radial_edges: grid.radial_edges.clone(),
        modes: Array1::from_iter(0..n_modes),
        coefficients: Quantity::new(coefficients, grid.sigma.unit.clone()),
    })
}

/// Radius-integrated power per angular mode.
#[derive(Debug, Clone)]
pub struct PowerSpectrum {
    /// Mode numbers `0..=m_max`.
    pub modes: Array1<usize>,
    /// Σ_i |c[i, m]|², in the square of Σ's unit.
    pub power: Quantity<Array1<f64>>,
}

/// Sum squared coefficient magnitudes over radius.
pub fn mode_power(spectrum: &AngularSpectrum) -> PowerSpectrum {
    let power = spectrum
        .coefficients
        .value
        .mapv(|c| c.norm_sqr())
        .sum_axis(Axis(0));
    PowerSpectrum {
        modes: spectrum.modes.clone(),
        power: Quantity::new(power, spectrum.coefficients.unit.as_ref().map(|u| u.squared())),
    }
}

/// Power in modes 0..=m_max of the gas surface density of `snapshot`.
///
/// Σ is binned on 2·m_max + 1 angular cells so that the real FFT yields
/// exactly m_max + 1 modes. A radial count spans the gas radii linearly.
pub fn power_spectrum(
    snapshot: &Snapshot,
    m_max: usize,
    rbins: impl Into<BinSpec>,
) -> SpiralResult<PowerSpectrum> {
    binned_power_spectrum(snapshot, m_max, rbins.into(), RadialBinPolicy::default())
}

/// Power spectrum using `m_max`, `rbins`, `binspacing` and `rlim` from
/// `config`. Recentring is left to the caller.
pub fn power_spectrum_from_config(
    snapshot: &Snapshot,
    config: &SpiralConfig,
) -> SpiralResult<PowerSpectrum> {
    let policy = RadialBinPolicy::new(config.spacing()?, config.radial_limits());
    binned_power_spectrum(snapshot, config.m_max, config.rbins.clone(), policy)
}

fn binned_power_spectrum(
    snapshot: &Snapshot,
    m_max: usize,
    rbins: BinSpec,
    policy: RadialBinPolicy,
) -> SpiralResult<PowerSpectrum> {
    if m_max == 0 {
        return Err(SpiralError::InvalidArgument(
            "m_max must be >= 1 for the angular power spectrum".to_string(),
        ));
    }
    let grid = CylindricalBinner::new(rbins, 2 * m_max + 1)
        .with_policy(policy)
        .bin_snapshot(snapshot)?;
    let spectrum = angular_spectrum(&grid)?;
    Ok(mode_power(&spectrum))
}

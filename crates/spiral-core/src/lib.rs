//! Spiral-structure diagnostics for simulated disks.
//!
//! Snapshot in, polar surface density, then radius-resolved spiral
//! power, angular Fourier spectra, or a power time series.

pub mod binning;
pub mod centering;
pub mod loader;
pub mod power;
pub mod spectrum;
pub mod timeseries;

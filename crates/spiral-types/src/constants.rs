// ─────────────────────────────────────────────────────────────────────
// SCPN Disk Spirals — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// Full turn in radians; upper end of the default azimuthal domain.
pub const TWO_PI: f64 = 2.0 * std::f64::consts::PI;

/// Default number of radial bins.
pub const DEFAULT_RBINS: usize = 50;

/// Default number of azimuthal bins.
pub const DEFAULT_THETABINS: usize = 50;

/// Default highest Fourier mode for the power spectrum.
pub const DEFAULT_M_MAX: usize = 30;

/// Parameter-file key holding the length unit in kpc.
pub const PARAM_LENGTH_KEY: &str = "dKpcUnit";

/// Parameter-file key holding the mass unit in solar masses.
pub const PARAM_MASS_KEY: &str = "dMsolUnit";

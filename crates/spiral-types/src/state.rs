// ─────────────────────────────────────────────────────────────────────
// SCPN Disk Spirals — State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::constants::TWO_PI;
use crate::error::{SpiralError, SpiralResult};
use crate::units::{SnapshotUnits, Unit};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// One particle family: parallel position, velocity and mass arrays.
/// All arrays have the same length N.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleSet {
    pub x: Array1<f64>,
    pub y: Array1<f64>,
    pub z: Array1<f64>,
    pub vx: Array1<f64>,
    pub vy: Array1<f64>,
    pub vz: Array1<f64>,
    pub mass: Array1<f64>,
}

impl ParticleSet {
    /// Planar particles at rest: z and velocities are zero.
    pub fn new(x: Array1<f64>, y: Array1<f64>, mass: Array1<f64>) -> SpiralResult<Self> {
        let n = x.len();
        Self::with_kinematics(
            x,
            y,
            Array1::zeros(n),
            Array1::zeros(n),
            Array1::zeros(n),
            Array1::zeros(n),
            mass,
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn with_kinematics(
        x: Array1<f64>,
        y: Array1<f64>,
        z: Array1<f64>,
        vx: Array1<f64>,
        vy: Array1<f64>,
        vz: Array1<f64>,
        mass: Array1<f64>,
    ) -> SpiralResult<Self> {
        let n = x.len();
        let lengths = [
            ("y", y.len()),
            ("z", z.len()),
            ("vx", vx.len()),
            ("vy", vy.len()),
            ("vz", vz.len()),
            ("mass", mass.len()),
        ];
        for (name, len) in lengths {
            if len != n {
                return Err(SpiralError::InvalidArgument(format!(
                    "particle array '{name}' has length {len}, expected {n}"
                )));
            }
        }
        Ok(ParticleSet {
            x,
            y,
            z,
            vx,
            vy,
            vz,
            mass,
        })
    }

    pub fn empty() -> Self {
        ParticleSet {
            x: Array1::zeros(0),
            y: Array1::zeros(0),
            z: Array1::zeros(0),
            vx: Array1::zeros(0),
            vy: Array1::zeros(0),
            vz: Array1::zeros(0),
            mass: Array1::zeros(0),
        }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Cylindrical radius sqrt(x² + y²).
    pub fn radius(&self) -> Array1<f64> {
        ndarray::Zip::from(&self.x)
            .and(&self.y)
            .map_collect(|&x, &y| x.hypot(y))
    }

    /// Azimuth atan2(y, x) wrapped into [0, 2π).
    pub fn azimuth(&self) -> Array1<f64> {
        ndarray::Zip::from(&self.x)
            .and(&self.y)
            .map_collect(|&x, &y| y.atan2(x).rem_euclid(TWO_PI))
    }

    pub fn total_mass(&self) -> f64 {
        self.mass.sum()
    }
}

/// One time sample of a disk simulation.
///
/// Surface density is measured on the gas family; stars only take part
/// in recentering.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub gas: ParticleSet,
    pub stars: ParticleSet,
    pub units: Option<SnapshotUnits>,
}

impl Snapshot {
    pub fn new(gas: ParticleSet) -> Self {
        Snapshot {
            gas,
            stars: ParticleSet::empty(),
            units: None,
        }
    }

    pub fn with_stars(mut self, stars: ParticleSet) -> Self {
        self.stars = stars;
        self
    }

    pub fn with_units(mut self, units: SnapshotUnits) -> Self {
        self.units = Some(units);
        self
    }

    /// Unit of a surface density measured on this snapshot, if tagged.
    pub fn surface_density_unit(&self) -> Option<Unit> {
        self.units.as_ref().map(SnapshotUnits::surface_density)
    }
}

/// Either a number of bins or the explicit bin edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BinSpec {
    Count(usize),
    Edges(Vec<f64>),
}

impl From<usize> for BinSpec {
    fn from(count: usize) -> Self {
        BinSpec::Count(count)
    }
}

impl From<Vec<f64>> for BinSpec {
    fn from(edges: Vec<f64>) -> Self {
        BinSpec::Edges(edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use std::f64::consts::PI;

    #[test]
    fn test_particle_set_length_check() {
        let err = ParticleSet::new(array![0.0, 1.0], array![0.0], array![1.0, 1.0]);
        match err {
            Err(SpiralError::InvalidArgument(msg)) => assert!(msg.contains("'y'"), "{msg}"),
            other => panic!("expected InvalidArgument, got {other:?}"),
        }
    }

    #[test]
    fn test_radius_and_azimuth() {
        let p = ParticleSet::new(
            array![1.0, 0.0, -2.0, 0.0],
            array![0.0, 3.0, 0.0, -1.0],
            array![1.0, 1.0, 1.0, 1.0],
        )
        .unwrap();
        let r = p.radius();
        let theta = p.azimuth();
        assert!((r[0] - 1.0).abs() < 1e-15);
        assert!((r[1] - 3.0).abs() < 1e-15);
        assert!((r[2] - 2.0).abs() < 1e-15);
        assert!(theta[0].abs() < 1e-15);
        assert!((theta[1] - PI / 2.0).abs() < 1e-15);
        assert!((theta[2] - PI).abs() < 1e-15);
        // Negative angles wrap into [0, 2π)
        assert!((theta[3] - 1.5 * PI).abs() < 1e-15, "theta = {}", theta[3]);
    }

    #[test]
    fn test_azimuth_range() {
        let n = 64;
        let x = Array1::from_shape_fn(n, |i| (i as f64 * 0.37).cos());
        let y = Array1::from_shape_fn(n, |i| (i as f64 * 0.37).sin());
        let p = ParticleSet::new(x, y, Array1::ones(n)).unwrap();
        for &t in p.azimuth().iter() {
            assert!((0.0..TWO_PI).contains(&t), "theta out of range: {t}");
        }
    }

    #[test]
    fn test_snapshot_density_unit() {
        let gas = ParticleSet::new(array![1.0], array![0.0], array![1.0]).unwrap();
        let snap = Snapshot::new(gas.clone());
        assert!(snap.surface_density_unit().is_none());

        let tagged = Snapshot::new(gas)
            .with_units(SnapshotUnits::new(Unit::new("au"), Unit::new("Msol")));
        assert_eq!(
            tagged.surface_density_unit().unwrap().symbol(),
            "Msol au**-2"
        );
    }

    #[test]
    fn test_bin_spec_untagged_serde() {
        let count: BinSpec = serde_json::from_str("12").unwrap();
        assert_eq!(count, BinSpec::Count(12));
        let edges: BinSpec = serde_json::from_str("[0.0, 1.0, 2.5]").unwrap();
        assert_eq!(edges, BinSpec::Edges(vec![0.0, 1.0, 2.5]));
    }
}

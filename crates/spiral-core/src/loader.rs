// ─────────────────────────────────────────────────────────────────────
// SCPN Disk Spirals — Snapshot Loader
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Resolving snapshot identifiers to particle data.
//!
//! Archives are NumPy `.npz` files with one 1-D `f64` array per field,
//! named `<family>_<field>`:
//!
//! - `gas_x`, `gas_y`, `gas_mass` (required)
//! - `gas_z`, `gas_vx`, `gas_vy`, `gas_vz` (optional, zero when absent)
//! - the same fields with a `star_` prefix (optional family)
//!
//! Units come from an optional simulation parameter file providing
//! `dKpcUnit` and `dMsolUnit`.

use ndarray::Array1;
use ndarray_npy::NpzReader;
use spiral_types::constants::{PARAM_LENGTH_KEY, PARAM_MASS_KEY};
use spiral_types::error::{SpiralError, SpiralResult};
use spiral_types::state::{ParticleSet, Snapshot};
use spiral_types::units::{SnapshotUnits, Unit};
use std::fs::File;
use std::path::Path;
use tracing::{info, warn};

/// Source of snapshots for a time-series run.
pub trait SnapshotLoader {
    /// Materialize the snapshot named by `identifier`.
    ///
    /// Failures are reported as [`SpiralError::ResolutionFailure`].
    fn load(&self, identifier: &str, param_file: Option<&Path>) -> SpiralResult<Snapshot>;
}

/// Loads `.npz` particle archives from the filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct NpzSnapshotLoader;

impl SnapshotLoader for NpzSnapshotLoader {
    fn load(&self, identifier: &str, param_file: Option<&Path>) -> SpiralResult<Snapshot> {
        read_snapshot(Path::new(identifier), param_file).map_err(|e| {
            SpiralError::ResolutionFailure {
                identifier: identifier.to_string(),
                reason: e.to_string(),
            }
        })
    }
}

fn read_snapshot(path: &Path, param_file: Option<&Path>) -> SpiralResult<Snapshot> {
    let file = File::open(path)?;
    let mut npz = NpzReader::new(file).map_err(|e| {
        SpiralError::InvalidArgument(format!("not a readable npz archive: {e}"))
    })?;
    let names = npz
        .names()
        .map_err(|e| SpiralError::InvalidArgument(format!("cannot list npz entries: {e}")))?;

    let gas = read_family(&mut npz, &names, "gas")?.ok_or_else(|| {
        SpiralError::InvalidArgument("archive has no gas particles ('gas_x' missing)".to_string())
    })?;
    let mut snapshot = Snapshot::new(gas);
    if let Some(stars) = read_family(&mut npz, &names, "star")? {
        snapshot = snapshot.with_stars(stars);
    }
    if let Some(param) = param_file {
        if let Some(units) = read_param_units(param)? {
            snapshot = snapshot.with_units(units);
        }
    }

    info!(
        path = %path.display(),
        n_gas = snapshot.gas.len(),
        n_star = snapshot.stars.len(),
        tagged = snapshot.units.is_some(),
        "loaded snapshot"
    );
    Ok(snapshot)
}

fn has_entry(names: &[String], key: &str) -> bool {
    let with_ext = format!("{key}.npy");
    names.iter().any(|n| n == key || *n == with_ext)
}

fn read_array1(npz: &mut NpzReader<File>, key: &str) -> SpiralResult<Array1<f64>> {
    npz.by_name::<ndarray::OwnedRepr<f64>, ndarray::Ix1>(&format!("{key}.npy"))
        .or_else(|_| npz.by_name::<ndarray::OwnedRepr<f64>, ndarray::Ix1>(key))
        .map_err(|e| SpiralError::InvalidArgument(format!("Failed to read {key} from npz: {e}")))
}

fn read_optional(
    npz: &mut NpzReader<File>,
    names: &[String],
    key: &str,
    n: usize,
) -> SpiralResult<Array1<f64>> {
    if has_entry(names, key) {
        read_array1(npz, key)
    } else {
        Ok(Array1::zeros(n))
    }
}

fn read_family(
    npz: &mut NpzReader<File>,
    names: &[String],
    prefix: &str,
) -> SpiralResult<Option<ParticleSet>> {
    if !has_entry(names, &format!("{prefix}_x")) {
        return Ok(None);
    }
    let x = read_array1(npz, &format!("{prefix}_x"))?;
    let n = x.len();
    let y = read_array1(npz, &format!("{prefix}_y"))?;
    let mass = read_array1(npz, &format!("{prefix}_mass"))?;
    let z = read_optional(npz, names, &format!("{prefix}_z"), n)?;
    let vx = read_optional(npz, names, &format!("{prefix}_vx"), n)?;
    let vy = read_optional(npz, names, &format!("{prefix}_vy"), n)?;
    let vz = read_optional(npz, names, &format!("{prefix}_vz"), n)?;
    ParticleSet::with_kinematics(x, y, z, vx, vy, vz, mass).map(Some)
}

/// Units declared in a simulation parameter file.
pub fn read_param_units(path: &Path) -> SpiralResult<Option<SnapshotUnits>> {
    let contents = std::fs::read_to_string(path)?;
    parse_param_units(&contents)
}

/// Parse `key = value` lines; `#` and `%` start comments.
///
/// Returns `None` unless both the length and mass unit keys are present.
pub fn parse_param_units(contents: &str) -> SpiralResult<Option<SnapshotUnits>> {
    let mut length = None;
    let mut mass = None;

    for line in contents.lines() {
        let line = line.split(['#', '%']).next().unwrap_or("").trim();
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let (key, value) = (key.trim(), value.trim());
        if key == PARAM_LENGTH_KEY {
            length = Some(unit_scale(key, value)?);
        } else if key == PARAM_MASS_KEY {
            mass = Some(unit_scale(key, value)?);
        }
    }

    match (length, mass) {
        (Some(l), Some(m)) => Ok(Some(SnapshotUnits::new(
            Unit::new(format!("{l} kpc")),
            Unit::new(format!("{m} Msol")),
        ))),
        (l, m) => {
            warn!(
                has_length = l.is_some(),
                has_mass = m.is_some(),
                "parameter file lacks {}/{}; snapshot left without units",
                PARAM_LENGTH_KEY,
                PARAM_MASS_KEY
            );
            Ok(None)
        }
    }
}

fn unit_scale<'a>(key: &str, value: &'a str) -> SpiralResult<&'a str> {
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(value),
        _ => Err(SpiralError::InvalidArgument(format!(
            "parameter {key} must be a finite positive number, got '{value}'"
        ))),
    }
}

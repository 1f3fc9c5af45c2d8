// ─────────────────────────────────────────────────────────────────────
// SCPN Disk Spirals — Units
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Physical unit tags carried alongside arrays.
//!
//! Units are opaque symbols. They are never converted, only derived
//! (mass / length², squaring) and compared for equality wherever arrays
//! from several sources are combined.

use crate::error::{SpiralError, SpiralResult};
use ndarray::{Array1, Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder printed for an untagged array in mismatch reports.
const UNTAGGED: &str = "<no unit>";

/// A named physical unit, e.g. `"Msol"`, `"0.1 kpc"`, `"Msol kpc**-2"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Unit(String);

impl Unit {
    pub fn new(symbol: impl Into<String>) -> Self {
        Unit(symbol.into())
    }

    pub fn symbol(&self) -> &str {
        &self.0
    }

    /// Mass per unit area: `<mass> <length>**-2`.
    pub fn surface_density(mass: &Unit, length: &Unit) -> Unit {
        Unit(format!("{} {}**-2", mass.grouped(), length.grouped()))
    }

    /// The unit of a squared quantity.
    pub fn squared(&self) -> Unit {
        Unit(format!("{}**2", self.grouped()))
    }

    // Compound symbols are parenthesised before an exponent is applied.
    fn grouped(&self) -> String {
        if self.0.contains(char::is_whitespace) {
            format!("({})", self.0)
        } else {
            self.0.clone()
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Length and mass units of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotUnits {
    pub length: Unit,
    pub mass: Unit,
}

impl SnapshotUnits {
    pub fn new(length: Unit, mass: Unit) -> Self {
        SnapshotUnits { length, mass }
    }

    pub fn surface_density(&self) -> Unit {
        Unit::surface_density(&self.mass, &self.length)
    }
}

/// A value with an optional unit tag.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity<T> {
    pub value: T,
    pub unit: Option<Unit>,
}

impl<T> Quantity<T> {
    pub fn new(value: T, unit: Option<Unit>) -> Self {
        Quantity { value, unit }
    }

    pub fn untagged(value: T) -> Self {
        Quantity { value, unit: None }
    }

    pub fn has_units(&self) -> bool {
        self.unit.is_some()
    }
}

fn describe(unit: Option<&Unit>) -> String {
    unit.map_or_else(|| UNTAGGED.to_string(), |u| u.to_string())
}

/// Require `found` to carry the same tag as `expected`.
///
/// `step` identifies the offending input in the error.
pub fn ensure_same_unit(
    expected: Option<&Unit>,
    found: Option<&Unit>,
    step: usize,
) -> SpiralResult<()> {
    if expected == found {
        Ok(())
    } else {
        Err(SpiralError::UnitMismatch {
            step,
            expected: describe(expected),
            found: describe(found),
        })
    }
}

impl Quantity<Array1<f64>> {
    /// Stack 1-D profiles into a 2-D array, one row per input, in order.
    ///
    /// All rows must share one unit tag (or all be untagged) and one length.
    pub fn stack_rows(rows: &[Quantity<Array1<f64>>]) -> SpiralResult<Quantity<Array2<f64>>> {
        let first = rows.first().ok_or_else(|| {
            SpiralError::InvalidArgument("cannot stack an empty list of profiles".to_string())
        })?;
        let unit = first.unit.clone();
        let width = first.value.len();

        for (step, row) in rows.iter().enumerate() {
            ensure_same_unit(unit.as_ref(), row.unit.as_ref(), step)?;
            if row.value.len() != width {
                return Err(SpiralError::InvalidArgument(format!(
                    "profile length mismatch at time step {step}: expected {width}, got {}",
                    row.value.len()
                )));
            }
        }

        let views: Vec<ArrayView1<f64>> = rows.iter().map(|r| r.value.view()).collect();
        let stacked = ndarray::stack(Axis(0), &views)
            .map_err(|e| SpiralError::InvalidArgument(format!("failed to stack profiles: {e}")))?;

        Ok(Quantity::new(stacked, unit))
    }
}

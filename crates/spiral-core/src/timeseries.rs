// ─────────────────────────────────────────────────────────────────────
// SCPN Disk Spirals — Time-Series Driver
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Spiral power over a sequence of snapshots.
//!
//! A run has two phases. Radial edges are resolved once, from explicit
//! edges, from `rlim`, or from the gas extent of the first snapshot as
//! loaded. Every snapshot is then (optionally) recentred and binned on
//! those frozen edges, so rows of the result share one radial grid.

use crate::binning::{CylindricalBinner, RadialBinPolicy};
use crate::centering::recenter;
use crate::loader::SnapshotLoader;
use crate::power::spiral_power;
use ndarray::{Array1, Array2};
use spiral_types::config::{BinSpacing, SpiralConfig};
use spiral_types::constants::{DEFAULT_RBINS, DEFAULT_THETABINS};
use spiral_types::error::{SpiralError, SpiralResult};
use spiral_types::state::{BinSpec, Snapshot};
use spiral_types::units::Quantity;
use std::path::PathBuf;
use tracing::{debug, info};

/// Snapshots to analyse, in time order.
#[derive(Debug)]
pub enum SnapshotSeries<'a> {
    /// Identifiers resolved through a [`SnapshotLoader`].
    Identifiers(&'a [String]),
    /// Already materialized snapshots. Recentring modifies them in place.
    Loaded(&'a mut [Snapshot]),
}

impl SnapshotSeries<'_> {
    pub fn len(&self) -> usize {
        match self {
            SnapshotSeries::Identifiers(ids) => ids.len(),
            SnapshotSeries::Loaded(snaps) => snaps.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Spiral power for every time step on one radial grid.
#[derive(Debug, Clone)]
pub struct SpiralPowerSeries {
    /// `[n_steps, nr]`, row k from snapshot k.
    pub power: Quantity<Array2<f64>>,
    /// `nr + 1` radial edges shared by every row.
    pub radial_edges: Array1<f64>,
}

impl SpiralPowerSeries {
    pub fn n_steps(&self) -> usize {
        self.power.value.nrows()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesDriver {
    pub rbins: BinSpec,
    pub thetabins: BinSpec,
    pub spacing: BinSpacing,
    pub rlim: Option<(f64, f64)>,
    pub center: bool,
    pub param_file: Option<PathBuf>,
}

impl Default for TimeSeriesDriver {
    fn default() -> Self {
        TimeSeriesDriver {
            rbins: BinSpec::Count(DEFAULT_RBINS),
            thetabins: BinSpec::Count(DEFAULT_THETABINS),
            spacing: BinSpacing::Log,
            rlim: None,
            center: true,
            param_file: None,
        }
    }
}

impl TimeSeriesDriver {
    /// Build a driver from analysis settings.
    ///
    /// An unrecognized `binspacing` is an invalid argument.
    pub fn from_config(config: &SpiralConfig) -> SpiralResult<Self> {
        Ok(TimeSeriesDriver {
            rbins: config.rbins.clone(),
            thetabins: config.thetabins.clone(),
            spacing: config.spacing()?,
            rlim: config.radial_limits(),
            center: config.center,
            param_file: config.param_file.as_ref().map(PathBuf::from),
        })
    }

    /// Spiral power for each snapshot of `series`, in input order.
    ///
    /// `loader` is only consulted for [`SnapshotSeries::Identifiers`].
    /// Any failing step aborts the whole run.
    pub fn run<L>(&self, series: SnapshotSeries<'_>, loader: &L) -> SpiralResult<SpiralPowerSeries>
    where
        L: SnapshotLoader + ?Sized,
    {
        match series {
            SnapshotSeries::Identifiers(ids) => self.run_identifiers(ids, loader),
            SnapshotSeries::Loaded(snapshots) => self.run_loaded(snapshots),
        }
    }

    /// Run over snapshots that are already in memory.
    pub fn run_loaded(&self, snapshots: &mut [Snapshot]) -> SpiralResult<SpiralPowerSeries> {
        let first = snapshots.first().ok_or_else(empty_series)?;
        let edges = self.resolve_radial_edges(Some(first))?;
        let binner = self.frozen_binner(&edges);

        let total = snapshots.len();
        let mut rows = Vec::with_capacity(total);
        for (step, snapshot) in snapshots.iter_mut().enumerate() {
            rows.push(self.process(&binner, snapshot, step, total)?);
        }
        finish(rows, edges)
    }

    fn run_identifiers<L>(&self, ids: &[String], loader: &L) -> SpiralResult<SpiralPowerSeries>
    where
        L: SnapshotLoader + ?Sized,
    {
        let first_id = ids.first().ok_or_else(empty_series)?;

        // The first snapshot is only loaded up front when its extent is needed.
        let mut preloaded = if self.needs_data_extent() {
            Some(self.load(loader, first_id)?)
        } else {
            None
        };
        let edges = self.resolve_radial_edges(preloaded.as_ref())?;
        let binner = self.frozen_binner(&edges);

        let total = ids.len();
        let mut rows = Vec::with_capacity(total);
        for (step, id) in ids.iter().enumerate() {
            let mut snapshot = match preloaded.take() {
                Some(snapshot) => snapshot,
                None => self.load(loader, id)?,
            };
            rows.push(self.process(&binner, &mut snapshot, step, total)?);
        }
        finish(rows, edges)
    }

    fn needs_data_extent(&self) -> bool {
        matches!(self.rbins, BinSpec::Count(_)) && self.rlim.is_none()
    }

    fn resolve_radial_edges(&self, first: Option<&Snapshot>) -> SpiralResult<Array1<f64>> {
        let radii = first.map_or_else(|| Array1::zeros(0), |s| s.gas.radius());
        let edges = RadialBinPolicy::new(self.spacing, self.rlim).edges(&self.rbins, radii.view())?;
        debug!(
            n_edges = edges.len(),
            rmin = edges[0],
            rmax = edges[edges.len() - 1],
            "radial edges frozen for the series"
        );
        Ok(edges)
    }

    fn frozen_binner(&self, edges: &Array1<f64>) -> CylindricalBinner {
        CylindricalBinner::new(BinSpec::Edges(edges.to_vec()), self.thetabins.clone())
    }

    fn load<L>(&self, loader: &L, id: &str) -> SpiralResult<Snapshot>
    where
        L: SnapshotLoader + ?Sized,
    {
        info!(identifier = id, "loading snapshot");
        loader
            .load(id, self.param_file.as_deref())
            .map_err(|e| match e {
                e @ SpiralError::ResolutionFailure { .. } => e,
                other => SpiralError::ResolutionFailure {
                    identifier: id.to_string(),
                    reason: other.to_string(),
                },
            })
    }

    fn process(
        &self,
        binner: &CylindricalBinner,
        snapshot: &mut Snapshot,
        step: usize,
        total: usize,
    ) -> SpiralResult<Quantity<Array1<f64>>> {
        info!(step = step + 1, total, "spiral power");
        if self.center {
            recenter(snapshot);
        }
        let grid = binner.bin_snapshot(snapshot)?;
        Ok(spiral_power(&grid).power)
    }
}

fn empty_series() -> SpiralError {
    SpiralError::InvalidArgument("snapshot series is empty".to_string())
}

fn finish(rows: Vec<Quantity<Array1<f64>>>, radial_edges: Array1<f64>) -> SpiralResult<SpiralPowerSeries> {
    let power = Quantity::stack_rows(&rows)?;
    info!(
        n_steps = power.value.nrows(),
        n_radial = power.value.ncols(),
        tagged = power.has_units(),
        "spiral power series complete"
    );
    Ok(SpiralPowerSeries {
        power,
        radial_edges,
    })
}

//! Shift a snapshot into its centre-of-mass rest frame.

use ndarray::Array1;
use spiral_types::state::{ParticleSet, Snapshot};
use tracing::debug;

/// Offsets removed by [`recenter`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameShift {
    /// Centre of mass (x, y, z) before the shift.
    pub position: [f64; 3],
    /// Mass-weighted mean velocity before the shift.
    pub velocity: [f64; 3],
}

fn weighted_sum(values: &Array1<f64>, mass: &Array1<f64>) -> f64 {
    values.dot(mass)
}

/// Move all particle families so that the centre of mass sits at the
/// origin and has zero bulk velocity.
///
/// Returns `None` and leaves the snapshot untouched when its total mass
/// is not finite and positive.
pub fn recenter(snapshot: &mut Snapshot) -> Option<FrameShift> {
    let families = [&snapshot.gas, &snapshot.stars];
    let total: f64 = families.iter().map(|p| p.total_mass()).sum();
    if !total.is_finite() || total <= 0.0 {
        debug!(total_mass = total, "snapshot has no usable mass; not recentering");
        return None;
    }

    let moment = |pick: fn(&ParticleSet) -> &Array1<f64>| -> f64 {
        families
            .iter()
            .map(|p| weighted_sum(pick(p), &p.mass))
            .sum::<f64>()
            / total
    };
    let shift = FrameShift {
        position: [moment(|p| &p.x), moment(|p| &p.y), moment(|p| &p.z)],
        velocity: [moment(|p| &p.vx), moment(|p| &p.vy), moment(|p| &p.vz)],
    };

    for family in [&mut snapshot.gas, &mut snapshot.stars] {
        family.x -= shift.position[0];
        family.y -= shift.position[1];
        family.z -= shift.position[2];
        family.vx -= shift.velocity[0];
        family.vy -= shift.velocity[1];
        family.vz -= shift.velocity[2];
    }

    debug!(
        com = ?shift.position,
        vcom = ?shift.velocity,
        "snapshot moved to centre-of-mass frame"
    );
    Some(shift)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn moving_pair() -> Snapshot {
        let gas = ParticleSet::with_kinematics(
            array![1.0, 3.0],
            array![2.0, 2.0],
            array![0.0, 1.0],
            array![1.0, 1.0],
            array![0.0, 2.0],
            array![0.0, 0.0],
            array![1.0, 1.0],
        )
        .unwrap();
        let star = ParticleSet::with_kinematics(
            array![2.0],
            array![2.0],
            array![0.5],
            array![1.0],
            array![1.0],
            array![0.0],
            array![2.0],
        )
        .unwrap();
        Snapshot::new(gas).with_stars(star)
    }

    #[test]
    fn test_recenter_removes_com_and_bulk_velocity() {
        let mut snap = moving_pair();
        let shift = recenter(&mut snap).expect("positive mass");
        assert!((shift.position[0] - 2.0).abs() < 1e-12);
        assert!((shift.position[1] - 2.0).abs() < 1e-12);
        assert!((shift.position[2] - 0.5).abs() < 1e-12);
        assert!((shift.velocity[0] - 1.0).abs() < 1e-12);
        assert!((shift.velocity[1] - 1.0).abs() < 1e-12);

        let total = snap.gas.total_mass() + snap.stars.total_mass();
        let moments: [fn(&ParticleSet) -> f64; 4] = [
            |p| p.x.dot(&p.mass),
            |p| p.y.dot(&p.mass),
            |p| p.vx.dot(&p.mass),
            |p| p.vy.dot(&p.mass),
        ];
        for pick in moments {
            let m = (pick(&snap.gas) + pick(&snap.stars)) / total;
            assert!(m.abs() < 1e-12, "residual moment {m}");
        }
        assert!((snap.gas.x[0] + 1.0).abs() < 1e-12);
        assert!((snap.stars.x[0]).abs() < 1e-12);
    }

    #[test]
    fn test_recenter_massless_is_noop() {
        let gas = ParticleSet::new(array![1.0, 2.0], array![0.0, 0.0], array![0.0, 0.0]).unwrap();
        let mut snap = Snapshot::new(gas);
        let before = snap.clone();
        assert!(recenter(&mut snap).is_none());
        assert_eq!(snap, before);
    }
}

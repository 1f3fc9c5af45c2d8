// ─────────────────────────────────────────────────────────────────────
// SCPN Disk Spirals — Errors
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use thiserror::Error;

/// Failures surfaced by the binning, spectral and time-series stages.
///
/// Zero-area polar cells are not an error: they propagate as NaN/inf
/// densities so callers can filter them after the fact.
#[derive(Error, Debug)]
pub enum SpiralError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unit mismatch at time step {step}: expected {expected}, found {found}")]
    UnitMismatch {
        step: usize,
        expected: String,
        found: String,
    },

    #[error("Failed to resolve snapshot '{identifier}': {reason}")]
    ResolutionFailure { identifier: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SpiralResult<T> = Result<T, SpiralError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_mismatch_message_names_step() {
        let err = SpiralError::UnitMismatch {
            step: 3,
            expected: "Msol kpc**-2".to_string(),
            found: "dimensionless".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("time step 3"), "{msg}");
        assert!(msg.contains("Msol kpc**-2"), "{msg}");
    }

    #[test]
    fn test_io_error_converts() {
        fn open_missing() -> SpiralResult<String> {
            Ok(std::fs::read_to_string("/definitely/not/a/real/path.json")?)
        }
        match open_missing() {
            Err(SpiralError::Io(_)) => {}
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}

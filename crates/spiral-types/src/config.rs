// ─────────────────────────────────────────────────────────────────────
// SCPN Disk Spirals — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::constants::{DEFAULT_M_MAX, DEFAULT_RBINS, DEFAULT_THETABINS};
use crate::error::{SpiralError, SpiralResult};
use crate::state::BinSpec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Spacing of derived radial bin edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinSpacing {
    Linear,
    Log,
}

impl BinSpacing {
    /// Parse `"linear"` or `"log"`. Anything else is an invalid argument.
    pub fn parse(value: &str) -> SpiralResult<Self> {
        match value {
            "linear" => Ok(BinSpacing::Linear),
            "log" => Ok(BinSpacing::Log),
            other => Err(SpiralError::InvalidArgument(format!(
                "Unrecognized binspacing '{other}' (expected 'log' or 'linear')"
            ))),
        }
    }
}

impl fmt::Display for BinSpacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinSpacing::Linear => f.write_str("linear"),
            BinSpacing::Log => f.write_str("log"),
        }
    }
}

/// Analysis settings for a spiral-power run.
///
/// `binspacing` is kept as text so that a bad value in a config file
/// surfaces as an invalid argument when the run starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpiralConfig {
    #[serde(default = "default_rbins")]
    pub rbins: BinSpec,
    #[serde(default = "default_thetabins")]
    pub thetabins: BinSpec,
    #[serde(default = "default_binspacing")]
    pub binspacing: String,
    /// Radial limits (rmin, rmax) when `rbins` is a count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rlim: Option<[f64; 2]>,
    /// Move each snapshot into its centre-of-mass rest frame before binning.
    #[serde(default = "default_center")]
    pub center: bool,
    /// Highest Fourier mode reported by the power spectrum.
    #[serde(default = "default_m_max")]
    pub m_max: usize,
    /// Simulation parameter file used to attach units on load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param_file: Option<String>,
}

fn default_rbins() -> BinSpec {
    BinSpec::Count(DEFAULT_RBINS)
}
fn default_thetabins() -> BinSpec {
    BinSpec::Count(DEFAULT_THETABINS)
}
fn default_binspacing() -> String {
    "log".to_string()
}
fn default_center() -> bool {
    true
}
fn default_m_max() -> usize {
    DEFAULT_M_MAX
}

impl Default for SpiralConfig {
    fn default() -> Self {
        SpiralConfig {
            rbins: default_rbins(),
            thetabins: default_thetabins(),
            binspacing: default_binspacing(),
            rlim: None,
            center: default_center(),
            m_max: default_m_max(),
            param_file: None,
        }
    }
}

impl SpiralConfig {
    /// Load from a JSON file. Missing keys take their defaults.
    pub fn from_file(path: &str) -> SpiralResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    pub fn spacing(&self) -> SpiralResult<BinSpacing> {
        BinSpacing::parse(&self.binspacing)
    }

    pub fn radial_limits(&self) -> Option<(f64, f64)> {
        self.rlim.map(|[lo, hi]| (lo, hi))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    /// CARGO_MANIFEST_DIR points to crates/spiral-types/ at compile time.
    fn project_root() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..").join("..")
    }

    fn config_path(relative: &str) -> String {
        project_root().join(relative).to_string_lossy().to_string()
    }

    #[test]
    fn test_parse_spacing() {
        assert_eq!(BinSpacing::parse("log").unwrap(), BinSpacing::Log);
        assert_eq!(BinSpacing::parse("linear").unwrap(), BinSpacing::Linear);
        match BinSpacing::parse("quadratic") {
            Err(SpiralError::InvalidArgument(msg)) => assert!(msg.contains("quadratic")),
            other => panic!("expected InvalidArgument, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults_from_empty_object() {
        let cfg: SpiralConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, SpiralConfig::default());
        assert_eq!(cfg.rbins, BinSpec::Count(50));
        assert_eq!(cfg.thetabins, BinSpec::Count(50));
        assert_eq!(cfg.spacing().unwrap(), BinSpacing::Log);
        assert!(cfg.center);
        assert_eq!(cfg.m_max, 30);
        assert!(cfg.radial_limits().is_none());
    }

    #[test]
    fn test_explicit_edges_and_limits() {
        let json = r#"{
            "rbins": [0.5, 1.0, 2.0, 4.0],
            "thetabins": 8,
            "binspacing": "linear",
            "rlim": [0.5, 4.0],
            "center": false
        }"#;
        let cfg: SpiralConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.rbins, BinSpec::Edges(vec![0.5, 1.0, 2.0, 4.0]));
        assert_eq!(cfg.thetabins, BinSpec::Count(8));
        assert_eq!(cfg.radial_limits(), Some((0.5, 4.0)));
        assert!(!cfg.center);
    }

    #[test]
    fn test_bad_spacing_surfaces_at_use() {
        let cfg: SpiralConfig = serde_json::from_str(r#"{"binspacing": "cubic"}"#).unwrap();
        assert!(matches!(cfg.spacing(), Err(SpiralError::InvalidArgument(_))));
    }

    #[test]
    fn test_load_default_config_file() {
        let cfg = SpiralConfig::from_file(&config_path("configs/default_spiral_config.json"))
            .unwrap();
        assert_eq!(cfg.rbins, BinSpec::Count(50));
        assert_eq!(cfg.spacing().unwrap(), BinSpacing::Log);
        assert_eq!(cfg.m_max, 30);
    }

    #[test]
    fn test_roundtrip_serialization() {
        let cfg = SpiralConfig {
            rlim: Some([1.0, 100.0]),
            param_file: Some("disk.param".to_string()),
            ..SpiralConfig::default()
        };
        let json = serde_json::to_string_pretty(&cfg).unwrap();
        let cfg2: SpiralConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, cfg2);
    }
}

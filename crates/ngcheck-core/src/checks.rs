//! Check configuration and the NG/OK classifier.
//!
//! A verdict is a plain OR over the enabled checks, so enabling another
//! check can only turn OK into NG.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::analyze::{AnalysisResult, FaceFlags};
use crate::error::ConfigError;

/// Default flip ratio threshold.
pub const DEFAULT_FLIP_RATIO_THRESHOLD: f64 = 0.2;

/// One of the defect checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Check {
    Ngon,
    NonManifold,
    Boundary,
    UvMissing,
    Flip,
}

impl Check {
    /// All checks in report order.
    pub const ALL: [Check; 5] = [
        Check::Ngon,
        Check::NonManifold,
        Check::Boundary,
        Check::UvMissing,
        Check::Flip,
    ];

    /// Stable identifier used on the command line and in config files.
    pub fn id(self) -> &'static str {
        match self {
            Check::Ngon => "ngon",
            Check::NonManifold => "non-manifold",
            Check::Boundary => "boundary",
            Check::UvMissing => "uv-missing",
            Check::Flip => "flip",
        }
    }

    /// Label used in reason strings.
    pub fn label(self) -> &'static str {
        match self {
            Check::Ngon => "N-gon detected",
            Check::NonManifold => "Non-manifold edges",
            Check::Boundary => "Boundary edges",
            Check::UvMissing => "UV missing",
            Check::Flip => "Flip ratio exceeded",
        }
    }

    /// One-line description.
    pub fn description(self) -> &'static str {
        match self {
            Check::Ngon => "Faces with more than 4 vertices",
            Check::NonManifold => "Edges shared by 3 or more faces",
            Check::Boundary => "Edges used by exactly 1 face (open surface)",
            Check::UvMissing => "Mesh has no UV layer",
            Check::Flip => "Share of faces pointing toward the mesh center exceeds the threshold",
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Check {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ngon" => Ok(Check::Ngon),
            "non-manifold" | "nm" => Ok(Check::NonManifold),
            "boundary" | "bd" => Ok(Check::Boundary),
            "uv-missing" | "uv" => Ok(Check::UvMissing),
            "flip" => Ok(Check::Flip),
            other => Err(ConfigError::UnknownCheck(other.to_string())),
        }
    }
}

/// Which checks take part in the verdict, and the flip ratio threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    pub check_ngon: bool,
    pub check_nm: bool,
    pub check_bd: bool,
    pub check_uv: bool,
    pub check_flip: bool,
    /// Flip-suspect share of faces above which the flip check fires, in `[0, 1]`.
    pub flip_ratio_threshold: f64,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            check_ngon: true,
            check_nm: true,
            check_bd: true,
            check_uv: true,
            check_flip: true,
            flip_ratio_threshold: DEFAULT_FLIP_RATIO_THRESHOLD,
        }
    }
}

impl CheckConfig {
    /// A config with every check disabled.
    pub fn none() -> Self {
        Self {
            check_ngon: false,
            check_nm: false,
            check_bd: false,
            check_uv: false,
            check_flip: false,
            flip_ratio_threshold: DEFAULT_FLIP_RATIO_THRESHOLD,
        }
    }

    /// Parses a config from JSON; missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a config from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Rejects a threshold outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = self.flip_ratio_threshold;
        if !t.is_finite() || !(0.0..=1.0).contains(&t) {
            return Err(ConfigError::ThresholdOutOfRange(t));
        }
        Ok(())
    }

    /// Returns whether `check` is enabled.
    pub fn is_enabled(&self, check: Check) -> bool {
        match check {
            Check::Ngon => self.check_ngon,
            Check::NonManifold => self.check_nm,
            Check::Boundary => self.check_bd,
            Check::UvMissing => self.check_uv,
            Check::Flip => self.check_flip,
        }
    }

    /// Enables or disables `check`.
    pub fn set(&mut self, check: Check, enabled: bool) {
        let slot = match check {
            Check::Ngon => &mut self.check_ngon,
            Check::NonManifold => &mut self.check_nm,
            Check::Boundary => &mut self.check_bd,
            Check::UvMissing => &mut self.check_uv,
            Check::Flip => &mut self.check_flip,
        };
        *slot = enabled;
    }

    /// Builder form of [`set`](Self::set).
    pub fn with_check(mut self, check: Check, enabled: bool) -> Self {
        self.set(check, enabled);
        self
    }

    /// Builder method to set the flip ratio threshold.
    pub fn with_flip_ratio_threshold(mut self, threshold: f64) -> Self {
        self.flip_ratio_threshold = threshold;
        self
    }

    /// Disables one check.
    pub fn disable(&mut self, check: Check) {
        self.set(check, false);
    }

    /// Enables only the given checks.
    pub fn enable_only(&mut self, checks: &[Check]) {
        for check in Check::ALL {
            self.set(check, checks.contains(&check));
        }
    }

    /// Enabled checks in report order.
    pub fn enabled_checks(&self) -> Vec<Check> {
        Check::ALL
            .into_iter()
            .filter(|&c| self.is_enabled(c))
            .collect()
    }
}

/// Mesh-level outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Ok,
    Ng,
}

impl Verdict {
    /// True for NG.
    pub fn is_ng(self) -> bool {
        self == Verdict::Ng
    }

    /// Tag used in reports.
    pub fn tag(self) -> &'static str {
        match self {
            Verdict::Ok => "OK",
            Verdict::Ng => "NG",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Whether `check` fires for a whole mesh, ignoring whether it is enabled.
pub fn check_fires(check: Check, result: &AnalysisResult, config: &CheckConfig) -> bool {
    match check {
        Check::Ngon => result.ngon > 0,
        Check::NonManifold => result.nm > 0,
        Check::Boundary => result.bd > 0,
        Check::UvMissing => !result.uv,
        Check::Flip => result.flip_ratio() > config.flip_ratio_threshold,
    }
}

/// Enabled checks that fire for `result`, in report order.
pub fn triggered_checks(result: &AnalysisResult, config: &CheckConfig) -> Vec<Check> {
    Check::ALL
        .into_iter()
        .filter(|&c| config.is_enabled(c) && check_fires(c, result, config))
        .collect()
}

/// NG if any enabled check fires.
pub fn verdict(result: &AnalysisResult, config: &CheckConfig) -> Verdict {
    if Check::ALL
        .into_iter()
        .any(|c| config.is_enabled(c) && check_fires(c, result, config))
    {
        Verdict::Ng
    } else {
        Verdict::Ok
    }
}

/// Face-level form of [`verdict`]: the face's own flags stand in for the
/// mesh counts and its flip flag acts as a 0/1 ratio.
pub fn face_is_ng(face: &FaceFlags, uv_present: bool, config: &CheckConfig) -> bool {
    let face_flip_ratio = if face.flip { 1.0 } else { 0.0 };
    (config.check_ngon && face.ngon)
        || (config.check_nm && face.nm)
        || (config.check_bd && face.bd)
        || (config.check_uv && !uv_present)
        || (config.check_flip && face_flip_ratio > config.flip_ratio_threshold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn result(ngon: usize, nm: usize, bd: usize, uv: bool, flip: usize, faces: usize) -> AnalysisResult {
        AnalysisResult {
            faces,
            ngon,
            nm,
            bd,
            uv,
            flip,
            ..Default::default()
        }
    }

    #[test]
    fn test_clean_result_is_ok() {
        let r = result(0, 0, 0, true, 0, 6);
        assert_eq!(verdict(&r, &CheckConfig::default()), Verdict::Ok);
        assert!(triggered_checks(&r, &CheckConfig::default()).is_empty());
    }

    #[test]
    fn test_flip_ratio_threshold() {
        let r = result(0, 0, 0, true, 1, 6);
        let cfg = CheckConfig::default();
        assert_eq!(verdict(&r, &cfg), Verdict::Ok);
        let strict = cfg.with_flip_ratio_threshold(0.1);
        assert_eq!(verdict(&r, &strict), Verdict::Ng);
        assert_eq!(triggered_checks(&r, &strict), vec![Check::Flip]);
    }

    #[test]
    fn test_empty_mesh_with_flip_check_is_not_ng_for_flip() {
        let r = result(0, 0, 0, true, 0, 0);
        let cfg = CheckConfig::default().with_flip_ratio_threshold(0.0);
        assert_eq!(verdict(&r, &cfg), Verdict::Ok);
    }

    #[test]
    fn test_disabled_checks_are_ignored() {
        let r = result(2, 1, 4, false, 0, 3);
        assert_eq!(verdict(&r, &CheckConfig::none()), Verdict::Ok);
        let only_uv = CheckConfig::none().with_check(Check::UvMissing, true);
        assert_eq!(triggered_checks(&r, &only_uv), vec![Check::UvMissing]);
    }

    #[test]
    fn test_triggered_order_is_fixed() {
        let r = result(1, 1, 1, false, 3, 3);
        assert_eq!(triggered_checks(&r, &CheckConfig::default()), Check::ALL.to_vec());
    }

    #[test]
    fn test_face_level_classifier() {
        let cfg = CheckConfig::default();
        let flipped = FaceFlags {
            flip: true,
            ..Default::default()
        };
        assert!(face_is_ng(&flipped, true, &cfg));
        assert!(!face_is_ng(&flipped, true, &cfg.clone().with_flip_ratio_threshold(1.0)));
        assert!(face_is_ng(&FaceFlags::default(), false, &cfg));
        assert!(!face_is_ng(&FaceFlags::default(), true, &cfg));
    }

    #[test]
    fn test_enable_only_and_disable() {
        let mut cfg = CheckConfig::default();
        cfg.disable(Check::Boundary);
        assert!(!cfg.check_bd);
        cfg.enable_only(&[Check::Ngon, Check::Flip]);
        assert_eq!(cfg.enabled_checks(), vec![Check::Ngon, Check::Flip]);
    }

    #[test]
    fn test_check_ids_round_trip_through_from_str() {
        for check in Check::ALL {
            assert_eq!(check.id().parse::<Check>().unwrap(), check);
        }
        assert!(matches!(
            "holes".parse::<Check>(),
            Err(ConfigError::UnknownCheck(name)) if name == "holes"
        ));
    }

    #[test]
    fn test_config_json_defaults_missing_fields() {
        let cfg = CheckConfig::from_json_str(r#"{"check_uv": false}"#).unwrap();
        assert_eq!(cfg, CheckConfig::default().with_check(Check::UvMissing, false));
    }

    #[test]
    fn test_config_rejects_threshold_out_of_range() {
        let err = CheckConfig::from_json_str(r#"{"flip_ratio_threshold": 1.5}"#).unwrap_err();
        assert!(matches!(err, ConfigError::ThresholdOutOfRange(t) if t == 1.5));
        assert!(CheckConfig::default()
            .with_flip_ratio_threshold(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checks.json");
        std::fs::write(&path, r#"{"check_flip": false, "flip_ratio_threshold": 0.5}"#).unwrap();
        let cfg = CheckConfig::from_file(&path).unwrap();
        assert!(!cfg.check_flip);
        assert_eq!(cfg.flip_ratio_threshold, 0.5);

        let missing = CheckConfig::from_file(&dir.path().join("nope.json"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_verdict_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Verdict::Ng).unwrap(), "\"NG\"");
        assert_eq!(serde_json::to_string(&Check::UvMissing).unwrap(), "\"uv-missing\"");
    }
}

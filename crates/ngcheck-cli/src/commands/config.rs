//! Check configuration from a config file and command-line overrides.

use anyhow::{Context, Result};
use ngcheck_core::{Check, CheckConfig};
use std::path::Path;

/// Builds the effective [`CheckConfig`].
///
/// Overrides apply in order: config file (or defaults), `--only-checks`,
/// `--disable-check`, `--flip-threshold`.
///
/// # Arguments
/// * `config_path` - Optional JSON config file
/// * `disable_checks` - Check ids to disable
/// * `only_checks` - Comma-separated check ids to keep enabled
/// * `flip_threshold` - Flip ratio threshold override
pub fn build_config(
    config_path: Option<&str>,
    disable_checks: &[String],
    only_checks: Option<&str>,
    flip_threshold: Option<f64>,
) -> Result<CheckConfig> {
    let mut config = match config_path {
        Some(path) => CheckConfig::from_file(Path::new(path))
            .with_context(|| format!("Failed to load config file: {}", path))?,
        None => CheckConfig::default(),
    };

    if let Some(only) = only_checks {
        let checks = parse_check_list(only)?;
        config.enable_only(&checks);
    }

    for id in disable_checks {
        let check: Check = id.parse()?;
        config.disable(check);
    }

    if let Some(threshold) = flip_threshold {
        config.flip_ratio_threshold = threshold;
    }

    config.validate()?;
    Ok(config)
}

/// Parses a comma-separated list of check ids.
pub fn parse_check_list(list: &str) -> Result<Vec<Check>> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<Check>().map_err(anyhow::Error::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_without_flags() {
        assert_eq!(build_config(None, &[], None, None).unwrap(), CheckConfig::default());
    }

    #[test]
    fn test_only_then_disable() {
        let config = build_config(
            None,
            &["boundary".to_string()],
            Some("ngon, boundary,flip"),
            Some(0.5),
        )
        .unwrap();
        assert_eq!(config.enabled_checks(), vec![Check::Ngon, Check::Flip]);
        assert_eq!(config.flip_ratio_threshold, 0.5);
    }

    #[test]
    fn test_unknown_check_is_rejected() {
        let err = build_config(None, &["holes".to_string()], None, None).unwrap_err();
        assert!(err.to_string().contains("unknown check 'holes'"));
    }

    #[test]
    fn test_threshold_is_validated() {
        assert!(build_config(None, &[], None, Some(1.5)).is_err());
    }

    #[test]
    fn test_config_file_with_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ngcheck.json");
        std::fs::write(&path, r#"{"check_uv": false, "flip_ratio_threshold": 0.1}"#).unwrap();

        let config =
            build_config(Some(path.to_str().unwrap()), &["nm".to_string()], None, None).unwrap();
        assert!(!config.check_uv);
        assert!(!config.check_nm);
        assert!(config.check_ngon);
        assert_eq!(config.flip_ratio_threshold, 0.1);
    }

    #[test]
    fn test_missing_config_file() {
        let err = build_config(Some("/nonexistent/ngcheck.json"), &[], None, None).unwrap_err();
        assert!(err.to_string().contains("Failed to load config file"));
    }
}

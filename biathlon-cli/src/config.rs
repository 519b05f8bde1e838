//! Race configuration loading
//!
//! JSON is the native format; files ending in `.toml` are read as TOML.

use anyhow::{Context, Result};
use biathlon_core::{RaceConfig, RaceConfigFile};
use std::fs;
use std::path::Path;

/// Load and validate a race configuration file
pub fn load_race_config(path: &Path) -> Result<RaceConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let is_toml = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.eq_ignore_ascii_case("toml"))
        .unwrap_or(false);

    let file: RaceConfigFile = if is_toml {
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?
    };

    let config = file
        .validate()
        .with_context(|| format!("Invalid config file: {:?}", path))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_json_config() {
        let file = write_temp(
            ".json",
            r#"{"laps": 2, "lapLen": 3651, "penaltyLen": 50, "firingLines": 1,
                "start": "09:30:00", "startDelta": "00:00:30"}"#,
        );

        let config = load_race_config(file.path()).unwrap();
        assert_eq!(config.laps, 2);
        assert_eq!(config.penalty_len, 50);
        assert_eq!(config.start_delta, chrono::Duration::seconds(30));
    }

    #[test]
    fn test_load_toml_config() {
        let file = write_temp(
            ".toml",
            r#"
            laps = 3
            lapLen = 4000
            penaltyLen = 150
            firingLines = 2
            start = "10:00:00"
            startDelta = "0:01:30"
            "#,
        );

        let config = load_race_config(file.path()).unwrap();
        assert_eq!(config.laps, 3);
        assert_eq!(config.firing_lines, 2);
        assert_eq!(config.start_delta, chrono::Duration::seconds(90));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let file = write_temp(
            ".json",
            r#"{"laps": 0, "lapLen": 3651, "penaltyLen": 50, "firingLines": 1,
                "start": "09:30:00", "startDelta": "00:00:30"}"#,
        );

        let err = load_race_config(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("laps must be greater than zero"));
    }

    #[test]
    fn test_missing_file() {
        let err = load_race_config(Path::new("does/not/exist.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_sample_configs_agree() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../data");
        let json = load_race_config(&root.join("config.json")).unwrap();
        let toml = load_race_config(&root.join("config.toml")).unwrap();
        assert_eq!(json, toml);
    }
}

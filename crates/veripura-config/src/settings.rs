//! Settings schema, loading and validation.

use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};
use tracing::debug;

use veripura_contracts::error::{VeriPuraError, VeriPuraResult};

/// Longest step delay accepted, in milliseconds.
const MAX_STEP_DELAY_MS: u64 = 60_000;

/// The generation endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Base URL without a trailing slash.
    pub api_base: String,
    pub model: String,
    /// Per-request timeout. Zero is rejected.
    pub timeout_secs: u64,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            api_base: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-3-flash-preview".to_string(),
            timeout_secs: 60,
        }
    }
}

/// Stage reveal cadence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    pub step_delay_ms: u64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self { step_delay_ms: 1200 }
    }
}

/// Routing of scored transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingSettings {
    /// Confidence (0–100) below which a result without an explicit
    /// `needsHITM` flag goes to manual review.
    pub hitm_threshold: f64,
}

impl Default for RoutingSettings {
    fn default() -> Self {
        Self { hitm_threshold: 85.0 }
    }
}

/// All settings, as read from `veripura.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub generator: GeneratorSettings,
    pub playback: PlaybackSettings,
    pub routing: RoutingSettings,
}

impl Settings {
    /// Parse `s` as TOML and validate the result.
    ///
    /// Returns `VeriPuraError::ConfigError` if the TOML is malformed, does not
    /// match the schema, or holds an out-of-range value.
    pub fn from_toml_str(s: &str) -> VeriPuraResult<Self> {
        let settings: Settings = toml::from_str(s).map_err(|e| VeriPuraError::ConfigError {
            reason: format!("failed to parse settings TOML: {e}"),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read the file at `path` and parse it as settings.
    pub fn from_file(path: &Path) -> VeriPuraResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| VeriPuraError::ConfigError {
            reason: format!("failed to read settings file '{}': {e}", path.display()),
        })?;
        debug!(path = %path.display(), "settings file loaded");
        Self::from_toml_str(&contents)
    }

    /// Load `path` if given, otherwise use the defaults.
    pub fn load(path: Option<&Path>) -> VeriPuraResult<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Serialize back to TOML.
    pub fn to_toml_string(&self) -> VeriPuraResult<String> {
        toml::to_string_pretty(self).map_err(|e| VeriPuraError::ConfigError {
            reason: format!("failed to serialize settings: {e}"),
        })
    }

    /// Check value ranges.
    pub fn validate(&self) -> VeriPuraResult<()> {
        if self.generator.timeout_secs == 0 {
            return Err(config_error("generator.timeout_secs must be greater than zero"));
        }
        if self.generator.api_base.trim().is_empty() {
            return Err(config_error("generator.api_base must not be empty"));
        }
        if self.generator.model.trim().is_empty() {
            return Err(config_error("generator.model must not be empty"));
        }
        if self.playback.step_delay_ms == 0 || self.playback.step_delay_ms > MAX_STEP_DELAY_MS {
            return Err(config_error(format!(
                "playback.step_delay_ms must be between 1 and {MAX_STEP_DELAY_MS}, got {}",
                self.playback.step_delay_ms
            )));
        }
        let threshold = self.routing.hitm_threshold;
        if !(0.0..=100.0).contains(&threshold) {
            return Err(config_error(format!(
                "routing.hitm_threshold must be within 0-100, got {threshold}"
            )));
        }
        Ok(())
    }

    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.playback.step_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.generator.timeout_secs)
    }
}

fn config_error(reason: impl Into<String>) -> VeriPuraError {
    VeriPuraError::ConfigError {
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.step_delay(), Duration::from_millis(1200));
        assert_eq!(settings.request_timeout(), Duration::from_secs(60));
        assert_eq!(settings.routing.hitm_threshold, 85.0);
        assert_eq!(settings.generator.model, "gemini-3-flash-preview");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let settings = Settings::from_toml_str("[playback]\nstep_delay_ms = 300\n").unwrap();
        assert_eq!(settings.playback.step_delay_ms, 300);
        assert_eq!(settings.generator, GeneratorSettings::default());
    }

    #[test]
    fn defaults_round_trip_through_toml() {
        let text = Settings::default().to_toml_string().unwrap();
        assert!(text.contains("[routing]"));
        assert_eq!(Settings::from_toml_str(&text).unwrap(), Settings::default());
    }

    #[test]
    fn zero_cadence_is_rejected() {
        let err = Settings::from_toml_str("[playback]\nstep_delay_ms = 0\n").unwrap_err();
        match err {
            VeriPuraError::ConfigError { reason } => assert!(reason.contains("step_delay_ms")),
            other => panic!("expected ConfigError, got {other:?}"),
        }
    }

    #[test]
    fn zero_timeout_is_rejected() {
        assert!(Settings::from_toml_str("[generator]\ntimeout_secs = 0\n").is_err());
    }

    #[test]
    fn threshold_out_of_range_is_rejected() {
        assert!(Settings::from_toml_str("[routing]\nhitm_threshold = 101.0\n").is_err());
        assert!(Settings::from_toml_str("[routing]\nhitm_threshold = -1.0\n").is_err());
        assert!(Settings::from_toml_str("[routing]\nhitm_threshold = 0.0\n").is_ok());
    }

    #[test]
    fn unknown_section_is_rejected() {
        let err = Settings::from_toml_str("[telemetry]\nenabled = true\n").unwrap_err();
        assert!(matches!(err, VeriPuraError::ConfigError { .. }));
    }

    #[test]
    fn malformed_toml_is_config_error() {
        let err = Settings::from_toml_str("[playback\nstep_delay_ms = ").unwrap_err();
        assert!(matches!(err, VeriPuraError::ConfigError { .. }));
    }

    #[test]
    fn from_file_reads_settings() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[generator]\nmodel = \"gemini-2.5-flash\"\ntimeout_secs = 15").unwrap();

        let settings = Settings::from_file(file.path()).unwrap();
        assert_eq!(settings.generator.model, "gemini-2.5-flash");
        assert_eq!(settings.request_timeout(), Duration::from_secs(15));
    }

    #[test]
    fn missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::from_file(&dir.path().join("absent.toml")).unwrap_err();
        match err {
            VeriPuraError::ConfigError { reason } => assert!(reason.contains("absent.toml")),
            other => panic!("expected ConfigError, got {other:?}"),
        }
    }

    #[test]
    fn load_without_path_uses_defaults() {
        assert_eq!(Settings::load(None).unwrap(), Settings::default());
    }
}

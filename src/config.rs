//! Havan configuration
//!
//! A single JSON document covering synthesis, playback and export. Every
//! section has defaults, so an empty `{}` file is a valid configuration.

use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::engine::io::ExportFormat;
use crate::engine::player::DEFAULT_VOLUME;
use crate::error::{HavanError, Result};
use crate::synth::FireConfig;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HavanConfig {
    /// Fire generator parameters.
    pub synth: FireConfig,

    /// Live playback settings.
    pub playback: PlaybackConfig,

    /// WAV export settings.
    pub export: ExportConfig,
}

/// Live playback settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Initial fire volume in [0, 1].
    pub volume: f32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: DEFAULT_VOLUME,
        }
    }
}

/// WAV export settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// 16, 24 or 32 (float).
    pub bit_depth: u16,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { bit_depth: 16 }
    }
}

impl HavanConfig {
    /// Load and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|e| HavanError::read_failed(path, e))?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Check every section.
    pub fn validate(&self) -> Result<()> {
        self.synth.validate()?;

        if !(0.0..=1.0).contains(&self.playback.volume) {
            return Err(HavanError::invalid_config(format!(
                "playback.volume must be within [0, 1], got {}",
                self.playback.volume
            )));
        }

        if !matches!(self.export.bit_depth, 16 | 24 | 32) {
            return Err(HavanError::invalid_config(format!(
                "export.bit_depth must be 16, 24 or 32, got {}",
                self.export.bit_depth
            )));
        }

        Ok(())
    }

    /// Export format for the configured synth sample rate.
    pub fn export_format(&self) -> ExportFormat {
        ExportFormat::new(self.synth.sample_rate, self.export.bit_depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: HavanConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, HavanConfig::default());
        assert_eq!(config.playback.volume, 0.4);
        assert_eq!(config.export_format(), ExportFormat::cd_quality());
        config.validate().unwrap();
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: HavanConfig =
            serde_json::from_str(r#"{"synth":{"duration_secs":2},"export":{"bit_depth":24}}"#)
                .unwrap();
        assert_eq!(config.synth.duration_secs, 2);
        assert_eq!(config.synth.sample_rate, 44_100);
        assert_eq!(config.export.bit_depth, 24);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("havan.json");

        let mut config = HavanConfig::default();
        config.playback.volume = 0.7;
        config.save(&path).unwrap();

        assert_eq!(HavanConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = HavanConfig::default();
        config.playback.volume = 1.5;
        assert!(matches!(
            config.validate(),
            Err(HavanError::InvalidConfig { .. })
        ));

        let mut config = HavanConfig::default();
        config.export.bit_depth = 8;
        assert!(config.validate().is_err());

        let mut config = HavanConfig::default();
        config.synth.duration_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let result = HavanConfig::load(Path::new("/nonexistent/havan.json"));
        assert!(matches!(result, Err(HavanError::FileNotFound { .. })));
    }

    #[test]
    fn test_load_directory_is_io_error() {
        let dir = tempdir().unwrap();
        let result = HavanConfig::load(dir.path());
        assert!(matches!(result, Err(HavanError::Io(_))));
    }
}

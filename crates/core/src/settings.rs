use std::path::{Path, PathBuf};

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::PileError;
use crate::progression::ProgressionConfig;

/// User-tunable settings for the collection feature.
///
/// Stored as TOML:
///
/// ```toml
/// notification_toggle = false
///
/// [progression]
/// initial_required = 4
/// tier_scaling = 2.0
/// max_tier = 10
/// multiplier_per_tier = 1.0
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct PileSettings {
    /// Toast notifications instead of a modal on each new duplicate.
    pub notification_toggle: bool,
    pub progression: ProgressionConfig,
}

#[derive(Debug, Error, Diagnostic)]
pub enum SettingsError {
    #[error("settings file not found at {0}")]
    #[diagnostic(code(settings::not_found))]
    NotFound(PathBuf),

    #[error("failed to parse settings: {0}")]
    #[diagnostic(code(settings::parse_error))]
    ParseError(#[from] toml::de::Error),

    #[error("failed to serialize settings: {0}")]
    #[diagnostic(code(settings::serialize_error))]
    SerializeError(#[from] toml::ser::Error),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Invalid(#[from] PileError),

    #[error("io error: {0}")]
    #[diagnostic(code(settings::io_error))]
    IoError(#[from] std::io::Error),
}

impl PileSettings {
    /// Parses and validates settings from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        let settings: PileSettings = toml::from_str(content)?;
        settings.progression.validate()?;
        Ok(settings)
    }

    /// load settings from a file path.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Err(SettingsError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Loads `path`, falling back to defaults when the file doesn't exist.
    pub fn load_or_default(path: &Path) -> Result<Self, SettingsError> {
        match Self::load(path) {
            Err(SettingsError::NotFound(_)) => Ok(Self::default()),
            other => other,
        }
    }

    /// save settings to a file path.
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}

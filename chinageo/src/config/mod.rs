//! Persistent configuration.
//!
//! Settings live in an INI file under the platform config directory
//! (`~/.config/chinageo/config.ini` on Linux). The file is optional:
//! a missing file yields the defaults, and unknown keys are ignored.
//!
//! [`ConfigKey`] enumerates the addressable settings for the CLI's
//! `config get`/`config set` commands.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use ini::Ini;
use thiserror::Error;

use crate::transform::InverseConfig;

/// Errors from loading, saving or mutating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Could not read or write the config file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid INI.
    #[error("Failed to parse config file: {0}")]
    Parse(String),

    /// A value does not parse for its key.
    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

/// Output format for CLI results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable `lat, lon` lines.
    #[default]
    Plain,
    /// One JSON object per result.
    Json,
}

impl OutputFormat {
    /// Canonical name used in the config file.
    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Plain => "plain",
            OutputFormat::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" => Ok(OutputFormat::Plain),
            "json" => Ok(OutputFormat::Json),
            _ => Err(()),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Inverse-search settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InverseSection {
    /// Convergence threshold in degrees.
    pub threshold: f64,
    /// Bisection iteration ceiling.
    pub max_iterations: u32,
}

impl Default for InverseSection {
    fn default() -> Self {
        let defaults = InverseConfig::default();
        Self {
            threshold: defaults.threshold_deg,
            max_iterations: defaults.max_iterations,
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OutputSection {
    /// Default output format when no CLI flag is given.
    pub format: OutputFormat,
}

/// The parsed configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ConfigFile {
    /// `[inverse]` section.
    pub inverse: InverseSection,
    /// `[output]` section.
    pub output: OutputSection,
}

impl ConfigFile {
    /// Load from the default path. A missing file yields the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_file_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load from an explicit path.
    pub fn load_from(path: &std::path::Path) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_file(path).map_err(|e| ConfigError::Parse(e.to_string()))?;
        let mut config = Self::default();

        if let Some(threshold) = ini.get_from(Some("inverse"), "threshold") {
            config.inverse.threshold = parse_threshold(threshold)?;
        }
        if let Some(max_iterations) = ini.get_from(Some("inverse"), "max_iterations") {
            config.inverse.max_iterations = parse_max_iterations(max_iterations)?;
        }
        if let Some(format) = ini.get_from(Some("output"), "format") {
            config.output.format = format.parse().map_err(|_| ConfigError::InvalidValue {
                key: "output.format".into(),
                value: format.into(),
                reason: "expected 'plain' or 'json'".into(),
            })?;
        }

        Ok(config)
    }

    /// Save to the default path, creating parent directories as needed.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = config_file_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        self.save_to(&path)
    }

    /// Save to an explicit path.
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        let mut ini = Ini::new();
        ini.with_section(Some("inverse"))
            .set("threshold", self.inverse.threshold.to_string())
            .set("max_iterations", self.inverse.max_iterations.to_string());
        ini.with_section(Some("output"))
            .set("format", self.output.format.name());
        ini.write_to_file(path)?;
        Ok(())
    }

    /// The [`InverseConfig`] these settings describe.
    pub fn inverse_config(&self) -> InverseConfig {
        InverseConfig::default()
            .with_threshold_deg(self.inverse.threshold)
            .with_max_iterations(self.inverse.max_iterations)
    }
}

fn parse_threshold(value: &str) -> Result<f64, ConfigError> {
    let parsed: f64 = value.parse().map_err(|_| ConfigError::InvalidValue {
        key: "inverse.threshold".into(),
        value: value.into(),
        reason: "expected a number".into(),
    })?;
    if !parsed.is_finite() || parsed < 0.0 {
        return Err(ConfigError::InvalidValue {
            key: "inverse.threshold".into(),
            value: value.into(),
            reason: "must be a non-negative finite number".into(),
        });
    }
    Ok(parsed)
}

fn parse_max_iterations(value: &str) -> Result<u32, ConfigError> {
    let parsed: u32 = value.parse().map_err(|_| ConfigError::InvalidValue {
        key: "inverse.max_iterations".into(),
        value: value.into(),
        reason: "expected a positive integer".into(),
    })?;
    if parsed == 0 {
        return Err(ConfigError::InvalidValue {
            key: "inverse.max_iterations".into(),
            value: value.into(),
            reason: "must be at least 1".into(),
        });
    }
    Ok(parsed)
}

/// Path of the configuration file.
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("chinageo")
        .join("config.ini")
}

/// Addressable configuration keys, in `section.key` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    /// `inverse.threshold`
    InverseThreshold,
    /// `inverse.max_iterations`
    InverseMaxIterations,
    /// `output.format`
    OutputFormat,
}

impl ConfigKey {
    /// All keys, grouped by section.
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::InverseThreshold,
            ConfigKey::InverseMaxIterations,
            ConfigKey::OutputFormat,
        ]
    }

    /// Full `section.key` name.
    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::InverseThreshold => "inverse.threshold",
            ConfigKey::InverseMaxIterations => "inverse.max_iterations",
            ConfigKey::OutputFormat => "output.format",
        }
    }

    /// Section part of the name.
    pub fn section(&self) -> &'static str {
        match self {
            ConfigKey::InverseThreshold | ConfigKey::InverseMaxIterations => "inverse",
            ConfigKey::OutputFormat => "output",
        }
    }

    /// Key part of the name.
    pub fn key_name(&self) -> &'static str {
        match self {
            ConfigKey::InverseThreshold => "threshold",
            ConfigKey::InverseMaxIterations => "max_iterations",
            ConfigKey::OutputFormat => "format",
        }
    }

    /// Current value of this key, rendered as a string.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::InverseThreshold => config.inverse.threshold.to_string(),
            ConfigKey::InverseMaxIterations => config.inverse.max_iterations.to_string(),
            ConfigKey::OutputFormat => config.output.format.name().to_string(),
        }
    }

    /// Set this key from a string value.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigError> {
        match self {
            ConfigKey::InverseThreshold => {
                config.inverse.threshold = parse_threshold(value)?;
            }
            ConfigKey::InverseMaxIterations => {
                config.inverse.max_iterations = parse_max_iterations(value)?;
            }
            ConfigKey::OutputFormat => {
                config.output.format = value.parse().map_err(|_| ConfigError::InvalidValue {
                    key: self.name().into(),
                    value: value.into(),
                    reason: "expected 'plain' or 'json'".into(),
                })?;
            }
        }
        Ok(())
    }
}

impl FromStr for ConfigKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigKey::all()
            .iter()
            .copied()
            .find(|key| key.name() == s)
            .ok_or(())
    }
}

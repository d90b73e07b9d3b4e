use crate::models::EnsembleWeights;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub artifacts: ArtifactSettings,
    #[serde(default)]
    pub ensemble: EnsembleSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactSettings {
    #[serde(default = "default_artifact_dir")]
    pub dir: String,
}

impl Default for ArtifactSettings {
    fn default() -> Self {
        Self {
            dir: default_artifact_dir(),
        }
    }
}

fn default_artifact_dir() -> String {
    "artifacts".to_string()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnsembleSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

/// Blend weights for the member models
///
/// Tunable but not learned; the defaults are the exact constants the
/// models were evaluated with.
#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_forest_weight")]
    pub forest: f64,
    #[serde(default = "default_boosted_weight")]
    pub boosted: f64,
    #[serde(default = "default_linear_weight")]
    pub linear: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            forest: default_forest_weight(),
            boosted: default_boosted_weight(),
            linear: default_linear_weight(),
        }
    }
}

impl WeightsConfig {
    pub fn to_weights(&self) -> EnsembleWeights {
        EnsembleWeights {
            forest: self.forest,
            boosted: self.boosted,
            linear: self.linear,
        }
    }
}

fn default_forest_weight() -> f64 { 0.5 }
fn default_boosted_weight() -> f64 { 0.3 }
fn default_linear_weight() -> f64 { 0.2 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with BEI__)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g. BEI__ARTIFACTS__DIR -> artifacts.dir
            .add_source(
                Environment::with_prefix("BEI")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("BEI")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

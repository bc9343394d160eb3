//! Configuration handling for the nwalign CLI
//!
//! Supports loading configuration from nwalign.toml files with CLI argument overrides.

use anyhow::{Context, Result};
use nwalign_core::{Algorithm, AlignerParams, CostModel, CostModelConfig, MIN_BASE_LEN};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::CliError;

/// Default configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "nwalign.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub scoring: CostModelConfig,
    #[serde(default)]
    pub split: SplitConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Alignment algorithm ("full" or "linear")
    #[serde(default)]
    pub algorithm: Algorithm,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitConfig {
    /// Sub-problems with a side shorter than this use the full table
    #[serde(default = "default_base_len")]
    pub base_len: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Report format
    #[serde(default)]
    pub format: OutputFormat,

    /// Append column statistics to the report
    #[serde(default)]
    pub include_stats: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

// Default value functions
fn default_base_len() -> usize { MIN_BASE_LEN }

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
        }
    }
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            base_len: default_base_len(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            include_stats: false,
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::file_not_found(path.to_path_buf()).into());
                }
                log::info!("Loading configuration from: {}", path.display());
                Self::load_from_file(path)?
            }
            None => {
                // Try to find nwalign.toml in current directory
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    log::info!("Loading configuration from: {}", DEFAULT_CONFIG_FILE);
                    Self::load_from_file(&default_path)?
                } else {
                    log::debug!("Using default configuration");
                    Self::default()
                }
            }
        };

        Ok(config)
    }

    /// Load configuration from a specific TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .map_err(CliError::from)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .context("Failed to serialize configuration")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write configuration file: {}", path.display()))?;

        Ok(())
    }

    /// Build the validated cost model described by `[scoring]`
    pub fn cost_model(&self) -> Result<CostModel> {
        CostModel::try_from(self.scoring.clone())
            .map_err(|e| CliError::config(e.to_string()).into())
    }

    /// Aligner parameters, with `algorithm` overriding the configured one
    pub fn aligner_params(&self, algorithm: Option<Algorithm>) -> AlignerParams {
        AlignerParams {
            algorithm: algorithm.unwrap_or(self.general.algorithm),
            base_len: self.split.base_len,
        }
    }

    /// Generate example configuration file content
    pub fn example_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config)
            .expect("Failed to serialize default configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.algorithm, Algorithm::Linear);
        assert_eq!(config.scoring.gap_cost, 30);
        assert_eq!(config.split.base_len, 2);
        assert_eq!(config.output.format, OutputFormat::Text);
        assert_eq!(config.cost_model().unwrap(), CostModel::nucleotide());
    }

    #[test]
    fn test_config_roundtrip() -> Result<()> {
        let mut config = Config::default();
        config.general.algorithm = Algorithm::Full;
        config.output.format = OutputFormat::Json;
        let temp_file = NamedTempFile::new()?;

        config.save_to_file(temp_file.path())?;
        let loaded_config = Config::load_from_file(temp_file.path())?;

        assert_eq!(loaded_config.general.algorithm, Algorithm::Full);
        assert_eq!(loaded_config.output.format, OutputFormat::Json);
        assert_eq!(loaded_config.scoring, config.scoring);

        Ok(())
    }

    #[test]
    fn test_partial_config_uses_defaults() -> Result<()> {
        let config: Config = toml::from_str("[general]\nalgorithm = \"full\"\n")?;
        assert_eq!(config.general.algorithm, Algorithm::Full);
        assert_eq!(config.scoring, CostModelConfig::default());
        assert_eq!(config.split.base_len, 2);
        Ok(())
    }

    #[test]
    fn test_invalid_scoring_is_reported() {
        let config: Config = toml::from_str(
            "[scoring]\nalphabet = \"AB\"\ngap_cost = -1\n[scoring.substitutions]\nAB = 1\n",
        )
        .unwrap();
        let err = config.cost_model().unwrap_err();
        assert!(err.to_string().contains("gap cost must be non-negative"));
    }

    #[test]
    fn test_algorithm_override() {
        let config = Config::default();
        assert_eq!(config.aligner_params(None).algorithm, Algorithm::Linear);
        assert_eq!(config.aligner_params(Some(Algorithm::Full)).algorithm, Algorithm::Full);
    }

    #[test]
    fn test_missing_explicit_config() {
        let err = Config::load(Some(Path::new("/nonexistent/nwalign.toml"))).unwrap_err();
        assert!(err.downcast_ref::<CliError>().is_some());
    }

    #[test]
    fn test_example_toml_generation() {
        let example = Config::example_toml();
        assert!(example.contains("[general]"));
        assert!(example.contains("[scoring]"));
        assert!(example.contains("[split]"));
        assert!(example.contains("[output]"));
    }
}

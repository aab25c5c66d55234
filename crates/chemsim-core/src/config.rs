//! Run configuration for a similarity calculation.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{CHEMICAL_PREFIXES, DEFAULT_PRECISION, MAX_PRECISION};
use crate::errors::ConfigError;

/// Configuration for one `calculate` run.
///
/// Loadable from TOML; CLI flags are applied on top via
/// [`CalculateConfig::apply_overrides`]. `validate` runs before any
/// computation so bad values never produce partial work.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculateConfig {
    /// Identifier prefixes accepted by the entity selector.
    pub prefixes: Vec<String>,
    /// Minimum similarity cutoff; values <= cutoff are dropped.
    pub cutoff: Option<f64>,
    /// Decimal places for emitted similarity values.
    pub precision: u32,
    /// Destination for the gzipped edge list.
    pub output: PathBuf,
    /// Condensed-index chunk size for the parallel path; 0 = sequential.
    pub chunk_size: usize,
}

impl Default for CalculateConfig {
    fn default() -> Self {
        Self {
            prefixes: CHEMICAL_PREFIXES.iter().map(|p| p.to_string()).collect(),
            cutoff: None,
            precision: DEFAULT_PRECISION,
            output: PathBuf::from("similarity.tsv.gz"),
            chunk_size: 0,
        }
    }
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub prefixes: Option<Vec<String>>,
    pub cutoff: Option<f64>,
    pub precision: Option<u32>,
    pub output: Option<PathBuf>,
    pub chunk_size: Option<usize>,
}

impl CalculateConfig {
    /// Load configuration from a TOML file, falling back to defaults for
    /// missing fields.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config: Self = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Apply CLI flags on top of file/default values.
    pub fn apply_overrides(&mut self, cli: &CliOverrides) {
        if let Some(prefixes) = &cli.prefixes {
            self.prefixes = prefixes.clone();
        }
        if let Some(cutoff) = cli.cutoff {
            self.cutoff = Some(cutoff);
        }
        if let Some(precision) = cli.precision {
            self.precision = precision;
        }
        if let Some(output) = &cli.output {
            self.output = output.clone();
        }
        if let Some(chunk_size) = cli.chunk_size {
            self.chunk_size = chunk_size;
        }
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.precision > MAX_PRECISION {
            return Err(ConfigError::ValidationFailed {
                field: "precision".to_string(),
                message: format!("must be at most {MAX_PRECISION}"),
            });
        }
        if let Some(cutoff) = self.cutoff {
            if cutoff.is_nan() {
                return Err(ConfigError::ValidationFailed {
                    field: "cutoff".to_string(),
                    message: "must not be NaN".to_string(),
                });
            }
        }
        if self.prefixes.iter().any(|p| p.is_empty()) {
            return Err(ConfigError::ValidationFailed {
                field: "prefixes".to_string(),
                message: "empty prefix matches every identifier".to_string(),
            });
        }
        if self.output.as_os_str().is_empty() {
            return Err(ConfigError::ValidationFailed {
                field: "output".to_string(),
                message: "output path must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = CalculateConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.precision, 3);
        assert_eq!(config.prefixes.len(), 4);
        assert!(config.cutoff.is_none());
    }

    #[test]
    fn from_toml_overrides_defaults() {
        let config = CalculateConfig::from_toml(
            r#"
            cutoff = 0.5
            precision = 2
            prefixes = ["CHEBI"]
            "#,
        )
        .unwrap();
        assert_eq!(config.cutoff, Some(0.5));
        assert_eq!(config.precision, 2);
        assert_eq!(config.prefixes, vec!["CHEBI".to_string()]);
        // Unspecified fields fall back to defaults.
        assert_eq!(config.output, PathBuf::from("similarity.tsv.gz"));
    }

    #[test]
    fn nan_cutoff_rejected() {
        let config = CalculateConfig {
            cutoff: Some(f64::NAN),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("cutoff"));
    }

    #[test]
    fn oversized_precision_rejected() {
        let config = CalculateConfig {
            precision: 13,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_prefix_rejected() {
        let config = CalculateConfig {
            prefixes: vec!["CHEBI".to_string(), String::new()],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn cli_overrides_win() {
        let mut config = CalculateConfig::default();
        config.apply_overrides(&CliOverrides {
            cutoff: Some(0.9),
            precision: Some(5),
            ..Default::default()
        });
        assert_eq!(config.cutoff, Some(0.9));
        assert_eq!(config.precision, 5);
    }
}

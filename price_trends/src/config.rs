//! Pipeline configuration
//!
//! The schema mapping, the area hierarchy and the forecast horizon are
//! loaded from TOML. A built-in configuration for the Zurich dataset is
//! compiled into the crate; a file can replace it.

use crate::areas::AreaHierarchy;
use crate::error::{ForecastError, Result};
use crate::forecast::{ForecastHorizon, DEFAULT_YEARS_AHEAD};
use crate::schema::SchemaMapping;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const BUILTIN_CONFIG: &str = include_str!("../config/zurich.toml");

/// Forecast settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Years forecast past the last observed year
    #[serde(default = "default_years_ahead")]
    pub years_ahead: u32,
}

fn default_years_ahead() -> u32 {
    DEFAULT_YEARS_AHEAD
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            years_ahead: DEFAULT_YEARS_AHEAD,
        }
    }
}

impl ForecastConfig {
    /// Horizon described by this config
    pub fn horizon(&self) -> ForecastHorizon {
        ForecastHorizon::YearsAfterLast(self.years_ahead)
    }
}

/// Complete pipeline configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub schema: SchemaMapping,
    pub areas: AreaHierarchy,
    #[serde(default)]
    pub forecast: ForecastConfig,
}

impl PipelineConfig {
    /// The configuration compiled into the crate
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_CONFIG)
    }

    /// Load and validate a configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ForecastError::ConfigError(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: PipelineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the parts against each other
    pub fn validate(&self) -> Result<()> {
        self.schema.validate()?;
        self.areas.validate()?;

        if self.areas.citywide != self.schema.citywide_label {
            return Err(ForecastError::ConfigError(format!(
                "Citywide area '{}' differs from the schema's citywide label '{}'",
                self.areas.citywide, self.schema.citywide_label
            )));
        }

        Ok(())
    }

    /// Load `path` if given, otherwise the built-in configuration
    pub fn load_or_builtin<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Self::builtin(),
        }
    }
}

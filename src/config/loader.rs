//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{
    DifferentialsFile, EngineConfig, EngineFile, EngineMetadata, HolidayCalendar, UnitsFile,
};

/// Loads and provides access to the engine configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory once,
/// validates them, and hands out the resulting immutable [`EngineConfig`].
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── engine.yaml         # Metadata, rotation and shift timing settings
/// ├── units.yaml          # Unit pay bands
/// ├── differentials.yaml  # Differential rules
/// └── holidays.yaml       # Holiday calendar
/// ```
///
/// # Example
///
/// ```no_run
/// use shift_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// let band = loader.config().unit("ICU")?;
/// println!("ICU band: ${} to ${}", band.min_rate, band.max_rate);
/// # Ok::<(), shift_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML or misses a field (`ConfigParseError`)
    /// - The tables are inconsistent (`InvalidConfiguration`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let engine = Self::load_yaml::<EngineFile>(&path.join("engine.yaml"))?;
        let units = Self::load_yaml::<UnitsFile>(&path.join("units.yaml"))?;
        let differentials = Self::load_yaml::<DifferentialsFile>(&path.join("differentials.yaml"))?;
        let holidays = Self::load_yaml::<HolidayCalendar>(&path.join("holidays.yaml"))?;

        let config = EngineConfig::new(
            engine.metadata,
            engine.schedule,
            units.units,
            differentials.differentials,
            holidays,
        );
        config.validate()?;

        debug!(
            path = %path.display(),
            units = config.units().len(),
            holidays = config.holidays().fixed.len() + config.holidays().dated.len(),
            "Loaded engine configuration"
        );

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Wraps an already-built configuration, validating it first.
    pub fn from_config(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the configuration metadata.
    pub fn metadata(&self) -> &EngineMetadata {
        self.config.metadata()
    }
}

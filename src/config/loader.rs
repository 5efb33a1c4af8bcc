//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the payroll
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{PayrollError, PayrollResult};
use crate::models::Worker;

use super::types::{EngineSettings, PayrollConfig, RosterConfig};

/// Loads and provides access to the payroll configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory and
/// provides methods to query the engine settings and the worker roster.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/nomina/
/// ├── engine.yaml   # Pool split, caps, allowance coverage, currency
/// └── workers.yaml  # The worker roster
/// ```
///
/// # Example
///
/// ```no_run
/// use nomina_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/nomina").unwrap();
/// println!("Configuration: {}", loader.settings().metadata.name);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/nomina")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - The stimulus shares do not sum to 1
    pub fn load<P: AsRef<Path>>(path: P) -> PayrollResult<Self> {
        let path = path.as_ref();

        let engine_path = path.join("engine.yaml");
        let settings = Self::load_yaml::<EngineSettings>(&engine_path)?;

        let workers_path = path.join("workers.yaml");
        let roster = Self::load_yaml::<RosterConfig>(&workers_path)?;

        let config = PayrollConfig::new(settings, roster.workers)?;

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> PayrollResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| PayrollError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| PayrollError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying payroll configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        self.config.settings()
    }

    /// Returns the full worker roster.
    pub fn workers(&self) -> &[Worker] {
        self.config.workers()
    }

    /// Looks up a worker by CI.
    pub fn worker(&self, ci: &str) -> PayrollResult<&Worker> {
        self.config.worker(ci)
    }
}

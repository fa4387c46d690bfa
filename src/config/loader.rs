//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{CpfConfig, HrConfig, LeaveTypeConfig, LeaveTypesConfig};

/// Loads and provides access to the engine configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and provides access to the typed [`HrConfig`].
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/hr/
/// ├── leave_types.yaml  # Leave-type catalog
/// └── cpf.yaml          # CPF rate bands, ceilings, tax rate
/// ```
///
/// # Example
///
/// ```no_run
/// use hrm_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/hr").unwrap();
/// let annual = loader.config().get_leave_type("annual").unwrap();
/// println!("Annual leave default: {} days", annual.default_days);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: HrConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/hr")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any required field is missing from the configuration
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let leave_types_path = path.join("leave_types.yaml");
        let leave_types = Self::load_yaml::<LeaveTypesConfig>(&leave_types_path)?;

        let cpf_path = path.join("cpf.yaml");
        let cpf = Self::load_yaml::<CpfConfig>(&cpf_path)?;

        if leave_types.leave_types.is_empty() {
            return Err(EngineError::ConfigParseError {
                path: leave_types_path.display().to_string(),
                message: "no leave types configured".to_string(),
            });
        }

        Ok(Self {
            config: HrConfig::new(leave_types.leave_types, cpf),
        })
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

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &HrConfig {
        &self.config
    }

    /// Consumes the loader and returns the configuration.
    pub fn into_config(self) -> HrConfig {
        self.config
    }

    /// Gets a leave type by its code.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationMissing` for an unknown code.
    pub fn get_leave_type(&self, code: &str) -> EngineResult<&LeaveTypeConfig> {
        self.config.get_leave_type(code)
    }
}

//! This module provides the `ConfigLoader` struct, responsible for loading configuration
//! sources (an alphabet plus tape inputs) from files and strings.

use crate::parser::parse_config;
use crate::types::{Config, TuringMachineError, MAX_CONFIG_SIZE};
use std::fs;
use std::path::Path;

/// `ConfigLoader` is a utility struct for loading configuration sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads a configuration from the specified file path.
    ///
    /// # Arguments
    ///
    /// * `path` - A reference to the `Path` of the file to load.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` if the file is successfully read and parsed.
    /// * `Err(TuringMachineError::FileError)` if the file cannot be read or is too large.
    /// * `Err(TuringMachineError::ValidationError)` if the file has no alphabet line.
    pub fn load_config(path: &Path) -> Result<Config, TuringMachineError> {
        let content = fs::read_to_string(path).map_err(|e| {
            TuringMachineError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        Self::load_config_from_string(&content).map_err(|e| match e {
            TuringMachineError::FileError(msg) => {
                TuringMachineError::FileError(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Loads a configuration from the provided string content, e.g. piped from stdin.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` if the content is successfully parsed.
    /// * `Err(TuringMachineError::FileError)` if the content exceeds `MAX_CONFIG_SIZE`.
    /// * `Err(TuringMachineError::ValidationError)` if the content has no alphabet line.
    pub fn load_config_from_string(content: &str) -> Result<Config, TuringMachineError> {
        if content.len() > MAX_CONFIG_SIZE {
            return Err(TuringMachineError::FileError(format!(
                "Config is {} bytes, the limit is {} bytes",
                content.len(),
                MAX_CONFIG_SIZE
            )));
        }

        parse_config(content)
    }
}

//! Reading the kubermon configuration file.

use std::fs;
use std::path::Path;

use log::info;

use crate::config::Config;
use crate::error::{Error, Result};

fn read_file(file_description: &str, path: &str) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| Error::io_error(file_description.to_string(), path.to_string(), e))
}

/// Loads the configuration file.
///
/// A missing file is not an error: the defaults are returned instead. An empty
/// file is treated the same way.
///
/// # Errors
///
/// Returns an error if:
/// - The file exists but cannot be read
/// - The file contains invalid YAML or unknown keys
pub fn get_config(config_path: &str) -> Result<Config> {
    if !Path::new(config_path).exists() {
        info!("No config file at `{config_path}`, using defaults");
        return Ok(Config::default());
    }

    let contents = read_file("config", config_path)?;

    if contents.trim().is_empty() {
        return Ok(Config::default());
    }

    serde_yaml::from_str(&contents).map_err(|e| {
        Error::yaml_error(
            "reading".to_string(),
            "config".to_string(),
            config_path.to_string(),
            e,
        )
    })
}

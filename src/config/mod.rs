//! Configuration module for Ders-Harvest
//!
//! All settings have working defaults; a TOML file can override any of them.
//!
//! # Example
//!
//! ```no_run
//! use ders_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Fetching with up to {} concurrent requests", config.max_concurrent_requests);
//! ```

mod types;
mod validation;

pub use types::Config;
pub use validation::validate;

use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}

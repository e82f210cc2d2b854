//! Loading [`RobotConfig`] from YAML.
//!
//! ```yaml
//! length: 8
//! width: 6
//! initial_direction: NORTH
//! ```
//!
//! Missing keys fall back to the defaults (a 5x5 table, compiler facing EAST).

use crate::error::ConfigError;
use crate::machine::RobotConfig;
use std::path::Path;

/// Parses and validates a config document.
pub fn parse_config(text: &str) -> Result<RobotConfig, ConfigError> {
    // An empty document deserializes to unit, not to an empty map.
    if text.trim().is_empty() {
        return Ok(RobotConfig::default());
    }
    let config: RobotConfig = serde_yaml::from_str(text)?;
    config.validate()?;
    Ok(config)
}

/// Reads a config file from `path`.
pub fn load_config(path: &Path) -> Result<RobotConfig, ConfigError> {
    let text = std::fs::read_to_string(path)?;
    parse_config(&text)
}

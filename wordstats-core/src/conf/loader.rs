use crate::conf::{ConfigError, WordstatsConfig};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Read, parse and validate a TOML configuration file.
pub fn load_config(path: &Path) -> Result<WordstatsConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;

    let cfg: WordstatsConfig =
        toml::from_str(&contents).map_err(|e| ConfigError::parse(path, e))?;

    cfg.validate()?;
    Ok(cfg)
}

impl FromStr for WordstatsConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(s).map_err(|e| ConfigError::parse("<string>", e))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

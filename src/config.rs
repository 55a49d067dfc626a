//! Configuration loading.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// How long the display stays marked invalid after a rejected keystroke,
    /// in milliseconds.
    pub flash_duration_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            flash_duration_ms: 300,
        }
    }
}

impl Config {
    /// Load the configuration.
    ///
    /// With an explicit path the file must exist and parse. Without one, the
    /// default location (`<config dir>/zcalc/config.toml`) is used when
    /// present and the defaults apply otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };

        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("invalid configuration in {}", path.display()))
    }

    fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("zcalc").join("config.toml"))
    }

    pub fn flash_duration(&self) -> Duration {
        Duration::from_millis(self.flash_duration_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.flash_duration_ms, 300);
        assert_eq!(config.flash_duration(), Duration::from_millis(300));
    }

    #[test]
    fn test_parses_overrides() {
        let config: Config = toml::from_str("flash_duration_ms = 150").unwrap();
        assert_eq!(config.flash_duration_ms, 150);
    }

    #[test]
    fn test_empty_file_keeps_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.flash_duration_ms, 300);
    }

    #[test]
    fn test_rejects_unknown_keys() {
        assert!(toml::from_str::<Config>("flash_ms = 1").is_err());
    }
}

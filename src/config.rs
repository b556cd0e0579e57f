//! # Configuration
//!
//! Optional TOML settings for the `stego` binary. Every field has a default,
//! so a partial file (or no file at all) is valid.
//!
//! ```toml
//! [output]
//! default_path = "carrier.png"
//!
//! [logging]
//! level = "debug"
//! ```

use anyhow::Result;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;

/// Load a TOML configuration file and deserialize it into the specified type.
///
/// # Example
/// ```ignore
/// let config: StegoConfig = load_config("config/stego.toml")?;
/// ```
pub fn load_config<T>(path: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StegoConfig {
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

/// Where carriers are written when no `--output` is given.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub default_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_path: "encrypted_image.png".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Parsed level; unknown names fall back to `Info`.
    pub fn level_filter(&self) -> LevelFilter {
        self.level.parse().unwrap_or(LevelFilter::Info)
    }
}

impl StegoConfig {
    pub fn from_file(path: &str) -> Result<Self> {
        load_config(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config: StegoConfig = toml::from_str("").unwrap();
        assert_eq!(config.output.default_path, "encrypted_image.png");
        assert_eq!(config.logging.level_filter(), LevelFilter::Info);
    }

    #[test]
    fn partial_sections_fill_in_defaults() {
        let config: StegoConfig = toml::from_str("[logging]\nlevel = \"debug\"\n").unwrap();
        assert_eq!(config.logging.level_filter(), LevelFilter::Debug);
        assert_eq!(config.output.default_path, "encrypted_image.png");
    }

    #[test]
    fn unknown_level_falls_back_to_info() {
        let logging = LoggingConfig {
            level: "loud".to_string(),
        };
        assert_eq!(logging.level_filter(), LevelFilter::Info);
    }

    #[test]
    fn load_config_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stego.toml");
        fs::write(&path, "[output]\ndefault_path = \"out.png\"\n").unwrap();

        let config = StegoConfig::from_file(path.to_str().unwrap()).unwrap();
        assert_eq!(config.output.default_path, "out.png");
    }
}

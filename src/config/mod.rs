//! Configuration system for yamlpath-copier.
//!
//! This module provides the configuration structure with sensible defaults
//! and support for serialization/deserialization via serde. Configuration is
//! loaded from a TOML file and merged with command-line arguments.
//!
//! # Example
//!
//! ```
//! use yamlpath_copier::config::{Config, OutputFormat};
//!
//! // Use default configuration
//! let config = Config::default();
//! assert_eq!(config.log_level, "info");
//! assert!(config.copy_to_clipboard);
//!
//! // Create custom configuration
//! let custom = Config {
//!     output_format: OutputFormat::Json,
//!     ..Config::default()
//! };
//! ```

use anyhow::Context;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// How a resolved path is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// The bare path, e.g. `services.web.ports[0]`
    #[default]
    Text,
    /// A JSON object with the path, its segments and the cursor offset
    Json,
}

/// Configuration for yamlpath-copier.
///
/// # Fields
///
/// * `log_level` - Log verbosity: "off", "error", "warn", "info", "debug" or "trace"
///   (default: "info")
/// * `copy_to_clipboard` - Write resolved paths to the system clipboard (default: true)
/// * `output_format` - How paths are printed on stdout (default: text)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Log verbosity
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Write resolved paths to the system clipboard
    #[serde(default = "default_copy_to_clipboard")]
    pub copy_to_clipboard: bool,

    /// How paths are printed on stdout
    #[serde(default)]
    pub output_format: OutputFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_copy_to_clipboard() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            copy_to_clipboard: default_copy_to_clipboard(),
            output_format: OutputFormat::default(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/yamlpath-copier/config.toml` on all platforms.
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("yamlpath-copier");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path).unwrap_or_else(|err| {
                log::warn!("Ignoring config file {}: {:#}", path.display(), err);
                Self::default()
            }),
            _ => Self::default(),
        }
    }

    /// Loads configuration from an explicit file.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Saves configuration to a file.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Parses `log_level`, falling back to `Info` for unknown names.
    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(self.log_level.trim()).unwrap_or(LevelFilter::Info)
    }
}

use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::encoding::Encoding;
use crate::errors::AppError;
use crate::ris_writer::{LineEnding, WriteOptions};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Config {
    /// Directory relative input paths are resolved against
    #[serde(default)]
    pub working_dir: Option<PathBuf>,

    /// RIS output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// RIS output settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct OutputConfig {
    // @field: Write the batch id as `VL`
    #[serde(default)]
    pub include_volume: bool,

    // @field: Write the run date as `AD`
    #[serde(default)]
    pub include_datestamp: bool,

    #[serde(default)]
    pub encoding: Encoding,

    #[serde(default)]
    pub line_ending: LineEnding,
}

impl OutputConfig {
    pub fn write_options(&self) -> WriteOptions {
        WriteOptions {
            include_volume: self.include_volume,
            include_datestamp: self.include_datestamp,
            encoding: self.encoding,
            line_ending: self.line_ending,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn config_file_name() -> &'static str {
    "conf.json"
}

/// Default location: `<config dir>/qris/conf.json`
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("qris")
        .join(config_file_name())
}

impl Config {
    /// Load the configuration, writing a default one when the file is missing
    pub fn load_or_create<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();
        if config_path.exists() {
            let file = File::open(config_path)
                .context(format!("Failed to open config file: {}", config_path.display()))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .context(format!("Failed to parse config file: {}", config_path.display()))?;
            Ok(config)
        } else {
            warn!(
                "Config file not found at '{}', creating default config.",
                config_path.display()
            );
            let config = Config::default();
            config.save(config_path)?;
            Ok(config)
        }
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, config_path: P) -> Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .context(format!("Failed to create config directory: {}", parent.display()))?;
            }
        }
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(config_path, config_json)
            .context(format!("Failed to write config to file: {}", config_path.display()))?;
        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if let Some(dir) = &self.working_dir {
            if dir.exists() && !dir.is_dir() {
                return Err(AppError::Config(format!(
                    "Configured working directory is not a directory: {}",
                    dir.display()
                ))
                .into());
            }
        }
        Ok(())
    }

    /// Configured working directory, or the process one when it is unset or gone
    pub fn resolve_working_dir(&self) -> Result<PathBuf> {
        match &self.working_dir {
            Some(dir) if dir.is_dir() => Ok(dir.clone()),
            Some(dir) => {
                warn!(
                    "Working directory {} does not exist, using the current directory",
                    dir.display()
                );
                std::env::current_dir().context("Failed to read the current directory")
            }
            None => std::env::current_dir().context("Failed to read the current directory"),
        }
    }

    /// Resolve an input path against the working directory
    pub fn resolve_input<P: AsRef<Path>>(&self, input: P) -> Result<PathBuf> {
        let input = input.as_ref();
        if input.is_absolute() {
            Ok(input.to_path_buf())
        } else {
            Ok(self.resolve_working_dir()?.join(input))
        }
    }
}

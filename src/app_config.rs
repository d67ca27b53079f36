use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::database::{DatabaseConnection, TranslationMemory};
use crate::oracle::CommandOracle;
use crate::pipeline::PipelineConfig;
use crate::qa::QaEngine;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Translation memory database; the platform data directory when unset
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Terminology configuration file
    #[serde(default = "default_terminology_path")]
    pub terminology_path: PathBuf,

    /// Style guide configuration file
    #[serde(default = "default_style_guide_path")]
    pub style_guide_path: PathBuf,

    /// External translation oracle
    #[serde(default)]
    pub oracle: OracleConfig,

    /// Pipeline options
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Directory for per-run log files; no files are written when unset
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

/// How to reach the external translation oracle
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OracleConfig {
    /// Command line of the oracle process, e.g. `python3 oracle.py`
    #[serde(default = "String::new")]
    pub command: String,

    /// Seconds before a pending oracle call is abandoned (0 = no limit)
    #[serde(default = "default_oracle_timeout_secs")]
    pub timeout_secs: u64,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_terminology_path() -> PathBuf {
    PathBuf::from("config/terminology.json")
}

fn default_style_guide_path() -> PathBuf {
    PathBuf::from("config/style_guide.json")
}

fn default_oracle_timeout_secs() -> u64 {
    300
}

impl Config {
    /// Load the configuration at `path`, writing a default one first if it does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            return Ok(config);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        self.pipeline.validate()?;

        if self.terminology_path.as_os_str().is_empty() {
            return Err(anyhow!("terminology_path must not be empty"));
        }
        if self.style_guide_path.as_os_str().is_empty() {
            return Err(anyhow!("style_guide_path must not be empty"));
        }
        if matches!(&self.database_path, Some(p) if p.as_os_str().is_empty()) {
            return Err(anyhow!("database_path must not be empty when set"));
        }

        Ok(())
    }

    /// Database location after applying the platform default
    pub fn resolve_database_path(&self) -> Result<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => DatabaseConnection::default_database_path(),
        }
    }

    /// Open the configured translation memory
    pub fn open_memory(&self) -> Result<TranslationMemory> {
        let path = self.resolve_database_path()?;
        TranslationMemory::open(&path)
            .with_context(|| format!("Failed to open translation memory: {}", path.display()))
    }

    /// Build the QA engine from the configured terminology and style files
    pub fn qa_engine(&self) -> Result<QaEngine> {
        QaEngine::from_files(&self.terminology_path, &self.style_guide_path)
            .context("Failed to load QA configuration")
    }

    /// Build the oracle, preferring `command_override` over the configured command
    pub fn oracle(&self, command_override: Option<&str>) -> Result<CommandOracle> {
        let command = command_override.unwrap_or(&self.oracle.command);
        if command.trim().is_empty() {
            return Err(anyhow!(
                "No oracle command configured; set oracle.command in the config or pass --oracle-cmd"
            ));
        }

        let oracle = CommandOracle::from_command_line(command)?;
        Ok(match self.oracle.timeout_secs {
            0 => oracle,
            secs => oracle.with_timeout(std::time::Duration::from_secs(secs)),
        })
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        OracleConfig {
            command: String::new(),
            timeout_secs: default_oracle_timeout_secs(),
        }
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            database_path: None,
            terminology_path: default_terminology_path(),
            style_guide_path: default_style_guide_path(),
            oracle: OracleConfig::default(),
            pipeline: PipelineConfig::default(),
            log_level: LogLevel::default(),
            log_dir: None,
        }
    }
}

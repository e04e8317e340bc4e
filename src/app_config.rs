use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::annotation::PowerThresholds;
use crate::assembler::AssemblerOptions;
use crate::document::DocumentFormat;

/// Application configuration module
/// This module handles loading, validating and saving the formatter settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Name of the tournament set, used in titles and file names
    pub set_name: String,

    /// Answerline database CSV
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Directory receiving the visual answerline document(s)
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// One answers document per packet instead of a combined one
    #[serde(default)]
    pub split_docs: bool,

    /// Open the combined answers document when done
    #[serde(default)]
    pub try_open: bool,

    /// Format of every written document
    #[serde(default)]
    pub output_format: DocumentFormat,

    /// Hybrid packet settings
    #[serde(default)]
    pub hybrid: HybridConfig,

    /// Point thresholds for power marks
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Movie-metadata lookup settings
    #[serde(default)]
    pub metadata: MetadataConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Hybrid (visual plus written) packet generation
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HybridConfig {
    // @field: Generate hybrid packets
    #[serde(default)]
    pub enabled: bool,

    // @field: File stem suffix identifying written packets
    #[serde(default = "default_written_suffix")]
    pub written_suffix: String,

    // @field: Where written packets are found (defaults to output_dir)
    #[serde(default)]
    pub source_dir: Option<PathBuf>,

    // @field: Where hybrid packets go (defaults to source_dir)
    #[serde(default)]
    pub dest_dir: Option<PathBuf>,

    // @field: Author tags after visual answers
    #[serde(default = "default_true")]
    pub tags: bool,

    // @field: Print the final slide number on placeholder lines
    #[serde(default = "default_true")]
    pub force_end: bool,

    // @field: Visual questions per packet
    #[serde(default = "default_visual_questions")]
    pub visual_questions: u32,

    // @field: Total questions per packet, written plus visual
    #[serde(default = "default_total_questions")]
    pub total_questions: u32,
}

impl Default for HybridConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            written_suffix: default_written_suffix(),
            source_dir: None,
            dest_dir: None,
            tags: true,
            force_end: true,
            visual_questions: default_visual_questions(),
            total_questions: default_total_questions(),
        }
    }
}

/// Slide values that earn power marks
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ScoringConfig {
    #[serde(default = "default_superpower_value")]
    pub superpower_value: i32,

    #[serde(default = "default_power_value")]
    pub power_value: i32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            superpower_value: default_superpower_value(),
            power_value: default_power_value(),
        }
    }
}

impl From<&ScoringConfig> for PowerThresholds {
    fn from(scoring: &ScoringConfig) -> Self {
        Self {
            superpower: scoring.superpower_value,
            power: scoring.power_value,
        }
    }
}

/// TMDB director lookup
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MetadataConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "String::new")]
    pub api_key: String,

    #[serde(default = "default_metadata_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: String::new(),
            endpoint: default_metadata_endpoint(),
            timeout_secs: default_timeout_secs(),
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

impl From<&LogLevel> for log::LevelFilter {
    fn from(level: &LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_database_path() -> PathBuf {
    PathBuf::from("database.csv")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_written_suffix() -> String {
    "_raw".to_string()
}

fn default_true() -> bool {
    true
}

fn default_visual_questions() -> u32 {
    10
}

fn default_total_questions() -> u32 {
    20
}

fn default_superpower_value() -> i32 {
    20
}

fn default_power_value() -> i32 {
    15
}

fn default_metadata_endpoint() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Read a config file, writing the default one first if it does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            return serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()));
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config to JSON")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.set_name.trim().is_empty() {
            return Err(anyhow!("Set name must not be empty"));
        }

        if self.hybrid.visual_questions > self.hybrid.total_questions {
            return Err(anyhow!(
                "Visual questions per packet ({}) exceed total questions per packet ({})",
                self.hybrid.visual_questions,
                self.hybrid.total_questions
            ));
        }

        if self.scoring.power_value >= self.scoring.superpower_value {
            return Err(anyhow!(
                "Power value ({}) must be lower than superpower value ({})",
                self.scoring.power_value,
                self.scoring.superpower_value
            ));
        }

        if self.metadata.enabled && self.metadata.api_key.trim().is_empty() {
            return Err(anyhow!("Metadata API key is required when metadata lookup is enabled"));
        }

        Ok(())
    }

    /// File-name form of the set name: title case, spaces replaced by `-`
    pub fn set_slug(&self) -> String {
        crate::file_utils::FileManager::set_slug(&self.set_name)
    }

    pub fn written_source_dir(&self) -> PathBuf {
        self.hybrid
            .source_dir
            .clone()
            .unwrap_or_else(|| self.output_dir.clone())
    }

    pub fn hybrid_dest_dir(&self) -> PathBuf {
        self.hybrid
            .dest_dir
            .clone()
            .unwrap_or_else(|| self.written_source_dir())
    }

    /// Assembly settings derived from this configuration
    pub fn assembler_options(&self, verbose: bool) -> AssemblerOptions {
        AssemblerOptions {
            verbose,
            tags: self.hybrid.tags,
            force_end: self.hybrid.force_end,
            visual_questions: self.hybrid.visual_questions,
            total_questions: self.hybrid.total_questions,
            thresholds: PowerThresholds::from(&self.scoring),
        }
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            set_name: "Untitled Film Set".to_string(),
            database_path: default_database_path(),
            output_dir: default_output_dir(),
            split_docs: false,
            try_open: false,
            output_format: DocumentFormat::default(),
            hybrid: HybridConfig::default(),
            scoring: ScoringConfig::default(),
            metadata: MetadataConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

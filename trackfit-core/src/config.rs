//! Configuration for the trackfit tools.
//!
//! Maps directly to `trackfit.toml`. Every field has a default, so an empty
//! file (or no file at all) yields a working setup against a local Ollama.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::catalog::{ENRICHED_FILE, EXERCISE_FILE};

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "trackfit.toml";

/// Top-level configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackfitConfig {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Exercise catalog layout.
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Inference endpoint settings.
    #[serde(default)]
    pub llm: LlmConfig,
    /// SQLite store settings.
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl TrackfitConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `CatalogError::Config` if the TOML is invalid.
    pub fn from_toml(toml_str: &str) -> crate::error::Result<Self> {
        toml::from_str(toml_str).map_err(|e| crate::CatalogError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load `path` if given (it must exist), otherwise `trackfit.toml` in the
    /// working directory when present, otherwise defaults.
    ///
    /// # Errors
    /// Returns an error if an explicit file is missing or any file is invalid.
    pub fn load(path: Option<&Path>) -> crate::error::Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Where exercises live and what the per-folder files are called.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Root directory with one subdirectory per exercise.
    #[serde(default = "default_exercises_dir")]
    pub exercises_dir: PathBuf,
    /// Name of the exercise document inside each folder.
    #[serde(default = "default_exercise_file")]
    pub exercise_file: String,
    /// Name of the side file the enricher writes when not overriding.
    #[serde(default = "default_enriched_file")]
    pub enriched_file: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            exercises_dir: default_exercises_dir(),
            exercise_file: default_exercise_file(),
            enriched_file: default_enriched_file(),
        }
    }
}

/// Inference endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Base URL of the Ollama-compatible server.
    #[serde(default = "default_ollama_url")]
    pub base_url: String,
    /// Model identifier sent with every request.
    #[serde(default = "default_model")]
    pub model: String,
    /// Hard timeout for one call in milliseconds.
    #[serde(default = "default_60000")]
    pub request_timeout_ms: u64,
    /// Pause between consecutive calls in milliseconds.
    #[serde(default = "default_100")]
    pub request_delay_ms: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_ollama_url(),
            model: default_model(),
            request_timeout_ms: 60_000,
            request_delay_ms: 100,
        }
    }
}

/// SQLite store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database file path.
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
    /// Use WAL journal mode.
    #[serde(default = "default_true")]
    pub wal_mode: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            wal_mode: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde requires functions)
// ---------------------------------------------------------------------------

fn default_true() -> bool { true }
fn default_100() -> u64 { 100 }
fn default_60000() -> u64 { 60_000 }
fn default_log_level() -> String { "info".to_string() }
fn default_exercises_dir() -> PathBuf { PathBuf::from("exercises") }
fn default_exercise_file() -> String { EXERCISE_FILE.to_string() }
fn default_enriched_file() -> String { ENRICHED_FILE.to_string() }
fn default_ollama_url() -> String { "http://localhost:11434".to_string() }
fn default_model() -> String { "qwen2.5:7b".to_string() }
fn default_db_path() -> PathBuf { PathBuf::from("trackfit.db") }

//! Configuration System
//!
//! Layered configuration for the artifact console model layer: built-in
//! defaults, then the global config file, then STOWAGE_-prefixed
//! environment variables, with validation after loading.

use crate::error::StowageError;
use crate::logging::LoggingConfig;
use crate::manifest::MODEL_FILES_KEY;
use crate::tree::path::SegmentPolicy;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

mod global_file;

pub use global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StowageConfig {
    /// Annotation key carrying the model file listing
    #[serde(default = "default_files_key")]
    pub files_key: String,

    /// Handling of empty path segments in listings
    #[serde(default)]
    pub segment_policy: SegmentPolicy,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_files_key() -> String {
    MODEL_FILES_KEY.to_string()
}

impl Default for StowageConfig {
    fn default() -> Self {
        Self {
            files_key: default_files_key(),
            segment_policy: SegmentPolicy::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Manifest(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Manifest(msg) => write!(f, "Manifest: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl StowageConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.files_key.trim().is_empty() {
            errors.push(ValidationError::Manifest(
                "files_key cannot be empty".to_string(),
            ));
        }

        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Load configuration from defaults, the global file, and environment
    ///
    /// Environment variables use the STOWAGE_ prefix with `__` separating
    /// nested keys, e.g. STOWAGE_LOGGING__LEVEL=debug.
    pub fn load() -> Result<Self, StowageError> {
        let mut builder = Config::builder();
        builder = global_file::add_to_builder(builder)?;

        let settings = builder
            .add_source(Environment::with_prefix("STOWAGE").separator("__"))
            .build()?;

        let loaded: StowageConfig = settings.try_deserialize()?;
        loaded.validate().map_err(validation_failure)?;
        Ok(loaded)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self, StowageError> {
        let settings = Config::builder()
            .add_source(File::from(path.to_path_buf()))
            .build()?;

        let loaded: StowageConfig = settings.try_deserialize()?;
        loaded.validate().map_err(validation_failure)?;
        Ok(loaded)
    }
}

fn validation_failure(errors: Vec<ValidationError>) -> StowageError {
    let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
    StowageError::ConfigError(format!(
        "Configuration validation failed:\n{}",
        error_msgs.join("\n")
    ))
}

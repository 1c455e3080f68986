//! Logging Setup
//!
//! Structured logging on top of `tracing`, driven by [`LoggingConfig`]
//! with environment-variable overrides for level, format, and output.

use crate::error::StowageError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

const DEFAULT_LEVEL: &str = "info";
const DEFAULT_FORMAT: &str = "text";
const DEFAULT_OUTPUT: &str = "stdout";
const DEFAULT_LOG_FILE: &str = ".stowage/stowage.log";

/// Logging settings, the `[logging]` table of the configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Base log level: trace, debug, info, warn, error, or off
    pub level: String,

    /// Line format, either "text" or "json"
    pub format: String,

    /// Where lines go: "stdout", "stderr", or "file"
    pub output: String,

    /// Path of the log file when output is "file"
    pub file: PathBuf,

    /// ANSI colors for text output on stdout/stderr
    pub color: bool,

    /// Per-target level overrides, e.g. "stowage::tree" = "debug"
    pub modules: HashMap<String, String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LEVEL.to_string(),
            format: DEFAULT_FORMAT.to_string(),
            output: DEFAULT_OUTPUT.to_string(),
            file: PathBuf::from(DEFAULT_LOG_FILE),
            color: true,
            modules: HashMap::new(),
        }
    }
}

impl LoggingConfig {
    /// Check that level, format, and output name known variants
    pub fn validate(&self) -> Result<(), String> {
        const LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];
        if !LEVELS.contains(&self.level.as_str()) {
            return Err(format!(
                "Unknown log level '{}' (expected one of {})",
                self.level,
                LEVELS.join(", ")
            ));
        }
        parse_format(&self.format)?;
        parse_output(&self.output)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogOutput {
    Stdout,
    Stderr,
    File,
}

fn parse_format(name: &str) -> Result<LogFormat, String> {
    match name {
        "text" => Ok(LogFormat::Text),
        "json" => Ok(LogFormat::Json),
        _ => Err(format!(
            "Unknown log format '{}' (expected 'text' or 'json')",
            name
        )),
    }
}

fn parse_output(name: &str) -> Result<LogOutput, String> {
    match name {
        "stdout" => Ok(LogOutput::Stdout),
        "stderr" => Ok(LogOutput::Stderr),
        "file" => Ok(LogOutput::File),
        _ => Err(format!(
            "Unknown log output '{}' (expected 'stdout', 'stderr', or 'file')",
            name
        )),
    }
}

/// Install the global tracing subscriber
///
/// Overrides apply highest to lowest: STOWAGE_LOG / STOWAGE_LOG_FORMAT /
/// STOWAGE_LOG_OUTPUT / STOWAGE_LOG_MODULES environment variables, then
/// the passed configuration, then built-in defaults.
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<(), StowageError> {
    let filter = resolve_filter(config)?;
    let format = resolve_format(config)?;
    let output = resolve_output(config)?;
    let use_color = config.map_or(true, |c| c.color);

    let base_subscriber = Registry::default().with(filter);

    let open_log_file = || -> Result<std::fs::File, StowageError> {
        let path = config
            .map(|c| c.file.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StowageError::ConfigError(format!("Cannot create log directory: {}", e))
            })?;
        }
        std::fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(&path)
            .map_err(|e| {
                StowageError::ConfigError(format!("Cannot open log file {:?}: {}", path, e))
            })
    };

    match format {
        LogFormat::Json => {
            let layer = fmt::layer()
                .json()
                .with_target(true)
                .with_timer(ChronoUtc::rfc_3339());
            match output {
                LogOutput::Stdout => base_subscriber
                    .with(layer.with_writer(std::io::stdout))
                    .init(),
                LogOutput::Stderr => base_subscriber
                    .with(layer.with_writer(std::io::stderr))
                    .init(),
                LogOutput::File => base_subscriber
                    .with(layer.with_writer(open_log_file()?))
                    .init(),
            }
        }
        LogFormat::Text => {
            let layer = fmt::layer()
                .with_target(true)
                .with_timer(ChronoUtc::rfc_3339());
            match output {
                LogOutput::Stdout => base_subscriber
                    .with(layer.with_ansi(use_color).with_writer(std::io::stdout))
                    .init(),
                LogOutput::Stderr => base_subscriber
                    .with(layer.with_ansi(use_color).with_writer(std::io::stderr))
                    .init(),
                LogOutput::File => base_subscriber
                    .with(layer.with_ansi(false).with_writer(open_log_file()?))
                    .init(),
            }
        }
    }

    Ok(())
}

/// Assemble the level filter from environment or configuration
fn resolve_filter(config: Option<&LoggingConfig>) -> Result<EnvFilter, StowageError> {
    // A set STOWAGE_LOG replaces everything else
    if let Ok(filter) = EnvFilter::try_from_env("STOWAGE_LOG") {
        return Ok(filter);
    }

    let level = config.map_or(DEFAULT_LEVEL, |c| c.level.as_str());
    if level == "off" {
        return Ok(EnvFilter::new("off"));
    }
    let mut filter = EnvFilter::new(level);

    let mut directives: Vec<String> = Vec::new();
    if let Some(config) = config {
        directives.extend(
            config
                .modules
                .iter()
                .map(|(target, target_level)| format!("{}={}", target, target_level)),
        );
    }
    if let Ok(overrides) = std::env::var("STOWAGE_LOG_MODULES") {
        directives.extend(overrides.split(',').filter_map(|directive| {
            directive.split_once('=')
                .map(|(target, target_level)| {
                    format!("{}={}", target.trim(), target_level.trim())
                })
        }));
    }
    for directive in directives {
        filter = filter.add_directive(directive.parse().map_err(|e| {
            StowageError::ConfigError(format!("Bad log directive '{}': {}", directive, e))
        })?);
    }

    Ok(filter)
}

/// Pick the line format, preferring STOWAGE_LOG_FORMAT when valid
fn resolve_format(config: Option<&LoggingConfig>) -> Result<LogFormat, StowageError> {
    if let Ok(name) = std::env::var("STOWAGE_LOG_FORMAT") {
        if let Ok(format) = parse_format(&name) {
            return Ok(format);
        }
    }
    let name = config.map_or(DEFAULT_FORMAT, |c| c.format.as_str());
    parse_format(name).map_err(StowageError::ConfigError)
}

/// Pick the destination, preferring STOWAGE_LOG_OUTPUT when set
fn resolve_output(config: Option<&LoggingConfig>) -> Result<LogOutput, StowageError> {
    if let Ok(name) = std::env::var("STOWAGE_LOG_OUTPUT") {
        return parse_output(&name).map_err(StowageError::ConfigError);
    }
    let name = config.map_or(DEFAULT_OUTPUT, |c| c.output.as_str());
    parse_output(name).map_err(StowageError::ConfigError)
}

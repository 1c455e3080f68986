//! Global config file discovery
//!
//! Resolves the user-level configuration file and wires it into the
//! config builder as an optional source.

use crate::error::StowageError;
use config::builder::DefaultState;
use config::{ConfigBuilder, File};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Resolve the global config file path
///
/// Uses $XDG_CONFIG_HOME/stowage/config.toml when XDG_CONFIG_HOME is set,
/// otherwise $HOME/.config/stowage/config.toml.
pub fn global_config_path() -> Option<PathBuf> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg.is_empty() {
            return Some(PathBuf::from(xdg).join("stowage").join("config.toml"));
        }
    }

    std::env::var("HOME").ok().map(|home| {
        PathBuf::from(home)
            .join(".config")
            .join("stowage")
            .join("config.toml")
    })
}

/// Add the global config file to a builder when present
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, StowageError> {
    let Some(path) = global_config_path() else {
        warn!("Could not determine home directory, skipping global config");
        return Ok(builder);
    };

    if path.exists() {
        debug!(path = %path.display(), "Loading global config file");
        let path_str = path.to_string_lossy().to_string();
        Ok(builder.add_source(File::with_name(&path_str).required(false)))
    } else {
        debug!(path = %path.display(), "No global config file found");
        Ok(builder)
    }
}

//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/bintree/bintree.toml`
//! 3. Explicit config file passed with `--config`
//! 4. Environment variables: `BINTREE_*` prefix

use std::fmt;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::order::Order;

#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("config error: {message}")]
    Invalid { message: String },
}

/// How `show` renders a tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderStyle {
    /// One `value<left,right>` line per node
    #[default]
    Debug,
    /// Indented box-drawing tree
    Tree,
}

impl fmt::Display for RenderStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderStyle::Debug => f.write_str("debug"),
            RenderStyle::Tree => f.write_str("tree"),
        }
    }
}

/// Effective settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Traversal used by `traverse` when `--order` is not given
    pub order: Order,
    /// Rendering used by `show` when `--style` is not given
    pub style: RenderStyle,
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawSettings {
    order: Option<Order>,
    style: Option<RenderStyle>,
}

/// Get the XDG config directory for bintree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "bintree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("bintree.toml"))
}

fn load_raw_settings(path: &Path) -> Result<RawSettings, ConfigLoadError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Invalid {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ConfigLoadError::Invalid {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            order: overlay.order.unwrap_or(self.order),
            style: overlay.style.unwrap_or(self.style),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// `explicit` must exist when given; the global file is optional.
    #[instrument(level = "debug")]
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigLoadError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("Loading global config {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        current = current.load_file(explicit)?;

        Self::apply_env_overrides(current)
    }

    fn load_file(self, explicit: Option<&Path>) -> Result<Self, ConfigLoadError> {
        match explicit {
            Some(path) if !path.exists() => Err(ConfigLoadError::NotFound(path.to_path_buf())),
            Some(path) => {
                debug!("Loading config {}", path.display());
                Ok(self.merge_with(&load_raw_settings(path)?))
            }
            None => Ok(self),
        }
    }

    /// Apply BINTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(settings: Self) -> Result<Self, ConfigLoadError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("BINTREE"))
            .build()
            .map_err(config_err)?;
        Self::apply_overrides(settings, &config)
    }

    fn apply_overrides(mut settings: Self, config: &Config) -> Result<Self, ConfigLoadError> {
        if let Ok(val) = config.get_string("order") {
            settings.order = val
                .parse()
                .map_err(|message| ConfigLoadError::Invalid { message })?;
        }
        if let Ok(val) = config.get_string("style") {
            settings.style =
                RenderStyle::from_str(&val, true).map_err(|message| ConfigLoadError::Invalid {
                    message: format!("BINTREE_STYLE: {message}"),
                })?;
        }
        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigLoadError> {
        toml::to_string_pretty(self).map_err(|e| ConfigLoadError::Invalid {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# bintree configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/bintree/bintree.toml
#   Explicit: bintree --config <FILE>
#   Env:      BINTREE_ORDER, BINTREE_STYLE

# Traversal for `bintree traverse`: "pre", "in" or "post"
# order = "in"

# Rendering for `bintree show`: "debug" or "tree"
# style = "debug"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ConfigLoadError {
    ConfigLoadError::Invalid {
        message: e.to_string(),
    }
}

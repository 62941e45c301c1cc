//! Popup configuration.
//!
//! Sources, lowest precedence first:
//! - `XDG_CONFIG_HOME/mediapopup/config.toml` (or an explicit `--config` file)
//! - `MEDIAPOPUP_PATH` / `MEDIAPOPUP_TOKEN` environment variables
//! - command-line flags, applied by the caller
//!
//! ```toml
//! [media]
//! path = "https://cms.example.com/api/media"
//! token = "secret"
//!
//! [viewport]
//! height = 600.0
//! row_height = 120.0
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use tracing::{debug, info};

pub const ENV_PATH: &str = "MEDIAPOPUP_PATH";
pub const ENV_TOKEN: &str = "MEDIAPOPUP_TOKEN";

const DEFAULT_VIEWPORT_HEIGHT: f64 = 600.0;
const DEFAULT_ROW_HEIGHT: f64 = 120.0;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub media: MediaConfig,
    pub viewport: ViewportConfig,
}

/// Endpoint of the media library.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MediaConfig {
    pub path: Option<String>,
    pub token: Option<String>,
}

/// Geometry of the list container, used to emulate scrolling.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewportConfig {
    pub height: f64,
    pub row_height: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            height: DEFAULT_VIEWPORT_HEIGHT,
            row_height: DEFAULT_ROW_HEIGHT,
        }
    }
}

impl Config {
    /// Returns the default config file path based on XDG directories.
    pub fn default_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("", "", "mediapopup")
            .context("Failed to determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.toml"))
    }

    /// Loads the config file. An explicit path must exist; the default
    /// location is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let path = Self::default_path()?;
                if !path.exists() {
                    debug!(?path, "No config file, using defaults");
                    return Ok(Self::default());
                }
                path
            }
        };

        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config = Self::from_toml(&text)
            .with_context(|| format!("Invalid config file: {:?}", path))?;
        info!(?path, "Loaded config");
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Applies environment overrides. `lookup` is `std::env::var` in
    /// production.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_PATH).filter(|v| !v.trim().is_empty()) {
            self.media.path = Some(path);
        }
        if let Some(token) = lookup(ENV_TOKEN) {
            self.media.token = Some(token);
        }
    }

    /// Resolved `(path, token)` for the media endpoint. The token may be
    /// empty; the path may not.
    pub fn endpoint(&self) -> Result<(String, String)> {
        let Some(path) = self.media.path.as_deref().filter(|p| !p.trim().is_empty()) else {
            bail!("No media library path configured (set [media] path, {ENV_PATH} or --path)");
        };
        let token = self.media.token.clone().unwrap_or_default();
        Ok((path.to_string(), token))
    }
}

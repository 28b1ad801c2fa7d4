//! Viewer configuration.
//!
//! Read once at startup from a JSON file: the path in `PITCH_LENS_CONFIG`,
//! else `pitch_lens.json` in the working directory if it exists. Every field
//! has a default, and `PITCH_LENS_DATA` overrides the data path.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::analysis::comparison::DensitySettings;
use crate::analysis::kde::{BandwidthRule, DEFAULT_GRID_SIZE};

pub const CONFIG_ENV: &str = "PITCH_LENS_CONFIG";
pub const DATA_ENV: &str = "PITCH_LENS_DATA";
const DEFAULT_CONFIG_FILE: &str = "pitch_lens.json";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Pitch table loaded at startup.
    pub data_path: PathBuf,
    /// Points per density curve.
    pub grid_size: usize,
    pub bandwidth: BandwidthRule,
    /// Polygon vertices per movement ellipse.
    pub ellipse_segments: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("FullFallData.csv"),
            grid_size: DEFAULT_GRID_SIZE,
            bandwidth: BandwidthRule::Scott,
            ellipse_segments: 64,
        }
    }
}

impl AppConfig {
    /// Resolve the configuration from the environment. An unreadable or
    /// invalid file is logged and replaced by the defaults.
    pub fn load() -> Self {
        let explicit = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let path = explicit
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        let mut config = if explicit.is_some() || path.exists() {
            match Self::from_file(&path) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!("Ignoring config: {e:#}");
                    Self::default()
                }
            }
        } else {
            Self::default()
        };

        if let Some(data) = std::env::var_os(DATA_ENV) {
            config.data_path = PathBuf::from(data);
        }
        config
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: AppConfig = serde_json::from_str(text).context("invalid config JSON")?;
        anyhow::ensure!(config.grid_size > 0, "grid_size must be positive");
        Ok(config)
    }

    pub fn density_settings(&self) -> DensitySettings {
        DensitySettings {
            grid_size: self.grid_size,
            bandwidth: self.bandwidth,
        }
    }
}

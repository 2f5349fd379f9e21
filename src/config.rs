//! Host configuration, read from TOML.
//!
//! Every field has a default, so an empty file (or no file at all) gives
//! the classic 800×600 arcade setup.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhysicsMode {
    #[default]
    Arcade,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Play-field width in pixels
    #[serde(default = "default_width")]
    pub width: u32,

    /// Play-field height in pixels
    #[serde(default = "default_height")]
    pub height: u32,

    /// Downward acceleration in px/s²
    #[serde(default = "default_gravity")]
    pub gravity_y: f32,

    #[serde(default)]
    pub physics: PhysicsMode,

    /// Logic ticks per second
    #[serde(default = "default_tick_rate")]
    pub tick_rate_hz: u32,

    /// Where the host writes its log; no logging when unset
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

fn default_width() -> u32 { 800 }
fn default_height() -> u32 { 600 }
fn default_gravity() -> f32 { 300.0 }
fn default_tick_rate() -> u32 { 60 }

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            gravity_y: default_gravity(),
            physics: PhysicsMode::default(),
            tick_rate_hz: default_tick_rate(),
            log_file: None,
        }
    }
}

impl GameConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "play-field must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if self.tick_rate_hz == 0 {
            return Err(ConfigError::Invalid("tick_rate_hz must be positive".into()));
        }
        if !self.gravity_y.is_finite() {
            return Err(ConfigError::Invalid("gravity_y must be finite".into()));
        }
        Ok(())
    }

    /// Seconds of simulated time per tick.
    pub fn tick_seconds(&self) -> f32 {
        1.0 / self.tick_rate_hz as f32
    }
}

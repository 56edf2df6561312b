//! Configuration file handling for lumen.
//!
//! Settings live in `config.toml` under the platform config directory.
//! A missing file means defaults; out-of-range values are pulled back into
//! range with a warning instead of failing startup.

use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{WrapErr, eyre};
use directories::ProjectDirs;
use log::{info, warn};
use lumen_core::{NetworkSettings, RainSettings};
use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "config.toml";

/// Lowest and highest accepted frame rate.
const FPS_RANGE: (u16, u16) = (1, 120);

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Frames scheduled per second.
    pub fps: u16,
    /// Suppress all animation.
    pub reduced_motion: bool,
    /// Code rain layer.
    pub rain: RainSettings,
    /// Node network layer.
    pub network: NetworkSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fps: 30,
            reduced_motion: false,
            rain: RainSettings::default(),
            network: NetworkSettings::default(),
        }
    }
}

impl Config {
    /// Default location of the config file, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "lumen").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load from the default location, falling back to defaults.
    pub fn load() -> color_eyre::Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => {
                warn!("no config directory on this platform, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load from `path`. A missing file yields defaults.
    pub fn load_from(path: &Path) -> color_eyre::Result<Self> {
        if !path.exists() {
            info!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read config {}", path.display()))?;
        let config = Self::from_toml(&text)
            .wrap_err_with(|| format!("failed to parse config {}", path.display()))?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse TOML text and sanitize the result.
    pub fn from_toml(text: &str) -> color_eyre::Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| eyre!("{e}"))?;
        Ok(config.sanitized())
    }

    /// Write to the default location.
    pub fn save(&self) -> color_eyre::Result<PathBuf> {
        let path = Self::default_path().ok_or_else(|| eyre!("no config directory available"))?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Write to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> color_eyre::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .wrap_err_with(|| format!("failed to create {}", parent.display()))?;
        }
        let text = toml::to_string_pretty(self).wrap_err("failed to serialize config")?;
        fs::write(path, text).wrap_err_with(|| format!("failed to write {}", path.display()))?;
        info!("saved config to {}", path.display());
        Ok(())
    }

    /// Pull every value back into its accepted range.
    pub fn sanitized(mut self) -> Self {
        let fps = self.fps.clamp(FPS_RANGE.0, FPS_RANGE.1);
        if fps != self.fps {
            warn!("fps {} out of range, using {fps}", self.fps);
            self.fps = fps;
        }

        self.rain.speed = non_negative("rain.speed", self.rain.speed);
        self.rain.opacity = unit_interval("rain.opacity", self.rain.opacity);

        self.network.speed = non_negative("network.speed", self.network.speed);
        self.network.opacity = unit_interval("network.opacity", self.network.opacity);
        if self.network.node_count == 0 {
            warn!("network.node_count must be positive, using 1");
            self.network.node_count = 1;
        }
        self
    }
}

fn non_negative(name: &str, value: f32) -> f32 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        warn!("{name} {value} must be a non-negative number, using 0");
        0.0
    }
}

fn unit_interval(name: &str, value: f32) -> f32 {
    if value.is_nan() {
        warn!("{name} is not a number, using 1");
        return 1.0;
    }
    let clamped = value.clamp(0.0, 1.0);
    if clamped != value {
        warn!("{name} {value} out of range, using {clamped}");
    }
    clamped
}

//! Per-layer settings for the two backdrop animations.

use serde::{Deserialize, Serialize};

use crate::color::{ColorTheme, Rgb};

/// Settings for the code rain layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RainSettings {
    /// Whether the layer may run at all.
    pub enabled: bool,
    /// Fall speed multiplier (>= 0).
    pub speed: f32,
    /// Glyph color.
    pub color: Rgb,
    /// Layer translucency when composited (0.0-1.0).
    pub opacity: f32,
}

impl Default for RainSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            speed: 0.5,
            color: ColorTheme::default().rain_color(),
            opacity: 0.6,
        }
    }
}

/// Settings for the node network layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkSettings {
    /// Whether the layer may run at all.
    pub enabled: bool,
    /// Drift speed multiplier (>= 0).
    pub speed: f32,
    /// Node and link color.
    pub color: Rgb,
    /// Number of nodes created on mount.
    pub node_count: u16,
    /// Layer translucency when composited (0.0-1.0).
    pub opacity: f32,
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            speed: 1.0,
            color: ColorTheme::default().network_color(),
            node_count: 64,
            opacity: 0.8,
        }
    }
}

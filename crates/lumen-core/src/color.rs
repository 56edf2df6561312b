//! Color values and preset themes.

use std::fmt;
use std::str::FromStr;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// A 24-bit display color, written as `#rrggbb` in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale toward black. Stands in for alpha over a dark background.
    pub fn scale(self, factor: f32) -> Self {
        let f = factor.clamp(0.0, 1.0);
        Self {
            r: (self.r as f32 * f).round() as u8,
            g: (self.g as f32 * f).round() as u8,
            b: (self.b as f32 * f).round() as u8,
        }
    }

    /// Mix toward white by `amount` (0.0-1.0).
    pub fn lighten(self, amount: f32) -> Self {
        let a = amount.clamp(0.0, 1.0);
        let mix = |c: u8| (c as f32 + (255.0 - c as f32) * a).round() as u8;
        Self {
            r: mix(self.r),
            g: mix(self.g),
            b: mix(self.b),
        }
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb(rgb.r, rgb.g, rgb.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Error returned when a color string is not `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRgbError(String);

impl fmt::Display for ParseRgbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid color {:?}, expected #rrggbb", self.0)
    }
}

impl std::error::Error for ParseRgbError {}

impl FromStr for Rgb {
    type Err = ParseRgbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseRgbError(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = ParseRgbError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(rgb: Rgb) -> Self {
        rgb.to_string()
    }
}

/// Preset color pairs for the rain and network layers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorTheme {
    #[default]
    Matrix,
    Ocean,
    Amber,
    Synthwave,
    Mono,
}

impl ColorTheme {
    /// Cycle to the next theme.
    pub fn next(self) -> Self {
        match self {
            ColorTheme::Matrix => ColorTheme::Ocean,
            ColorTheme::Ocean => ColorTheme::Amber,
            ColorTheme::Amber => ColorTheme::Synthwave,
            ColorTheme::Synthwave => ColorTheme::Mono,
            ColorTheme::Mono => ColorTheme::Matrix,
        }
    }

    /// Color used for rain glyphs.
    pub fn rain_color(self) -> Rgb {
        match self {
            ColorTheme::Matrix => Rgb::new(0x22, 0xc5, 0x5e),
            ColorTheme::Ocean => Rgb::new(0x38, 0xbd, 0xf8),
            ColorTheme::Amber => Rgb::new(0xf5, 0x9e, 0x0b),
            ColorTheme::Synthwave => Rgb::new(0xec, 0x48, 0x99),
            ColorTheme::Mono => Rgb::new(0xd4, 0xd4, 0xd4),
        }
    }

    /// Color used for network nodes and links.
    pub fn network_color(self) -> Rgb {
        match self {
            ColorTheme::Matrix => Rgb::new(0x86, 0xef, 0xac),
            ColorTheme::Ocean => Rgb::new(0x7d, 0xd3, 0xfc),
            ColorTheme::Amber => Rgb::new(0xfd, 0xe6, 0x8a),
            ColorTheme::Synthwave => Rgb::new(0xa7, 0x8b, 0xfa),
            ColorTheme::Mono => Rgb::new(0xfa, 0xfa, 0xfa),
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            ColorTheme::Matrix => "matrix",
            ColorTheme::Ocean => "ocean",
            ColorTheme::Amber => "amber",
            ColorTheme::Synthwave => "synthwave",
            ColorTheme::Mono => "mono",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rgb() {
        assert_eq!("#22c55e".parse::<Rgb>(), Ok(Rgb::new(0x22, 0xc5, 0x5e)));
        assert_eq!(" #FFFFFF ".parse::<Rgb>(), Ok(Rgb::new(255, 255, 255)));
        assert!("22c55e".parse::<Rgb>().is_err());
        assert!("#22c5".parse::<Rgb>().is_err());
        assert!("#gg0000".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_rgb_display() {
        assert_eq!(Rgb::new(0x0a, 0xbc, 0xff).to_string(), "#0abcff");
    }

    #[test]
    fn test_scale_and_lighten() {
        let c = Rgb::new(200, 100, 0);
        assert_eq!(c.scale(0.5), Rgb::new(100, 50, 0));
        assert_eq!(c.scale(0.0), Rgb::new(0, 0, 0));
        assert_eq!(c.scale(2.0), c);
        assert_eq!(c.lighten(1.0), Rgb::new(255, 255, 255));
        assert_eq!(c.lighten(0.0), c);
    }

    #[test]
    fn test_theme_cycle_returns_to_start() {
        let mut theme = ColorTheme::default();
        for _ in 0..5 {
            theme = theme.next();
        }
        assert_eq!(theme, ColorTheme::Matrix);
    }
}

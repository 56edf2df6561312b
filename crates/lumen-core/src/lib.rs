//! Core types shared by the lumen crates.

mod color;
mod settings;
mod signal;

pub use color::{ColorTheme, ParseRgbError, Rgb};
pub use settings::{NetworkSettings, RainSettings};
pub use signal::{Signal, Subscription};

/// Side length of one glyph cell, in surface units.
pub const GLYPH_CELL: f32 = 14.0;

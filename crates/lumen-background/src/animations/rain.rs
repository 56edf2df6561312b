//! Code rain animation (stateful).
//!
//! Each column keeps only a fractional fall position. Every frame the whole
//! surface is dimmed a little, one random glyph is drawn at each column's
//! head, and the heads move down. The dimming leaves the trail.

use glam::Vec2;
use lumen_core::{GLYPH_CELL, RainSettings};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::chars::RAIN_GLYPHS;
use crate::frame_loop::Animation;
use crate::surface::Surface;

/// Alpha of the dark fill painted over the previous frame.
pub const FADE_ALPHA: f32 = 0.08;

/// Per-frame chance that a column past the bottom edge restarts at the top.
pub const RESET_CHANCE: f64 = 0.025;

/// Rows advanced per frame at speed 1.0.
const BASE_ADVANCE: f32 = 1.2;

/// Slowest allowed advance, whatever the speed.
const MIN_ADVANCE: f32 = 0.5;

/// Rows a column advances per frame at the given speed.
pub fn fall_advance(speed: f32) -> f32 {
    (BASE_ADVANCE * speed).max(MIN_ADVANCE)
}

/// Fresh fall positions for a surface of the given size.
///
/// One column per whole glyph cell of width, each starting on a uniformly
/// random row in `[0, height / GLYPH_CELL)`.
pub fn init_columns(width: f32, height: f32, rng: &mut impl Rng) -> Vec<f32> {
    let count = (width / GLYPH_CELL).floor().max(0.0) as usize;
    let rows = height / GLYPH_CELL;
    (0..count)
        .map(|_| {
            if rows > 0.0 {
                rng.random_range(0.0..rows)
            } else {
                0.0
            }
        })
        .collect()
}

/// Next fall position of one column.
///
/// `roll` is a uniform sample in `[0, 1)`; a column whose head is past
/// `height` restarts at row 0 when `roll < RESET_CHANCE`.
pub fn step_column(position: f32, advance: f32, height: f32, roll: f64) -> f32 {
    let next = position + advance;
    if next * GLYPH_CELL > height && roll < RESET_CHANCE {
        0.0
    } else {
        next
    }
}

/// The code rain animation.
#[derive(Debug)]
pub struct CodeRain {
    settings: RainSettings,
    glyphs: &'static [char],
    columns: Vec<f32>,
    height: f32,
    rng: StdRng,
}

impl CodeRain {
    pub fn new(settings: RainSettings) -> Self {
        Self::with_rng(settings, StdRng::from_os_rng())
    }

    pub fn with_rng(settings: RainSettings, rng: StdRng) -> Self {
        Self {
            settings,
            glyphs: RAIN_GLYPHS,
            columns: Vec::new(),
            height: 0.0,
            rng,
        }
    }

    /// Replace the glyph alphabet. An empty alphabet is ignored.
    pub fn with_glyphs(mut self, glyphs: &'static [char]) -> Self {
        if !glyphs.is_empty() {
            self.glyphs = glyphs;
        }
        self
    }

    /// Start from explicit column positions on a surface of the given height.
    pub fn with_columns(mut self, columns: Vec<f32>, height: f32) -> Self {
        self.columns = columns;
        self.height = height;
        self
    }

    pub fn settings(&self) -> &RainSettings {
        &self.settings
    }

    /// Takes effect on the next frame.
    pub fn set_settings(&mut self, settings: RainSettings) {
        self.settings = settings;
    }

    /// Current fall positions, one per column.
    pub fn columns(&self) -> &[f32] {
        &self.columns
    }
}

impl Animation for CodeRain {
    fn name(&self) -> &'static str {
        "rain"
    }

    fn enabled(&self) -> bool {
        self.settings.enabled
    }

    fn initialize(&mut self, width: f32, height: f32) {
        self.columns = init_columns(width, height, &mut self.rng);
        self.height = height;
    }

    fn on_resize(&mut self, width: f32, height: f32) {
        self.initialize(width, height);
    }

    fn render_frame(&mut self, surface: &mut dyn Surface) {
        surface.fade(FADE_ALPHA);

        let advance = fall_advance(self.settings.speed);
        let color = self.settings.color;
        for (i, position) in self.columns.iter_mut().enumerate() {
            if let Some(&glyph) = self.glyphs.choose(&mut self.rng) {
                let at = Vec2::new(i as f32 * GLYPH_CELL, *position * GLYPH_CELL);
                surface.draw_glyph(glyph, at, color, true);
            }
            let roll: f64 = self.rng.random();
            *position = step_column(*position, advance, self.height, roll);
        }
    }
}

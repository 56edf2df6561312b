//! A surface that records draw calls instead of drawing.

use glam::Vec2;
use lumen_core::Rgb;

use crate::surface::Surface;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Fade(f32),
    Clear,
    Glyph {
        glyph: char,
        at: Vec2,
        color: Rgb,
        glow: bool,
    },
    Line {
        from: Vec2,
        to: Vec2,
        opacity: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        opacity: f32,
    },
}

#[derive(Debug)]
pub struct RecordingSurface {
    pub width: f32,
    pub height: f32,
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            calls: Vec::new(),
        }
    }

    pub fn lines(&self) -> Vec<&DrawCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Line { .. }))
            .collect()
    }

    pub fn glyphs(&self) -> Vec<&DrawCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Glyph { .. }))
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn fade(&mut self, alpha: f32) {
        self.calls.push(DrawCall::Fade(alpha));
    }

    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }

    fn draw_glyph(&mut self, glyph: char, at: Vec2, color: Rgb, glow: bool) {
        self.calls.push(DrawCall::Glyph {
            glyph,
            at,
            color,
            glow,
        });
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, _color: Rgb, opacity: f32) {
        self.calls.push(DrawCall::Line { from, to, opacity });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, _color: Rgb, opacity: f32) {
        self.calls.push(DrawCall::Circle {
            center,
            radius,
            opacity,
        });
    }
}

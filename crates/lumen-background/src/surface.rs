//! Drawing surfaces.
//!
//! Animations draw in surface units through the [`Surface`] trait. The
//! terminal backend is [`CellSurface`], where one cell covers
//! [`GLYPH_CELL`] × [`GLYPH_CELL`] units.

use std::f32::consts::PI;

use glam::Vec2;
use lumen_core::{GLYPH_CELL, Rgb};

/// Cells dimmer than this are dropped by [`Surface::fade`].
const VISIBILITY_FLOOR: f32 = 0.04;

/// Symbol used for filled circles.
const DOT: char = '•';

/// Operations an animation needs from its drawing target.
pub trait Surface {
    /// Width and height in surface units.
    fn size(&self) -> (f32, f32);

    /// Paint a translucent dark layer over everything drawn so far.
    fn fade(&mut self, alpha: f32);

    /// Erase everything.
    fn clear(&mut self);

    /// Draw one glyph with its top-left corner at `at`.
    fn draw_glyph(&mut self, glyph: char, at: Vec2, color: Rgb, glow: bool);

    /// Draw a straight line.
    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Rgb, opacity: f32);

    /// Draw a filled circle.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb, opacity: f32);
}

/// One lit terminal cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub symbol: char,
    pub color: Rgb,
    /// Remaining brightness, 0.0-1.0.
    pub intensity: f32,
    /// Drawn this frame with a glow.
    pub glow: bool,
}

/// A persistent grid of terminal cells.
#[derive(Debug, Clone, Default)]
pub struct CellSurface {
    cols: u16,
    rows: u16,
    cells: Vec<Option<Cell>>,
}

impl CellSurface {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            cells: vec![None; cols as usize * rows as usize],
        }
    }

    /// Change dimensions. Existing content is discarded.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        *self = Self::new(cols, rows);
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// True when there is nothing to draw on.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The lit cell at the given column and row, if any.
    pub fn cell(&self, col: u16, row: u16) -> Option<&Cell> {
        self.index(col as i64, row as i64)
            .and_then(|i| self.cells[i].as_ref())
    }

    /// Number of lit cells.
    pub fn lit(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    fn index(&self, col: i64, row: i64) -> Option<usize> {
        if col < 0 || row < 0 || col >= self.cols as i64 || row >= self.rows as i64 {
            return None;
        }
        Some(row as usize * self.cols as usize + col as usize)
    }

    /// Light a cell unless something brighter is already there.
    fn put(&mut self, col: i64, row: i64, cell: Cell) {
        let Some(i) = self.index(col, row) else {
            return;
        };
        match &self.cells[i] {
            Some(existing) if existing.intensity > cell.intensity => {}
            _ => self.cells[i] = Some(cell),
        }
    }
}

fn cell_of(point: Vec2) -> (i64, i64) {
    (
        (point.x / GLYPH_CELL).floor() as i64,
        (point.y / GLYPH_CELL).floor() as i64,
    )
}

/// Box-drawing symbol closest to the direction of a line.
fn line_symbol(delta: Vec2) -> char {
    let mut angle = delta.y.atan2(delta.x);
    if angle < 0.0 {
        angle += PI;
    }
    // y grows downward, so a positive slope runs top-left to bottom-right
    if !(PI / 8.0..7.0 * PI / 8.0).contains(&angle) {
        '─'
    } else if angle < 3.0 * PI / 8.0 {
        '╲'
    } else if angle < 5.0 * PI / 8.0 {
        '│'
    } else {
        '╱'
    }
}

impl Surface for CellSurface {
    fn size(&self) -> (f32, f32) {
        (
            self.cols as f32 * GLYPH_CELL,
            self.rows as f32 * GLYPH_CELL,
        )
    }

    fn fade(&mut self, alpha: f32) {
        let keep = 1.0 - alpha.clamp(0.0, 1.0);
        for slot in &mut self.cells {
            if let Some(cell) = slot {
                cell.intensity *= keep;
                cell.glow = false;
                if cell.intensity < VISIBILITY_FLOOR {
                    *slot = None;
                }
            }
        }
    }

    fn clear(&mut self) {
        self.cells.fill(None);
    }

    fn draw_glyph(&mut self, glyph: char, at: Vec2, color: Rgb, glow: bool) {
        let (col, row) = cell_of(at);
        self.put(
            col,
            row,
            Cell {
                symbol: glyph,
                color,
                intensity: 1.0,
                glow,
            },
        );
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Rgb, opacity: f32) {
        let delta = to - from;
        let symbol = line_symbol(delta);
        let span = delta / GLYPH_CELL;
        let steps = span.x.abs().max(span.y.abs()).ceil().max(1.0) as usize;

        let mut last = None;
        for step in 0..=steps {
            let point = from + delta * (step as f32 / steps as f32);
            let cell = cell_of(point);
            if last == Some(cell) {
                continue;
            }
            last = Some(cell);
            self.put(
                cell.0,
                cell.1,
                Cell {
                    symbol,
                    color,
                    intensity: opacity,
                    glow: false,
                },
            );
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb, opacity: f32) {
        let dot = Cell {
            symbol: DOT,
            color,
            intensity: opacity,
            glow: false,
        };
        let (col, row) = cell_of(center);
        self.put(col, row, dot);

        // Neighbouring cells only for circles larger than a cell
        let reach = (radius / GLYPH_CELL).ceil() as i64;
        for r in row - reach..=row + reach {
            for c in col - reach..=col + reach {
                if (c, r) == (col, row) {
                    continue;
                }
                let cell_center = Vec2::new(
                    (c as f32 + 0.5) * GLYPH_CELL,
                    (r as f32 + 0.5) * GLYPH_CELL,
                );
                if cell_center.distance(center) <= radius {
                    self.put(c, r, dot);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREEN: Rgb = Rgb::new(0, 200, 0);

    #[test]
    fn test_size_in_units() {
        let surface = CellSurface::new(10, 4);
        assert_eq!(surface.size(), (140.0, 56.0));
        assert!(!surface.is_empty());
        assert!(CellSurface::new(0, 4).is_empty());
        assert!(CellSurface::default().is_empty());
    }

    #[test]
    fn test_glyph_lands_in_its_cell() {
        let mut surface = CellSurface::new(5, 5);
        surface.draw_glyph('x', Vec2::new(2.0 * GLYPH_CELL, 3.5 * GLYPH_CELL), GREEN, true);
        let cell = surface.cell(2, 3).unwrap();
        assert_eq!(cell.symbol, 'x');
        assert!(cell.glow);
        assert_eq!(surface.lit(), 1);
    }

    #[test]
    fn test_off_surface_draws_are_ignored() {
        let mut surface = CellSurface::new(3, 3);
        surface.draw_glyph('x', Vec2::new(0.0, 10.0 * GLYPH_CELL), GREEN, false);
        surface.draw_glyph('x', Vec2::new(-1.0, 0.0), GREEN, false);
        assert_eq!(surface.lit(), 0);
    }

    #[test]
    fn test_fade_dims_and_eventually_drops() {
        let mut surface = CellSurface::new(1, 1);
        surface.draw_glyph('x', Vec2::ZERO, GREEN, true);
        surface.fade(0.5);
        let cell = surface.cell(0, 0).unwrap();
        assert!((cell.intensity - 0.5).abs() < 1e-6);
        assert!(!cell.glow);

        for _ in 0..10 {
            surface.fade(0.5);
        }
        assert!(surface.cell(0, 0).is_none());
    }

    #[test]
    fn test_clear_erases_everything() {
        let mut surface = CellSurface::new(4, 4);
        surface.draw_line(Vec2::ZERO, Vec2::new(55.0, 55.0), GREEN, 0.3);
        assert!(surface.lit() > 0);
        surface.clear();
        assert_eq!(surface.lit(), 0);
    }

    #[test]
    fn test_horizontal_line_covers_each_column() {
        let mut surface = CellSurface::new(6, 2);
        surface.draw_line(Vec2::new(1.0, 1.0), Vec2::new(5.0 * GLYPH_CELL + 1.0, 1.0), GREEN, 0.3);
        for col in 0..6 {
            assert_eq!(surface.cell(col, 0).map(|c| c.symbol), Some('─'));
        }
        assert_eq!(surface.lit(), 6);
    }

    #[test]
    fn test_line_symbols_follow_direction() {
        assert_eq!(line_symbol(Vec2::new(10.0, 0.0)), '─');
        assert_eq!(line_symbol(Vec2::new(-10.0, 1.0)), '─');
        assert_eq!(line_symbol(Vec2::new(0.0, 10.0)), '│');
        assert_eq!(line_symbol(Vec2::new(10.0, 10.0)), '╲');
        assert_eq!(line_symbol(Vec2::new(-10.0, -10.0)), '╲');
        assert_eq!(line_symbol(Vec2::new(10.0, -10.0)), '╱');
    }

    #[test]
    fn test_brighter_draw_wins() {
        let mut surface = CellSurface::new(2, 1);
        surface.fill_circle(Vec2::new(3.0, 3.0), 1.2, GREEN, 0.7);
        surface.draw_line(Vec2::ZERO, Vec2::new(20.0, 0.0), GREEN, 0.2);
        assert_eq!(surface.cell(0, 0).map(|c| c.symbol), Some(DOT));
        assert_eq!(surface.cell(1, 0).map(|c| c.symbol), Some('─'));
    }

    #[test]
    fn test_small_circle_lights_one_cell() {
        let mut surface = CellSurface::new(3, 3);
        surface.fill_circle(Vec2::new(21.0, 21.0), 1.2, GREEN, 0.7);
        assert_eq!(surface.lit(), 1);
        assert_eq!(surface.cell(1, 1).map(|c| c.intensity), Some(0.7));
    }

    #[test]
    fn test_resize_discards_content() {
        let mut surface = CellSurface::new(2, 2);
        surface.draw_glyph('x', Vec2::ZERO, GREEN, false);
        surface.resize(3, 1);
        assert_eq!((surface.cols(), surface.rows()), (3, 1));
        assert_eq!(surface.lit(), 0);
    }
}

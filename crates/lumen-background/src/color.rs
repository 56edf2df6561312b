//! Mapping lit cells to terminal styles.

use ratatui::style::{Modifier, Style};

use crate::surface::Cell;

/// Composited levels below this are left blank.
const MIN_VISIBLE: f32 = 0.03;

/// How far a glowing glyph is pushed toward white.
const GLOW_LIGHTEN: f32 = 0.35;

/// Terminal style for a cell on a layer of the given opacity.
///
/// There is no alpha in a terminal, so translucency becomes a darker
/// foreground over the (assumed dark) background.
pub fn cell_style(cell: &Cell, opacity: f32) -> Option<Style> {
    let level = cell.intensity * opacity;
    if level < MIN_VISIBLE {
        return None;
    }
    let style = if cell.glow {
        Style::new()
            .fg(cell.color.lighten(GLOW_LIGHTEN).scale(level).into())
            .add_modifier(Modifier::BOLD)
    } else {
        Style::new().fg(cell.color.scale(level).into())
    };
    Some(style)
}

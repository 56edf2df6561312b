//! The two pages drawn above the backdrop.

use chrono::{Datelike, Local};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Stylize},
    text::Line,
    widgets::Paragraph,
};

/// Which page is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Landing,
    Portfolio,
}

impl View {
    /// Switch to the other page.
    pub fn toggle(self) -> Self {
        match self {
            View::Landing => View::Portfolio,
            View::Portfolio => View::Landing,
        }
    }

    /// Whether the code rain belongs behind this page.
    pub fn wants_rain(self) -> bool {
        matches!(self, View::Landing)
    }

    /// Whether the node network belongs behind this page.
    pub fn wants_network(self) -> bool {
        true
    }
}

/// Portfolio entries: name and one-line description.
const PROJECTS: &[(&str, &str)] = &[
    ("lumen", "terminal landing page over code rain and a node graph"),
    ("driftnet", "tiny particle network renderer"),
    ("glyphfall", "configurable falling-glyph screensaver"),
];

/// Draw the page for `view` inside `area`.
pub fn render(frame: &mut Frame, area: Rect, view: View, accent: Color) {
    match view {
        View::Landing => render_landing(frame, area, accent),
        View::Portfolio => render_portfolio(frame, area, accent),
    }
}

fn render_landing(frame: &mut Frame, area: Rect, accent: Color) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),   // Top padding
        Constraint::Length(1), // Title
        Constraint::Length(1), // Spacing
        Constraint::Length(1), // Tagline
        Constraint::Fill(1),   // Bottom padding
        Constraint::Length(1), // Footer
    ])
    .split(area);

    // Styles go on spans, not the paragraph, so the backdrop around the
    // text keeps its own colors
    let title = Paragraph::new(Line::from("l u m e n".bold().fg(accent))).alignment(Alignment::Center);
    frame.render_widget(title, chunks[1]);

    let tagline = Paragraph::new(Line::from("software for screens large and small".gray()))
        .alignment(Alignment::Center);
    frame.render_widget(tagline, chunks[3]);

    frame.render_widget(footer(), chunks[5]);
}

fn render_portfolio(frame: &mut Frame, area: Rect, accent: Color) {
    let height = PROJECTS.len() as u16 + 2;
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .split(area);

    let mut lines = vec![Line::from("portfolio".bold().fg(accent)), Line::from("")];
    for &(name, about) in PROJECTS {
        lines.push(Line::from(vec![
            name.bold().fg(accent),
            "  ".into(),
            about.gray(),
        ]));
    }
    let list = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(list, chunks[1]);

    frame.render_widget(footer(), chunks[3]);
}

fn footer() -> Paragraph<'static> {
    let text = format!("© {} lumen", Local::now().year());
    Paragraph::new(Line::from(text.dark_gray())).alignment(Alignment::Center)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trip() {
        assert_eq!(View::Landing.toggle(), View::Portfolio);
        assert_eq!(View::Landing.toggle().toggle(), View::Landing);
    }

    #[test]
    fn test_layers_per_view() {
        assert!(View::Landing.wants_rain());
        assert!(View::Landing.wants_network());
        assert!(!View::Portfolio.wants_rain());
        assert!(View::Portfolio.wants_network());
    }
}

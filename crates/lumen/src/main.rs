use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{error, info};
use lumen_background::Backdrop;
use lumen_config::Config;
use lumen_core::{ColorTheme, Signal};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Size},
    style::{Color, Stylize},
    text::Line,
};

mod logging;
mod views;

use views::View;

/// Step applied by the speed keys.
const SPEED_STEP: f32 = 0.1;

/// Upper bound for the speed keys.
const MAX_SPEED: f32 = 5.0;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    logging::init();
    let config = Config::load()?;
    let terminal = ratatui::init();
    let result = App::new(config).run(terminal);
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Settings as loaded, updated by key presses.
    config: Config,
    /// Page currently shown.
    view: View,
    /// Current color theme.
    theme: ColorTheme,
    /// Terminal size as seen by the backdrop.
    viewport: Signal<Size>,
    /// Reduced-motion preference as seen by the backdrop.
    reduced_motion: Signal<bool>,
    /// Animated layers behind the page.
    backdrop: Backdrop,
    /// One-line feedback shown in the help bar.
    status: Option<String>,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config) -> Self {
        let viewport = Signal::new(Size::default());
        let reduced_motion = Signal::new(config.reduced_motion);
        let backdrop = Backdrop::new(config.rain, config.network, &viewport, &reduced_motion);
        Self {
            running: false,
            config,
            view: View::default(),
            theme: ColorTheme::default(),
            viewport,
            reduced_motion,
            backdrop,
            status: None,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.viewport.set(terminal.size()?);
        self.mount_view();

        let frame_interval = Duration::from_secs(1) / u32::from(self.config.fps.max(1));
        let mut last_tick = Instant::now();

        self.running = true;
        while self.running {
            terminal.draw(|frame| self.render(frame))?;
            let timeout = frame_interval.saturating_sub(last_tick.elapsed());
            self.handle_crossterm_events(timeout)?;
            if last_tick.elapsed() >= frame_interval {
                self.backdrop.tick();
                last_tick = Instant::now();
            }
        }
        info!("exiting");
        Ok(())
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        self.backdrop.render(frame);

        let accent: Color = self.backdrop.network_settings().color.into();
        let chunks = Layout::vertical([
            Constraint::Fill(1),   // Page
            Constraint::Length(1), // Help text
        ])
        .split(frame.area());

        views::render(frame, chunks[0], self.view, accent);

        let help = match &self.status {
            Some(status) => Line::from(status.clone().fg(accent)),
            None => Line::from(vec![
                "q".bold().fg(accent),
                " quit  ".dark_gray(),
                "tab".bold().fg(accent),
                " page  ".dark_gray(),
                "r/n".bold().fg(accent),
                " layers  ".dark_gray(),
                "m".bold().fg(accent),
                " motion  ".dark_gray(),
                "c".bold().fg(accent),
                " color  ".dark_gray(),
                "+/-".bold().fg(accent),
                " speed  ".dark_gray(),
                "s".bold().fg(accent),
                " save".dark_gray(),
            ]),
        };
        frame.render_widget(help.centered(), chunks[1]);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits at most `timeout` so frames keep their pace.
    fn handle_crossterm_events(&mut self, timeout: Duration) -> color_eyre::Result<()> {
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Resize(width, height) => self.viewport.set(Size::new(width, height)),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        self.status = None;
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Tab) => self.toggle_view(),
            (_, KeyCode::Char('r')) => self.toggle_rain(),
            (_, KeyCode::Char('n')) => self.toggle_network(),
            (_, KeyCode::Char('m')) => self.toggle_reduced_motion(),
            (_, KeyCode::Char('c')) => self.cycle_color_theme(),
            (_, KeyCode::Char('+') | KeyCode::Char('=')) => self.change_speed(SPEED_STEP),
            (_, KeyCode::Char('-')) => self.change_speed(-SPEED_STEP),
            (_, KeyCode::Char('s')) => self.save_config(),
            _ => {}
        }
    }

    /// Mount the layers the current page wants and unmount the rest.
    fn mount_view(&mut self) {
        if self.view.wants_rain() {
            self.backdrop.mount_rain();
        } else {
            self.backdrop.unmount_rain();
        }
        if self.view.wants_network() {
            self.backdrop.mount_network();
        } else {
            self.backdrop.unmount_network();
        }
    }

    /// Switch between the landing and portfolio pages.
    fn toggle_view(&mut self) {
        self.view = self.view.toggle();
        self.mount_view();
    }

    fn toggle_rain(&mut self) {
        self.config.rain.enabled = !self.config.rain.enabled;
        self.backdrop.set_rain_settings(self.config.rain);
    }

    fn toggle_network(&mut self) {
        self.config.network.enabled = !self.config.network.enabled;
        self.backdrop.set_network_settings(self.config.network);
    }

    fn toggle_reduced_motion(&mut self) {
        self.config.reduced_motion = !self.config.reduced_motion;
        self.reduced_motion.set(self.config.reduced_motion);
    }

    /// Cycle through preset color themes.
    fn cycle_color_theme(&mut self) {
        let theme = self.theme.next();
        self.theme = theme;
        self.config.rain.color = theme.rain_color();
        self.config.network.color = theme.network_color();
        self.backdrop.set_rain_settings(self.config.rain);
        self.backdrop.set_network_settings(self.config.network);
        self.status = Some(format!("theme: {}", theme.name()));
    }

    /// Nudge both layers' speed, keeping it within `[0, MAX_SPEED]`.
    fn change_speed(&mut self, delta: f32) {
        self.config.rain.speed = (self.config.rain.speed + delta).clamp(0.0, MAX_SPEED);
        self.config.network.speed = (self.config.network.speed + delta).clamp(0.0, MAX_SPEED);
        self.backdrop.set_rain_settings(self.config.rain);
        self.backdrop.set_network_settings(self.config.network);
        self.status = Some(format!(
            "speed: rain {:.1}, network {:.1}",
            self.config.rain.speed, self.config.network.speed
        ));
    }

    /// Write the current settings to the config file.
    fn save_config(&mut self) {
        self.status = Some(match self.config.save() {
            Ok(path) => format!("saved {}", path.display()),
            Err(e) => {
                error!("saving config failed: {e:#}");
                format!("save failed: {e}")
            }
        });
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

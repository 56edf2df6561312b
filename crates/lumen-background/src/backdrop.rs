//! Backdrop state management.

use log::{debug, info};
use lumen_core::{NetworkSettings, RainSettings, Signal, Subscription};
use ratatui::{
    Frame,
    layout::Size,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::animations::network::NodeNetwork;
use crate::animations::rain::CodeRain;
use crate::color::cell_style;
use crate::frame_loop::{Animation, FrameLoop};
use crate::scheduler::FrameScheduler;

/// Both backdrop layers, their scheduler, and the host signals they follow.
#[derive(Debug)]
pub struct Backdrop {
    /// Frame requests for both layers.
    scheduler: FrameScheduler,
    /// Code rain layer.
    rain: FrameLoop<CodeRain>,
    /// Node network layer.
    network: FrameLoop<NodeNetwork>,
    /// Whether the current view wants the rain.
    rain_mounted: bool,
    /// Whether the current view wants the network.
    network_mounted: bool,
    /// Host reduced-motion preference.
    reduced_motion: Signal<bool>,
    viewport_changes: Subscription<Size>,
    motion_changes: Subscription<bool>,
}

impl Backdrop {
    /// Create both layers sized to the current viewport. Nothing runs until
    /// a layer is mounted.
    pub fn new(
        rain: RainSettings,
        network: NetworkSettings,
        viewport: &Signal<Size>,
        reduced_motion: &Signal<bool>,
    ) -> Self {
        Self::with_animations(
            CodeRain::new(rain),
            NodeNetwork::new(network),
            viewport,
            reduced_motion,
        )
    }

    pub fn with_animations(
        rain: CodeRain,
        network: NodeNetwork,
        viewport: &Signal<Size>,
        reduced_motion: &Signal<bool>,
    ) -> Self {
        let mut scheduler = FrameScheduler::new();
        let size = viewport.current_value();

        let mut rain = FrameLoop::new(rain);
        rain.resize(size.width, size.height, &mut scheduler);
        let mut network = FrameLoop::new(network);
        network.resize(size.width, size.height, &mut scheduler);

        Self {
            scheduler,
            rain,
            network,
            rain_mounted: false,
            network_mounted: false,
            reduced_motion: reduced_motion.clone(),
            viewport_changes: viewport.subscribe(),
            motion_changes: reduced_motion.subscribe(),
        }
    }

    pub fn rain(&self) -> &FrameLoop<CodeRain> {
        &self.rain
    }

    pub fn network(&self) -> &FrameLoop<NodeNetwork> {
        &self.network
    }

    /// Outstanding frame requests across both layers.
    pub fn pending_frames(&self) -> usize {
        self.scheduler.pending()
    }

    pub fn mount_rain(&mut self) {
        if !self.rain_mounted {
            info!("mounting rain");
            self.rain_mounted = true;
            self.sync();
        }
    }

    pub fn unmount_rain(&mut self) {
        if self.rain_mounted {
            info!("unmounting rain");
            self.rain_mounted = false;
            self.sync();
        }
    }

    pub fn mount_network(&mut self) {
        if !self.network_mounted {
            info!("mounting network");
            self.network_mounted = true;
            self.sync();
        }
    }

    pub fn unmount_network(&mut self) {
        if self.network_mounted {
            info!("unmounting network");
            self.network_mounted = false;
            self.sync();
        }
    }

    pub fn rain_settings(&self) -> RainSettings {
        *self.rain.animation().settings()
    }

    pub fn network_settings(&self) -> NetworkSettings {
        *self.network.animation().settings()
    }

    /// Replace rain settings, starting or stopping the layer if `enabled` changed.
    pub fn set_rain_settings(&mut self, settings: RainSettings) {
        self.rain.animation_mut().set_settings(settings);
        self.sync();
    }

    /// Replace network settings, starting or stopping the layer if `enabled` changed.
    pub fn set_network_settings(&mut self, settings: NetworkSettings) {
        self.network.animation_mut().set_settings(settings);
        self.sync();
    }

    /// Apply host changes, then run every frame due on this refresh.
    ///
    /// Returns the number of frames rendered.
    pub fn tick(&mut self) -> usize {
        let resized = self.apply_viewport();
        let motion = self.motion_changes.changed();
        if let Some(reduced) = motion {
            info!("reduced motion {}", if reduced { "on" } else { "off" });
        }
        if resized || motion.is_some() {
            self.sync();
        }

        let mut rendered = 0;
        for handle in self.scheduler.take_due() {
            if self.rain.on_frame(handle, &mut self.scheduler)
                || self.network.on_frame(handle, &mut self.scheduler)
            {
                rendered += 1;
            }
        }
        rendered
    }

    /// Start or stop each layer to match mount state, settings and motion.
    fn sync(&mut self) {
        // A viewport set before the next tick must size the surfaces first,
        // otherwise a mount right after startup sees 0x0 cells
        self.apply_viewport();
        let reduced = self.reduced_motion.current_value();
        reconcile(&mut self.rain, self.rain_mounted, reduced, &mut self.scheduler);
        reconcile(
            &mut self.network,
            self.network_mounted,
            reduced,
            &mut self.scheduler,
        );
    }

    /// Resize both layers if the viewport changed since last looked at.
    fn apply_viewport(&mut self) -> bool {
        let Some(size) = self.viewport_changes.changed() else {
            return false;
        };
        debug!("viewport now {}x{}", size.width, size.height);
        self.rain.resize(size.width, size.height, &mut self.scheduler);
        self.network.resize(size.width, size.height, &mut self.scheduler);
        true
    }

    /// Render the running layers to the frame, network above rain.
    pub fn render(&self, frame: &mut Frame) {
        if !self.rain.is_running() && !self.network.is_running() {
            return;
        }

        let area = frame.area();
        let lines: Vec<Line> = (0..area.height)
            .map(|y| {
                let spans: Vec<Span> = (0..area.width).map(|x| self.render_char(x, y)).collect();
                Line::from(spans)
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), area);
    }

    /// Render a single backdrop character at the given position.
    fn render_char(&self, x: u16, y: u16) -> Span<'static> {
        let network_opacity = self.network.animation().settings().opacity;
        let rain_opacity = self.rain.animation().settings().opacity;

        layer_char(&self.network, network_opacity, x, y)
            .or_else(|| layer_char(&self.rain, rain_opacity, x, y))
            .map(|(symbol, style)| Span::styled(symbol.to_string(), style))
            .unwrap_or_else(|| Span::raw(" "))
    }
}

fn reconcile<A: Animation>(
    frame_loop: &mut FrameLoop<A>,
    mounted: bool,
    reduced_motion: bool,
    scheduler: &mut FrameScheduler,
) {
    if mounted && !reduced_motion && frame_loop.animation().enabled() {
        frame_loop.start(scheduler, reduced_motion);
    } else {
        frame_loop.stop(scheduler);
    }
}

fn layer_char<A: Animation>(
    frame_loop: &FrameLoop<A>,
    opacity: f32,
    x: u16,
    y: u16,
) -> Option<(char, Style)> {
    if !frame_loop.is_running() {
        return None;
    }
    let cell = frame_loop.surface().cell(x, y)?;
    cell_style(cell, opacity).map(|style| (cell.symbol, style))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use lumen_core::GLYPH_CELL;
    use rand::{SeedableRng, rngs::StdRng};
    use ratatui::{Terminal, backend::TestBackend};

    struct Host {
        viewport: Signal<Size>,
        reduced_motion: Signal<bool>,
    }

    impl Host {
        fn new(width: u16, height: u16, reduced_motion: bool) -> Self {
            Self {
                viewport: Signal::new(Size::new(width, height)),
                reduced_motion: Signal::new(reduced_motion),
            }
        }

        fn backdrop(&self) -> Backdrop {
            Backdrop::with_animations(
                CodeRain::with_rng(RainSettings::default(), StdRng::seed_from_u64(1)),
                NodeNetwork::with_rng(NetworkSettings::default(), StdRng::seed_from_u64(2)),
                &self.viewport,
                &self.reduced_motion,
            )
        }
    }

    fn mounted(host: &Host) -> Backdrop {
        let mut backdrop = host.backdrop();
        backdrop.mount_rain();
        backdrop.mount_network();
        backdrop
    }

    #[test]
    fn test_nothing_runs_until_mounted() {
        let host = Host::new(40, 20, false);
        let mut backdrop = host.backdrop();
        assert_eq!(backdrop.tick(), 0);
        assert_eq!(backdrop.pending_frames(), 0);
    }

    #[test]
    fn test_mounted_layers_render_every_tick() {
        let host = Host::new(40, 20, false);
        let mut backdrop = mounted(&host);
        for _ in 0..5 {
            assert_eq!(backdrop.tick(), 2);
        }
        assert_eq!(backdrop.rain().frames_rendered(), 5);
        assert_eq!(backdrop.network().frames_rendered(), 5);
        assert_eq!(backdrop.pending_frames(), 2);
    }

    #[test]
    fn test_reduced_motion_suppresses_all_frames() {
        let host = Host::new(40, 20, true);
        let mut backdrop = mounted(&host);
        for _ in 0..10 {
            assert_eq!(backdrop.tick(), 0);
        }
        assert_eq!(backdrop.pending_frames(), 0);
        assert_eq!(backdrop.rain().surface().lit(), 0);
        assert_eq!(backdrop.network().surface().lit(), 0);
    }

    #[test]
    fn test_reduced_motion_toggle_stops_and_restarts() {
        let host = Host::new(40, 20, false);
        let mut backdrop = mounted(&host);
        backdrop.tick();

        host.reduced_motion.set(true);
        assert_eq!(backdrop.tick(), 0);
        assert!(!backdrop.rain().is_running());
        assert!(!backdrop.network().is_running());

        host.reduced_motion.set(false);
        backdrop.tick();
        assert!(backdrop.rain().is_running());
        assert_eq!(backdrop.tick(), 2);
    }

    #[test]
    fn test_resize_rebuilds_rain_but_keeps_nodes() {
        let host = Host::new(40, 20, false);
        let mut backdrop = mounted(&host);
        backdrop.tick();
        assert_eq!(backdrop.rain().animation().columns().len(), 40);
        let nodes = backdrop.network().animation().nodes().len();

        host.viewport.set(Size::new(25, 10));
        assert_eq!(backdrop.tick(), 2);
        assert_eq!(backdrop.rain().animation().columns().len(), 25);
        assert_eq!(backdrop.network().animation().nodes().len(), nodes);
        assert_eq!(
            backdrop.network().animation().bounds(),
            Vec2::new(25.0 * GLYPH_CELL, 10.0 * GLYPH_CELL)
        );
        assert_eq!(backdrop.pending_frames(), 2);
    }

    #[test]
    fn test_empty_viewport_waits_for_a_real_one() {
        let host = Host::new(0, 0, false);
        let mut backdrop = mounted(&host);
        assert_eq!(backdrop.tick(), 0);
        assert!(!backdrop.rain().is_running());

        host.viewport.set(Size::new(30, 12));
        assert_eq!(backdrop.tick(), 2);
    }

    #[test]
    fn test_mount_sees_viewport_set_before_any_tick() {
        let host = Host::new(0, 0, false);
        let mut backdrop = host.backdrop();
        host.viewport.set(Size::new(30, 12));
        backdrop.mount_rain();
        backdrop.mount_network();

        assert!(backdrop.rain().is_running());
        assert!(backdrop.network().is_running());
        assert_eq!(backdrop.pending_frames(), 2);
        assert_eq!(backdrop.rain().surface().cols(), 30);
        assert_eq!(backdrop.tick(), 2);
    }

    #[test]
    fn test_unmount_rain_leaves_network_running() {
        let host = Host::new(40, 20, false);
        let mut backdrop = mounted(&host);
        backdrop.tick();
        backdrop.unmount_rain();
        backdrop.unmount_rain();
        assert_eq!(backdrop.tick(), 1);
        assert!(!backdrop.rain().is_running());
        assert!(backdrop.network().is_running());
    }

    #[test]
    fn test_disabling_in_settings_stops_layer() {
        let host = Host::new(40, 20, false);
        let mut backdrop = mounted(&host);
        let settings = RainSettings {
            enabled: false,
            ..backdrop.rain_settings()
        };
        backdrop.set_rain_settings(settings);
        assert!(!backdrop.rain().is_running());

        backdrop.set_rain_settings(RainSettings {
            enabled: true,
            ..settings
        });
        assert!(backdrop.rain().is_running());
    }

    #[test]
    fn test_render_draws_network_above_rain() {
        let host = Host::new(10, 4, false);
        let rain = CodeRain::with_rng(
            RainSettings {
                opacity: 1.0,
                ..Default::default()
            },
            StdRng::seed_from_u64(4),
        );
        let network = NodeNetwork::with_rng(
            NetworkSettings {
                node_count: 1,
                opacity: 1.0,
                ..Default::default()
            },
            StdRng::seed_from_u64(5),
        );
        let mut backdrop =
            Backdrop::with_animations(rain, network, &host.viewport, &host.reduced_motion);
        backdrop.mount_rain();
        backdrop.mount_network();
        backdrop.tick();

        let node = backdrop.network().animation().nodes()[0];
        let col = (node.position.x / GLYPH_CELL).floor().min(9.0) as u16;
        let row = (node.position.y / GLYPH_CELL).floor().min(3.0) as u16;

        let mut terminal = Terminal::new(TestBackend::new(10, 4)).unwrap();
        terminal.draw(|frame| backdrop.render(frame)).unwrap();
        let buffer = terminal.backend().buffer();

        if backdrop.network().surface().cell(col, row).is_some() {
            assert_eq!(buffer[(col, row)].symbol(), "•");
        }
        let lit = (0..10u16)
            .flat_map(|x| (0..4u16).map(move |y| (x, y)))
            .filter(|&(x, y)| buffer[(x, y)].symbol() != " ")
            .count();
        assert!(lit > 0);
    }

    #[test]
    fn test_render_without_running_layers_is_blank() {
        let host = Host::new(6, 3, true);
        let mut backdrop = mounted(&host);
        backdrop.tick();

        let mut terminal = Terminal::new(TestBackend::new(6, 3)).unwrap();
        terminal.draw(|frame| backdrop.render(frame)).unwrap();
        let buffer = terminal.backend().buffer();
        for x in 0..6u16 {
            for y in 0..3u16 {
                assert_eq!(buffer[(x, y)].symbol(), " ");
            }
        }
    }
}

//! Self-rescheduling frame loops.

use log::{debug, info, warn};

use crate::scheduler::{FrameHandle, FrameScheduler};
use crate::surface::{CellSurface, Surface};

/// A frame-driven animation with owned state.
pub trait Animation {
    /// Name used in log messages.
    fn name(&self) -> &'static str;

    /// Whether the animation is allowed to run.
    fn enabled(&self) -> bool;

    /// Build fresh state for a surface of the given size (surface units).
    fn initialize(&mut self, width: f32, height: f32);

    /// React to a new surface size.
    fn on_resize(&mut self, width: f32, height: f32);

    /// Advance one frame and draw it.
    fn render_frame(&mut self, surface: &mut dyn Surface);
}

/// Runs one [`Animation`] against its own surface, one frame per refresh.
///
/// At most one frame request is outstanding at any time.
#[derive(Debug)]
pub struct FrameLoop<A> {
    animation: A,
    surface: CellSurface,
    pending: Option<FrameHandle>,
    frames: u64,
}

impl<A: Animation> FrameLoop<A> {
    pub fn new(animation: A) -> Self {
        Self {
            animation,
            surface: CellSurface::default(),
            pending: None,
            frames: 0,
        }
    }

    pub fn animation(&self) -> &A {
        &self.animation
    }

    pub fn animation_mut(&mut self) -> &mut A {
        &mut self.animation
    }

    pub fn surface(&self) -> &CellSurface {
        &self.surface
    }

    /// A frame is scheduled.
    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Frames rendered since creation.
    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    /// Initialize the animation and schedule its first frame.
    ///
    /// Nothing is scheduled when the animation is disabled, when reduced
    /// motion is requested, or when there is no surface to draw on. Returns
    /// whether the loop is running afterwards.
    pub fn start(&mut self, scheduler: &mut FrameScheduler, reduced_motion: bool) -> bool {
        let name = self.animation.name();
        if self.is_running() {
            return true;
        }
        if !self.animation.enabled() {
            debug!("{name}: disabled, not starting");
            return false;
        }
        if reduced_motion {
            debug!("{name}: reduced motion requested, not starting");
            return false;
        }
        if self.surface.is_empty() {
            warn!(
                "{name}: no drawing surface ({}x{} cells), not starting",
                self.surface.cols(),
                self.surface.rows()
            );
            return false;
        }

        self.surface.clear();
        let (width, height) = self.surface.size();
        self.animation.initialize(width, height);
        self.pending = Some(scheduler.request_frame());
        info!("{name}: started on {width}x{height}");
        true
    }

    /// Cancel the outstanding frame. Returns whether one was pending.
    pub fn stop(&mut self, scheduler: &mut FrameScheduler) -> bool {
        match self.pending.take() {
            Some(handle) => {
                scheduler.cancel_frame(handle);
                info!("{}: stopped", self.animation.name());
                true
            }
            None => false,
        }
    }

    /// Handle a due frame. Handles owned by other loops are refused.
    pub fn on_frame(&mut self, handle: FrameHandle, scheduler: &mut FrameScheduler) -> bool {
        if self.pending != Some(handle) {
            return false;
        }
        self.animation.render_frame(&mut self.surface);
        self.frames += 1;
        self.pending = Some(scheduler.request_frame());
        true
    }

    /// Adopt a new viewport size in terminal cells.
    ///
    /// A running loop is stopped before the surface changes and
    /// rescheduled afterwards, so no stale frame can draw on the new surface.
    pub fn resize(&mut self, cols: u16, rows: u16, scheduler: &mut FrameScheduler) {
        if (cols, rows) == (self.surface.cols(), self.surface.rows()) {
            return;
        }
        let name = self.animation.name();
        let was_running = match self.pending.take() {
            Some(handle) => {
                scheduler.cancel_frame(handle);
                true
            }
            None => false,
        };

        self.surface.resize(cols, rows);
        let (width, height) = self.surface.size();
        self.animation.on_resize(width, height);
        debug!("{name}: resized to {cols}x{rows} cells");

        if was_running {
            if self.surface.is_empty() {
                warn!("{name}: surface collapsed to zero area, stopping");
            } else {
                self.pending = Some(scheduler.request_frame());
            }
        }
    }
}

//! Backdrop animations for lumen.
//!
//! Two independent layers, code rain and a drifting node network, each
//! driven by its own [`FrameLoop`] over its own [`CellSurface`]. The
//! [`Backdrop`] owns both loops plus the shared [`FrameScheduler`] and
//! composites them beneath page content.

mod animations;
mod backdrop;
mod chars;
mod color;
mod frame_loop;
mod scheduler;
mod surface;

#[cfg(test)]
mod testing;

pub use animations::network::{self, Link, Node, NodeNetwork};
pub use animations::rain::{self, CodeRain};
pub use backdrop::Backdrop;
pub use chars::RAIN_GLYPHS;
pub use frame_loop::{Animation, FrameLoop};
pub use scheduler::{FrameHandle, FrameScheduler};
pub use surface::{Cell, CellSurface, Surface};

//! Per-display-frame callback scheduling.
//!
//! A stand-in for the host's "call me on the next refresh" primitive. Loops
//! request a frame, the application drains due handles once per refresh,
//! and each handle is delivered at most once.

/// Identifies one requested frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

/// Pending frame callbacks for the next display refresh.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    next_id: u64,
    pending: Vec<FrameHandle>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for a callback on the next refresh.
    pub fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id);
        self.next_id += 1;
        self.pending.push(handle);
        handle
    }

    /// Withdraw a request. Unknown or already delivered handles are ignored.
    pub fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.retain(|h| *h != handle);
    }

    /// Drain every handle due on this refresh, in request order.
    ///
    /// Frames requested while handling these land on the next refresh.
    pub fn take_due(&mut self) -> Vec<FrameHandle> {
        std::mem::take(&mut self.pending)
    }

    /// Number of outstanding requests.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

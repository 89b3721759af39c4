//! Frame-driven animation loops.
//!
//! Every loop re-schedules itself one display frame at a time through a
//! [`FrameScheduler`] and keeps its own [`FrameHandle`] so it can be cancelled:
//! - [`IdleRotation`]: slow decorative rotation, runs until stopped
//! - [`SpinDriver`]: time-bounded eased spin that settles on a final angle
//! - [`Celebration`]: falling confetti over a separate overlay surface
//! - [`Countdown`]: one-per-second claim timer shown with the result

mod celebration;
mod countdown;
mod easing;
mod idle;
mod spin;

pub use celebration::{Celebration, CelebrationConfig, Particle};
pub use countdown::{Countdown, CountdownEvent};
pub use easing::ease_out_quint;
pub use idle::IdleRotation;
pub use spin::{sample_total_rotation, SpinDriver, SpinPhase};

use crate::canvas::Canvas;
use crate::wheel::{Segment, WheelRenderer};

/// Identifies one scheduled frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

/// The loop a frame callback belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameOwner {
    Idle,
    Spin,
    Celebration,
}

/// A pending frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledFrame {
    pub handle: FrameHandle,
    pub owner: FrameOwner,
}

/// Capability to run a callback on the next display frame.
pub trait FrameScheduler {
    /// Schedule `owner` to be ticked on the next frame.
    fn request_frame(&mut self, owner: FrameOwner) -> FrameHandle;

    /// Cancel a pending callback. Returns `false` if it already fired or was
    /// already cancelled; that is never an error.
    fn cancel_frame(&mut self, handle: FrameHandle) -> bool;
}

/// Deterministic scheduler: callbacks queue up until the host drains them
/// with [`take_due`](Self::take_due) once per display frame.
#[derive(Debug, Default)]
pub struct FrameQueue {
    next_id: u64,
    pending: Vec<ScheduledFrame>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain every callback due on this frame. Callbacks requested while the
    /// drained set is being processed run on the following frame.
    pub fn take_due(&mut self) -> Vec<ScheduledFrame> {
        std::mem::take(&mut self.pending)
    }

    pub fn is_pending(&self, owner: FrameOwner) -> bool {
        self.pending.iter().any(|f| f.owner == owner)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self, owner: FrameOwner) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending.push(ScheduledFrame { handle, owner });
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|f| f.handle != handle);
        self.pending.len() != before
    }
}

/// The wheel surface together with what to draw on it.
pub struct WheelTarget<'a> {
    pub canvas: &'a mut dyn Canvas,
    pub segments: &'a [Segment],
    pub renderer: &'a WheelRenderer,
}

impl WheelTarget<'_> {
    /// Draw the wheel at `rotation` radians.
    pub fn draw(&mut self, rotation: f32) {
        self.renderer.render(self.canvas, self.segments, rotation);
    }
}

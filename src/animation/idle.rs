//! Decorative idle rotation.

use super::{FrameHandle, FrameOwner, FrameScheduler, WheelTarget};
use std::f32::consts::TAU;

/// Slow continuous rotation shown while no spin is in progress.
///
/// Running exactly when a frame callback is pending; never stops on its own.
#[derive(Debug)]
pub struct IdleRotation {
    step: f32,
    angle: f32,
    handle: Option<FrameHandle>,
}

impl IdleRotation {
    /// Create a stopped loop advancing `step` radians per frame.
    pub fn new(step: f32) -> Self {
        Self {
            step,
            angle: 0.0,
            handle: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Current rotation in radians.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn handle(&self) -> Option<FrameHandle> {
        self.handle
    }

    /// Start rotating from angle 0. No-op when already running.
    pub fn start(&mut self, scheduler: &mut dyn FrameScheduler) {
        if self.is_running() {
            return;
        }
        self.angle = 0.0;
        self.handle = Some(scheduler.request_frame(FrameOwner::Idle));
        log::debug!("Idle rotation started");
    }

    /// Stop and cancel the pending frame. Safe to call when stopped.
    pub fn stop(&mut self, scheduler: &mut dyn FrameScheduler) {
        if let Some(handle) = self.handle.take() {
            scheduler.cancel_frame(handle);
            log::debug!("Idle rotation stopped at {:.3} rad", self.angle);
        }
    }

    /// Advance one frame. Returns `false` for a stale or cancelled handle.
    ///
    /// A missing target skips drawing for this frame only.
    pub fn tick(
        &mut self,
        handle: FrameHandle,
        scheduler: &mut dyn FrameScheduler,
        target: Option<WheelTarget<'_>>,
    ) -> bool {
        if self.handle != Some(handle) {
            return false;
        }

        self.angle = (self.angle + self.step).rem_euclid(TAU);
        match target {
            Some(mut target) => target.draw(self.angle),
            None => log::trace!("Idle frame skipped: wheel surface unavailable"),
        }

        self.handle = Some(scheduler.request_frame(FrameOwner::Idle));
        true
    }
}

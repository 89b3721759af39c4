//! Time-bounded spin animation.

use super::{ease_out_quint, FrameHandle, FrameOwner, FrameScheduler, WheelTarget};
use crate::error::{Result, WheelError};
use rand::Rng;

/// Spin lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinPhase {
    Idle,
    Spinning,
    Settled,
}

/// Random total rotation in degrees: `base + U[0, 1) * extra`.
///
/// With the default 1800° base every spin makes at least five full turns and
/// only the sub-turn remainder is random.
pub fn sample_total_rotation<R: Rng>(rng: &mut R, base: f64, extra: f64) -> f64 {
    rng.gen::<f64>() * extra + base
}

/// Drives a spin from rest to its final angle over a fixed wall-clock duration.
///
/// Progress is measured against elapsed time, not frame count, so the spin
/// always takes `duration_ms` regardless of frame rate.
#[derive(Debug)]
pub struct SpinDriver {
    phase: SpinPhase,
    duration_ms: f64,
    start_ms: f64,
    total_rotation_degrees: f64,
    current_angle_degrees: f64,
    handle: Option<FrameHandle>,
}

impl SpinDriver {
    pub fn new(duration_ms: f64) -> Self {
        Self {
            phase: SpinPhase::Idle,
            duration_ms,
            start_ms: 0.0,
            total_rotation_degrees: 0.0,
            current_angle_degrees: 0.0,
            handle: None,
        }
    }

    pub fn phase(&self) -> SpinPhase {
        self.phase
    }

    pub fn is_spinning(&self) -> bool {
        self.phase == SpinPhase::Spinning
    }

    pub fn handle(&self) -> Option<FrameHandle> {
        self.handle
    }

    pub fn total_rotation_degrees(&self) -> f64 {
        self.total_rotation_degrees
    }

    pub fn current_angle_degrees(&self) -> f64 {
        self.current_angle_degrees
    }

    pub fn current_angle_radians(&self) -> f32 {
        self.current_angle_degrees.to_radians() as f32
    }

    /// Progress ratio in [0, 1] at time `now_ms`.
    pub fn progress_at(&self, now_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Begin a spin of `total_rotation_degrees` starting at `now_ms`.
    ///
    /// Rejected while a spin is already running; a settled or idle driver
    /// may start again.
    pub fn start(
        &mut self,
        now_ms: f64,
        total_rotation_degrees: f64,
        scheduler: &mut dyn FrameScheduler,
    ) -> Result<()> {
        if self.is_spinning() {
            return Err(WheelError::SPIN_IN_PROGRESS);
        }
        self.phase = SpinPhase::Spinning;
        self.start_ms = now_ms;
        self.total_rotation_degrees = total_rotation_degrees;
        self.current_angle_degrees = 0.0;
        self.handle = Some(scheduler.request_frame(FrameOwner::Spin));
        log::info!(
            "Spin started: {:.1} degrees over {} ms",
            total_rotation_degrees,
            self.duration_ms
        );
        Ok(())
    }

    /// Abandon an in-flight spin. Settled state is kept; safe to repeat.
    pub fn cancel(&mut self, scheduler: &mut dyn FrameScheduler) {
        if let Some(handle) = self.handle.take() {
            scheduler.cancel_frame(handle);
        }
        if self.phase == SpinPhase::Spinning {
            self.phase = SpinPhase::Idle;
            log::debug!("Spin cancelled at {:.1} degrees", self.current_angle_degrees);
        }
    }

    /// Advance one frame.
    ///
    /// Returns the final angle in degrees on the frame that settles the spin,
    /// exactly once; every other frame (and any stale handle) returns `None`.
    pub fn tick(
        &mut self,
        handle: FrameHandle,
        now_ms: f64,
        scheduler: &mut dyn FrameScheduler,
        target: Option<WheelTarget<'_>>,
    ) -> Option<f64> {
        if self.handle != Some(handle) || !self.is_spinning() {
            return None;
        }
        self.handle = None;

        let progress = self.progress_at(now_ms);
        self.current_angle_degrees = self.total_rotation_degrees * ease_out_quint(progress);

        match target {
            Some(mut target) => target.draw(self.current_angle_radians()),
            None => log::trace!("Spin frame skipped: wheel surface unavailable"),
        }

        if progress < 1.0 {
            self.handle = Some(scheduler.request_frame(FrameOwner::Spin));
            return None;
        }

        self.phase = SpinPhase::Settled;
        log::info!("Spin settled at {:.2} degrees", self.current_angle_degrees);
        Some(self.current_angle_degrees)
    }
}

//! The prize wheel widget: roster, wheel surface, spin, result and overlay.
//!
//! [`PrizeWheel`] is driven by its host once per display frame through
//! [`PrizeWheel::frame`], which hands in whichever drawing surfaces currently
//! exist. Everything the host needs to react to comes back as [`WheelEvent`]s.

use crate::animation::{
    sample_total_rotation, Celebration, Countdown, CountdownEvent, FrameOwner, FrameQueue,
    IdleRotation, SpinDriver, SpinPhase, WheelTarget,
};
use crate::canvas::Canvas;
use crate::config::WheelConfig;
use crate::error::{Result, WheelError};
use crate::roster::Roster;
use crate::wheel::{resolve_winner, Segment, SegmentCache, WheelRenderer};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Notifications produced by [`PrizeWheel::frame`].
#[derive(Debug, Clone, PartialEq)]
pub enum WheelEvent {
    SpinStarted,
    /// The spin came to rest; `index` and `label` identify the winner.
    SpinSettled {
        index: usize,
        label: String,
        angle_degrees: f64,
    },
    CountdownTick(u32),
    CountdownExpired,
    CelebrationEnded,
}

/// The winner currently shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultDialog {
    pub index: usize,
    pub label: String,
}

/// Whichever loop currently owns the wheel surface.
#[derive(Debug)]
enum ActiveAnimation {
    Idle(IdleRotation),
    Spin(SpinDriver),
}

/// Prize wheel controller.
///
/// Idle rotation and spin share one slot, so at most one of them is ever
/// scheduled against the wheel surface. The celebration overlay draws on its
/// own surface and runs alongside either.
pub struct PrizeWheel {
    config: WheelConfig,
    roster: Roster,
    cache: SegmentCache,
    renderer: WheelRenderer,
    queue: FrameQueue,
    active: Option<ActiveAnimation>,
    rotation: f32,
    needs_redraw: bool,
    celebration: Celebration,
    celebration_until: Option<f64>,
    countdown: Countdown,
    result: Option<ResultDialog>,
    pending_events: Vec<WheelEvent>,
    rng: StdRng,
}

impl PrizeWheel {
    /// Widget with the sample roster.
    pub fn new(config: WheelConfig) -> Self {
        Self::with_roster(config, Roster::with_default_names())
    }

    pub fn with_roster(config: WheelConfig, roster: Roster) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let celebration = Celebration::new(config.to_celebration_config());
        let countdown = Countdown::new(config.claim_seconds);
        Self {
            config,
            roster,
            cache: SegmentCache::new(),
            renderer: WheelRenderer::default(),
            queue: FrameQueue::new(),
            active: None,
            rotation: 0.0,
            needs_redraw: true,
            celebration,
            celebration_until: None,
            countdown,
            result: None,
            pending_events: Vec::new(),
            rng,
        }
    }

    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The frame callbacks waiting for the next display frame.
    pub fn scheduler(&self) -> &FrameQueue {
        &self.queue
    }

    /// Current wheel rotation in radians.
    pub fn current_rotation(&self) -> f32 {
        self.rotation
    }

    pub fn is_idle_running(&self) -> bool {
        matches!(&self.active, Some(ActiveAnimation::Idle(idle)) if idle.is_running())
    }

    pub fn spin_phase(&self) -> SpinPhase {
        match &self.active {
            Some(ActiveAnimation::Spin(spin)) => spin.phase(),
            _ => SpinPhase::Idle,
        }
    }

    pub fn is_spinning(&self) -> bool {
        self.spin_phase() == SpinPhase::Spinning
    }

    pub fn is_celebrating(&self) -> bool {
        self.celebration.is_active()
    }

    pub fn celebration(&self) -> &Celebration {
        &self.celebration
    }

    pub fn result(&self) -> Option<&ResultDialog> {
        self.result.as_ref()
    }

    pub fn countdown_remaining(&self) -> Option<u32> {
        self.countdown.remaining()
    }

    /// Segments for the current roster.
    pub fn segments(&mut self) -> Result<&[Segment]> {
        self.cache.segments(&self.roster, self.config.radius())
    }

    /// Replace the participant list.
    pub fn set_labels<I, S>(&mut self, labels: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.guard_roster_edit()?;
        self.roster.replace_all(labels)?;
        self.roster_changed();
        Ok(())
    }

    pub fn push_label(&mut self, label: &str) -> Result<()> {
        self.guard_roster_edit()?;
        self.roster.push(label)?;
        self.roster_changed();
        Ok(())
    }

    /// Remove every entry equal to `label`; returns how many were removed.
    pub fn remove_label(&mut self, label: &str) -> Result<usize> {
        self.guard_roster_edit()?;
        let removed = self.roster.remove_label(label);
        if removed > 0 {
            self.roster_changed();
        }
        Ok(removed)
    }

    pub fn remove_at(&mut self, index: usize) -> Result<Option<String>> {
        self.guard_roster_edit()?;
        let removed = self.roster.remove_at(index);
        if removed.is_some() {
            self.roster_changed();
        }
        Ok(removed)
    }

    /// Start the idle rotation from angle 0. No-op when it is already running.
    pub fn start_idle(&mut self) -> Result<()> {
        if self.is_idle_running() {
            return Ok(());
        }
        if self.is_spinning() {
            return Err(WheelError::SPIN_IN_PROGRESS);
        }
        self.cancel_active();
        let mut idle = IdleRotation::new(self.config.idle_step);
        idle.start(&mut self.queue);
        self.active = Some(ActiveAnimation::Idle(idle));
        Ok(())
    }

    /// Stop the idle rotation. Safe to call when it is not running.
    pub fn stop_idle(&mut self) {
        if let Some(ActiveAnimation::Idle(idle)) = &mut self.active {
            idle.stop(&mut self.queue);
            self.active = None;
        }
    }

    /// Start a spin at `now_ms`.
    ///
    /// Rejected with [`WheelError::InvalidState`] when the roster is empty or a
    /// spin is already running; the running spin is left untouched.
    pub fn spin(&mut self, now_ms: f64) -> Result<()> {
        if self.roster.is_empty() {
            return Err(WheelError::NO_PARTICIPANTS);
        }
        if self.is_spinning() {
            return Err(WheelError::SPIN_IN_PROGRESS);
        }

        self.cancel_active();
        self.countdown.clear();
        self.result = None;

        let total = sample_total_rotation(
            &mut self.rng,
            self.config.base_rotation_degrees,
            self.config.random_rotation_degrees,
        );
        let mut driver = SpinDriver::new(self.config.spin_duration_ms);
        driver.start(now_ms, total, &mut self.queue)?;
        self.active = Some(ActiveAnimation::Spin(driver));
        self.pending_events.push(WheelEvent::SpinStarted);
        Ok(())
    }

    /// Run one display frame at `now_ms`.
    ///
    /// Either surface may be `None` (not mounted yet, or already gone); the
    /// loops skip drawing for this frame and keep running.
    pub fn frame(
        &mut self,
        now_ms: f64,
        mut wheel: Option<&mut (dyn Canvas + '_)>,
        mut overlay: Option<&mut (dyn Canvas + '_)>,
    ) -> Vec<WheelEvent> {
        let mut events = std::mem::take(&mut self.pending_events);
        let mut settled = None;
        let mut wheel_drawn = false;
        let radius = self.config.radius();

        for frame in self.queue.take_due() {
            match frame.owner {
                FrameOwner::Idle | FrameOwner::Spin => {
                    let segments = self.cache.segments(&self.roster, radius).ok();
                    let target = match (wheel.as_deref_mut(), segments) {
                        (Some(canvas), Some(segments)) => Some(WheelTarget {
                            canvas,
                            segments,
                            renderer: &self.renderer,
                        }),
                        _ => None,
                    };
                    let has_target = target.is_some();

                    match self.active.as_mut() {
                        Some(ActiveAnimation::Idle(idle)) => {
                            if idle.tick(frame.handle, &mut self.queue, target) {
                                self.rotation = idle.angle();
                                wheel_drawn |= has_target;
                            }
                        }
                        Some(ActiveAnimation::Spin(spin)) => {
                            let was_spinning = spin.handle() == Some(frame.handle);
                            let result = spin.tick(frame.handle, now_ms, &mut self.queue, target);
                            if result.is_some() {
                                settled = result;
                            }
                            if was_spinning {
                                self.rotation = spin.current_angle_radians();
                                wheel_drawn |= has_target;
                            }
                        }
                        None => {}
                    }
                }
                FrameOwner::Celebration => {
                    self.celebration.tick(
                        frame.handle,
                        &mut self.queue,
                        overlay.as_deref_mut(),
                        &mut self.rng,
                    );
                }
            }
        }

        if let Some(angle) = settled {
            self.settle(now_ms, angle, &mut events);
        }

        if matches!(self.celebration_until, Some(until) if now_ms >= until) {
            self.celebration_until = None;
            self.celebration.stop(&mut self.queue);
            if let Some(canvas) = overlay.as_deref_mut() {
                canvas.clear();
            }
            log::debug!("Celebration window ended");
            events.push(WheelEvent::CelebrationEnded);
        }

        events.extend(self.countdown.poll(now_ms).into_iter().map(|event| match event {
            CountdownEvent::Tick(remaining) => WheelEvent::CountdownTick(remaining),
            CountdownEvent::Expired => WheelEvent::CountdownExpired,
        }));

        if wheel_drawn {
            self.needs_redraw = false;
        } else if self.needs_redraw {
            if let Some(canvas) = wheel.as_deref_mut() {
                self.redraw(canvas);
                self.needs_redraw = false;
            }
        }

        events
    }

    /// Draw the wheel at its current rotation.
    ///
    /// Fails with [`WheelError::InvalidState`] when there are no participants.
    pub fn render(&mut self, canvas: &mut dyn Canvas) -> Result<()> {
        let segments = self.cache.segments(&self.roster, self.config.radius())?;
        self.renderer.render(canvas, segments, self.rotation);
        Ok(())
    }

    /// Dismiss the result dialog, keeping the winner on the wheel.
    pub fn close_result(&mut self) {
        if self.result.take().is_some() {
            self.countdown.clear();
            self.after_dismiss();
        }
    }

    /// Dismiss the result dialog and drop the winner from the roster.
    ///
    /// Every entry equal to the winning label is removed. Returns how many.
    pub fn remove_winner(&mut self) -> usize {
        let Some(result) = self.result.take() else {
            return 0;
        };
        self.countdown.clear();
        let removed = self.roster.remove_label(&result.label);
        if removed > 0 {
            self.roster_changed();
        }
        log::info!("Removed winner {:?} ({} entries)", result.label, removed);
        self.after_dismiss();
        removed
    }

    /// Cancel every loop and timer. No frame callbacks remain afterwards.
    pub fn teardown(&mut self) {
        self.cancel_active();
        self.celebration.stop(&mut self.queue);
        self.celebration_until = None;
        self.countdown.clear();
        self.result = None;
        self.pending_events.clear();
        log::debug!("Prize wheel torn down");
    }

    fn settle(&mut self, now_ms: f64, angle: f64, events: &mut Vec<WheelEvent>) {
        let index = match resolve_winner(angle, self.roster.len()) {
            Ok(index) => index,
            Err(err) => {
                log::warn!("Could not resolve winner: {}", err);
                return;
            }
        };
        let label = self.roster.get(index).unwrap_or_default().to_string();
        log::info!("Winner: #{} {:?}", index, label);

        self.result = Some(ResultDialog {
            index,
            label: label.clone(),
        });
        self.celebration.start(&mut self.queue, &mut self.rng);
        self.celebration_until = Some(now_ms + self.config.celebration_ms);
        self.countdown.start(now_ms);

        events.push(WheelEvent::SpinSettled {
            index,
            label,
            angle_degrees: angle,
        });
    }

    fn after_dismiss(&mut self) {
        if self.config.resume_idle_after_dismiss && !self.is_spinning() {
            if let Err(err) = self.start_idle() {
                log::warn!("Idle rotation not resumed: {}", err);
            }
        }
    }

    fn cancel_active(&mut self) {
        match self.active.take() {
            Some(ActiveAnimation::Idle(mut idle)) => idle.stop(&mut self.queue),
            Some(ActiveAnimation::Spin(mut spin)) => spin.cancel(&mut self.queue),
            None => {}
        }
    }

    fn guard_roster_edit(&self) -> Result<()> {
        if self.is_spinning() {
            return Err(WheelError::SPIN_IN_PROGRESS);
        }
        Ok(())
    }

    fn roster_changed(&mut self) {
        self.cache.invalidate();
        self.needs_redraw = true;
    }

    fn redraw(&mut self, canvas: &mut dyn Canvas) {
        match self.cache.segments(&self.roster, self.config.radius()) {
            Ok(segments) => self.renderer.render(canvas, segments, self.rotation),
            Err(_) => canvas.clear(),
        }
    }
}

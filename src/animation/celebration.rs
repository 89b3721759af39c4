//! Confetti overlay shown while the winner is announced.

use super::{FrameHandle, FrameOwner, FrameScheduler};
use crate::canvas::Canvas;
use crate::config::CONFETTI_PALETTE;
use image::Rgba;
use rand::Rng;

/// Overlay dimensions and particle budget.
#[derive(Debug, Clone, PartialEq)]
pub struct CelebrationConfig {
    pub width: f32,
    pub height: f32,
    pub particle_count: usize,
}

impl Default for CelebrationConfig {
    fn default() -> Self {
        Self {
            width: 1320.0,
            height: 580.0,
            particle_count: 100,
        }
    }
}

/// A falling confetti dot.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    /// Radius in pixels, in [2, 7).
    pub size: f32,
    /// Downward speed in pixels per frame, in [1, 5).
    pub speed_y: f32,
    pub color: Rgba<u8>,
}

impl Particle {
    /// Random particle anywhere on a `width` x `height` surface.
    pub fn random<R: Rng>(rng: &mut R, width: f32, height: f32) -> Self {
        Self {
            x: rng.gen::<f32>() * width,
            y: rng.gen::<f32>() * height,
            size: rng.gen_range(2.0..7.0),
            speed_y: rng.gen_range(1.0..5.0),
            color: CONFETTI_PALETTE[rng.gen_range(0..CONFETTI_PALETTE.len())],
        }
    }

    /// Fall one frame; past the bottom edge, re-enter at the top at a new x.
    pub fn advance<R: Rng>(&mut self, rng: &mut R, width: f32, height: f32) {
        self.y += self.speed_y;
        if self.y > height {
            self.y = 0.0;
            self.x = rng.gen::<f32>() * width;
        }
    }
}

/// Particle animation over its own overlay surface.
///
/// Active exactly when a frame callback is pending. Particles exist only
/// while active and are dropped on [`stop`](Self::stop).
#[derive(Debug)]
pub struct Celebration {
    config: CelebrationConfig,
    particles: Vec<Particle>,
    handle: Option<FrameHandle>,
}

impl Celebration {
    pub fn new(config: CelebrationConfig) -> Self {
        Self {
            config,
            particles: Vec::new(),
            handle: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn config(&self) -> &CelebrationConfig {
        &self.config
    }

    /// Seed a fresh batch of particles and start animating.
    ///
    /// Restarting an active overlay cancels its pending frame first.
    pub fn start<R: Rng>(&mut self, scheduler: &mut dyn FrameScheduler, rng: &mut R) {
        self.stop(scheduler);
        let CelebrationConfig {
            width,
            height,
            particle_count,
        } = self.config;
        self.particles = (0..particle_count)
            .map(|_| Particle::random(rng, width, height))
            .collect();
        self.handle = Some(scheduler.request_frame(FrameOwner::Celebration));
        log::debug!("Celebration started with {} particles", particle_count);
    }

    /// Cancel the pending frame and drop all particles. Safe to repeat.
    pub fn stop(&mut self, scheduler: &mut dyn FrameScheduler) {
        if let Some(handle) = self.handle.take() {
            scheduler.cancel_frame(handle);
            log::debug!("Celebration stopped");
        }
        self.particles.clear();
    }

    /// Move every particle one frame.
    pub fn step<R: Rng>(&mut self, rng: &mut R) {
        let (width, height) = (self.config.width, self.config.height);
        for particle in &mut self.particles {
            particle.advance(rng, width, height);
        }
    }

    /// Advance and redraw one frame. Returns `false` for a stale handle.
    pub fn tick<R: Rng>(
        &mut self,
        handle: FrameHandle,
        scheduler: &mut dyn FrameScheduler,
        canvas: Option<&mut (dyn Canvas + '_)>,
        rng: &mut R,
    ) -> bool {
        if self.handle != Some(handle) {
            return false;
        }

        self.step(rng);
        match canvas {
            Some(canvas) => {
                canvas.clear();
                for p in &self.particles {
                    canvas.fill_circle([p.x, p.y], p.size, p.color);
                }
            }
            None => log::trace!("Celebration frame skipped: overlay surface unavailable"),
        }

        self.handle = Some(scheduler.request_frame(FrameOwner::Celebration));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::FrameQueue;
    use crate::canvas::CommandRecorder;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_seeds_configured_particle_count() {
        let mut queue = FrameQueue::new();
        let mut rng = StdRng::seed_from_u64(1);
        let mut celebration = Celebration::new(CelebrationConfig::default());
        celebration.start(&mut queue, &mut rng);
        assert_eq!(celebration.particles().len(), 100);
        for p in celebration.particles() {
            assert!((0.0..1320.0).contains(&p.x));
            assert!((0.0..580.0).contains(&p.y));
            assert!((2.0..7.0).contains(&p.size));
            assert!((1.0..5.0).contains(&p.speed_y));
            assert!(CONFETTI_PALETTE.contains(&p.color));
        }
    }

    #[test]
    fn test_particles_wrap_within_height() {
        let mut rng = StdRng::seed_from_u64(2);
        let config = CelebrationConfig {
            width: 200.0,
            height: 50.0,
            particle_count: 40,
        };
        let mut queue = FrameQueue::new();
        let mut celebration = Celebration::new(config);
        celebration.start(&mut queue, &mut rng);
        for _ in 0..500 {
            celebration.step(&mut rng);
            for p in celebration.particles() {
                assert!(p.y >= 0.0 && p.y <= 50.0, "y out of range: {}", p.y);
            }
        }
    }

    #[test]
    fn test_tick_draws_each_particle() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut queue = FrameQueue::new();
        let mut canvas = CommandRecorder::new(1320, 580);
        let mut celebration = Celebration::new(CelebrationConfig::default());
        celebration.start(&mut queue, &mut rng);

        let frame = queue.take_due()[0];
        let surface: &mut dyn Canvas = &mut canvas;
        assert!(celebration.tick(frame.handle, &mut queue, Some(surface), &mut rng));
        assert_eq!(canvas.frame_count(), 1);
        assert_eq!(canvas.last_frame().len(), 101);
        assert!(queue.is_pending(FrameOwner::Celebration));
    }

    #[test]
    fn test_stop_clears_particles_and_cancels() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut queue = FrameQueue::new();
        let mut celebration = Celebration::new(CelebrationConfig::default());
        celebration.start(&mut queue, &mut rng);
        let handle = queue.take_due()[0].handle;
        celebration.stop(&mut queue);
        celebration.stop(&mut queue);

        assert!(!celebration.is_active());
        assert!(celebration.particles().is_empty());
        assert!(!celebration.tick(handle, &mut queue, None, &mut rng));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_restart_reseeds() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut queue = FrameQueue::new();
        let mut celebration = Celebration::new(CelebrationConfig::default());
        celebration.start(&mut queue, &mut rng);
        celebration.start(&mut queue, &mut rng);
        assert_eq!(celebration.particles().len(), 100);
        assert_eq!(queue.len(), 1);
    }
}

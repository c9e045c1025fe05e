//! Background particle animation.
//!
//! [`ParticleAnimator`] owns the particles and advances them one frame per
//! call to [`ParticleAnimator::frame`]. Drawing goes through [`Surface`], so
//! the same loop renders into the window's pixel buffer or a test recorder.

mod surface;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::time::MissedTickBehavior;

pub use surface::{PixelSurface, Surface};

pub const PARTICLE_COUNT: usize = 50;
pub const PARTICLE_COLOR: [u8; 3] = [255, 255, 255];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    /// Displacement per frame.
    pub vx: f64,
    pub vy: f64,
    /// Circle radius.
    pub size: f64,
    pub opacity: f64,
}

impl Particle {
    /// Uniform position inside `bounds`, velocity in [-1, 1] per axis, size in
    /// [1, 4], opacity in [0.1, 0.6].
    pub fn random<R: Rng + ?Sized>(rng: &mut R, bounds: Bounds) -> Self {
        Self {
            x: rng.gen::<f64>() * bounds.width,
            y: rng.gen::<f64>() * bounds.height,
            vx: rng.gen_range(-1.0..=1.0),
            vy: rng.gen_range(-1.0..=1.0),
            size: rng.gen_range(1.0..=4.0),
            opacity: rng.gen_range(0.1..=0.6),
        }
    }

    /// Moves by one frame. A velocity component flips sign when the new
    /// position is outside the bounds on that axis; the position itself is
    /// left where it landed.
    pub fn step(&mut self, bounds: Bounds) {
        self.x += self.vx;
        self.y += self.vy;

        if self.x < 0.0 || self.x > bounds.width {
            self.vx = -self.vx;
        }
        if self.y < 0.0 || self.y > bounds.height {
            self.vy = -self.vy;
        }
    }
}

/// Cloneable stop signal for a running animator.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorState {
    Uninitialized,
    Running,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Drawn,
    /// `start` has not been called yet.
    Idle,
    Stopped,
}

#[derive(Debug)]
pub struct ParticleAnimator {
    state: AnimatorState,
    particles: Vec<Particle>,
    bounds: Bounds,
    stop: StopHandle,
}

impl Default for ParticleAnimator {
    fn default() -> Self {
        Self::new()
    }
}

impl ParticleAnimator {
    pub fn new() -> Self {
        Self {
            state: AnimatorState::Uninitialized,
            particles: Vec::new(),
            bounds: Bounds::new(0.0, 0.0),
            stop: StopHandle::default(),
        }
    }

    /// Spawns the particles and enters `Running`. Only the first call has an
    /// effect.
    pub fn start<R: Rng + ?Sized>(&mut self, rng: &mut R, bounds: Bounds) {
        if self.state != AnimatorState::Uninitialized {
            tracing::warn!(state = ?self.state, "particle animator already started");
            return;
        }

        self.bounds = bounds;
        self.particles = (0..PARTICLE_COUNT)
            .map(|_| Particle::random(&mut *rng, bounds))
            .collect();
        self.state = AnimatorState::Running;
        tracing::debug!(
            width = bounds.width,
            height = bounds.height,
            count = PARTICLE_COUNT,
            "particle animator running"
        );
    }

    pub fn state(&self) -> AnimatorState {
        if self.stop.is_stopped() {
            AnimatorState::Stopped
        } else {
            self.state
        }
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// New drawing bounds. Particles keep their positions, so density follows
    /// the viewport size.
    pub fn resize(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) -> FrameOutcome {
        if self.stop.is_stopped() {
            self.state = AnimatorState::Stopped;
        }

        match self.state {
            AnimatorState::Uninitialized => FrameOutcome::Idle,
            AnimatorState::Stopped => FrameOutcome::Stopped,
            AnimatorState::Running => {
                surface.clear();
                for particle in &mut self.particles {
                    particle.step(self.bounds);
                    surface.fill_circle(
                        particle.x,
                        particle.y,
                        particle.size,
                        PARTICLE_COLOR,
                        particle.opacity,
                    );
                }
                FrameOutcome::Drawn
            }
        }
    }

    /// Headless driver: draws a frame every `period` until the stop handle
    /// fires. Hosts with their own frame timer (the window) call
    /// [`frame`](Self::frame) from it instead. Returns immediately if the
    /// animator was never started.
    pub async fn drive<S: Surface + ?Sized>(&mut self, surface: &mut S, period: Duration) {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            if self.frame(surface) != FrameOutcome::Drawn {
                break;
            }
        }
        tracing::debug!(state = ?self.state, "particle loop finished");
    }
}
